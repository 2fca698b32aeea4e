use anyhow::Context;
use acervo_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load Acervo settings")?;
    acervo_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.url,
        "acervo-app bootstrap starting"
    );

    acervo_app::bootstrap::serve(&settings).await
}
