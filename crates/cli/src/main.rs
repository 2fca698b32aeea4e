//! `acervo` command-line entrypoint.
//!
//! - `serve`: run the HTTP service (default when no subcommand is given)
//! - `migrate`: apply pending schema migrations and exit

use acervo_kernel::settings::Settings;
use anyhow::Context;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "acervo", about = "Book catalogue service", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server.
    Serve,
    /// Apply pending database migrations and exit.
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().context("failed to load Acervo settings")?;
    acervo_telemetry::init(&settings.telemetry)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => acervo_app::bootstrap::serve(&settings).await,
        Command::Migrate => {
            let applied = acervo_app::bootstrap::run_migrations(&settings).await?;
            tracing::info!(applied, db = %settings.database.url, "migrations complete");
            Ok(())
        }
    }
}
