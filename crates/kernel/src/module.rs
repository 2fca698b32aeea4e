use async_trait::async_trait;
use axum::Router;

use crate::settings::Settings;

/// Borrowed view of startup state handed to lifecycle hooks
pub struct InitCtx<'a> {
    pub settings: &'a Settings,
}

/// One schema step owned by a module.
///
/// `up` is plain SQL and may hold several statements. The ledger key is
/// `(module name, id)`, so ids only need to be unique within a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Migration {
    pub id: &'static str,
    pub up: &'static str,
}

/// A feature area of the service: its routes, schema and API docs.
///
/// `S` is the router state every handler of the application extracts.
/// Lifecycle: `init` for all modules, then migrations, then `start`; `stop`
/// runs in reverse registration order on shutdown.
#[async_trait]
pub trait Module<S = ()>: Sync + Send
where
    S: Clone + Send + Sync + 'static,
{
    /// Registry key; also namespaces the module's migrations
    fn name(&self) -> &'static str;

    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Routes with absolute paths, merged at the root of the application
    fn routes(&self) -> Router<S> {
        Router::new()
    }

    /// OpenAPI fragment holding `paths` and `components.schemas`
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    /// Schema steps, applied in slice order
    fn migrations(&self) -> &'static [Migration] {
        &[]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
