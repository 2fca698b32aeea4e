use std::sync::Arc;

use acervo_authz::{PasswordHasher, TokenService};
use acervo_db::DbPool;

/// Router state shared by every handler.
///
/// Built once at startup from the loaded settings; cloning only bumps
/// reference counts.
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub tokens: Arc<TokenService>,
    pub passwords: PasswordHasher,
}

impl AppState {
    pub fn new(db: DbPool, tokens: TokenService) -> Self {
        Self {
            db,
            tokens: Arc::new(tokens),
            passwords: PasswordHasher::new(),
        }
    }
}
