//! SQLite persistence for Acervo: pool construction and the migration runner
//! that applies module-contributed schema changes.

pub mod error;
pub mod migrate;
pub mod pool;

pub use error::DbError;
pub use migrate::migrate;
pub use pool::{create_memory_pool, create_pool, DbPool};
