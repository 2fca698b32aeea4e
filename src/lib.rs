//! Acervo application library
//!
//! Book, category and user modules built on the Acervo kernel, plus the
//! bootstrap sequence shared by the server binary and the CLI.

pub mod auth;
pub mod bootstrap;
pub mod modules;
pub mod state;
pub mod utils;

pub use bootstrap::{build_app, build_registry};
pub use state::AppState;
