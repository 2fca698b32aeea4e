pub mod books;
pub mod categories;
pub mod home;
pub mod users;

use acervo_kernel::ModuleRegistry;

use crate::state::AppState;

/// Register all project-specific modules with the registry
///
/// Migrations run in registration order, so `categories` precedes `books`
/// whose table references it.
pub fn register_all(registry: &mut ModuleRegistry<AppState>) -> anyhow::Result<()> {
    registry.register(home::create_module())?;
    registry.register(users::create_module())?;
    registry.register(categories::create_module())?;
    registry.register(books::create_module())?;
    Ok(())
}
