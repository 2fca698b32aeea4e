//! Authentication primitives: Argon2id password hashing and HS256 access
//! tokens carrying the username as subject.

pub mod error;
pub mod password;
pub mod token;

pub use error::AuthError;
pub use password::{PasswordHasher, PLACEHOLDER_HASH};
pub use token::{Claims, IssuedToken, TokenService};
