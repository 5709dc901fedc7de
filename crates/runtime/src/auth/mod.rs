//! Credential handling: password hashing and bearer tokens.

mod error;
mod password;
mod token;

pub use error::AuthError;
pub use password::PasswordHasher;
pub use token::{Claims, TokenIssuer, parse_bearer};
