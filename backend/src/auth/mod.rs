//! Authentication module
//!
//! Provides argon2 password hashing, signed session tokens, and the
//! request guard that resolves a bearer token to an account.

mod middleware;
mod password;
mod token;

pub use middleware::AuthUser;
pub use password::PasswordService;
pub use token::{DecodeError, TokenClaims, TokenCodec, ACCESS_AUTH};
