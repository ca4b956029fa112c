//! Error types shared across the Taskbox crates

use thiserror::Error;

/// Authentication error types
///
/// Deliberately coarse: the backend maps all of these to the same
/// user-visible 401 so failures cannot be told apart from outside.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Missing token")]
    MissingToken,
}
