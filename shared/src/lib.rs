//! Taskbox Shared Library
//!
//! This crate contains the request/response types, validation helpers,
//! and error enums shared between the backend and its clients.

pub mod errors;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
