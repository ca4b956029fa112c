//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod todo;
pub mod user;

pub use todo::{TodoRecord, TodoRepository, UpdateTodo};
pub use user::{TokenEntry, UserRecord, UserRepository};
