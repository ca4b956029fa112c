//! Business logic services
//!
//! Services sit between the HTTP routes and the repositories: they
//! validate input, enforce the authentication rules, and translate
//! repository results into API errors.

pub mod todo;
pub mod user;

pub use todo::TodoService;
pub use user::UserService;
