//! Business logic services
//!
//! Services validate inputs (first violation wins), enforce ownership
//! inline, and coordinate the repositories.

pub mod blog;
pub mod message;
pub mod user;

pub use blog::BlogService;
pub use message::MessageService;
pub use user::UserService;
