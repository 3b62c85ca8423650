//! Database repositories
//!
//! Provides the data access layer for database operations.

pub mod blog;
pub mod message;
pub mod user;

pub use blog::{BlogRecord, BlogRepository, CommentRecord, NewBlog, NewComment, UpdateBlog};
pub use message::{MessageRecord, MessageRepository, NewMessage};
pub use user::{UpdateUser, UserRecord, UserRepository};
