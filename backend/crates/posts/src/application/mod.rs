//! Application Layer
//!
//! Use cases and application services.

pub mod comment_post;
pub mod create_post;
pub mod delete_post;
pub mod edit_post;
pub mod feed;
pub mod like_post;

// Re-exports
pub use comment_post::CommentPostUseCase;
pub use create_post::{CreatePostInput, CreatePostUseCase};
pub use delete_post::DeletePostUseCase;
pub use edit_post::EditPostUseCase;
pub use feed::FeedUseCase;
pub use like_post::LikePostUseCase;
