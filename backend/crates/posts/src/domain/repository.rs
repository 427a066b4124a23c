//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use accounts::domain::value_object::user_id::UserId;

use crate::domain::entity::post::{Comment, FeedPost, LikeEntry, Post};
use crate::domain::value_object::post_id::PostId;
use crate::error::PostsResult;

/// Post repository trait
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    /// Create a new post
    async fn create(&self, post: &Post) -> PostsResult<()>;

    /// Find post by ID
    async fn find_by_id(&self, post_id: PostId) -> PostsResult<Option<Post>>;

    /// Update post (editable fields)
    async fn update(&self, post: &Post) -> PostsResult<()>;

    /// Delete a post. Returns false when no such post exists.
    async fn delete(&self, post_id: PostId) -> PostsResult<bool>;

    /// List posts by a single author, newest first, with author data
    async fn list_by_author(&self, author_id: UserId) -> PostsResult<Vec<FeedPost>>;

    /// List all posts, newest first, with author data
    async fn list_all(&self) -> PostsResult<Vec<FeedPost>>;

    /// Conditionally append a like.
    ///
    /// The append only happens when `user_id` is not yet present, checked
    /// by the store itself, so concurrent duplicates cannot both land.
    /// Returns false when the like was already there (or the post is gone).
    async fn append_like(&self, post_id: PostId, user_id: UserId) -> PostsResult<bool>;

    /// Append a comment unconditionally.
    ///
    /// Returns false when the post does not exist.
    async fn append_comment(&self, post_id: PostId, comment: &Comment) -> PostsResult<bool>;

    /// Resolve a post's like list to user ids + display names.
    ///
    /// Returns None when the post does not exist. Likes whose user has
    /// since been deleted are silently omitted.
    async fn likes_with_names(&self, post_id: PostId) -> PostsResult<Option<Vec<LikeEntry>>>;
}
