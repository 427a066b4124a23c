//! Feed Use Case
//!
//! Post reads: single post, per-author feed, global feed, like listing.
//! Empty feeds surface as `NoPosts` (404 on the wire) rather than empty
//! lists; clients depend on that status.

use std::sync::Arc;

use accounts::domain::value_object::user_id::UserId;

use crate::domain::entity::post::{FeedPost, LikeEntry, Post};
use crate::domain::repository::PostRepository;
use crate::domain::value_object::post_id::PostId;
use crate::error::{PostsError, PostsResult};

/// Feed use case
pub struct FeedUseCase<P>
where
    P: PostRepository,
{
    repo: Arc<P>,
}

impl<P> FeedUseCase<P>
where
    P: PostRepository,
{
    pub fn new(repo: Arc<P>) -> Self {
        Self { repo }
    }

    /// Fetch a single post by id
    pub async fn get_post(&self, post_id: PostId) -> PostsResult<Post> {
        self.repo
            .find_by_id(post_id)
            .await?
            .ok_or(PostsError::PostNotFound)
    }

    /// Posts by the authenticated user only
    pub async fn my_posts(&self, actor: UserId) -> PostsResult<Vec<FeedPost>> {
        let posts = self.repo.list_by_author(actor).await?;
        if posts.is_empty() {
            return Err(PostsError::NoPosts);
        }
        Ok(posts)
    }

    /// All posts
    pub async fn all_posts(&self) -> PostsResult<Vec<FeedPost>> {
        let posts = self.repo.list_all().await?;
        if posts.is_empty() {
            return Err(PostsError::NoPosts);
        }
        Ok(posts)
    }

    /// A post's like list resolved to display names
    pub async fn likes(&self, post_id: PostId) -> PostsResult<Vec<LikeEntry>> {
        self.repo
            .likes_with_names(post_id)
            .await?
            .ok_or(PostsError::PostNotFound)
    }
}
