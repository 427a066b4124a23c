//! Like Post Use Case
//!
//! A user may like a post at most once. The fast-path check reads the
//! post; the append itself is conditional inside the store, so two
//! concurrent likes from the same user still produce a single entry.

use std::sync::Arc;

use accounts::domain::value_object::user_id::UserId;

use crate::domain::repository::PostRepository;
use crate::domain::value_object::post_id::PostId;
use crate::error::{PostsError, PostsResult};

/// Like post use case
pub struct LikePostUseCase<P>
where
    P: PostRepository,
{
    repo: Arc<P>,
}

impl<P> LikePostUseCase<P>
where
    P: PostRepository,
{
    pub fn new(repo: Arc<P>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, actor: UserId, post_id: PostId) -> PostsResult<()> {
        let post = self
            .repo
            .find_by_id(post_id)
            .await?
            .ok_or(PostsError::PostNotFound)?;

        if post.has_like(actor) {
            return Err(PostsError::AlreadyLiked);
        }

        if !self.repo.append_like(post_id, actor).await? {
            return Err(PostsError::AlreadyLiked);
        }

        tracing::info!(
            post_id = %post_id,
            user_id = %actor,
            "Post liked"
        );

        Ok(())
    }
}
