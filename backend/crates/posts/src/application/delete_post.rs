//! Delete Post Use Case

use std::sync::Arc;

use accounts::domain::value_object::user_id::UserId;

use crate::domain::repository::PostRepository;
use crate::domain::value_object::post_id::PostId;
use crate::error::{PostsError, PostsResult};

/// Delete post use case
pub struct DeletePostUseCase<P>
where
    P: PostRepository,
{
    repo: Arc<P>,
}

impl<P> DeletePostUseCase<P>
where
    P: PostRepository,
{
    pub fn new(repo: Arc<P>) -> Self {
        Self { repo }
    }

    /// Delete a post; only its author may do so
    pub async fn execute(&self, actor: UserId, post_id: PostId) -> PostsResult<()> {
        let post = self
            .repo
            .find_by_id(post_id)
            .await?
            .ok_or(PostsError::PostNotFound)?;

        if !post.is_authored_by(actor) {
            return Err(PostsError::NotPostAuthor);
        }

        if !self.repo.delete(post_id).await? {
            return Err(PostsError::PostNotFound);
        }

        tracing::info!(post_id = %post_id, "Post deleted");

        Ok(())
    }
}
