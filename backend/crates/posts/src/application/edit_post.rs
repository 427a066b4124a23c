//! Edit Post Use Case
//!
//! An oddity of this API, kept for client compatibility: the edit route
//! refuses to touch a post the actor has already liked, reusing the
//! duplicate-like guard.

use std::sync::Arc;

use accounts::domain::value_object::user_id::UserId;

use crate::domain::entity::post::{Post, PostEdit};
use crate::domain::repository::PostRepository;
use crate::domain::value_object::post_id::PostId;
use crate::error::{PostsError, PostsResult};

/// Edit post use case
pub struct EditPostUseCase<P>
where
    P: PostRepository,
{
    repo: Arc<P>,
}

impl<P> EditPostUseCase<P>
where
    P: PostRepository,
{
    pub fn new(repo: Arc<P>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        actor: UserId,
        post_id: PostId,
        edit: PostEdit,
    ) -> PostsResult<Post> {
        let mut post = self
            .repo
            .find_by_id(post_id)
            .await?
            .ok_or(PostsError::PostNotFound)?;

        if post.has_like(actor) {
            return Err(PostsError::AlreadyLiked);
        }

        post.apply_edit(edit);
        self.repo.update(&post).await?;

        tracing::info!(post_id = %post_id, "Post edited");

        Ok(post)
    }
}
