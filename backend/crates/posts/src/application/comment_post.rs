//! Comment Post Use Case
//!
//! Comments are append-only and deliberately not idempotent: submitting
//! the same text twice creates two entries. The route is public, so the
//! commenting user comes from the request body, not from a token.

use std::sync::Arc;

use accounts::domain::value_object::user_id::UserId;

use crate::domain::entity::post::{Comment, Post};
use crate::domain::repository::PostRepository;
use crate::domain::value_object::post_id::PostId;
use crate::error::{PostsError, PostsResult};

/// Comment post use case
pub struct CommentPostUseCase<P>
where
    P: PostRepository,
{
    repo: Arc<P>,
}

impl<P> CommentPostUseCase<P>
where
    P: PostRepository,
{
    pub fn new(repo: Arc<P>) -> Self {
        Self { repo }
    }

    /// Append a comment and return the post including it
    pub async fn execute(
        &self,
        author_id: UserId,
        post_id: PostId,
        text: String,
    ) -> PostsResult<Post> {
        if text.trim().is_empty() {
            return Err(PostsError::Validation(
                "Comment text cannot be empty".to_string(),
            ));
        }

        let mut post = self
            .repo
            .find_by_id(post_id)
            .await?
            .ok_or(PostsError::PostNotFound)?;

        let comment = Comment::new(author_id, text);

        if !self.repo.append_comment(post_id, &comment).await? {
            // Deleted between the read and the append
            return Err(PostsError::PostNotFound);
        }

        tracing::info!(
            post_id = %post_id,
            user_id = %author_id,
            "Comment added"
        );

        post.comments.push(comment);
        Ok(post)
    }
}
