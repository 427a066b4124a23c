//! Create Post Use Case

use std::sync::Arc;

use accounts::domain::value_object::user_id::UserId;

use crate::domain::entity::post::Post;
use crate::domain::repository::PostRepository;
use crate::error::{PostsError, PostsResult};

/// Create post input
pub struct CreatePostInput {
    pub content: String,
    pub image: Option<String>,
}

/// Create post use case
pub struct CreatePostUseCase<P>
where
    P: PostRepository,
{
    repo: Arc<P>,
}

impl<P> CreatePostUseCase<P>
where
    P: PostRepository,
{
    pub fn new(repo: Arc<P>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, author_id: UserId, input: CreatePostInput) -> PostsResult<Post> {
        if input.content.trim().is_empty() {
            return Err(PostsError::Validation(
                "Post content cannot be empty".to_string(),
            ));
        }

        let post = Post::new(author_id, input.content, input.image.unwrap_or_default());

        self.repo.create(&post).await?;

        tracing::info!(
            post_id = %post.post_id,
            author_id = %author_id,
            "Post created"
        );

        Ok(post)
    }
}
