//! HTTP Handlers

use axum::Json;
use axum::extract::{FromRef, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;

use accounts::application::config::AccountsConfig;
use accounts::presentation::guard::CurrentUser;

use crate::application::{
    CommentPostUseCase, CreatePostInput, CreatePostUseCase, DeletePostUseCase, EditPostUseCase,
    FeedUseCase, LikePostUseCase,
};
use crate::domain::repository::PostRepository;
use crate::domain::value_object::post_id::PostId;
use crate::error::PostsResult;
use crate::presentation::dto::{
    CommentRequest, CreatePostRequest, EditPostRequest, FeedPostResponse, LikesResponse,
    PostResponse,
};

/// Shared state for posts handlers
#[derive(Clone)]
pub struct PostsAppState<P>
where
    P: PostRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<P>,
    /// Accounts config, needed by the access guard
    pub config: Arc<AccountsConfig>,
}

impl<P> FromRef<PostsAppState<P>> for Arc<AccountsConfig>
where
    P: PostRepository + Clone + Send + Sync + 'static,
{
    fn from_ref(state: &PostsAppState<P>) -> Self {
        state.config.clone()
    }
}

// ============================================================================
// Mutations (protected)
// ============================================================================

/// POST /post/createpost
pub async fn create_post<P>(
    State(state): State<PostsAppState<P>>,
    current: CurrentUser,
    Json(req): Json<CreatePostRequest>,
) -> PostsResult<impl IntoResponse>
where
    P: PostRepository + Clone + Send + Sync + 'static,
{
    let use_case = CreatePostUseCase::new(state.repo.clone());

    let post = use_case
        .execute(
            current.user_id,
            CreatePostInput {
                content: req.content,
                image: req.image,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(PostResponse::from(post))))
}

/// PATCH /post/editpost/{id}
pub async fn edit_post<P>(
    State(state): State<PostsAppState<P>>,
    current: CurrentUser,
    Path(id): Path<PostId>,
    Json(req): Json<EditPostRequest>,
) -> PostsResult<Json<PostResponse>>
where
    P: PostRepository + Clone + Send + Sync + 'static,
{
    let use_case = EditPostUseCase::new(state.repo.clone());
    let post = use_case.execute(current.user_id, id, req.into_edit()).await?;

    Ok(Json(PostResponse::from(post)))
}

/// DELETE /post/deletepost/{id}
pub async fn delete_post<P>(
    State(state): State<PostsAppState<P>>,
    current: CurrentUser,
    Path(id): Path<PostId>,
) -> PostsResult<StatusCode>
where
    P: PostRepository + Clone + Send + Sync + 'static,
{
    let use_case = DeletePostUseCase::new(state.repo.clone());
    use_case.execute(current.user_id, id).await?;

    Ok(StatusCode::OK)
}

/// PATCH /post/like/{postId}
pub async fn like_post<P>(
    State(state): State<PostsAppState<P>>,
    current: CurrentUser,
    Path(post_id): Path<PostId>,
) -> PostsResult<StatusCode>
where
    P: PostRepository + Clone + Send + Sync + 'static,
{
    let use_case = LikePostUseCase::new(state.repo.clone());
    use_case.execute(current.user_id, post_id).await?;

    Ok(StatusCode::OK)
}

// ============================================================================
// Reads (protected)
// ============================================================================

/// GET /post/get/{postId}
pub async fn get_post<P>(
    State(state): State<PostsAppState<P>>,
    _current: CurrentUser,
    Path(post_id): Path<PostId>,
) -> PostsResult<Json<PostResponse>>
where
    P: PostRepository + Clone + Send + Sync + 'static,
{
    let use_case = FeedUseCase::new(state.repo.clone());
    let post = use_case.get_post(post_id).await?;

    Ok(Json(PostResponse::from(post)))
}

/// GET /post/myPosts
pub async fn my_posts<P>(
    State(state): State<PostsAppState<P>>,
    current: CurrentUser,
) -> PostsResult<Json<Vec<FeedPostResponse>>>
where
    P: PostRepository + Clone + Send + Sync + 'static,
{
    let use_case = FeedUseCase::new(state.repo.clone());
    let posts = use_case.my_posts(current.user_id).await?;

    Ok(Json(posts.into_iter().map(FeedPostResponse::from).collect()))
}

/// GET /post/allPosts
pub async fn all_posts<P>(
    State(state): State<PostsAppState<P>>,
    _current: CurrentUser,
) -> PostsResult<Json<Vec<FeedPostResponse>>>
where
    P: PostRepository + Clone + Send + Sync + 'static,
{
    let use_case = FeedUseCase::new(state.repo.clone());
    let posts = use_case.all_posts().await?;

    Ok(Json(posts.into_iter().map(FeedPostResponse::from).collect()))
}

// ============================================================================
// Public routes
// ============================================================================

/// GET /post/likes/{postId}
pub async fn get_likes<P>(
    State(state): State<PostsAppState<P>>,
    Path(post_id): Path<PostId>,
) -> PostsResult<Json<LikesResponse>>
where
    P: PostRepository + Clone + Send + Sync + 'static,
{
    let use_case = FeedUseCase::new(state.repo.clone());
    let likes = use_case.likes(post_id).await?;

    Ok(Json(LikesResponse::new(post_id, likes)))
}

/// PATCH /post/comment/{postId}
pub async fn comment_post<P>(
    State(state): State<PostsAppState<P>>,
    Path(post_id): Path<PostId>,
    Json(req): Json<CommentRequest>,
) -> PostsResult<Json<PostResponse>>
where
    P: PostRepository + Clone + Send + Sync + 'static,
{
    let use_case = CommentPostUseCase::new(state.repo.clone());
    let post = use_case.execute(req.user_id, post_id, req.text).await?;

    Ok(Json(PostResponse::from(post)))
}
