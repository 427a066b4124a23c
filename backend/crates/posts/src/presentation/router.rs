//! Posts Router

use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use std::sync::Arc;

use accounts::application::config::AccountsConfig;

use crate::domain::repository::PostRepository;
use crate::infra::postgres::PgPostRepository;
use crate::presentation::handlers::{self, PostsAppState};

/// Create the posts router with the PostgreSQL repository
pub fn posts_router(repo: PgPostRepository, config: AccountsConfig) -> Router {
    posts_router_generic(repo, config)
}

/// Create a generic posts router for any repository implementation
pub fn posts_router_generic<P>(repo: P, config: AccountsConfig) -> Router
where
    P: PostRepository + Clone + Send + Sync + 'static,
{
    let state = PostsAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/createpost", post(handlers::create_post::<P>))
        .route("/editpost/{id}", patch(handlers::edit_post::<P>))
        .route("/deletepost/{id}", delete(handlers::delete_post::<P>))
        .route("/get/{postId}", get(handlers::get_post::<P>))
        .route("/myPosts", get(handlers::my_posts::<P>))
        .route("/allPosts", get(handlers::all_posts::<P>))
        .route("/like/{postId}", patch(handlers::like_post::<P>))
        .route("/likes/{postId}", get(handlers::get_likes::<P>))
        .route("/comment/{postId}", patch(handlers::comment_post::<P>))
        .with_state(state)
}
