//! Accounts Router

use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AccountsAppState};

/// Create the accounts router with the PostgreSQL repository
pub fn accounts_router(repo: PgUserRepository, config: AccountsConfig) -> Router {
    accounts_router_generic(repo, config)
}

/// Create a generic accounts router for any repository implementation
pub fn accounts_router_generic<R>(repo: R, config: AccountsConfig) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = AccountsAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/currentUser", get(handlers::current_user::<R>))
        .route("/updateUser/{id}", patch(handlers::update_user::<R>))
        .route("/deleteUser/{id}", delete(handlers::delete_user::<R>))
        .route("/allUsers", get(handlers::all_users::<R>))
        .route("/follow/{id}", patch(handlers::follow::<R>))
        .route("/unfollow/{id}", patch(handlers::unfollow::<R>))
        .with_state(state)
}
