//! HTTP Handlers

use axum::Json;
use axum::extract::{FromRef, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::application::{
    FollowUseCase, LoginInput, LoginUseCase, ProfileUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::AccountsResult;
use crate::presentation::dto::{
    LoginRequest, LoginResponse, RegisterRequest, UpdateUserRequest, UserResponse,
};
use crate::presentation::guard::CurrentUser;

/// Shared state for accounts handlers
#[derive(Clone)]
pub struct AccountsAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AccountsConfig>,
}

impl<R> FromRef<AccountsAppState<R>> for Arc<AccountsConfig>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    fn from_ref(state: &AccountsAppState<R>) -> Self {
        state.config.clone()
    }
}

// ============================================================================
// Register / Login (public)
// ============================================================================

/// POST /user/register
pub async fn register<R>(
    State(state): State<AccountsAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AccountsResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let input = RegisterInput {
        name: req.name,
        dob: req.dob,
        email: req.email,
        password: req.password,
        profile_picture: req.profile_picture,
        bio: req.bio,
        location: req.location,
    };

    let user = use_case.execute(input).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// POST /user/login
pub async fn login<R>(
    State(state): State<AccountsAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AccountsResult<Json<LoginResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let user_id = output.user.user_id;
    let is_admin = output.user.is_admin;

    Ok(Json(LoginResponse {
        token: output.token,
        user_id,
        is_admin,
        user: UserResponse::from(output.user),
    }))
}

// ============================================================================
// User reads / mutations (protected)
// ============================================================================

/// GET /user/currentUser
pub async fn current_user<R>(
    State(state): State<AccountsAppState<R>>,
    current: CurrentUser,
) -> AccountsResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProfileUseCase::new(state.repo.clone());
    let user = use_case.get(current.user_id).await?;

    Ok(Json(UserResponse::from(user)))
}

/// PATCH /user/updateUser/{id}
pub async fn update_user<R>(
    State(state): State<AccountsAppState<R>>,
    _current: CurrentUser,
    Path(id): Path<UserId>,
    Json(req): Json<UpdateUserRequest>,
) -> AccountsResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProfileUseCase::new(state.repo.clone());
    let user = use_case.update(id, req.into_changes()?).await?;

    Ok(Json(UserResponse::from(user)))
}

/// DELETE /user/deleteUser/{id}
pub async fn delete_user<R>(
    State(state): State<AccountsAppState<R>>,
    _current: CurrentUser,
    Path(id): Path<UserId>,
) -> AccountsResult<StatusCode>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProfileUseCase::new(state.repo.clone());
    use_case.delete(id).await?;

    Ok(StatusCode::OK)
}

/// GET /user/allUsers
pub async fn all_users<R>(
    State(state): State<AccountsAppState<R>>,
    _current: CurrentUser,
) -> AccountsResult<Json<Vec<UserResponse>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProfileUseCase::new(state.repo.clone());
    let users = use_case.list().await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

// ============================================================================
// Follow graph (protected)
// ============================================================================

/// PATCH /user/follow/{id}
pub async fn follow<R>(
    State(state): State<AccountsAppState<R>>,
    current: CurrentUser,
    Path(id): Path<UserId>,
) -> AccountsResult<StatusCode>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = FollowUseCase::new(state.repo.clone());
    use_case.follow(current.user_id, id).await?;

    Ok(StatusCode::OK)
}

/// PATCH /user/unfollow/{id}
pub async fn unfollow<R>(
    State(state): State<AccountsAppState<R>>,
    current: CurrentUser,
    Path(id): Path<UserId>,
) -> AccountsResult<StatusCode>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = FollowUseCase::new(state.repo.clone());
    use_case.unfollow(current.user_id, id).await?;

    Ok(StatusCode::OK)
}
