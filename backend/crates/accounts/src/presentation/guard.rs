//! Access Guard
//!
//! Every protected operation passes through here before reaching a
//! handler. The guard reads the bearer token, verifies signature and
//! expiry, and injects the authenticated identity. There is no store
//! round-trip: the token is the whole proof.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use std::sync::Arc;

use crate::application::access_token::verify_access_token;
use crate::application::config::AccountsConfig;
use crate::domain::value_object::user_id::UserId;
use crate::error::AccountsError;

/// Authenticated identity, extracted from the bearer token
///
/// Usable from any router whose state exposes `Arc<AccountsConfig>`
/// via `FromRef`.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub is_admin: bool,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    Arc<AccountsConfig>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AccountsError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Absent or non-bearer header is 401; a present token that fails
        // verification is 400.
        let token =
            platform::bearer::extract_bearer(&parts.headers).ok_or(AccountsError::Unauthenticated)?;

        let config = Arc::<AccountsConfig>::from_ref(state);
        let claims = verify_access_token(token, &config)?;

        Ok(Self {
            user_id: claims.user_id,
            is_admin: claims.is_admin,
        })
    }
}
