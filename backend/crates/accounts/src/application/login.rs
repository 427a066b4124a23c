//! Login Use Case
//!
//! Verifies credentials and issues an access token.

use std::sync::Arc;

use crate::application::access_token::issue_access_token;
use crate::application::config::AccountsConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AccountsError, AccountsResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed access token
    pub token: String,
    /// The authenticated user
    pub user: User,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AccountsConfig>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AccountsConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> AccountsResult<LoginOutput> {
        // An address that fails validation cannot belong to any account
        let email = Email::new(input.email).map_err(|_| AccountsError::UnknownEmail)?;

        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AccountsError::UnknownEmail)?;

        let raw_password =
            RawPassword::new(input.password).map_err(|_| AccountsError::InvalidPassword)?;

        if !user.password_hash.verify(&raw_password, self.config.pepper()) {
            return Err(AccountsError::InvalidPassword);
        }

        let token = issue_access_token(user.user_id, user.is_admin, &self.config)?;

        tracing::info!(
            user_id = %user.user_id,
            "User logged in"
        );

        Ok(LoginOutput { token, user })
    }
}
