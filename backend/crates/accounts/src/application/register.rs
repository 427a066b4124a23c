//! Register Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::application::config::AccountsConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName,
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AccountsError, AccountsResult};

/// Register input
pub struct RegisterInput {
    pub name: String,
    pub dob: NaiveDate,
    pub email: String,
    pub password: String,
    pub profile_picture: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AccountsConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AccountsConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AccountsResult<User> {
        let name = DisplayName::new(input.name)
            .map_err(|e| AccountsError::Validation(e.message().to_string()))?;
        let email = Email::new(input.email)
            .map_err(|e| AccountsError::Validation(e.message().to_string()))?;

        if self.repo.exists_by_email(&email).await? {
            return Err(AccountsError::EmailTaken);
        }

        let raw_password = RawPassword::new(input.password)
            .map_err(|e| AccountsError::Validation(e.message().to_string()))?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())
            .map_err(|e| AccountsError::Internal(e.to_string()))?;

        let mut user = User::new(name, dob_or_reject(input.dob)?, email, password_hash);

        if let Some(profile_picture) = input.profile_picture {
            user.profile_picture = profile_picture;
        }
        if let Some(bio) = input.bio {
            user.bio = bio;
        }
        if let Some(location) = input.location {
            user.location = location;
        }

        // The repository maps a unique-email violation to EmailTaken, so a
        // concurrent duplicate that slips past the exists check still fails
        // with the same error.
        self.repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            "User registered"
        );

        Ok(user)
    }
}

/// Reject birth dates in the future
fn dob_or_reject(dob: NaiveDate) -> AccountsResult<NaiveDate> {
    if dob > chrono::Utc::now().date_naive() {
        return Err(AccountsError::Validation(
            "Date of birth cannot be in the future".to_string(),
        ));
    }
    Ok(dob)
}
