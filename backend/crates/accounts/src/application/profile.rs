//! Profile Use Case
//!
//! Reads and plain-field mutations on user records: current user,
//! allow-listed updates, deletion, listing.

use std::sync::Arc;

use crate::domain::entity::user::{ProfileChanges, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AccountsError, AccountsResult};

/// Profile use case
pub struct ProfileUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> ProfileUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Fetch a user by id
    pub async fn get(&self, user_id: UserId) -> AccountsResult<User> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(AccountsError::UserNotFound)
    }

    /// Apply allow-listed profile changes and return the updated user
    pub async fn update(&self, user_id: UserId, changes: ProfileChanges) -> AccountsResult<User> {
        let mut user = self.get(user_id).await?;

        user.apply_profile_changes(changes);
        self.repo.update(&user).await?;

        tracing::info!(user_id = %user_id, "User profile updated");

        Ok(user)
    }

    /// Delete a user record
    ///
    /// Weak references stay behind on purpose: likes, comments, and follow
    /// edges pointing at the deleted id are not retracted.
    pub async fn delete(&self, user_id: UserId) -> AccountsResult<()> {
        if !self.repo.delete(user_id).await? {
            return Err(AccountsError::UserNotFound);
        }

        tracing::info!(user_id = %user_id, "User deleted");

        Ok(())
    }

    /// List all users
    pub async fn list(&self) -> AccountsResult<Vec<User>> {
        self.repo.list_all().await
    }
}
