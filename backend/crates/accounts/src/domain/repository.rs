//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::user::User;
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::AccountsResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AccountsResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: UserId) -> AccountsResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> AccountsResult<Option<User>>;

    /// Check if email exists
    async fn exists_by_email(&self, email: &Email) -> AccountsResult<bool>;

    /// Update user (profile fields)
    async fn update(&self, user: &User) -> AccountsResult<()>;

    /// Delete a user. Returns false when no such user exists.
    async fn delete(&self, user_id: UserId) -> AccountsResult<bool>;

    /// List all users
    async fn list_all(&self) -> AccountsResult<Vec<User>>;

    /// Add the follower -> followee edge on both documents atomically.
    ///
    /// Both `followee.followers += follower` and
    /// `follower.following += followee` apply in one store transaction,
    /// each guarded by a containment check. Returns false when the edge
    /// already exists (also under a concurrent duplicate request).
    async fn add_follow_edge(&self, follower: UserId, followee: UserId) -> AccountsResult<bool>;

    /// Remove the follower -> followee edge from both documents atomically.
    ///
    /// Returns false when no such edge exists.
    async fn remove_follow_edge(&self, follower: UserId, followee: UserId) -> AccountsResult<bool>;
}
