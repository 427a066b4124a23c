//! Follow / Unfollow Use Case
//!
//! Maintains the bidirectional follow graph. The invariant is pairwise:
//! `B ∈ A.following` if and only if `A ∈ B.followers`. Both sides change
//! in one repository transaction, never one at a time.

use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AccountsError, AccountsResult};

/// Follow use case
pub struct FollowUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> FollowUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// actor starts following target
    ///
    /// Idempotency: a repeat of an already-applied follow fails with
    /// `AlreadyFollowing` and leaves both documents untouched.
    pub async fn follow(&self, actor: UserId, target: UserId) -> AccountsResult<()> {
        if actor == target {
            return Err(AccountsError::SelfFollow);
        }

        let target_user = self
            .repo
            .find_by_id(target)
            .await?
            .ok_or(AccountsError::UserNotFound)?;

        if target_user.is_followed_by(actor) {
            return Err(AccountsError::AlreadyFollowing);
        }

        // The edge insert re-checks containment inside the transaction, so
        // two concurrent identical requests cannot both apply.
        if !self.repo.add_follow_edge(actor, target).await? {
            return Err(AccountsError::AlreadyFollowing);
        }

        tracing::info!(
            actor = %actor,
            target = %target,
            "Follow edge added"
        );

        Ok(())
    }

    /// actor stops following target
    pub async fn unfollow(&self, actor: UserId, target: UserId) -> AccountsResult<()> {
        let target_user = self
            .repo
            .find_by_id(target)
            .await?
            .ok_or(AccountsError::UserNotFound)?;

        if !target_user.is_followed_by(actor) {
            return Err(AccountsError::NotFollowing);
        }

        if !self.repo.remove_follow_edge(actor, target).await? {
            return Err(AccountsError::NotFollowing);
        }

        tracing::info!(
            actor = %actor,
            target = %target,
            "Follow edge removed"
        );

        Ok(())
    }
}
