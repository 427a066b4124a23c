//! PostgreSQL Repository Implementation
//!
//! Each user is one row; the follow graph is stored redundantly as two
//! uuid arrays. The paired edge mutations run in a single transaction so
//! the forward and reverse references cannot drift apart.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName, email::Email, user_id::UserId, user_password::UserPassword,
};
use crate::error::{AccountsError, AccountsResult};

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = "user_id, name, dob, email, password_hash, profile_picture, \
                            bio, location, is_admin, following, followers, created_at, updated_at";

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> AccountsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                name,
                dob,
                email,
                password_hash,
                profile_picture,
                bio,
                location,
                is_admin,
                following,
                followers,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.name.as_str())
        .bind(user.dob)
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(&user.profile_picture)
        .bind(&user.bio)
        .bind(&user.location)
        .bind(user.is_admin)
        .bind(uuids(&user.following))
        .bind(uuids(&user.followers))
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // The unique index on email backs up the pre-insert check
            if let sqlx::Error::Database(db) = &e
                && db.is_unique_violation()
            {
                return AccountsError::EmailTaken;
            }
            AccountsError::Database(e)
        })?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: UserId) -> AccountsResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AccountsResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AccountsResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn update(&self, user: &User) -> AccountsResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                name = $2,
                dob = $3,
                profile_picture = $4,
                bio = $5,
                location = $6,
                updated_at = $7
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.name.as_str())
        .bind(user.dob)
        .bind(&user.profile_picture)
        .bind(&user.bio)
        .bind(&user.location)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, user_id: UserId) -> AccountsResult<bool> {
        let deleted = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn list_all(&self) -> AccountsResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    async fn add_follow_edge(&self, follower: UserId, followee: UserId) -> AccountsResult<bool> {
        let mut tx = self.pool.begin().await?;

        // Reverse reference first; the containment predicate makes the
        // append conditional, so a concurrent duplicate loses here.
        let followee_updated = sqlx::query(
            r#"
            UPDATE users
            SET followers = array_append(followers, $2), updated_at = now()
            WHERE user_id = $1 AND NOT (followers @> ARRAY[$2])
            "#,
        )
        .bind(followee.as_uuid())
        .bind(follower.as_uuid())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if followee_updated == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        let follower_updated = sqlx::query(
            r#"
            UPDATE users
            SET following = array_append(following, $2), updated_at = now()
            WHERE user_id = $1 AND NOT (following @> ARRAY[$2])
            "#,
        )
        .bind(follower.as_uuid())
        .bind(followee.as_uuid())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if follower_updated == 0 {
            // Forward side missing or already present while the reverse
            // side was not: the graph would come out asymmetric.
            tx.rollback().await?;
            return Err(AccountsError::Internal(
                "follow edge out of sync".to_string(),
            ));
        }

        tx.commit().await?;
        Ok(true)
    }

    async fn remove_follow_edge(&self, follower: UserId, followee: UserId) -> AccountsResult<bool> {
        let mut tx = self.pool.begin().await?;

        let followee_updated = sqlx::query(
            r#"
            UPDATE users
            SET followers = array_remove(followers, $2), updated_at = now()
            WHERE user_id = $1 AND followers @> ARRAY[$2]
            "#,
        )
        .bind(followee.as_uuid())
        .bind(follower.as_uuid())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if followee_updated == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        let follower_updated = sqlx::query(
            r#"
            UPDATE users
            SET following = array_remove(following, $2), updated_at = now()
            WHERE user_id = $1 AND following @> ARRAY[$2]
            "#,
        )
        .bind(follower.as_uuid())
        .bind(followee.as_uuid())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if follower_updated == 0 {
            tx.rollback().await?;
            return Err(AccountsError::Internal(
                "follow edge out of sync".to_string(),
            ));
        }

        tx.commit().await?;
        Ok(true)
    }
}

// ============================================================================
// Row mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    name: String,
    dob: NaiveDate,
    email: String,
    password_hash: String,
    profile_picture: String,
    bio: String,
    location: String,
    is_admin: bool,
    following: Vec<Uuid>,
    followers: Vec<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AccountsResult<User> {
        let password_hash = UserPassword::from_phc_string(self.password_hash)
            .map_err(|e| AccountsError::Internal(e.to_string()))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            name: DisplayName::from_db(self.name),
            dob: self.dob,
            email: Email::from_db(self.email),
            password_hash,
            profile_picture: self.profile_picture,
            bio: self.bio,
            location: self.location,
            is_admin: self.is_admin,
            following: self.following.into_iter().map(UserId::from_uuid).collect(),
            followers: self.followers.into_iter().map(UserId::from_uuid).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn uuids(ids: &[UserId]) -> Vec<Uuid> {
    ids.iter().map(|id| *id.as_uuid()).collect()
}
