//! User Entity
//!
//! A user is a single document: profile data, the credential hash, and
//! both sides of the follow graph. The hash lives here because the store
//! keeps one record per user; it must never reach a response payload.

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::value_object::{
    display_name::DisplayName, email::Email, user_id::UserId, user_password::UserPassword,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Display name
    pub name: DisplayName,
    /// Date of birth
    pub dob: NaiveDate,
    /// Email address (unique, login identifier)
    pub email: Email,
    /// Argon2id credential hash - persisted, never serialized outward
    pub password_hash: UserPassword,
    /// Profile picture URL ("" when unset)
    pub profile_picture: String,
    /// Short self-description
    pub bio: String,
    /// Free-form location ("" when unset)
    pub location: String,
    /// Admin flag, carried into access tokens
    pub is_admin: bool,
    /// Users this user follows
    pub following: Vec<UserId>,
    /// Users following this user
    pub followers: Vec<UserId>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Default bio for fresh accounts
    pub const DEFAULT_BIO: &'static str = "Hey there! I'm using this social media app.";

    /// Create a new user
    pub fn new(name: DisplayName, dob: NaiveDate, email: Email, password_hash: UserPassword) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            name,
            dob,
            email,
            password_hash,
            profile_picture: String::new(),
            bio: Self::DEFAULT_BIO.to_string(),
            location: String::new(),
            is_admin: false,
            following: Vec::new(),
            followers: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this user follows `other`
    pub fn follows(&self, other: UserId) -> bool {
        self.following.contains(&other)
    }

    /// Whether `other` follows this user
    pub fn is_followed_by(&self, other: UserId) -> bool {
        self.followers.contains(&other)
    }

    /// Apply an allow-listed set of profile changes
    ///
    /// Email, password, and the admin flag are deliberately not
    /// reachable from here.
    pub fn apply_profile_changes(&mut self, changes: ProfileChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(dob) = changes.dob {
            self.dob = dob;
        }
        if let Some(profile_picture) = changes.profile_picture {
            self.profile_picture = profile_picture;
        }
        if let Some(bio) = changes.bio {
            self.bio = bio;
        }
        if let Some(location) = changes.location {
            self.location = location;
        }
        self.updated_at = Utc::now();
    }
}

/// Allow-listed profile update
///
/// The PATCH body is parsed into this instead of being merged into the
/// record wholesale, so protected fields cannot be overwritten.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: Option<DisplayName>,
    pub dob: Option<NaiveDate>,
    pub profile_picture: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
}
