//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::{ProfileChanges, User};
use crate::domain::value_object::{display_name::DisplayName, user_id::UserId};
use crate::error::{AccountsError, AccountsResult};

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub dob: NaiveDate,
    pub email: String,
    pub password: String,
    pub profile_picture: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: UserId,
    pub is_admin: bool,
    pub user: UserResponse,
}

// ============================================================================
// User
// ============================================================================

/// Sanitized user payload
///
/// The credential hash has no field here, so it cannot leak into a
/// response by accident.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub dob: NaiveDate,
    pub email: String,
    pub profile_picture: String,
    pub bio: String,
    pub location: String,
    pub is_admin: bool,
    pub following: Vec<UserId>,
    pub followers: Vec<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.user_id,
            name: user.name.as_str().to_string(),
            dob: user.dob,
            email: user.email.as_str().to_string(),
            profile_picture: user.profile_picture,
            bio: user.bio,
            location: user.location,
            is_admin: user.is_admin,
            following: user.following,
            followers: user.followers,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Allow-listed profile update request
///
/// Email, password, and the admin flag have no fields here by design.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub dob: Option<NaiveDate>,
    pub profile_picture: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
}

impl UpdateUserRequest {
    /// Validate and convert into domain-level profile changes
    pub fn into_changes(self) -> AccountsResult<ProfileChanges> {
        let name = self
            .name
            .map(DisplayName::new)
            .transpose()
            .map_err(|e| AccountsError::Validation(e.message().to_string()))?;

        Ok(ProfileChanges {
            name,
            dob: self.dob,
            profile_picture: self.profile_picture,
            bio: self.bio,
            location: self.location,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        email::Email,
        user_password::{RawPassword, UserPassword},
    };

    fn sample_user() -> User {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        User::new(
            DisplayName::new("Alice").unwrap(),
            NaiveDate::from_ymd_opt(1990, 4, 2).unwrap(),
            Email::new("alice@example.com").unwrap(),
            UserPassword::from_raw(&raw, None).unwrap(),
        )
    }

    #[test]
    fn test_user_response_is_camel_case() {
        let response = UserResponse::from(sample_user());
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("profilePicture"));
        assert!(json.contains("isAdmin"));
        assert!(json.contains("createdAt"));
    }

    #[test]
    fn test_user_response_never_contains_hash() {
        let user = sample_user();
        let phc = user.password_hash.as_phc_string().to_string();

        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();

        assert!(!json.contains("password"));
        assert!(!json.contains(&phc));
    }

    #[test]
    fn test_register_request_deserialization() {
        let json = r#"{
            "name": "Alice",
            "dob": "1990-04-02",
            "email": "alice@example.com",
            "password": "TestPassword123!",
            "bio": "hi"
        }"#;
        let request: RegisterRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.name, "Alice");
        assert_eq!(request.dob, NaiveDate::from_ymd_opt(1990, 4, 2).unwrap());
        assert_eq!(request.bio.as_deref(), Some("hi"));
        assert!(request.profile_picture.is_none());
    }

    #[test]
    fn test_update_request_ignores_protected_fields() {
        // Unknown fields (email, isAdmin, ...) are dropped during parsing
        let json = r#"{
            "name": "Mallory",
            "email": "mallory@example.com",
            "isAdmin": true
        }"#;
        let request: UpdateUserRequest = serde_json::from_str(json).unwrap();
        let changes = request.into_changes().unwrap();

        assert_eq!(changes.name.unwrap().as_str(), "Mallory");
        assert!(changes.bio.is_none());
    }

    #[test]
    fn test_update_request_invalid_name() {
        let request = UpdateUserRequest {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(request.into_changes().is_err());
    }
}
