//! User Password Value Object
//!
//! Domain value object for user passwords.
//! Delegates to `platform::password` for cryptographic operations.

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{ClearTextPassword, HashedPassword, PasswordHashError};
use std::fmt;

/// Raw password from user input
///
/// Wrapper around `ClearTextPassword` with domain-specific error handling.
/// Memory is automatically zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new raw password with validation
    ///
    /// Policy (NIST SP 800-63B): 8..=128 Unicode characters, no control
    /// characters, NFKC normalized before anything else.
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text =
            ClearTextPassword::new(raw).map_err(|e| AppError::bad_request(e.to_string()))?;

        Ok(Self(clear_text))
    }

    /// Access the inner ClearTextPassword
    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// Hashed user password for database storage
///
/// Stores password in Argon2id PHC string format.
/// Safe to persist; never serialized into API responses.
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Create from raw password by hashing
    ///
    /// ## Arguments
    /// * `raw` - The validated raw password
    /// * `pepper` - Optional application-wide secret
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        let hashed = raw.inner().hash(pepper).map_err(|e| match e {
            PasswordHashError::HashingFailed(msg) => {
                AppError::internal(format!("Password hashing failed: {}", msg))
            }
            _ => AppError::internal("Unexpected error during password hashing"),
        })?;

        Ok(Self(hashed))
    }

    /// Create from PHC string (from database)
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string)
            .map_err(|_| AppError::internal("Invalid password hash in database"))?;

        Ok(Self(hashed))
    }

    /// Get PHC string for database storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a raw password against this hash
    ///
    /// ## Arguments
    /// * `raw` - The raw password to verify
    /// * `pepper` - Must match the pepper used during hashing
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_password_validation() {
        assert!(RawPassword::new("ValidPass123!".to_string()).is_ok());
        assert!(RawPassword::new("short".to_string()).is_err());
        assert!(RawPassword::new(String::new()).is_err());
        assert!(RawPassword::new("a".repeat(200)).is_err());
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();

        assert!(hashed.verify(&raw, None));

        let wrong = RawPassword::new("WrongPassword123!".to_string()).unwrap();
        assert!(!hashed.verify(&wrong, None));
    }

    #[test]
    fn test_hash_with_pepper() {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        let pepper = b"app_secret_pepper";
        let hashed = UserPassword::from_raw(&raw, Some(pepper)).unwrap();

        assert!(hashed.verify(&raw, Some(pepper)));
        assert!(!hashed.verify(&raw, None));
        assert!(!hashed.verify(&raw, Some(b"wrong")));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();

        let phc = hashed.as_phc_string().to_string();
        let restored = UserPassword::from_phc_string(phc).unwrap();

        assert!(restored.verify(&raw, None));
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("SecretPassword123!".to_string()).unwrap();
        let debug = format!("{:?}", raw);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("Secret"));

        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        let debug = format!("{:?}", hashed);
        assert!(debug.contains("HASH"));
    }
}
