//! Application Configuration
//!
//! Configuration for the Accounts application layer.

use std::time::Duration;

/// Accounts application configuration
#[derive(Debug, Clone)]
pub struct AccountsConfig {
    /// Secret key for HMAC signing of access tokens (32 bytes)
    pub token_secret: [u8; 32],
    /// Access token lifetime (1 hour)
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            token_secret: [0u8; 32],
            token_ttl: Duration::from_secs(3600), // 1 hour
            password_pepper: None,
        }
    }
}

impl AccountsConfig {
    /// Create config with a random token secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            token_secret: secret,
            ..Default::default()
        }
    }

    /// Get token TTL in whole seconds
    pub fn token_ttl_secs(&self) -> i64 {
        self.token_ttl.as_secs() as i64
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
