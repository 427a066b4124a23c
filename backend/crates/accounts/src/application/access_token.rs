//! Access Token Issuing and Verification
//!
//! Tokens are stateless: `base64url(claims JSON) . base64url(HMAC-SHA256)`.
//! Validity is recomputed from the signature and the embedded expiry on
//! every request; nothing is stored and nothing can be revoked early.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::application::config::AccountsConfig;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AccountsError, AccountsResult};

/// Claims embedded in an access token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    /// Authenticated user
    pub user_id: UserId,
    /// Admin flag at issue time
    pub is_admin: bool,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiry (Unix seconds)
    pub exp: i64,
}

impl AccessClaims {
    /// Build claims expiring `ttl_secs` from now
    pub fn new(user_id: UserId, is_admin: bool, ttl_secs: i64) -> Self {
        let iat = Utc::now().timestamp();
        Self {
            user_id,
            is_admin,
            iat,
            exp: iat + ttl_secs,
        }
    }

    /// Expiry check against the issuer clock, no skew tolerance
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Issue a signed access token for a user
pub fn issue_access_token(
    user_id: UserId,
    is_admin: bool,
    config: &AccountsConfig,
) -> AccountsResult<String> {
    let claims = AccessClaims::new(user_id, is_admin, config.token_ttl_secs());
    encode(&claims, &config.token_secret)
}

/// Verify a token and return the embedded claims
///
/// Fails with [`AccountsError::TokenRejected`] on malformed input,
/// signature mismatch, or expiry.
pub fn verify_access_token(token: &str, config: &AccountsConfig) -> AccountsResult<AccessClaims> {
    let (payload_b64, signature_b64) = token
        .split_once('.')
        .ok_or(AccountsError::TokenRejected)?;

    let signature =
        platform::crypto::from_base64url(signature_b64).map_err(|_| AccountsError::TokenRejected)?;

    // Constant-time MAC check before anything is parsed
    if !platform::crypto::hmac_verify(&config.token_secret, payload_b64.as_bytes(), &signature) {
        return Err(AccountsError::TokenRejected);
    }

    let payload =
        platform::crypto::from_base64url(payload_b64).map_err(|_| AccountsError::TokenRejected)?;
    let claims: AccessClaims =
        serde_json::from_slice(&payload).map_err(|_| AccountsError::TokenRejected)?;

    if claims.is_expired() {
        return Err(AccountsError::TokenRejected);
    }

    Ok(claims)
}

/// Serialize and sign claims
fn encode(claims: &AccessClaims, secret: &[u8; 32]) -> AccountsResult<String> {
    let payload = serde_json::to_vec(claims)
        .map_err(|e| AccountsError::Internal(format!("Token encoding failed: {e}")))?;

    let payload_b64 = platform::crypto::to_base64url(&payload);
    let signature = platform::crypto::hmac_sha256(secret, payload_b64.as_bytes());

    Ok(format!(
        "{}.{}",
        payload_b64,
        platform::crypto::to_base64url(&signature)
    ))
}
