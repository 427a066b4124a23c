//! Accounts Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - User registration/login with email + password
//! - Stateless signed access tokens (HMAC-SHA256, 1 hour expiry)
//! - Bearer-token access guard for protected routes
//! - User profiles with allow-listed updates
//! - Bidirectional follow graph (following/followers kept in sync)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Token validity recomputed from signature + expiry on every request,
//!   never looked up in the store
//! - Protected fields (email, password, isAdmin) cannot be touched by
//!   profile updates

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AccountsConfig;
pub use error::{AccountsError, AccountsResult};
pub use infra::postgres::PgUserRepository;
pub use presentation::router::accounts_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod guard {
    pub use crate::presentation::guard::*;
}
