//! Application Layer
//!
//! Use cases and application services.

pub mod access_token;
pub mod config;
pub mod follow;
pub mod login;
pub mod profile;
pub mod register;

// Re-exports
pub use access_token::{AccessClaims, issue_access_token, verify_access_token};
pub use config::AccountsConfig;
pub use follow::FollowUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use profile::ProfileUseCase;
pub use register::{RegisterInput, RegisterUseCase};
