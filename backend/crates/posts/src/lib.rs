//! Posts Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Post creation, allow-listed edits, owner-only deletion
//! - Likes (at most one per user, duplicate-safe under races)
//! - Comments (append-only, deliberately not idempotent)
//! - Feeds enriched with author name and picture
//!
//! Authentication is delegated to the `accounts` crate: protected
//! handlers take its `CurrentUser` extractor.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use error::{PostsError, PostsResult};
pub use infra::postgres::PgPostRepository;
pub use presentation::router::posts_router;

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
