//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and the access guard.

pub mod dto;
pub mod guard;
pub mod handlers;
pub mod router;

pub use guard::CurrentUser;
pub use handlers::AccountsAppState;
pub use router::accounts_router;
