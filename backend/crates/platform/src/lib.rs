//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (HMAC-SHA256, Base64, secure random)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Bearer token header extraction

pub mod bearer;
pub mod crypto;
pub mod password;
