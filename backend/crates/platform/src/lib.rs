//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, HMAC, Base64)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Signed bearer tokens (HMAC-SHA256 claims tokens)

pub mod crypto;
pub mod password;
pub mod token;
