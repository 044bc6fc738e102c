//! Signed Bearer Tokens
//!
//! Stateless HMAC-SHA256 claims tokens:
//! - Format: `base64url(claims_json) + "." + base64url(signature)`
//! - Signature covers the encoded claims segment
//! - Signature is verified in constant time before the claims are parsed

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::crypto;

/// Token verification errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Token does not have the expected two-segment shape
    #[error("Malformed token")]
    Malformed,

    /// Signature does not match the claims segment
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Token has expired
    #[error("Token has expired")]
    Expired,
}

/// Claims carried by a signed token
///
/// Wire names follow the usual registered-claim abbreviations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user id)
    #[serde(rename = "sub")]
    pub subject: Uuid,
    /// Role code of the subject at issue time
    pub role: String,
    /// Expiry as Unix seconds
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl TokenClaims {
    /// Create claims expiring `ttl` after `issued_at`
    pub fn new(subject: Uuid, role: impl Into<String>, issued_at: DateTime<Utc>, ttl: chrono::Duration) -> Self {
        Self {
            subject,
            role: role.into(),
            expires_at: (issued_at + ttl).timestamp(),
        }
    }

    /// True if the token is expired at `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.expires_at
    }
}

/// Sign claims into a bearer token string
pub fn issue(claims: &TokenClaims, key: &[u8; 32]) -> Result<String, serde_json::Error> {
    let payload = serde_json::to_vec(claims)?;
    let encoded = crypto::to_base64url(&payload);
    let signature = crypto::hmac_sha256(key, encoded.as_bytes());
    Ok(format!("{}.{}", encoded, crypto::to_base64url(&signature)))
}

/// Verify a bearer token and return its claims
///
/// Checks shape, signature, then expiry, in that order.
pub fn verify(token: &str, key: &[u8; 32], now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
    let (encoded, signature_part) = token.split_once('.').ok_or(TokenError::Malformed)?;
    if encoded.is_empty() || signature_part.contains('.') {
        return Err(TokenError::Malformed);
    }

    let provided = crypto::from_base64url(signature_part).map_err(|_| TokenError::Malformed)?;
    let expected = crypto::hmac_sha256(key, encoded.as_bytes());
    if !crypto::constant_time_eq(&expected, &provided) {
        return Err(TokenError::InvalidSignature);
    }

    // Signature is valid, so the payload is trusted input from here on
    let payload = crypto::from_base64url(encoded).map_err(|_| TokenError::Malformed)?;
    let claims: TokenClaims =
        serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;

    if claims.is_expired(now) {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}
