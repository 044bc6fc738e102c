//! Handle Value Object
//!
//! The handle is the public identifier of an account, used for login,
//! display, and the leaderboard.
//!
//! ## Invariants
//! - 3 to 30 characters after normalization
//! - ASCII only: a-z, 0-9, `_`, `.`, `-`
//! - Starts and ends with alphanumeric or `_`
//! - No consecutive dots
//! - At least one alphanumeric character
//! - Not a reserved word
//!
//! Input is processed NFKC normalization -> validation -> lowercase.
//! Uppercase input is accepted; the canonical form is lowercase and is
//! what uniqueness checks run against.

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

// ============================================================================
// Constants
// ============================================================================

/// Minimum length for a handle (in characters)
pub const HANDLE_MIN_LENGTH: usize = 3;

/// Maximum length for a handle (in characters)
pub const HANDLE_MAX_LENGTH: usize = 30;

/// Allowed special characters in a handle
const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.', '-'];

/// Reserved words that cannot be used as handles
///
/// Route segments and operational names that would collide with the API
/// surface or confuse moderation.
const RESERVED_WORDS: &[&str] = &[
    "admin",
    "administrator",
    "root",
    "system",
    "support",
    "api",
    "auth",
    "login",
    "logout",
    "register",
    "designer",
    "player",
    "users",
    "profile",
    "questions",
    "categories",
    "leaderboard",
    "follow",
    "following",
    "followers",
    "me",
    "anonymous",
    "null",
];

// ============================================================================
// Error Types
// ============================================================================

/// Error returned when handle validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleError {
    /// Handle is empty after normalization
    Empty,

    /// Handle is too short
    TooShort { length: usize, min: usize },

    /// Handle is too long
    TooLong { length: usize, max: usize },

    /// Handle contains invalid character
    InvalidCharacter { char: char, position: usize },

    /// Handle starts with invalid character (must be alphanumeric or _)
    InvalidStart { char: char },

    /// Handle ends with invalid character (must be alphanumeric or _)
    InvalidEnd { char: char },

    /// Handle contains consecutive dots (..)
    ConsecutiveDots,

    /// Handle contains no alphanumeric characters
    NoAlphanumeric,

    /// Handle contains whitespace
    ContainsWhitespace,

    /// Handle is a reserved word
    Reserved { word: String },
}

impl fmt::Display for HandleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Handle cannot be empty"),
            Self::TooShort { length, min } => {
                write!(f, "Handle is too short ({length} chars, minimum {min})")
            }
            Self::TooLong { length, max } => {
                write!(f, "Handle is too long ({length} chars, maximum {max})")
            }
            Self::InvalidCharacter { char, position } => {
                write!(
                    f,
                    "Invalid character '{char}' at position {position}. Only a-z, 0-9, _, ., - are allowed"
                )
            }
            Self::InvalidStart { char } => {
                write!(
                    f,
                    "Handle cannot start with '{char}'. Must start with a-z, 0-9, or _"
                )
            }
            Self::InvalidEnd { char } => {
                write!(
                    f,
                    "Handle cannot end with '{char}'. Must end with a-z, 0-9, or _"
                )
            }
            Self::ConsecutiveDots => {
                write!(f, "Handle cannot contain consecutive dots (..)")
            }
            Self::NoAlphanumeric => {
                write!(f, "Handle must contain at least one letter or digit")
            }
            Self::ContainsWhitespace => {
                write!(f, "Handle cannot contain whitespace")
            }
            Self::Reserved { word } => {
                write!(f, "'{word}' is a reserved handle")
            }
        }
    }
}

impl std::error::Error for HandleError {}

// ============================================================================
// Handle Value Object
// ============================================================================

/// Validated, normalized handle
///
/// # Storage
/// - `original`: The user's input (trimmed, NFKC normalized, preserves case)
/// - `canonical`: Lowercase form for uniqueness checks
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Handle {
    /// Original user input (preserves case)
    original: String,
    /// Canonical form (lowercase) for uniqueness
    canonical: String,
}

impl Handle {
    /// Create a new Handle from raw input
    ///
    /// Applies normalization (NFKC, trim) and validates.
    /// Preserves case in original, stores lowercase in canonical.
    pub fn new(input: impl AsRef<str>) -> Result<Self, HandleError> {
        let original = Self::normalize_original(input.as_ref());
        let canonical = original.to_lowercase();
        Self::validate(&canonical)?;
        Ok(Self {
            original,
            canonical,
        })
    }

    /// Get the original handle (preserves case)
    #[inline]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Get the canonical (normalized, lowercase) handle
    #[inline]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Alias for canonical()
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// Create from database values (assumes already validated)
    pub fn from_db(original: &str) -> Self {
        Self {
            original: original.to_string(),
            canonical: original.to_lowercase(),
        }
    }

    /// Normalize input string (trim and NFKC, preserve case)
    fn normalize_original(input: &str) -> String {
        input.nfkc().collect::<String>().trim().to_string()
    }

    /// Validate the canonical handle
    fn validate(canonical: &str) -> Result<(), HandleError> {
        if canonical.is_empty() {
            return Err(HandleError::Empty);
        }

        let length = canonical.chars().count();
        if length < HANDLE_MIN_LENGTH {
            return Err(HandleError::TooShort {
                length,
                min: HANDLE_MIN_LENGTH,
            });
        }
        if length > HANDLE_MAX_LENGTH {
            return Err(HandleError::TooLong {
                length,
                max: HANDLE_MAX_LENGTH,
            });
        }

        if canonical.chars().any(|c| c.is_whitespace()) {
            return Err(HandleError::ContainsWhitespace);
        }

        for (pos, ch) in canonical.chars().enumerate() {
            if !Self::is_valid_char(ch) {
                return Err(HandleError::InvalidCharacter {
                    char: ch,
                    position: pos,
                });
            }
        }

        // Non-empty is already established, so first/last exist
        if let Some(first) = canonical.chars().next()
            && !Self::is_valid_start_end_char(first)
        {
            return Err(HandleError::InvalidStart { char: first });
        }
        if let Some(last) = canonical.chars().next_back()
            && !Self::is_valid_start_end_char(last)
        {
            return Err(HandleError::InvalidEnd { char: last });
        }

        if canonical.contains("..") {
            return Err(HandleError::ConsecutiveDots);
        }

        if !canonical.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(HandleError::NoAlphanumeric);
        }

        if RESERVED_WORDS.iter().any(|&w| w == canonical) {
            return Err(HandleError::Reserved {
                word: canonical.to_string(),
            });
        }

        Ok(())
    }

    #[inline]
    fn is_valid_char(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit() || ALLOWED_SPECIAL_CHARS.contains(&c)
    }

    #[inline]
    fn is_valid_start_end_char(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("original", &self.original)
            .field("canonical", &self.canonical)
            .finish()
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        &self.canonical
    }
}

impl TryFrom<String> for Handle {
    type Error = HandleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Handle {
    type Error = HandleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Handle> for String {
    fn from(handle: Handle) -> Self {
        handle.original
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod normalization {
        use super::*;

        #[test]
        fn test_trim_whitespace() {
            let handle = Handle::new("  alice  ").unwrap();
            assert_eq!(handle.as_str(), "alice");
        }

        #[test]
        fn test_lowercase() {
            let handle = Handle::new("ALICE").unwrap();
            assert_eq!(handle.as_str(), "alice");
            assert_eq!(handle.original(), "ALICE");
        }

        #[test]
        fn test_nfkc_normalization() {
            // Full-width 'Ａ' (U+FF21) normalizes to ASCII
            let handle = Handle::new("Ａlice").unwrap();
            assert_eq!(handle.as_str(), "alice");
        }

        #[test]
        fn test_idempotent() {
            let first = Handle::new("  AlIcE_123  ").unwrap();
            let second = Handle::new(first.as_str()).unwrap();
            assert_eq!(first.canonical(), second.canonical());
        }
    }

    mod length_validation {
        use super::*;

        #[test]
        fn test_empty_fails() {
            assert!(matches!(Handle::new(""), Err(HandleError::Empty)));
        }

        #[test]
        fn test_whitespace_only_fails() {
            assert!(matches!(Handle::new("   "), Err(HandleError::Empty)));
        }

        #[test]
        fn test_too_short() {
            assert!(matches!(
                Handle::new("ab"),
                Err(HandleError::TooShort { length: 2, min: 3 })
            ));
        }

        #[test]
        fn test_boundaries() {
            assert!(Handle::new("abc").is_ok());
            assert!(Handle::new("a".repeat(HANDLE_MAX_LENGTH)).is_ok());
            assert!(matches!(
                Handle::new("a".repeat(HANDLE_MAX_LENGTH + 1)),
                Err(HandleError::TooLong { .. })
            ));
        }
    }

    mod character_validation {
        use super::*;

        #[test]
        fn test_valid_characters() {
            assert!(Handle::new("alice123").is_ok());
            assert!(Handle::new("alice_bob").is_ok());
            assert!(Handle::new("alice.bob").is_ok());
            assert!(Handle::new("alice-bob").is_ok());
        }

        #[test]
        fn test_invalid_special_char() {
            assert!(matches!(
                Handle::new("alice@bob"),
                Err(HandleError::InvalidCharacter { char: '@', .. })
            ));
            assert!(matches!(
                Handle::new("alice+tag"),
                Err(HandleError::InvalidCharacter { char: '+', .. })
            ));
        }

        #[test]
        fn test_invalid_unicode() {
            assert!(matches!(
                Handle::new("日本語"),
                Err(HandleError::InvalidCharacter { .. })
            ));
        }
    }

    mod position_validation {
        use super::*;

        #[test]
        fn test_valid_start_end() {
            assert!(Handle::new("alice").is_ok());
            assert!(Handle::new("123alice").is_ok());
            assert!(Handle::new("_alice_").is_ok());
        }

        #[test]
        fn test_start_with_dot_fails() {
            assert!(matches!(
                Handle::new(".alice"),
                Err(HandleError::InvalidStart { char: '.' })
            ));
        }

        #[test]
        fn test_end_with_hyphen_fails() {
            assert!(matches!(
                Handle::new("alice-"),
                Err(HandleError::InvalidEnd { char: '-' })
            ));
        }
    }

    mod pattern_validation {
        use super::*;

        #[test]
        fn test_consecutive_dots_fails() {
            assert!(matches!(
                Handle::new("alice..bob"),
                Err(HandleError::ConsecutiveDots)
            ));
        }

        #[test]
        fn test_single_dots_ok() {
            assert!(Handle::new("alice.bob.charlie").is_ok());
        }

        #[test]
        fn test_symbols_only_fails() {
            assert!(matches!(
                Handle::new("___"),
                Err(HandleError::NoAlphanumeric)
            ));
        }

        #[test]
        fn test_whitespace_in_middle_fails() {
            let result = Handle::new("alice bob");
            assert!(matches!(
                result,
                Err(HandleError::ContainsWhitespace) | Err(HandleError::InvalidCharacter { .. })
            ));
        }
    }

    mod reserved_words {
        use super::*;

        #[test]
        fn test_reserved_admin() {
            assert!(matches!(
                Handle::new("admin"),
                Err(HandleError::Reserved { word }) if word == "admin"
            ));
        }

        #[test]
        fn test_reserved_case_insensitive() {
            assert!(matches!(
                Handle::new("ADMIN"),
                Err(HandleError::Reserved { word }) if word == "admin"
            ));
        }

        #[test]
        fn test_reserved_route_segments() {
            assert!(matches!(
                Handle::new("leaderboard"),
                Err(HandleError::Reserved { .. })
            ));
            assert!(matches!(
                Handle::new("designer"),
                Err(HandleError::Reserved { .. })
            ));
        }
    }

    mod serialization {
        use super::*;

        #[test]
        fn test_serialize() {
            let handle = Handle::new("alice").unwrap();
            let json = serde_json::to_string(&handle).unwrap();
            assert_eq!(json, "\"alice\"");
        }

        #[test]
        fn test_deserialize_with_normalization() {
            let handle: Handle = serde_json::from_str("\"ALICE\"").unwrap();
            assert_eq!(handle.as_str(), "alice");
        }

        #[test]
        fn test_deserialize_invalid() {
            let result: Result<Handle, _> = serde_json::from_str("\"ab\"");
            assert!(result.is_err());
        }
    }

    mod conversions {
        use super::*;

        #[test]
        fn test_from_db_preserves_case() {
            let handle = Handle::from_db("AliceB");
            assert_eq!(handle.original(), "AliceB");
            assert_eq!(handle.canonical(), "aliceb");
        }

        #[test]
        fn test_into_string() {
            let handle = Handle::new("Alice").unwrap();
            let s: String = handle.into();
            assert_eq!(s, "Alice");
        }
    }
}
