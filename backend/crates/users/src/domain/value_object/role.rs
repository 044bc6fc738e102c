use serde::{Deserialize, Serialize};
use std::fmt;

/// User role
///
/// Closed set: an account is either a designer (authors questions and
/// categories) or a player (answers questions and accrues points).
/// The role is fixed at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum Role {
    Designer = 0,
    Player = 1,
}

impl Role {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        use Role::*;
        match self {
            Designer => "designer",
            Player => "player",
        }
    }

    /// Display label used in "not found" messages
    #[inline]
    pub const fn label(&self) -> &'static str {
        use Role::*;
        match self {
            Designer => "Designer",
            Player => "Player",
        }
    }

    #[inline]
    pub const fn is_designer(&self) -> bool {
        matches!(self, Role::Designer)
    }

    #[inline]
    pub const fn is_player(&self) -> bool {
        matches!(self, Role::Player)
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        use Role::*;
        match id {
            0 => Some(Designer),
            1 => Some(Player),
            _ => None,
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use Role::*;
        match code {
            "designer" => Some(Designer),
            "player" => Some(Player),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_id() {
        assert_eq!(Role::from_id(0), Some(Role::Designer));
        assert_eq!(Role::from_id(1), Some(Role::Player));
        assert_eq!(Role::from_id(2), None);
        assert_eq!(Role::from_id(-1), None);
    }

    #[test]
    fn test_role_from_code() {
        assert_eq!(Role::from_code("designer"), Some(Role::Designer));
        assert_eq!(Role::from_code("player"), Some(Role::Player));
        assert_eq!(Role::from_code("admin"), None);
        assert_eq!(Role::from_code(""), None);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Designer.to_string(), "designer");
        assert_eq!(Role::Player.to_string(), "player");
    }

    #[test]
    fn test_role_checks() {
        assert!(Role::Designer.is_designer());
        assert!(!Role::Designer.is_player());
        assert!(Role::Player.is_player());
        assert!(!Role::Player.is_designer());
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&Role::Player).unwrap(), "\"player\"");
        let role: Role = serde_json::from_str("\"designer\"").unwrap();
        assert_eq!(role, Role::Designer);
    }
}
