//! Role - the two platform roles a member can hold

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Platform role, carried both on the member record and as a realm role in the identity provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Lower-case name as stored and as registered in the identity provider
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Authority string used in login responses (e.g. `ROLE_ADMIN`)
    pub fn authority(&self) -> String {
        format!("ROLE_{}", self.as_str().to_uppercase())
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known role
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("User".parse::<Role>().unwrap(), Role::User);
        assert!("moderator".parse::<Role>().is_err());
    }

    #[test]
    fn test_authority() {
        assert_eq!(Role::Admin.authority(), "ROLE_ADMIN");
        assert_eq!(Role::User.authority(), "ROLE_USER");
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, Role::User);
    }
}
