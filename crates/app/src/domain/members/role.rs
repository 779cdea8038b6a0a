//! Organization member roles.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role of a user within an organization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberRole {
    #[default]
    Member,

    #[serde(rename = "Power User")]
    PowerUser,

    Admin,

    #[serde(rename = "Super Admin")]
    SuperAdmin,
}

impl MemberRole {
    pub const ALL: [Self; 4] = [Self::Member, Self::PowerUser, Self::Admin, Self::SuperAdmin];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Member => "Member",
            Self::PowerUser => "Power User",
            Self::Admin => "Admin",
            Self::SuperAdmin => "Super Admin",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown member role `{0}`")]
pub struct UnknownRole(pub String);

impl FromStr for MemberRole {
    type Err = UnknownRole;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();

        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownRole(value.to_owned()))
    }
}
