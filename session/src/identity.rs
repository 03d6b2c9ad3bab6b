//! Authenticated actor model and the closed role set.
//!
//! DESIGN
//! ======
//! `Role` is a closed enum rather than a free-form string: the durable record
//! is rejected at decode time if it names a role outside the set, so every
//! `Identity` in memory carries a valid role.

#[cfg(test)]
#[path = "identity_test.rs"]
mod tests;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Functional category of an actor. Drives UI personalization only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Therapist,
    Caregiver,
    Teacher,
    Hr,
    Admin,
}

impl Role {
    /// Every role, in the order the register form lists them.
    pub const ALL: [Self; 5] = [Self::Therapist, Self::Caregiver, Self::Teacher, Self::Hr, Self::Admin];

    /// Wire/storage spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Therapist => "therapist",
            Self::Caregiver => "caregiver",
            Self::Teacher => "teacher",
            Self::Hr => "hr",
            Self::Admin => "admin",
        }
    }

    /// Human-readable label for menus and badges.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Therapist => "Therapist",
            Self::Caregiver => "Caregiver",
            Self::Teacher => "Teacher",
            Self::Hr => "HR",
            Self::Admin => "Administrator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by [`Role::from_str`] for strings outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| ParseRoleError(s.to_owned()))
    }
}

/// The currently authenticated actor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique identifier (UUID string for registered users).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    pub role: Role,
    /// Avatar image reference, if any.
    #[serde(default)]
    pub avatar: Option<String>,
}

impl Identity {
    /// Build a fresh identity with a newly generated id.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            email: email.into(),
            role,
            avatar: None,
        }
    }

    /// Name of the first required field that is blank, if any.
    ///
    /// A stored identity and a freshly registered one obey the same rule, so
    /// whatever `register` accepts survives a reload.
    #[must_use]
    pub fn blank_field(&self) -> Option<&'static str> {
        [("id", &self.id), ("name", &self.name), ("email", &self.email)]
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field)
    }

    /// First letter of the display name, uppercased, for avatar fallbacks.
    #[must_use]
    pub fn initial(&self) -> String {
        self.name
            .trim()
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_owned())
    }
}
