//! Authenticated identity and the closed role set.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every authorization decision is made against `Role`, so the set of roles is
//! closed at the type level. Raw strings (form fields, persisted records) are
//! parsed here and anything outside the two variants is rejected before an
//! `Identity` can exist.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// =============================================================================
// ROLE
// =============================================================================

/// Role partition determining which screens an identity may reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Role {
    /// Member of the public reporting issues.
    Cyclist,
    /// Government official triaging reports.
    Official,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Cyclist, Role::Official];

    /// Wire / storage name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cyclist => "cyclist",
            Self::Official => "official",
        }
    }

    /// Human-readable label shown in the login role picker.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Cyclist => "Cyclist",
            Self::Official => "Government Official",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0:?}")]
pub struct RoleParseError(pub String);

impl FromStr for Role {
    type Err = RoleParseError;

    /// Accepts the canonical names plus the legacy `user` / `admin` aliases.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "cyclist" | "user" => Ok(Self::Cyclist),
            "official" | "admin" => Ok(Self::Official),
            _ => Err(RoleParseError(raw.to_owned())),
        }
    }
}

/// Serde deserializes roles through `FromStr`, so form fields and persisted
/// records share one parser.
impl TryFrom<String> for Role {
    type Error = RoleParseError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

// =============================================================================
// IDENTITY
// =============================================================================

/// The authenticated subject. Also the persisted record layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl Identity {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self { id: id.into(), name: name.into(), email: email.into(), role }
    }

    /// Parse a persisted record.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON, missing fields, or an unknown role.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Serialize to the persisted record layout.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` serialization failures.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
#[path = "identity_test.rs"]
mod tests;
