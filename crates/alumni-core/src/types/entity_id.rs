//! Entity identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// The stable unique key of a group, job, member or application.
///
/// Ids are opaque server-assigned strings (`_id` on the wire). They end up in
/// URL path segments, so they must be non-empty and free of `/`, `?`, `#`
/// and whitespace.
///
/// # Example
///
/// ```
/// use alumni_core::EntityId;
///
/// let id = EntityId::new("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
/// assert_eq!(id.as_str(), "65a1f0c2e4b0a1b2c3d4e5f6");
/// assert!(EntityId::new("a/b").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(String);

impl EntityId {
    /// Create a new id, validating the format.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Returns the id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), Error> {
        if s.is_empty() {
            return Err(InvalidInputError::EntityId {
                value: s.to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        // A dot segment would walk up the resource path once the URL is
        // normalised.
        if s == "." || s == ".." {
            return Err(InvalidInputError::EntityId {
                value: s.to_string(),
                reason: "must not be a dot segment".to_string(),
            }
            .into());
        }

        if let Some(c) = s
            .chars()
            .find(|c| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_whitespace())
        {
            return Err(InvalidInputError::EntityId {
                value: s.to_string(),
                reason: format!("contains forbidden character {:?}", c),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for EntityId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
