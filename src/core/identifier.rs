//! System identifiers.
//!
//! Only the canonical 36-character hyphenated UUID form is accepted from callers.
//! Parsing happens before any store access, so malformed identifiers never reach SQL.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Length of `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`.
const CANONICAL_LEN: usize = 36;

/// Identifier of a registered system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SystemId(Uuid);

impl SystemId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses caller-supplied text.
    ///
    /// # Errors
    /// Returns [`Error::InvalidIdentifier`] for anything other than a hyphenated UUID.
    /// Hex digits may be upper or lower case.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || Error::InvalidIdentifier {
            value: text.to_string(),
        };

        // Uuid::try_parse also accepts the simple, braced and URN forms.
        if text.len() != CANONICAL_LEN {
            return Err(invalid());
        }
        Uuid::try_parse(text).map(Self).map_err(|_| invalid())
    }

    /// The underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for SystemId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for SystemId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}
