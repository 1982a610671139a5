//! Validated newtype wrappers for core domain primitives.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Maximum length of an [`IdentityLabel`], in characters.
pub const MAX_LABEL_LEN: usize = 128;

/// Error returned when a domain value fails validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The value is empty.
    #[error("value must not be empty")]
    Empty,
    /// The value exceeds the maximum length.
    #[error("value exceeds maximum length of {max} characters (got {got})")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
        /// Actual length.
        got: usize,
    },
    /// The value contains disallowed characters.
    #[error("value contains invalid characters: only ASCII alphanumerics and '-', '_', '.', ':', '@' allowed")]
    InvalidCharacters,
    /// The hex string is not the expected length.
    #[error("expected 64 hex characters, got {0}")]
    InvalidHexLength(usize),
    /// The hex string contains non-hex characters.
    #[error("value contains non-hex characters")]
    InvalidHex,
}

/// A validated signer label, as it appears in a trust policy.
///
/// Labels are 1–128 characters of ASCII alphanumerics plus `-`, `_`, `.`,
/// `:` and `@`. Signature sets on incoming cards are keyed by plain strings;
/// only the labels a policy requires go through this type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct IdentityLabel(String);

impl IdentityLabel {
    /// Create a new `IdentityLabel`, validating its format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the label is empty, exceeds
    /// [`MAX_LABEL_LEN`] characters, or contains a disallowed character.
    pub fn new(label: &str) -> Result<Self, ValidationError> {
        if label.is_empty() {
            return Err(ValidationError::Empty);
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(ValidationError::TooLong {
                max: MAX_LABEL_LEN,
                got: label.len(),
            });
        }
        if !label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '@'))
        {
            return Err(ValidationError::InvalidCharacters);
        }
        Ok(Self(label.to_owned()))
    }

    /// Return the inner label string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for IdentityLabel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for IdentityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for IdentityLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(&raw).map_err(serde::de::Error::custom)
    }
}

/// A card identifier: the lowercase hex form of the card's 32-byte fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CardId(String);

impl CardId {
    /// Parse a `CardId` from a hex string. Upper-case input is normalised.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the string is not exactly 64 hex characters.
    pub fn from_hex(hex: &str) -> Result<Self, ValidationError> {
        if hex.len() != 64 {
            return Err(ValidationError::InvalidHexLength(hex.len()));
        }
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidHex);
        }
        Ok(Self(hex.to_ascii_lowercase()))
    }

    /// Build the id of a card from its 32-byte fingerprint digest.
    #[must_use]
    pub fn from_digest(digest: &[u8; 32]) -> Self {
        Self(hex::encode(digest))
    }

    /// Return the hex string representation.
    #[must_use]
    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CardId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}
