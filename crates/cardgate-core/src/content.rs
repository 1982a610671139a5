//! Structured content carried inside card snapshots.
//!
//! The gate validates signatures over the raw snapshot bytes; these types are
//! only used for the structural checks performed before that.

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::card::ContentSnapshot;
use crate::types::CardId;

/// Maximum number of entries in [`CardContent::data`].
pub const MAX_DATA_ENTRIES: usize = 16;
/// Maximum length of a key or value in [`CardContent::data`].
pub const MAX_DATA_LEN: usize = 256;

/// Errors produced while interpreting a content snapshot.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The snapshot is not the expected JSON document.
    #[error("snapshot is not valid content JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A required field is empty.
    #[error("field '{0}' must not be empty")]
    EmptyField(&'static str),
    /// The embedded public key is not base64.
    #[error("public_key is not valid base64: {0}")]
    PublicKey(#[from] base64::DecodeError),
    /// Too many custom data entries.
    #[error("data has {got} entries, at most {max} allowed")]
    TooManyDataEntries {
        /// Maximum allowed entries.
        max: usize,
        /// Actual entries.
        got: usize,
    },
    /// A custom data key or value is too long.
    #[error("data entry '{key}' exceeds {max} characters")]
    DataEntryTooLong {
        /// Key of the offending entry.
        key: String,
        /// Maximum allowed characters.
        max: usize,
    },
}

/// Visibility of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardScope {
    /// Visible to the issuing application only.
    #[default]
    Application,
    /// Visible to every application.
    Global,
}

/// Optional device description attached to a card.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Device type, e.g. `iPhone`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    /// User-facing device name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
}

/// Content of a card-creation snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardContent {
    /// The identity the card binds, e.g. an email address.
    pub identity: String,
    /// Kind of identity, e.g. `email`.
    pub identity_type: String,
    /// Base64-encoded public key being bound to the identity.
    pub public_key: String,
    /// Card visibility.
    #[serde(default)]
    pub scope: CardScope,
    /// Free-form application data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, String>>,
    /// Device information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<DeviceInfo>,
}

impl CardContent {
    /// Parse and structurally check a creation snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if the snapshot is not card JSON or a field
    /// fails its constraints.
    pub fn from_snapshot(snapshot: &ContentSnapshot) -> Result<Self, ContentError> {
        let content: Self = serde_json::from_slice(snapshot.as_bytes())?;
        content.check()?;
        Ok(content)
    }

    fn check(&self) -> Result<(), ContentError> {
        if self.identity.is_empty() {
            return Err(ContentError::EmptyField("identity"));
        }
        if self.identity_type.is_empty() {
            return Err(ContentError::EmptyField("identity_type"));
        }
        if STANDARD.decode(&self.public_key)?.is_empty() {
            return Err(ContentError::EmptyField("public_key"));
        }
        if let Some(data) = &self.data {
            if data.len() > MAX_DATA_ENTRIES {
                return Err(ContentError::TooManyDataEntries {
                    max: MAX_DATA_ENTRIES,
                    got: data.len(),
                });
            }
            if let Some((key, _)) = data
                .iter()
                .find(|(k, v)| k.chars().count() > MAX_DATA_LEN || v.chars().count() > MAX_DATA_LEN)
            {
                return Err(ContentError::DataEntryTooLong {
                    key: key.clone(),
                    max: MAX_DATA_LEN,
                });
            }
        }
        Ok(())
    }
}

/// Why a card is being revoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevocationReason {
    /// No reason given.
    #[default]
    Unspecified,
    /// The card's private key is compromised.
    Compromised,
}

/// Content of a card-revocation snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationContent {
    /// Card being revoked.
    pub card_id: CardId,
    /// Reason for the revocation.
    #[serde(default)]
    pub revocation_reason: RevocationReason,
}

impl RevocationContent {
    /// Parse a revocation snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Json`] if the snapshot is not revocation JSON
    /// or the card id is not 64 hex characters.
    pub fn from_snapshot(snapshot: &ContentSnapshot) -> Result<Self, ContentError> {
        Ok(serde_json::from_slice(snapshot.as_bytes())?)
    }
}
