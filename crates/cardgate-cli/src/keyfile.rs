//! Key files: a signing key plus the label it signs under, as TOML.
//!
//! ```toml
//! scheme = "ed25519"
//! label = "app"
//! private_key = "<base64>"
//! public_key = "<base64>"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use cardgate_core::types::IdentityLabel;
use cardgate_crypto::provider::KeyScheme;
use cardgate_crypto::signer::CardSigningKey;
use serde::{Deserialize, Serialize};

/// Persisted signing key.
#[derive(Debug, Serialize, Deserialize)]
pub struct KeyFile {
    /// Scheme of the key.
    pub scheme: KeyScheme,
    /// Label the key signs under.
    pub label: IdentityLabel,
    /// Base64 private key (Ed25519 seed or RSA PKCS#8 DER).
    pub private_key: String,
    /// Base64 public key, as it appears in a trust file.
    pub public_key: String,
}

impl KeyFile {
    /// Encode `key` for storage under `label`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key cannot be encoded.
    pub fn from_signing_key(label: IdentityLabel, key: &CardSigningKey) -> Result<Self> {
        Ok(Self {
            scheme: key.scheme(),
            label,
            private_key: STANDARD.encode(key.to_encoded()?),
            public_key: STANDARD.encode(key.public_key_bytes()?),
        })
    }

    /// Decode the private key.
    ///
    /// # Errors
    ///
    /// Returns an error if the private key is not base64 or does not decode
    /// for the file's scheme.
    pub fn signing_key(&self) -> Result<CardSigningKey> {
        let bytes = STANDARD
            .decode(self.private_key.trim())
            .context("private_key is not base64")?;
        Ok(CardSigningKey::from_encoded(self.scheme, &bytes)?)
    }

    /// The `[signers]` entry trusting this key. The label is quoted since
    /// `.`, `:` and `@` are not allowed in bare TOML keys.
    #[must_use]
    pub fn trust_line(&self) -> String {
        format!("\"{}\" = \"{}\"", self.label, self.public_key)
    }
}

/// Write `key` to `path`, creating parent directories if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be written.
pub fn save_key_file(key: &KeyFile, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string(key)?)?;
    Ok(())
}

/// Load and deserialize a [`KeyFile`] from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or deserialized.
pub fn load_key_file(path: &Path) -> Result<KeyFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading key file {}", path.display()))?;
    Ok(toml::from_str(&raw)?)
}
