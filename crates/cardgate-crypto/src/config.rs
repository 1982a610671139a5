//! Trust configuration: a TOML file naming the scheme and trusted signers.
//!
//! ```toml
//! scheme = "ed25519"
//! skip_undecodable_keys = false
//!
//! [signers]
//! self = "<base64 public key>"
//! app = "<base64 public key>"
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine};
use cardgate_core::types::IdentityLabel;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::ed25519::Ed25519Provider;
use crate::error::TrustConfigError;
use crate::policy::build_trust_policy;
use crate::provider::{CryptoProvider, KeyScheme};
use crate::rsa_pkcs1::RsaProvider;
use crate::validator::{CardValidator, SignatureValidator};

/// Parsed trust configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustConfig {
    /// Scheme every trusted key and card signature uses.
    pub scheme: KeyScheme,
    /// Drop keys that are not base64 or do not decode for the scheme, with a
    /// warning, instead of refusing to start.
    #[serde(default)]
    pub skip_undecodable_keys: bool,
    /// Required signers: label to base64 public key.
    #[serde(default)]
    pub signers: BTreeMap<String, String>,
}

impl TrustConfig {
    /// Load a trust configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`TrustConfigError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, TrustConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| TrustConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Parse a trust configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`TrustConfigError::Parse`] if the text is not a valid config.
    pub fn from_toml_str(raw: &str) -> Result<Self, TrustConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Validated labels with their base64-decoded key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`TrustConfigError::InvalidLabel`] or
    /// [`TrustConfigError::InvalidKeyEncoding`] for the first bad entry.
    pub fn raw_keys(&self) -> Result<BTreeMap<IdentityLabel, Vec<u8>>, TrustConfigError> {
        self.signers
            .iter()
            .map(|(label, key)| decode_entry(label, key))
            .collect()
    }

    /// Like [`TrustConfig::raw_keys`], but with `skip_undecodable_keys` set
    /// a key that is not base64 is dropped with a warning instead.
    fn usable_raw_keys(&self) -> Result<BTreeMap<IdentityLabel, Vec<u8>>, TrustConfigError> {
        let mut keys = BTreeMap::new();
        for (label, key) in &self.signers {
            match decode_entry(label, key) {
                Ok((parsed, bytes)) => {
                    keys.insert(parsed, bytes);
                }
                Err(TrustConfigError::InvalidKeyEncoding { label, source })
                    if self.skip_undecodable_keys =>
                {
                    warn!("dropping trusted key for '{label}': not base64 ({source})");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(keys)
    }

    /// Decode the trusted keys and bind them to the configured scheme's
    /// provider.
    ///
    /// # Errors
    ///
    /// Returns [`TrustConfigError::InvalidLabel`] for a malformed label. With
    /// `skip_undecodable_keys` off, also returns
    /// [`TrustConfigError::InvalidKeyEncoding`] for a key that is not base64
    /// and [`TrustConfigError::UndecodableKeys`] for keys the scheme cannot
    /// decode; with it on, both kinds of key are dropped with a warning.
    pub fn build_validator(&self) -> Result<Arc<dyn CardValidator>, TrustConfigError> {
        let raw = self.usable_raw_keys()?;
        match self.scheme {
            KeyScheme::Ed25519 => self.bind(Ed25519Provider, raw),
            KeyScheme::RsaPkcs1Sha256 => self.bind(RsaProvider, raw),
        }
    }

    fn bind<P>(
        &self,
        provider: P,
        raw: BTreeMap<IdentityLabel, Vec<u8>>,
    ) -> Result<Arc<dyn CardValidator>, TrustConfigError>
    where
        P: CryptoProvider + 'static,
        P::PublicKey: 'static,
    {
        let policy = match build_trust_policy(&provider, raw) {
            Ok(policy) => policy,
            Err(e) if self.skip_undecodable_keys => e.into_partial_policy(),
            Err(e) => {
                for failure in e.failures() {
                    error!("trusted key for '{}' rejected: {}", failure.label, failure.error);
                }
                return Err(TrustConfigError::UndecodableKeys {
                    labels: e.failed_labels().map(ToString::to_string).collect(),
                });
            }
        };

        if policy.is_empty() {
            warn!("trust policy requires no signers; every card will pass validation");
        }
        info!(
            "trust policy loaded: {} required signer(s), scheme {}",
            policy.len(),
            self.scheme
        );
        Ok(Arc::new(SignatureValidator::new(provider, policy)))
    }
}

fn decode_entry(label: &str, key: &str) -> Result<(IdentityLabel, Vec<u8>), TrustConfigError> {
    let parsed = IdentityLabel::new(label).map_err(|source| TrustConfigError::InvalidLabel {
        label: label.to_owned(),
        source,
    })?;
    let bytes = STANDARD
        .decode(key.trim())
        .map_err(|source| TrustConfigError::InvalidKeyEncoding {
            label: label.to_owned(),
            source,
        })?;
    Ok((parsed, bytes))
}
