//! Error types for cryptographic operations and trust configuration.

use std::path::PathBuf;

use cardgate_core::types::ValidationError;
use thiserror::Error;

/// Errors raised by crypto providers and signing keys.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// A public key could not be decoded for the configured scheme.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),
    /// A private key could not be decoded or encoded.
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
    /// The signature bytes are not a well-formed signature for the scheme.
    #[error("malformed signature: {0}")]
    MalformedSignature(String),
    /// Key generation failed.
    #[error("key generation failed: {0}")]
    KeyGeneration(String),
}

/// Errors that can occur while loading a trust configuration.
#[derive(Debug, Error)]
pub enum TrustConfigError {
    /// The trust file could not be read.
    #[error("failed to read trust file {}: {source}", .path.display())]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The trust file is not valid TOML for [`crate::config::TrustConfig`].
    #[error("failed to parse trust file: {0}")]
    Parse(#[from] toml::de::Error),
    /// A signer label is not a valid identity label.
    #[error("invalid signer label '{label}': {source}")]
    InvalidLabel {
        /// The offending label.
        label: String,
        /// Why it was rejected.
        source: ValidationError,
    },
    /// A signer's key is not valid base64.
    #[error("key for signer '{label}' is not valid base64: {source}")]
    InvalidKeyEncoding {
        /// The signer whose key is malformed.
        label: String,
        /// Decoder error.
        source: base64::DecodeError,
    },
    /// One or more trusted keys failed to decode and skipping was not allowed.
    #[error("trusted keys failed to decode: {}", .labels.join(", "))]
    UndecodableKeys {
        /// Labels whose keys were rejected.
        labels: Vec<String>,
    },
}
