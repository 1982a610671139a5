//! The crypto provider seam: key decoding, fingerprinting and verification.

use std::fmt;

use cardgate_core::types::CardId;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::CryptoError;

/// SHA-256 digest of a content snapshot's exact bytes.
///
/// Signatures are made over these 32 bytes, never over the raw snapshot.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Fingerprint `data` with SHA-256.
    #[must_use]
    pub fn sha256(data: &[u8]) -> Self {
        Self(Sha256::digest(data).into())
    }

    /// Borrow the digest bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex form.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// The card id derived from this fingerprint.
    #[must_use]
    pub fn card_id(&self) -> CardId {
        CardId::from_digest(&self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.to_hex())
    }
}

/// Signature scheme used for trusted keys and card signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyScheme {
    /// Ed25519 over the fingerprint; raw 32-byte public keys.
    Ed25519,
    /// RSA PKCS#1 v1.5 with SHA-256 over the fingerprint; DER SPKI public keys.
    RsaPkcs1Sha256,
}

impl KeyScheme {
    /// Configuration name of the scheme.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ed25519 => "ed25519",
            Self::RsaPkcs1Sha256 => "rsa_pkcs1_sha256",
        }
    }
}

impl fmt::Display for KeyScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cryptographic operations the signature validator depends on.
///
/// Implementations must be safe to call concurrently; the validator shares a
/// single provider across request handlers.
pub trait CryptoProvider: Send + Sync {
    /// Decoded public key type.
    type PublicKey: Send + Sync;

    /// Decode raw public key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidPublicKey`] if the bytes are not a valid
    /// key for this provider's scheme.
    fn decode_public_key(&self, raw: &[u8]) -> Result<Self::PublicKey, CryptoError>;

    /// Fingerprint the exact snapshot bytes.
    fn fingerprint(&self, snapshot: &[u8]) -> Fingerprint;

    /// Check `signature` over `fingerprint` against `key`.
    ///
    /// Returns `Ok(false)` for a well-formed signature that does not verify.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::MalformedSignature`] if the signature bytes
    /// cannot be parsed.
    fn verify(
        &self,
        fingerprint: &Fingerprint,
        signature: &[u8],
        key: &Self::PublicKey,
    ) -> Result<bool, CryptoError>;
}
