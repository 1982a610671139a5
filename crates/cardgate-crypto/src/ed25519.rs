//! Ed25519 provider.

use ed25519_dalek::{Signature, VerifyingKey, PUBLIC_KEY_LENGTH};

use crate::error::CryptoError;
use crate::provider::{CryptoProvider, Fingerprint};

/// Ed25519 signatures over SHA-256 fingerprints.
///
/// Trusted keys are raw 32-byte public keys; signatures are the 64-byte
/// Ed25519 encoding. Verification is strict (no small-order keys, canonical
/// `S` only).
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Provider;

impl CryptoProvider for Ed25519Provider {
    type PublicKey = VerifyingKey;

    fn decode_public_key(&self, raw: &[u8]) -> Result<VerifyingKey, CryptoError> {
        let bytes = <[u8; PUBLIC_KEY_LENGTH]>::try_from(raw).map_err(|_| {
            CryptoError::InvalidPublicKey(format!(
                "Ed25519 public key must be {PUBLIC_KEY_LENGTH} bytes, got {}",
                raw.len()
            ))
        })?;
        VerifyingKey::from_bytes(&bytes).map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))
    }

    fn fingerprint(&self, snapshot: &[u8]) -> Fingerprint {
        Fingerprint::sha256(snapshot)
    }

    fn verify(
        &self,
        fingerprint: &Fingerprint,
        signature: &[u8],
        key: &VerifyingKey,
    ) -> Result<bool, CryptoError> {
        let signature = Signature::from_slice(signature)
            .map_err(|e| CryptoError::MalformedSignature(e.to_string()))?;
        Ok(key.verify_strict(fingerprint.as_bytes(), &signature).is_ok())
    }
}
