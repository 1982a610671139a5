//! RSA PKCS#1 v1.5 + SHA-256 provider.

use rsa::pkcs1v15::{Signature, VerifyingKey};
use rsa::pkcs8::DecodePublicKey;
use rsa::signature::Verifier;
use rsa::traits::PublicKeyParts;
use rsa::RsaPublicKey;
use sha2::Sha256;

use crate::error::CryptoError;
use crate::provider::{CryptoProvider, Fingerprint};

/// Smallest accepted modulus, in bits.
pub const MIN_MODULUS_BITS: usize = 2048;

/// RSA PKCS#1 v1.5 signatures (SHA-256) over SHA-256 fingerprints.
///
/// Trusted keys are DER-encoded `SubjectPublicKeyInfo` documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct RsaProvider;

impl CryptoProvider for RsaProvider {
    type PublicKey = VerifyingKey<Sha256>;

    fn decode_public_key(&self, raw: &[u8]) -> Result<VerifyingKey<Sha256>, CryptoError> {
        let key = RsaPublicKey::from_public_key_der(raw)
            .map_err(|e| CryptoError::InvalidPublicKey(format!("RSA SPKI: {e}")))?;
        let bits = key.size() * 8;
        if bits < MIN_MODULUS_BITS {
            return Err(CryptoError::InvalidPublicKey(format!(
                "RSA modulus must be at least {MIN_MODULUS_BITS} bits, got {bits}"
            )));
        }
        Ok(VerifyingKey::<Sha256>::new(key))
    }

    fn fingerprint(&self, snapshot: &[u8]) -> Fingerprint {
        Fingerprint::sha256(snapshot)
    }

    fn verify(
        &self,
        fingerprint: &Fingerprint,
        signature: &[u8],
        key: &VerifyingKey<Sha256>,
    ) -> Result<bool, CryptoError> {
        let signature = Signature::try_from(signature)
            .map_err(|e| CryptoError::MalformedSignature(e.to_string()))?;
        Ok(key.verify(fingerprint.as_bytes(), &signature).is_ok())
    }
}
