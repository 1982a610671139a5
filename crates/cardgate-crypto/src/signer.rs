//! Signing keys for producing card signatures.
//!
//! The gate itself only verifies; these keys back the operator CLI and test
//! fixtures that need real signatures.

use std::fmt;

use ed25519_dalek::Signer;
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::{DecodePrivateKey, EncodePrivateKey, EncodePublicKey};
use rsa::signature::{RandomizedSigner, SignatureEncoding};
use rsa::RsaPrivateKey;
use sha2::Sha256;

use crate::error::CryptoError;
use crate::provider::{Fingerprint, KeyScheme};
use crate::rsa_pkcs1::MIN_MODULUS_BITS;

/// A private key able to sign card fingerprints.
pub enum CardSigningKey {
    /// Ed25519 key.
    Ed25519(ed25519_dalek::SigningKey),
    /// RSA key, used with PKCS#1 v1.5 + SHA-256.
    Rsa(Box<RsaPrivateKey>),
}

impl CardSigningKey {
    /// Generate a fresh key for `scheme`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::KeyGeneration`] if RSA key generation fails.
    pub fn generate(scheme: KeyScheme) -> Result<Self, CryptoError> {
        match scheme {
            KeyScheme::Ed25519 => Ok(Self::Ed25519(ed25519_dalek::SigningKey::generate(
                &mut rand::rngs::OsRng,
            ))),
            KeyScheme::RsaPkcs1Sha256 => {
                let key = RsaPrivateKey::new(&mut rand::thread_rng(), MIN_MODULUS_BITS)
                    .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;
                Ok(Self::Rsa(Box::new(key)))
            }
        }
    }

    /// Decode a private key: a 32-byte seed for Ed25519, PKCS#8 DER for RSA.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidPrivateKey`] if the bytes do not decode.
    pub fn from_encoded(scheme: KeyScheme, bytes: &[u8]) -> Result<Self, CryptoError> {
        match scheme {
            KeyScheme::Ed25519 => {
                let seed = <[u8; 32]>::try_from(bytes).map_err(|_| {
                    CryptoError::InvalidPrivateKey(format!(
                        "Ed25519 seed must be 32 bytes, got {}",
                        bytes.len()
                    ))
                })?;
                Ok(Self::Ed25519(ed25519_dalek::SigningKey::from_bytes(&seed)))
            }
            KeyScheme::RsaPkcs1Sha256 => RsaPrivateKey::from_pkcs8_der(bytes)
                .map(|k| Self::Rsa(Box::new(k)))
                .map_err(|e| CryptoError::InvalidPrivateKey(format!("RSA PKCS#8: {e}"))),
        }
    }

    /// Scheme this key signs with.
    #[must_use]
    pub fn scheme(&self) -> KeyScheme {
        match self {
            Self::Ed25519(_) => KeyScheme::Ed25519,
            Self::Rsa(_) => KeyScheme::RsaPkcs1Sha256,
        }
    }

    /// Encode the private key in the form [`Self::from_encoded`] accepts.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidPrivateKey`] if PKCS#8 encoding fails.
    pub fn to_encoded(&self) -> Result<Vec<u8>, CryptoError> {
        match self {
            Self::Ed25519(key) => Ok(key.to_bytes().to_vec()),
            Self::Rsa(key) => key
                .to_pkcs8_der()
                .map(|doc| doc.as_bytes().to_vec())
                .map_err(|e| CryptoError::InvalidPrivateKey(e.to_string())),
        }
    }

    /// Public key bytes in the form the matching provider decodes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidPublicKey`] if SPKI encoding fails.
    pub fn public_key_bytes(&self) -> Result<Vec<u8>, CryptoError> {
        match self {
            Self::Ed25519(key) => Ok(key.verifying_key().to_bytes().to_vec()),
            Self::Rsa(key) => key
                .to_public_key()
                .to_public_key_der()
                .map(|doc| doc.as_bytes().to_vec())
                .map_err(|e| CryptoError::InvalidPublicKey(e.to_string())),
        }
    }

    /// Sign a card fingerprint.
    #[must_use]
    pub fn sign(&self, fingerprint: &Fingerprint) -> Vec<u8> {
        match self {
            Self::Ed25519(key) => key.sign(fingerprint.as_bytes()).to_bytes().to_vec(),
            Self::Rsa(key) => {
                let signing_key = SigningKey::<Sha256>::new(key.as_ref().clone());
                let mut rng = rand::thread_rng();
                signing_key
                    .sign_with_rng(&mut rng, fingerprint.as_bytes())
                    .to_bytes()
                    .to_vec()
            }
        }
    }
}

impl fmt::Debug for CardSigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardSigningKey")
            .field("scheme", &self.scheme())
            .finish_non_exhaustive()
    }
}
