#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use cardgate_core::card::SignedCard;
use cardgate_core::types::IdentityLabel;
use cardgate_crypto::error::CryptoError;
use cardgate_crypto::policy::TrustPolicy;
use cardgate_crypto::provider::{CryptoProvider, Fingerprint};
use sha2::{Digest, Sha256};

/// Deterministic stand-in provider: a key is any byte string not starting
/// with `bad`, and its signature is `SHA-256(key || fingerprint)`.
#[derive(Debug, Default)]
pub struct FakeProvider {
    pub verify_calls: AtomicUsize,
}

impl FakeProvider {
    pub fn sign(key: &[u8], fingerprint: &Fingerprint) -> Vec<u8> {
        Sha256::new()
            .chain_update(key)
            .chain_update(fingerprint.as_bytes())
            .finalize()
            .to_vec()
    }

    pub fn calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }
}

impl CryptoProvider for FakeProvider {
    type PublicKey = Vec<u8>;

    fn decode_public_key(&self, raw: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if raw.is_empty() || raw.starts_with(b"bad") {
            return Err(CryptoError::InvalidPublicKey("fake key rejected".to_owned()));
        }
        Ok(raw.to_vec())
    }

    fn fingerprint(&self, snapshot: &[u8]) -> Fingerprint {
        Fingerprint::sha256(snapshot)
    }

    fn verify(
        &self,
        fingerprint: &Fingerprint,
        signature: &[u8],
        key: &Vec<u8>,
    ) -> Result<bool, CryptoError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        if signature.len() != 32 {
            return Err(CryptoError::MalformedSignature(format!(
                "expected 32 bytes, got {}",
                signature.len()
            )));
        }
        Ok(signature == Self::sign(key, fingerprint).as_slice())
    }
}

pub fn label(s: &str) -> IdentityLabel {
    IdentityLabel::new(s).unwrap()
}

pub fn key_for(signer: &str) -> Vec<u8> {
    format!("key-{signer}").into_bytes()
}

/// Policy requiring `signers`, each trusting `key_for(signer)`.
pub fn policy(signers: &[&str]) -> TrustPolicy<Vec<u8>> {
    signers.iter().map(|s| (label(s), key_for(s))).collect()
}

/// Card over `snapshot` carrying valid fake signatures from `signers`.
pub fn signed_card(snapshot: &[u8], signers: &[&str]) -> SignedCard {
    let fp = Fingerprint::sha256(snapshot);
    let mut card = SignedCard::unsigned(snapshot);
    for signer in signers {
        card.meta.signs.insert(*signer, FakeProvider::sign(&key_for(signer), &fp));
    }
    card
}
