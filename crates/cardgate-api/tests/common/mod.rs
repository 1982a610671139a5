#![allow(dead_code)]

use std::collections::BTreeMap;
use std::time::Duration;

use axum_test::TestServer;
use base64::{engine::general_purpose::STANDARD, Engine};
use cardgate_api::router::{build_router, AppState};
use cardgate_core::card::SignedCard;
use cardgate_crypto::config::TrustConfig;
use cardgate_crypto::provider::{Fingerprint, KeyScheme};
use cardgate_crypto::signer::CardSigningKey;
use serde_json::json;

pub const TOKEN: &str = "gate-s3cret";

pub fn key(seed: u8) -> CardSigningKey {
    CardSigningKey::from_encoded(KeyScheme::Ed25519, &[seed; 32]).unwrap()
}

/// Trust config requiring `self` (seed 1) and `app` (seed 2).
pub fn trust_config() -> TrustConfig {
    let signers: BTreeMap<String, String> = [("self", 1u8), ("app", 2u8)]
        .into_iter()
        .map(|(label, seed)| {
            (label.to_owned(), STANDARD.encode(key(seed).public_key_bytes().unwrap()))
        })
        .collect();
    TrustConfig {
        scheme: KeyScheme::Ed25519,
        skip_undecodable_keys: false,
        signers,
    }
}

pub fn server(access_token: Option<&str>) -> TestServer {
    let validator = trust_config().build_validator().unwrap();
    let state = AppState::new(validator, access_token, Duration::from_secs(2));
    TestServer::new(build_router(state)).unwrap()
}

pub fn card_snapshot(identity: &str) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "identity": identity,
        "identity_type": "email",
        "public_key": STANDARD.encode([7u8; 32]),
        "scope": "application",
    }))
    .unwrap()
}

pub fn revocation_snapshot(card_id: &str) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "card_id": card_id,
        "revocation_reason": "compromised",
    }))
    .unwrap()
}

/// A card over `snapshot` signed by the given `(label, seed)` pairs.
pub fn signed(snapshot: Vec<u8>, signers: &[(&str, u8)]) -> SignedCard {
    let mut card = SignedCard::unsigned(snapshot);
    let fp = Fingerprint::sha256(card.content_snapshot.as_bytes());
    for (label, seed) in signers {
        card.meta.signs.insert(*label, key(*seed).sign(&fp));
    }
    card
}

pub fn fully_signed(snapshot: Vec<u8>) -> SignedCard {
    signed(snapshot, &[("self", 1), ("app", 2)])
}
