//! Signed cards as they travel between clients and the gate.
//!
//! Wire form:
//!
//! ```json
//! {
//!   "content_snapshot": "<base64 canonical card bytes>",
//!   "meta": { "signs": { "self": "<base64 signature>", "app": "<base64 signature>" } }
//! }
//! ```

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Canonical serialized bytes of a card, the sole input to fingerprinting.
///
/// The bytes are kept exactly as received; nothing is trimmed or re-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContentSnapshot(Vec<u8>);

impl ContentSnapshot {
    /// Wrap raw snapshot bytes.
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Borrow the raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of bytes in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for ContentSnapshot {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for ContentSnapshot {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl Serialize for ContentSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(&self.0))
    }
}

impl<'de> Deserialize<'de> for ContentSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded)
            .map(Self)
            .map_err(|e| serde::de::Error::custom(format!("content_snapshot: {e}")))
    }
}

/// Signatures carried by a card, keyed by signer label.
///
/// Labels are free-form here: a card may carry signatures nobody asked for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignatureSet(BTreeMap<String, Vec<u8>>);

impl SignatureSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the signature for `label`, returning the old one.
    pub fn insert(&mut self, label: impl Into<String>, signature: Vec<u8>) -> Option<Vec<u8>> {
        self.0.insert(label.into(), signature)
    }

    /// Look up the signature for `label`.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&[u8]> {
        self.0.get(label).map(Vec::as_slice)
    }

    /// Iterate over `(label, signature)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.0.iter().map(|(l, s)| (l.as_str(), s.as_slice()))
    }

    /// Number of signatures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<L: Into<String>> FromIterator<(L, Vec<u8>)> for SignatureSet {
    fn from_iter<I: IntoIterator<Item = (L, Vec<u8>)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(l, s)| (l.into(), s)).collect())
    }
}

impl Serialize for SignatureSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(l, s)| (l, STANDARD.encode(s))))
    }
}

impl<'de> Deserialize<'de> for SignatureSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = BTreeMap::<String, String>::deserialize(deserializer)?;
        encoded
            .into_iter()
            .map(|(label, sig)| {
                STANDARD
                    .decode(sig)
                    .map(|bytes| (label.clone(), bytes))
                    .map_err(|e| serde::de::Error::custom(format!("signature for '{label}': {e}")))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()
            .map(Self)
    }
}

/// Metadata block of a signed card.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CardMeta {
    /// Per-signer signatures over the snapshot fingerprint.
    #[serde(default)]
    pub signs: SignatureSet,
}

/// A card request or response: snapshot plus signatures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedCard {
    /// Canonical content being vouched for.
    pub content_snapshot: ContentSnapshot,
    /// Signatures and other metadata.
    #[serde(default)]
    pub meta: CardMeta,
}

impl SignedCard {
    /// Build an unsigned card around `snapshot`.
    #[must_use]
    pub fn unsigned(snapshot: impl Into<ContentSnapshot>) -> Self {
        Self {
            content_snapshot: snapshot.into(),
            meta: CardMeta::default(),
        }
    }

    /// Signatures carried by the card.
    #[must_use]
    pub fn signatures(&self) -> &SignatureSet {
        &self.meta.signs
    }
}
