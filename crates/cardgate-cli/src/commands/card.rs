//! Card file commands: wrap raw snapshots, sign them and print their id.

use std::path::Path;

use anyhow::{Context, Result};
use cardgate_core::card::SignedCard;
use cardgate_core::types::CardId;
use cardgate_crypto::provider::Fingerprint;
use log::info;

use crate::keyfile::load_key_file;

/// Read a signed card from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a signed card.
pub fn read_card(path: &Path) -> Result<SignedCard> {
    let raw = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&raw).with_context(|| format!("{} is not a signed card", path.display()))
}

/// Write `card` to `path` as pretty JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_card(card: &SignedCard, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(card)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Wrap the raw bytes of `snapshot` in an unsigned card written to `out`.
///
/// The bytes are taken as-is; a trailing newline is part of the snapshot.
///
/// # Errors
///
/// Returns an error if either file cannot be accessed.
pub fn run_wrap(snapshot: &Path, out: &Path) -> Result<CardId> {
    let bytes = std::fs::read(snapshot).with_context(|| format!("reading {}", snapshot.display()))?;
    let card = SignedCard::unsigned(bytes);
    write_card(&card, out)?;
    Ok(card_id(&card))
}

/// Sign the card at `card_path` with the key in `key_path`, replacing any
/// earlier signature under the key's label.
///
/// # Errors
///
/// Returns an error if the card or key cannot be loaded, or the card cannot
/// be written back.
pub fn run_sign(card_path: &Path, key_path: &Path) -> Result<()> {
    let mut card = read_card(card_path)?;
    let file = load_key_file(key_path)?;
    let key = file.signing_key()?;

    let fingerprint = Fingerprint::sha256(card.content_snapshot.as_bytes());
    let replaced = card
        .meta
        .signs
        .insert(file.label.as_str(), key.sign(&fingerprint))
        .is_some();
    write_card(&card, card_path)?;

    if replaced {
        info!("replaced signature '{}' on card {fingerprint}", file.label);
    } else {
        info!("added signature '{}' to card {fingerprint}", file.label);
    }
    Ok(())
}

/// Id of the card at `card_path`.
///
/// # Errors
///
/// Returns an error if the card cannot be loaded.
pub fn run_fingerprint(card_path: &Path) -> Result<CardId> {
    Ok(card_id(&read_card(card_path)?))
}

fn card_id(card: &SignedCard) -> CardId {
    Fingerprint::sha256(card.content_snapshot.as_bytes()).card_id()
}
