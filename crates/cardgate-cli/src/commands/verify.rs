//! `cardgate verify`: check a card against a trust file.

use std::path::Path;

use anyhow::{Context, Result};
use cardgate_crypto::config::TrustConfig;
use cardgate_crypto::validator::ValidationOutcome;

use crate::commands::card::read_card;

/// Validate the card at `card_path` with the policy in `trust_path`.
///
/// The outer `Result` covers loading; the returned outcome is the gate's
/// verdict on the card.
///
/// # Errors
///
/// Returns an error if the card or trust file cannot be loaded, or the trust
/// file's keys do not decode.
pub fn run_verify(card_path: &Path, trust_path: &Path) -> Result<ValidationOutcome> {
    let card = read_card(card_path)?;
    let trust = TrustConfig::load(trust_path)?;
    let validator = trust
        .build_validator()
        .with_context(|| format!("building validator from {}", trust_path.display()))?;
    Ok(validator.validate(&card))
}
