//! API response models.

use cardgate_core::card::SignedCard;
use cardgate_core::types::CardId;
use serde::{Deserialize, Serialize};

/// Response body for the health endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok` while the server is up.
    pub status: String,
    /// Number of signers the loaded trust policy requires.
    pub required_signers: usize,
}

/// Response body for an accepted card: its id plus the card as received.
#[derive(Debug, Serialize, Deserialize)]
pub struct AcceptedCard {
    /// Hex fingerprint of the content snapshot.
    pub id: CardId,
    /// The validated card.
    #[serde(flatten)]
    pub card: SignedCard,
}
