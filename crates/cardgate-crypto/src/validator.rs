//! Signature validation of cards against a trust policy.

use std::sync::Arc;

use cardgate_core::card::{ContentSnapshot, SignedCard};
use cardgate_core::error::ResponseError;
use log::debug;

use crate::policy::TrustPolicy;
use crate::provider::{CryptoProvider, Fingerprint};

/// `Ok(())` if the card is valid, otherwise the single registered error.
pub type ValidationOutcome = Result<(), ResponseError>;

/// Check that every signer required by `policy` signed `card`'s fingerprint.
///
/// The fingerprint is taken over the snapshot bytes exactly as received.
/// Stops at the first required signer whose signature is missing, malformed
/// or does not verify, and reports all three the same way. Signatures from
/// labels outside the policy are ignored.
///
/// # Errors
///
/// Returns [`ResponseError::SignatureValidationFailed`] if any required
/// signature is missing or invalid.
pub fn validate_card<P: CryptoProvider + ?Sized>(
    provider: &P,
    policy: &TrustPolicy<P::PublicKey>,
    card: &SignedCard,
) -> ValidationOutcome {
    let fingerprint = provider.fingerprint(card.content_snapshot.as_bytes());

    for (label, key) in policy.iter() {
        let Some(signature) = card.signatures().get(label.as_str()) else {
            debug!("card {fingerprint}: no signature from required signer '{label}'");
            return Err(ResponseError::SignatureValidationFailed);
        };
        match provider.verify(&fingerprint, signature, key) {
            Ok(true) => {}
            Ok(false) => {
                debug!("card {fingerprint}: signature from '{label}' does not verify");
                return Err(ResponseError::SignatureValidationFailed);
            }
            Err(e) => {
                debug!("card {fingerprint}: signature from '{label}' rejected: {e}");
                return Err(ResponseError::SignatureValidationFailed);
            }
        }
    }

    Ok(())
}

/// Object-safe validation entry point for transports.
pub trait CardValidator: Send + Sync {
    /// Validate `card` against the bound trust policy.
    ///
    /// # Errors
    ///
    /// Returns the registered [`ResponseError`] describing the failure.
    fn validate(&self, card: &SignedCard) -> ValidationOutcome;

    /// Fingerprint a snapshot with the bound provider.
    fn fingerprint(&self, snapshot: &ContentSnapshot) -> Fingerprint;

    /// Number of signers the bound policy requires.
    fn required_signers(&self) -> usize;
}

/// A provider bound to a shared, immutable trust policy.
pub struct SignatureValidator<P: CryptoProvider> {
    provider: P,
    policy: Arc<TrustPolicy<P::PublicKey>>,
}

impl<P: CryptoProvider> SignatureValidator<P> {
    /// Bind `provider` to `policy`.
    pub fn new(provider: P, policy: impl Into<Arc<TrustPolicy<P::PublicKey>>>) -> Self {
        Self {
            provider,
            policy: policy.into(),
        }
    }

    /// The bound trust policy.
    #[must_use]
    pub fn policy(&self) -> &TrustPolicy<P::PublicKey> {
        &self.policy
    }

    /// Validate `card`; see [`validate_card`].
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::SignatureValidationFailed`] if any required
    /// signature is missing or invalid.
    pub fn validate(&self, card: &SignedCard) -> ValidationOutcome {
        validate_card(&self.provider, &self.policy, card)
    }
}

impl<P: CryptoProvider> CardValidator for SignatureValidator<P> {
    fn validate(&self, card: &SignedCard) -> ValidationOutcome {
        SignatureValidator::validate(self, card)
    }

    fn fingerprint(&self, snapshot: &ContentSnapshot) -> Fingerprint {
        self.provider.fingerprint(snapshot.as_bytes())
    }

    fn required_signers(&self) -> usize {
        self.policy.len()
    }
}
