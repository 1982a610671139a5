//! Trust policy: who must sign, and with which key.

use std::collections::BTreeMap;
use std::fmt;

use cardgate_core::types::IdentityLabel;
use log::warn;

use crate::error::CryptoError;
use crate::provider::CryptoProvider;

/// Immutable mapping from required signer label to trusted public key.
///
/// Every label in the policy must have a valid signature on a card for the
/// card to pass validation. Built once, then shared read-only.
pub struct TrustPolicy<K> {
    signers: BTreeMap<IdentityLabel, K>,
}

impl<K> TrustPolicy<K> {
    /// A policy with no required signers. It accepts every card.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            signers: BTreeMap::new(),
        }
    }

    /// Number of required signers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.signers.len()
    }

    /// Whether the policy requires no signers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }

    /// Trusted key for `label`, if it is required.
    #[must_use]
    pub fn get(&self, label: &IdentityLabel) -> Option<&K> {
        self.signers.get(label)
    }

    /// Required signer labels.
    pub fn labels(&self) -> impl Iterator<Item = &IdentityLabel> {
        self.signers.keys()
    }

    /// Iterate over `(label, key)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&IdentityLabel, &K)> {
        self.signers.iter()
    }
}

impl<K> Default for TrustPolicy<K> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<K> FromIterator<(IdentityLabel, K)> for TrustPolicy<K> {
    fn from_iter<I: IntoIterator<Item = (IdentityLabel, K)>>(iter: I) -> Self {
        Self {
            signers: iter.into_iter().collect(),
        }
    }
}

// Keys are left out of debug output.
impl<K> fmt::Debug for TrustPolicy<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrustPolicy")
            .field("signers", &self.signers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A trusted key that failed to decode.
#[derive(Debug)]
pub struct KeyDecodeFailure {
    /// Signer whose key was rejected.
    pub label: IdentityLabel,
    /// Why the provider rejected it.
    pub error: CryptoError,
}

/// Returned by [`build_trust_policy`] when at least one key fails to decode.
///
/// Carries the failures and the policy built from the keys that did decode.
/// Callers either abort or opt into the reduced policy with
/// [`PolicyBuildError::into_partial_policy`].
pub struct PolicyBuildError<K> {
    failures: Vec<KeyDecodeFailure>,
    partial: TrustPolicy<K>,
}

impl<K> PolicyBuildError<K> {
    /// Per-label decode failures.
    #[must_use]
    pub fn failures(&self) -> &[KeyDecodeFailure] {
        &self.failures
    }

    /// Labels whose keys were rejected.
    pub fn failed_labels(&self) -> impl Iterator<Item = &IdentityLabel> {
        self.failures.iter().map(|f| &f.label)
    }

    /// Accept the reduced policy, logging every dropped signer.
    #[must_use]
    pub fn into_partial_policy(self) -> TrustPolicy<K> {
        for failure in &self.failures {
            warn!(
                "dropping trusted signer '{}' from policy: {}",
                failure.label, failure.error
            );
        }
        self.partial
    }
}

impl<K> fmt::Debug for PolicyBuildError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyBuildError")
            .field("failures", &self.failures)
            .field("partial", &self.partial)
            .finish()
    }
}

impl<K> fmt::Display for PolicyBuildError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} trusted key(s) failed to decode", self.failures.len())?;
        for (i, failure) in self.failures.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}'{}' ({})", failure.label, failure.error)?;
        }
        Ok(())
    }
}

impl<K> std::error::Error for PolicyBuildError<K> {}

/// Decode every raw key through `provider` into a [`TrustPolicy`].
///
/// # Errors
///
/// Returns [`PolicyBuildError`] listing every label whose key failed to
/// decode. No broken key is ever admitted into a policy.
pub fn build_trust_policy<P: CryptoProvider + ?Sized>(
    provider: &P,
    raw_keys: BTreeMap<IdentityLabel, Vec<u8>>,
) -> Result<TrustPolicy<P::PublicKey>, PolicyBuildError<P::PublicKey>> {
    let mut signers = BTreeMap::new();
    let mut failures = Vec::new();

    for (label, raw) in raw_keys {
        match provider.decode_public_key(&raw) {
            Ok(key) => {
                signers.insert(label, key);
            }
            Err(error) => failures.push(KeyDecodeFailure { label, error }),
        }
    }

    let policy = TrustPolicy { signers };
    if failures.is_empty() {
        Ok(policy)
    } else {
        Err(PolicyBuildError {
            failures,
            partial: policy,
        })
    }
}
