//! `cardgate keygen`: create a signing key and store it as a key file.

use std::path::Path;

use anyhow::{bail, Result};
use cardgate_core::types::IdentityLabel;
use cardgate_crypto::provider::KeyScheme;
use cardgate_crypto::signer::CardSigningKey;
use log::info;

use crate::keyfile::{save_key_file, KeyFile};

/// Generate a `scheme` key for `label`, write it to `out` and return the
/// trust file entry for it.
///
/// Refuses to overwrite an existing file.
///
/// # Errors
///
/// Returns an error if `out` exists, the key cannot be generated, or the file
/// cannot be written.
pub fn run_keygen(scheme: KeyScheme, label: IdentityLabel, out: &Path) -> Result<String> {
    if out.exists() {
        bail!("{} already exists", out.display());
    }
    let key = CardSigningKey::generate(scheme)?;
    let file = KeyFile::from_signing_key(label, &key)?;
    save_key_file(&file, out)?;
    info!("wrote {scheme} key for '{}' to {}", file.label, out.display());
    Ok(file.trust_line())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyfile::load_key_file;
    use tempfile::tempdir;

    #[test]
    fn keygen_writes_a_loadable_key() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("self.toml");
        let line = run_keygen(KeyScheme::Ed25519, IdentityLabel::new("self").unwrap(), &out).unwrap();

        let file = load_key_file(&out).unwrap();
        assert_eq!(file.scheme, KeyScheme::Ed25519);
        assert!(line.contains(&file.public_key));
        file.signing_key().unwrap();
    }

    #[test]
    fn keygen_does_not_overwrite() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("self.toml");
        std::fs::write(&out, "keep me").unwrap();
        assert!(run_keygen(KeyScheme::Ed25519, IdentityLabel::new("self").unwrap(), &out).is_err());
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "keep me");
    }
}
