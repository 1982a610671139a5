//! Cryptographic side of cardgate: crypto providers, trust policies and the
//! card signature validator.
#![deny(warnings, clippy::all, clippy::pedantic)]
#![warn(missing_docs)]

pub mod config;
pub mod ed25519;
pub mod error;
pub mod policy;
pub mod provider;
pub mod rsa_pkcs1;
pub mod signer;
pub mod validator;
