//! cardgate CLI library: key files and card commands.
#![deny(warnings, clippy::all, clippy::pedantic)]
#![warn(missing_docs)]

/// CLI subcommand implementations.
pub mod commands;
/// Key files: read/write TOML signing keys.
pub mod keyfile;
