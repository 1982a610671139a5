//! Core domain types for the cardgate trust gate: cards, signer labels and
//! the coded error registry.
#![deny(warnings, clippy::all, clippy::pedantic)]
#![warn(missing_docs)]

pub mod card;
pub mod content;
pub mod error;
pub mod types;
