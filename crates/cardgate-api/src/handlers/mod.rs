//! Route handlers.

pub mod cards;
