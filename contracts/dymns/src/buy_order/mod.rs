//! Buy-Order subsystem: escrowed offers-to-buy with counter-offers, and the
//! buyer/goods reverse indices.

pub mod types;
mod market;

pub use types::*;
