//! # Utilities Module
//!
//! Deterministic randomness shared by generation and the turn engine.

pub mod rng;

pub use rng::*;
