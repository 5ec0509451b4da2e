//! # Rendering Module
//!
//! Plain-text rendering of [`RenderSnapshot`](crate::RenderSnapshot)s for the
//! terminal front end. Renderers only read snapshots; they never touch the
//! world state.

pub mod ascii;

pub use ascii::*;
