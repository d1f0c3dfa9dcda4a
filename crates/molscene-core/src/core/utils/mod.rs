//! Stateless helpers shared across the crate.
//!
//! - [`geometry`] - Orientation of cylinder primitives along bond directions
//! - [`elements`] - Display colours keyed by element symbol

pub mod elements;
pub mod geometry;
