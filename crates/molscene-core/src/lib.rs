//! # MolScene Core Library
//!
//! Reads MOL (CTfile V2000) atom/bond tables and turns them into placements for
//! rendering primitives: one sphere per atom, one cylinder per bond.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three-layer split throughout:
//!
//! - **[`core`]: The Foundation.** Immutable data models (`Molecule`, `Atom`, `Bond`),
//!   the fixed-column MOL reader and small stateless helpers (bond geometry, element colours).
//!
//! - **[`engine`]: The Logic Core.** Turns a parsed `Molecule` into sphere and cylinder
//!   descriptors, validates configuration, tessellates primitives and defines the
//!   `SceneBuilder` seam through which a host application materializes objects.
//!
//! - **[`workflows`]: The Public API.** Parse first, build geometry second, and only then
//!   hand the finished descriptors to a host. Nothing reaches the host if any stage fails.

pub mod core;
pub mod engine;
pub mod workflows;
