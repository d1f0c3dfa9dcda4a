//! Provides input functionality for molecular file formats.
//!
//! The reader side is expressed through the [`traits::MolecularFile`] trait so that
//! callers can read from any buffered source, a string already in memory, or a path.
//! [`mol`] implements it for the fixed-column MOL (CTfile V2000) format.

pub mod mol;
pub mod traits;
