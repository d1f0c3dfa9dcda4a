//! # Core Module
//!
//! Stateless building blocks shared by the geometry engine and the import workflow.
//!
//! - **Molecular Representation** ([`models`]) - Atoms, bonds and the counts-line header
//!   exactly as they were decoded from the file
//! - **File I/O** ([`io`]) - The fixed-column MOL reader
//! - **Utilities** ([`utils`]) - Bond orientation math and element display colours

pub mod io;
pub mod models;
pub mod utils;
