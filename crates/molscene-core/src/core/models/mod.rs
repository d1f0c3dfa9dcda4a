//! # Core Models Module
//!
//! Data structures produced by the MOL reader. Every value here is created once
//! during parsing and never mutated afterwards.
//!
//! - [`atom`] - A single atom record with its position, label and charge code
//! - [`topology`] - Bond records and the typed view of CTfile bond order codes
//! - [`molecule`] - The counts-line header together with the ordered atom and bond tables
//!
//! ```ignore
//! use molscene::core::io::{mol::MolFile, traits::MolecularFile};
//!
//! let molecule = MolFile::read_from_path("caffeine.mol")?;
//! for atom in molecule.atoms() {
//!     println!("{} at {}", atom.name, atom.position);
//! }
//! ```

pub mod atom;
pub mod molecule;
pub mod topology;
