use crate::core::models::molecule::Molecule;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading molecular file formats.
///
/// Implementors handle format-specific decoding; the provided methods take care
/// of opening files and of decoding text that is already in memory.
pub trait MolecularFile {
    /// The error type for read operations.
    type Error: Error + From<io::Error>;

    /// Reads a molecule from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    ///
    /// # Return
    ///
    /// Returns the decoded molecule.
    ///
    /// # Errors
    ///
    /// Returns an error if decoding fails or the reader reports an I/O error.
    fn read_from(reader: &mut impl BufRead) -> Result<Molecule, Self::Error>;

    /// Reads a molecule from text that is already in memory.
    ///
    /// # Arguments
    ///
    /// * `contents` - The complete file contents.
    ///
    /// # Errors
    ///
    /// Returns an error if decoding fails.
    fn read_from_str(contents: &str) -> Result<Molecule, Self::Error> {
        let mut reader = contents.as_bytes();
        Self::read_from(&mut reader)
    }

    /// Reads a molecule from a file path.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the file to read.
    ///
    /// # Return
    ///
    /// Returns the decoded molecule.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or decoding fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Molecule, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}
