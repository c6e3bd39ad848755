use crate::core::models::confidence::ConfidenceProfile;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading per-residue confidence from a coordinate file.
///
/// Implementors handle format-specific parsing of atom records and feed every
/// `(residue number, confidence)` pair they find into a [`ConfidenceProfile`],
/// which performs the shared first-seen reduction.
pub trait ConfidenceFile {
    /// The error type for read operations.
    type Error: Error + From<io::Error>;

    /// Reads the confidence profile from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    ///
    /// # Return
    ///
    /// Returns the deduplicated per-residue profile. The profile may be empty;
    /// deciding whether that is an error is left to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<ConfidenceProfile, Self::Error>;

    /// Reads the confidence profile from a file path.
    ///
    /// The file is opened, read to the end through a buffered reader, and
    /// closed before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<ConfidenceProfile, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}
