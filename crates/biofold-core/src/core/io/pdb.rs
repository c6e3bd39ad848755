use crate::core::io::traits::ConfidenceFile;
use crate::core::models::confidence::ConfidenceProfile;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::{debug, warn};

const ATOM_RECORD: &str = "ATOM";
const RESIDUE_SEQ_COLUMNS: (usize, usize) = (22, 26);
const B_FACTOR_COLUMNS: (usize, usize) = (60, 66);

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

// Out-of-range bounds are clamped, so a short line yields a partial or empty field.
fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    let start = start.min(end);
    line.get(start..end).unwrap_or("").trim()
}

fn parse_atom_line(line: &str) -> Option<(isize, f64)> {
    let residue_number = slice_and_trim(line, RESIDUE_SEQ_COLUMNS.0, RESIDUE_SEQ_COLUMNS.1)
        .parse()
        .ok()?;
    let value = slice_and_trim(line, B_FACTOR_COLUMNS.0, B_FACTOR_COLUMNS.1)
        .parse()
        .ok()?;
    Some((residue_number, value))
}

/// Reader for fixed-column PDB files.
///
/// The residue sequence number is read from columns 23-26 and the confidence
/// from the B-factor field in columns 61-66. `ATOM` lines whose numeric fields
/// are missing or unparsable are skipped.
pub struct PdbFile;

impl ConfidenceFile for PdbFile {
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<ConfidenceProfile, Self::Error> {
        let mut profile = ConfidenceProfile::new();
        let mut skipped = 0usize;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            if !line.starts_with(ATOM_RECORD) {
                continue;
            }
            match parse_atom_line(&line) {
                Some((residue_number, value)) => {
                    profile.record(residue_number, value);
                }
                None => {
                    skipped += 1;
                    debug!("Skipping malformed ATOM record on line {}", line_num + 1);
                }
            }
        }

        if skipped > 0 {
            warn!("Skipped {} malformed ATOM record(s)", skipped);
        }
        Ok(profile)
    }
}
