use crate::core::io::cif::{CifError, CifParseErrorKind};
use crate::core::io::format::UnsupportedFormatError;
use crate::core::io::pdb::PdbError;
use crate::core::models::report::ReportError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("No structure files found")]
    NoInput,

    #[error("Unsupported structure format for '{path}' (expected .cif or .pdb)", path = path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("No '{field}' field in '{path}'", path = path.display())]
    MissingField { path: PathBuf, field: &'static str },

    #[error("No usable residue confidence values in '{path}'", path = path.display())]
    NoData { path: PathBuf },

    #[error("Model '{model}' is provided more than once (again by '{path}')", path = path.display())]
    DuplicateModel { model: String, path: PathBuf },

    #[error("Failed to parse '{path}' on line {line}: {kind}", path = path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        kind: CifParseErrorKind,
    },

    #[error("Failed to read '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Inconsistent confidence report: {0}")]
    Report(#[from] ReportError),
}

impl ExtractionError {
    pub(crate) fn from_cif(path: &Path, err: CifError) -> Self {
        let path = path.to_path_buf();
        match err {
            CifError::Io(source) => ExtractionError::Io { path, source },
            CifError::MissingField(field) => ExtractionError::MissingField { path, field },
            CifError::Parse { line, kind } => ExtractionError::Parse { path, line, kind },
        }
    }

    pub(crate) fn from_pdb(path: &Path, err: PdbError) -> Self {
        match err {
            PdbError::Io(source) => ExtractionError::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    /// The file the error refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ExtractionError::NoInput | ExtractionError::Report(_) => None,
            ExtractionError::UnsupportedFormat { path }
            | ExtractionError::MissingField { path, .. }
            | ExtractionError::NoData { path }
            | ExtractionError::DuplicateModel { path, .. }
            | ExtractionError::Parse { path, .. }
            | ExtractionError::Io { path, .. } => Some(path),
        }
    }
}

impl From<UnsupportedFormatError> for ExtractionError {
    fn from(err: UnsupportedFormatError) -> Self {
        ExtractionError::UnsupportedFormat { path: err.path }
    }
}
