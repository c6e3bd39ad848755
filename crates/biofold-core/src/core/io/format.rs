use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Unsupported structure format for '{path}' (expected .cif or .pdb)", path = path.display())]
pub struct UnsupportedFormatError {
    pub path: PathBuf,
}

/// Coordinate file formats the confidence readers understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureFormat {
    Cif,
    Pdb,
}

impl StructureFormat {
    pub const ALL: [StructureFormat; 2] = [StructureFormat::Cif, StructureFormat::Pdb];

    pub fn extension(self) -> &'static str {
        match self {
            StructureFormat::Cif => "cif",
            StructureFormat::Pdb => "pdb",
        }
    }

    /// Detects the format from a file extension, ignoring case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.extension().eq_ignore_ascii_case(ext))
    }

    pub fn from_path(path: &Path) -> Result<Self, UnsupportedFormatError> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| UnsupportedFormatError {
                path: path.to_path_buf(),
            })
    }
}

impl fmt::Display for StructureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureFormat::Cif => write!(f, "mmCIF"),
            StructureFormat::Pdb => write!(f, "PDB"),
        }
    }
}

impl FromStr for StructureFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('.');
        if trimmed.eq_ignore_ascii_case("mmcif") {
            return Ok(StructureFormat::Cif);
        }
        Self::from_extension(trimmed).ok_or_else(|| format!("Unknown structure format: '{}'", s))
    }
}
