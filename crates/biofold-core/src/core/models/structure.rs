use crate::core::io::format::{StructureFormat, UnsupportedFormatError};
use std::path::{Path, PathBuf};

/// One predicted structure ("model") on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureFile {
    pub name: String,            // Model name used as the report key
    pub path: PathBuf,           // Location of the coordinate file
    pub format: StructureFormat, // Resolved once from the extension
}

impl StructureFile {
    /// Describes a bare path; the model name is the file name without extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, UnsupportedFormatError> {
        let path = path.into();
        let format = StructureFormat::from_path(&path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { name, path, format })
    }

    /// Describes a file found under `root`.
    ///
    /// The model name is the path relative to `root` with the extension removed
    /// and `/` as separator, so identically named files in different
    /// subdirectories stay distinct. For files directly under `root` this is
    /// the file stem.
    pub fn relative_to(
        root: &Path,
        path: impl Into<PathBuf>,
    ) -> Result<Self, UnsupportedFormatError> {
        let path = path.into();
        let format = StructureFormat::from_path(&path)?;
        let relative = path.strip_prefix(root).unwrap_or(path.as_path()).with_extension("");
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        Ok(Self { name, path, format })
    }

    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}
