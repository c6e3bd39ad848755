use flate2::read::GzDecoder;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error(
        "Unsupported archive format for '{path}'. Please provide a .zip or .tar/.tar.gz/.tgz archive.",
        path = path.display()
    )]
    Unsupported { path: PathBuf },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Archive containers produced by prediction servers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    Zip,
    Tar,
    TarGz,
}

impl ArchiveKind {
    /// Detects the container from the file name, ignoring case.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        if name.ends_with(".zip") {
            Some(ArchiveKind::Zip)
        } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(ArchiveKind::TarGz)
        } else if name.ends_with(".tar") {
            Some(ArchiveKind::Tar)
        } else {
            None
        }
    }
}

impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveKind::Zip => write!(f, "zip"),
            ArchiveKind::Tar => write!(f, "tar"),
            ArchiveKind::TarGz => write!(f, "tar.gz"),
        }
    }
}

/// Unpacks `archive` into `dest`, creating `dest` if needed.
///
/// # Errors
///
/// Returns [`ArchiveError::Unsupported`] for unknown extensions, before
/// touching the filesystem.
pub fn unpack(archive: &Path, dest: &Path) -> Result<ArchiveKind, ArchiveError> {
    let kind = ArchiveKind::from_path(archive).ok_or_else(|| ArchiveError::Unsupported {
        path: archive.to_path_buf(),
    })?;

    fs::create_dir_all(dest)?;
    info!("Unpacking {} archive {:?} into {:?}", kind, archive, dest);

    let file = BufReader::new(File::open(archive)?);
    match kind {
        ArchiveKind::Zip => {
            let mut zip = zip::ZipArchive::new(file)?;
            zip.extract(dest)?;
        }
        ArchiveKind::Tar => {
            tar::Archive::new(file).unpack(dest)?;
        }
        ArchiveKind::TarGz => {
            tar::Archive::new(GzDecoder::new(file)).unpack(dest)?;
        }
    }
    Ok(kind)
}
