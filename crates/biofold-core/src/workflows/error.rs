use crate::core::io::archive::ArchiveError;
use crate::core::io::results::ResultsError;
use crate::core::models::report::ReportError;
use crate::engine::config::ConfigError;
use crate::engine::error::ExtractionError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("Results table '{path}': {source}", path = path.display())]
    Results {
        path: PathBuf,
        #[source]
        source: ResultsError,
    },

    #[error("I/O error on '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(
        "Cannot publish both '{first}' and '{second}' as '{file}'",
        first = first.display(),
        second = second.display()
    )]
    PublishCollision {
        file: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Invalid confidence report: {0}")]
    Report(#[from] ReportError),

    #[error("Model '{0}' has no entry in the confidence report")]
    UnscoredModel(String),

    #[error("Failed to serialize provenance manifest: {0}")]
    Manifest(#[from] toml::ser::Error),
}

impl WorkflowError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        WorkflowError::Io {
            path: path.into(),
            source,
        }
    }
}
