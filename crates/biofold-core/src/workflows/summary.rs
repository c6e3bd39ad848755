use crate::core::io::chai_log::ChaiScoreLog;
use crate::core::io::results::ResultsTable;
use crate::core::models::report::ConfidenceReport;
use crate::workflows::error::WorkflowError;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// A rendered view of one set of model scores.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub heading: &'static str,
    pub precision: usize,
    pub report: ConfidenceReport,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading)?;
        for score in self.report.scores() {
            writeln!(f, "  {}: {:.*}", score.model, self.precision, score.mean)?;
        }
        write!(f, "Best model: {}", self.report.best_model())
    }
}

/// Summarizes a persisted results table.
///
/// `path` is either the table itself or a working directory holding a table
/// named `results_file`. Returns `None` if there is no table yet.
pub fn results_summary(
    path: &Path,
    results_file: &str,
) -> Result<Option<Summary>, WorkflowError> {
    let table = if path.is_dir() {
        path.join(results_file)
    } else {
        path.to_path_buf()
    };
    if !table.is_file() {
        debug!("No results table at {:?}", table);
        return Ok(None);
    }

    let report = ResultsTable::read_from_path(&table).map_err(|source| WorkflowError::Results {
        path: table.clone(),
        source,
    })?;
    info!("Loaded {} model score(s) from {:?}", report.len(), table);
    Ok(Some(Summary {
        heading: "Mean confidence per model:",
        precision: 2,
        report,
    }))
}

/// Summarizes the aggregate scores reported in a Chai-1 `run.stdout` log.
///
/// Returns `None` if the log holds no score lines. Ties between models go to
/// the first model by name.
pub fn chai_log_summary(path: &Path) -> Result<Option<Summary>, WorkflowError> {
    let scores = ChaiScoreLog::read_from_path(path).map_err(|e| WorkflowError::io(path, e))?;
    if scores.is_empty() {
        debug!("No Chai-1 score lines in {:?}", path);
        return Ok(None);
    }
    let report = ConfidenceReport::new(scores)?;
    Ok(Some(Summary {
        heading: "Chai-1 aggregate score per model:",
        precision: 4,
        report,
    }))
}
