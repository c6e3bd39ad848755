use crate::core::models::report::{ConfidenceReport, ModelScore, ReportError};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;

/// First column of the row naming the best model.
pub const BEST_SENTINEL: &str = "BEST";

#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Malformed results row {row}: {message}")]
    Malformed { row: usize, message: String },
    #[error("Results table has no 'BEST' row")]
    MissingBest,
    #[error("Model name {0:?} cannot be stored in a results table")]
    UnwritableModel(String),
    #[error("Invalid results table: {0}")]
    Report(#[from] ReportError),
}

/// The persisted form of a [`ConfidenceReport`].
///
/// A tab-separated table with one `model<TAB>mean` row per model, the mean
/// rounded to two decimals, followed by a `BEST<TAB>model` row. Fields are
/// never quoted, so model names are stored exactly as given.
pub struct ResultsTable;

fn check_model_name(model: &str) -> Result<(), ResultsError> {
    if model == BEST_SENTINEL || model.contains(['\t', '\n', '\r']) {
        return Err(ResultsError::UnwritableModel(model.to_string()));
    }
    Ok(())
}

impl ResultsTable {
    pub fn write_to(report: &ConfidenceReport, writer: impl Write) -> Result<(), ResultsError> {
        for score in report.scores() {
            check_model_name(&score.model)?;
        }
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(writer);

        for score in report.scores() {
            let mean = format!("{:.2}", score.mean);
            wtr.write_record([score.model.as_str(), mean.as_str()])?;
        }
        wtr.write_record([BEST_SENTINEL, report.best_model()])?;
        wtr.flush()?;
        Ok(())
    }

    /// Reads a table back.
    ///
    /// Means are recovered at the two-decimal precision they were written with;
    /// the best model is taken from the `BEST` row rather than recomputed.
    pub fn read_from(reader: impl Read) -> Result<ConfidenceReport, ResultsError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .quoting(false)
            .flexible(true)
            .from_reader(reader);

        let mut scores = Vec::new();
        let mut best = None;

        for (i, record) in rdr.records().enumerate() {
            let record = record?;
            let row = i + 1;
            if record.len() != 2 {
                return Err(ResultsError::Malformed {
                    row,
                    message: format!("expected 2 columns, found {}", record.len()),
                });
            }

            let key = record[0].trim();
            let value = record[1].trim();
            if key == BEST_SENTINEL {
                best = Some(value.to_string());
                continue;
            }

            let mean: f64 = value.parse().map_err(|_| ResultsError::Malformed {
                row,
                message: format!("invalid mean confidence '{}' for model '{}'", value, key),
            })?;
            scores.push(ModelScore::new(key, mean));
        }

        let best = best.ok_or(ResultsError::MissingBest)?;
        Ok(ConfidenceReport::with_best(scores, &best)?)
    }

    pub fn write_to_path<P: AsRef<Path>>(
        report: &ConfidenceReport,
        path: P,
    ) -> Result<(), ResultsError> {
        let file = File::create(path)?;
        Self::write_to(report, BufWriter::new(file))
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<ConfidenceReport, ResultsError> {
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file))
    }
}
