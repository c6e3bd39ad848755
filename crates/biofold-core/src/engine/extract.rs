use crate::core::io::cif::CifFile;
use crate::core::io::format::StructureFormat;
use crate::core::io::pdb::PdbFile;
use crate::core::io::traits::ConfidenceFile;
use crate::core::models::report::{ConfidenceReport, ModelScore};
use crate::core::models::structure::StructureFile;
use crate::engine::error::ExtractionError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, info, instrument};

/// Mean per-residue confidence of a single structure file.
///
/// # Errors
///
/// Fails with [`ExtractionError::MissingField`] if a CIF header lacks the
/// confidence column, [`ExtractionError::NoData`] if no residue could be read,
/// and with `Io`/`Parse` errors naming the file otherwise.
pub fn model_confidence(file: &StructureFile) -> Result<f64, ExtractionError> {
    let profile = match file.format {
        StructureFormat::Cif => CifFile::read_from_path(&file.path)
            .map_err(|e| ExtractionError::from_cif(&file.path, e))?,
        StructureFormat::Pdb => PdbFile::read_from_path(&file.path)
            .map_err(|e| ExtractionError::from_pdb(&file.path, e))?,
    };
    debug!(
        "Read {} residue(s) from {} file {:?}",
        profile.len(),
        file.format,
        file.path
    );
    profile.mean().ok_or_else(|| ExtractionError::NoData {
        path: file.path.clone(),
    })
}

/// Scores every file of a batch and selects the best model.
///
/// Files are processed sequentially in the given order, which is also the
/// order of the report entries and the tie-break order for the best model.
/// The first failing file aborts the whole batch.
///
/// # Errors
///
/// Returns [`ExtractionError::NoInput`] for an empty batch and
/// [`ExtractionError::DuplicateModel`] if two files share a model name, both
/// before any file is opened.
#[instrument(skip_all, name = "confidence_extraction", fields(files = files.len()))]
pub fn extract(
    files: &[StructureFile],
    reporter: &ProgressReporter,
) -> Result<ConfidenceReport, ExtractionError> {
    if files.is_empty() {
        return Err(ExtractionError::NoInput);
    }
    let mut names = HashSet::with_capacity(files.len());
    for file in files {
        if !names.insert(file.name.as_str()) {
            return Err(ExtractionError::DuplicateModel {
                model: file.name.clone(),
                path: file.path.clone(),
            });
        }
    }

    reporter.report(Progress::TaskStart {
        total_steps: files.len() as u64,
    });
    let mut scores = Vec::with_capacity(files.len());
    for file in files {
        let mean = model_confidence(file)?;
        info!("Model '{}': mean confidence {:.2}", file.name, mean);
        reporter.report(Progress::ModelScored {
            model: file.name.clone(),
            mean,
        });
        reporter.report(Progress::TaskIncrement);
        scores.push(ModelScore::new(file.name.clone(), mean));
    }
    reporter.report(Progress::TaskFinish);

    let report = ConfidenceReport::new(scores)?;
    info!(
        "Best model: '{}' (mean confidence {:.2})",
        report.best_model(),
        report.best().mean
    );
    Ok(report)
}

/// Resolves bare paths into [`StructureFile`]s and runs [`extract`].
///
/// Model names are the file names without extension. Formats are resolved for
/// every path before any file is read.
pub fn extract_paths<P: Into<PathBuf> + Clone>(
    paths: &[P],
    reporter: &ProgressReporter,
) -> Result<ConfidenceReport, ExtractionError> {
    if paths.is_empty() {
        return Err(ExtractionError::NoInput);
    }
    let files = paths
        .iter()
        .cloned()
        .map(StructureFile::from_path)
        .collect::<Result<Vec<_>, _>>()?;
    extract(&files, reporter)
}
