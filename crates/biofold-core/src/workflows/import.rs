use crate::core::io::archive::{self, ArchiveError, ArchiveKind};
use crate::core::io::results::ResultsTable;
use crate::core::models::report::ConfidenceReport;
use crate::engine::config::ImportConfig;
use crate::engine::extract;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::workflows::discovery::discover;
use crate::workflows::error::WorkflowError;
use crate::workflows::package::{PublishedSet, publish};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

const EXTRACTED_DIR: &str = "extracted";

#[derive(Debug, Clone)]
pub struct ImportResult {
    pub source_dir: PathBuf,   // Directory the structures were discovered in
    pub results_path: PathBuf, // Persisted results table
    pub report: ConfidenceReport,
    pub published: PublishedSet,
}

/// Removes what a previous import left at `dir`.
fn clear_stale(dir: &Path) -> Result<(), WorkflowError> {
    if dir.exists() {
        debug!("Removing stale {:?} from a previous import", dir);
        fs::remove_dir_all(dir).map_err(|e| WorkflowError::io(dir, e))?;
    }
    Ok(())
}

/// Imports one predictor run into `work_dir`.
///
/// `input` is either a results directory or a `.zip`/`.tar`/`.tar.gz`/`.tgz`
/// archive, which is unpacked into `work_dir/extracted` first. The structures
/// found there are scored, the results table is written to
/// `work_dir/<results_file>` and the structures are published to
/// `work_dir/<outputs_dir>` together with their provenance manifest.
///
/// Extraction and publishing start from empty directories, so importing a
/// second run into the same `work_dir` replaces the first one.
#[instrument(skip_all, name = "import_workflow", fields(origin = %config.origin))]
pub fn run(
    input: &Path,
    work_dir: &Path,
    config: &ImportConfig,
    reporter: &ProgressReporter,
) -> Result<ImportResult, WorkflowError> {
    fs::create_dir_all(work_dir).map_err(|e| WorkflowError::io(work_dir, e))?;

    // === Phase 1: Locate the run ===
    let source_dir = if input.is_dir() {
        info!("Importing results directory {:?}", input);
        input.to_path_buf()
    } else {
        if ArchiveKind::from_path(input).is_none() {
            return Err(ArchiveError::Unsupported {
                path: input.to_path_buf(),
            }
            .into());
        }
        reporter.report(Progress::PhaseStart { name: "Unpacking" });
        let dest = work_dir.join(EXTRACTED_DIR);
        clear_stale(&dest)?;
        let kind = archive::unpack(input, &dest)?;
        reporter.report(Progress::Message(format!("Unpacked {} archive", kind)));
        reporter.report(Progress::PhaseFinish);
        dest
    };

    let outputs_dir = work_dir.join(&config.outputs_dir);
    if source_dir.starts_with(&outputs_dir) {
        return Err(WorkflowError::io(
            &outputs_dir,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "outputs directory would replace the run being imported",
            ),
        ));
    }

    reporter.report(Progress::PhaseStart { name: "Discovery" });
    let files = discover(&source_dir, config.origin, &config.discovery)?;
    reporter.report(Progress::Message(format!(
        "Found {} {} model(s)",
        files.len(),
        config.origin
    )));
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Score and persist ===
    reporter.report(Progress::PhaseStart { name: "Scoring" });
    let report = extract::extract(&files, reporter)?;
    reporter.report(Progress::PhaseFinish);

    let results_path = work_dir.join(&config.results_file);
    ResultsTable::write_to_path(&report, &results_path).map_err(|source| {
        WorkflowError::Results {
            path: results_path.clone(),
            source,
        }
    })?;
    info!("Results table written to {:?}", results_path);

    // === Phase 3: Publish ===
    reporter.report(Progress::PhaseStart { name: "Publishing" });
    clear_stale(&outputs_dir)?;
    let published = publish(&files, &report, config.origin, &outputs_dir)?;
    reporter.report(Progress::PhaseFinish);

    Ok(ImportResult {
        source_dir,
        results_path,
        report,
        published,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::PredictorOrigin;
    use crate::engine::error::ExtractionError;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn cif(values: &[f64]) -> String {
        let mut content = String::from(
            "data_model\nloop_\n_atom_site.group_PDB\n_atom_site.id\n\
             _atom_site.B_iso_or_equiv\n_atom_site.auth_seq_id\n",
        );
        for (i, v) in values.iter().enumerate() {
            content.push_str(&format!("ATOM {} {:.2} {}\n", i + 1, v, i + 1));
        }
        content
    }

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn imports_chai1_directory() {
        let dir = tempdir().unwrap();
        let run_dir = dir.path().join("chai_run");
        write(&run_dir.join("pred.model_idx_0.cif"), &cif(&[70.0, 80.0]));
        write(&run_dir.join("pred.model_idx_1.cif"), &cif(&[90.0, 92.0]));
        write(&run_dir.join("pred.model_idx_2.cif"), &cif(&[50.0]));

        let work = dir.path().join("work");
        let config = ImportConfig::with_defaults(PredictorOrigin::Chai1);
        let result = run(&run_dir, &work, &config, &ProgressReporter::new()).unwrap();

        assert_eq!(result.source_dir, run_dir);
        assert_eq!(result.report.best_model(), "pred.model_idx_1");
        assert_eq!(
            fs::read_to_string(&result.results_path).unwrap(),
            concat!(
                "pred.model_idx_0\t75.00\n",
                "pred.model_idx_1\t91.00\n",
                "pred.model_idx_2\t50.00\n",
                "BEST\tpred.model_idx_1\n"
            )
        );
        assert_eq!(result.published.len(), 3);
        assert!(work.join("outputs/pred.model_idx_1.cif").is_file());
        assert!(work.join("outputs/manifest.toml").is_file());
    }

    #[test]
    fn imports_alphafold3_zip_archive() {
        let dir = tempdir().unwrap();
        let archive_path = dir.path().join("fold_job.zip");
        {
            let mut writer = zip::ZipWriter::new(File::create(&archive_path).unwrap());
            let options = zip::write::SimpleFileOptions::default();
            writer.start_file("fold_job/fold_job_model_0.cif", options).unwrap();
            writer.write_all(cif(&[60.0]).as_bytes()).unwrap();
            writer.start_file("fold_job/fold_job_model_1.cif", options).unwrap();
            writer.write_all(cif(&[65.0]).as_bytes()).unwrap();
            writer.start_file("fold_job/templates/hit.cif", options).unwrap();
            writer.write_all(cif(&[99.0]).as_bytes()).unwrap();
            writer.finish().unwrap();
        }

        let work = dir.path().join("work");
        let config = ImportConfig::with_defaults(PredictorOrigin::AlphaFold3);
        let result = run(&archive_path, &work, &config, &ProgressReporter::new()).unwrap();

        assert_eq!(result.source_dir, work.join("extracted"));
        assert_eq!(result.report.len(), 2);
        assert_eq!(result.report.best_model(), "fold_job/fold_job_model_1");
        assert_eq!(result.published.manifest.best_file, "fold_job_model_1.cif");
    }

    fn zip_run(path: &Path, job: &str, values: &[f64]) {
        let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
        let options = zip::write::SimpleFileOptions::default();
        writer
            .start_file(format!("{job}/{job}_model_0.cif"), options)
            .unwrap();
        writer.write_all(cif(values).as_bytes()).unwrap();
        writer.finish().unwrap();
    }

    #[test]
    fn reimport_into_same_work_dir_replaces_previous_run() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("jobA.zip");
        let second = dir.path().join("jobB.zip");
        zip_run(&first, "jobA", &[99.0]);
        zip_run(&second, "jobB", &[50.0]);

        let work = dir.path().join("work");
        let config = ImportConfig::with_defaults(PredictorOrigin::AlphaFold3);
        run(&first, &work, &config, &ProgressReporter::new()).unwrap();
        let result = run(&second, &work, &config, &ProgressReporter::new()).unwrap();

        assert_eq!(result.report.len(), 1);
        assert_eq!(result.report.best_model(), "jobB/jobB_model_0");
        assert!(!work.join("extracted/jobA").exists());
        assert!(!work.join("outputs/jobA_model_0.cif").exists());
        assert!(work.join("outputs/jobB_model_0.cif").is_file());
        assert_eq!(result.published.len(), 1);
    }

    #[test]
    fn run_inside_outputs_dir_is_not_cleared() {
        let dir = tempdir().unwrap();
        let work = dir.path().join("work");
        let run_dir = work.join("outputs");
        write(&run_dir.join("pred.model_idx_0.cif"), &cif(&[70.0]));

        let config = ImportConfig::with_defaults(PredictorOrigin::Chai1);
        let err = run(&run_dir, &work, &config, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(err, WorkflowError::Io { .. }));
        assert!(run_dir.join("pred.model_idx_0.cif").is_file());
    }

    #[test]
    fn empty_run_directory_is_no_input() {
        let dir = tempdir().unwrap();
        let config = ImportConfig::with_defaults(PredictorOrigin::Chai1);
        let err = run(
            dir.path(),
            &dir.path().join("work"),
            &config,
            &ProgressReporter::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Extraction(ExtractionError::NoInput)
        ));
    }

    #[test]
    fn unsupported_archive_is_rejected() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("results.rar");
        fs::write(&input, b"not an archive").unwrap();
        let config = ImportConfig::with_defaults(PredictorOrigin::Protenix);
        let err = run(&input, &dir.path().join("work"), &config, &ProgressReporter::new())
            .unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Archive(ArchiveError::Unsupported { .. })
        ));
    }
}
