use crate::core::models::structure::StructureFile;
use crate::engine::config::{DiscoveryConfig, PredictorOrigin};
use crate::engine::error::ExtractionError;
use crate::workflows::error::WorkflowError;
use std::fs::{self, FileType};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const PREDICTIONS_DIR: &str = "predictions";

/// Finds the predicted models of one run.
///
/// The layout depends on the predictor:
///
/// - **AlphaFold3**: every structure file below `root`, outside skipped
///   directories such as `templates`.
/// - **Protenix**: structure files whose parent directory is `predictions`.
/// - **Chai-1**: structure files directly inside `root`.
/// - **Boltz-2**: structure files inside the first subdirectory (by name) of
///   `root/predictions`.
///
/// Symbolic links to directories are never descended into. Linked structure
/// files are kept.
///
/// Results are sorted by path. Model names are relative to the directory that
/// was scanned, so flat layouts name each model after its file stem. An empty
/// result is not an error here; the extractor rejects it as `NoInput`.
pub fn discover(
    root: &Path,
    origin: PredictorOrigin,
    config: &DiscoveryConfig,
) -> Result<Vec<StructureFile>, WorkflowError> {
    let (scan_root, paths) = match origin {
        PredictorOrigin::AlphaFold3 => {
            let mut paths = Vec::new();
            walk(root, config, &mut paths)?;
            (root.to_path_buf(), paths)
        }
        PredictorOrigin::Protenix => {
            let mut paths = Vec::new();
            walk(root, config, &mut paths)?;
            paths.retain(|p| {
                p.parent()
                    .and_then(|d| d.file_name())
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.eq_ignore_ascii_case(PREDICTIONS_DIR))
            });
            (root.to_path_buf(), paths)
        }
        PredictorOrigin::Chai1 => (root.to_path_buf(), structure_files_in(root, config)?),
        PredictorOrigin::Boltz2 => match first_subdirectory(&root.join(PREDICTIONS_DIR))? {
            Some(dir) => {
                let paths = structure_files_in(&dir, config)?;
                (dir, paths)
            }
            None => (root.to_path_buf(), Vec::new()),
        },
    };

    info!(
        "Discovered {} {} structure file(s) under {:?}",
        paths.len(),
        origin,
        scan_root
    );
    paths
        .into_iter()
        .map(|path| {
            StructureFile::relative_to(&scan_root, path)
                .map_err(|e| WorkflowError::Extraction(ExtractionError::from(e)))
        })
        .collect()
}

/// Entries of `dir` sorted by path, with their own (unfollowed) file types.
fn sorted_entries(dir: &Path) -> Result<Vec<(PathBuf, FileType)>, WorkflowError> {
    let mut entries = fs::read_dir(dir)
        .map_err(|e| WorkflowError::io(dir, e))?
        .map(|entry| entry.and_then(|e| Ok((e.path(), e.file_type()?))))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| WorkflowError::io(dir, e))?;
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
}

fn is_structure_file(path: &Path, config: &DiscoveryConfig) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| config.accepts_extension(e))
}

fn walk(
    dir: &Path,
    config: &DiscoveryConfig,
    out: &mut Vec<PathBuf>,
) -> Result<(), WorkflowError> {
    for (path, file_type) in sorted_entries(dir)? {
        if file_type.is_symlink() && path.is_dir() {
            // Linked directories can point back up the tree.
            debug!("Not following directory link {:?}", path);
        } else if file_type.is_dir() {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
            if config.skips_dir(name) {
                debug!("Skipping directory {:?}", path);
                continue;
            }
            walk(&path, config, out)?;
        } else if is_structure_file(&path, config) {
            out.push(path);
        }
    }
    Ok(())
}

fn structure_files_in(
    dir: &Path,
    config: &DiscoveryConfig,
) -> Result<Vec<PathBuf>, WorkflowError> {
    Ok(sorted_entries(dir)?
        .into_iter()
        .map(|(path, _)| path)
        .filter(|p| is_structure_file(p, config))
        .collect())
}

fn first_subdirectory(dir: &Path) -> Result<Option<PathBuf>, WorkflowError> {
    if !dir.is_dir() {
        return Ok(None);
    }
    Ok(sorted_entries(dir)?
        .into_iter()
        .find(|(_, file_type)| file_type.is_dir())
        .map(|(path, _)| path))
}
