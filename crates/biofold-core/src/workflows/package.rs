use crate::core::models::report::ConfidenceReport;
use crate::core::models::structure::StructureFile;
use crate::engine::config::PredictorOrigin;
use crate::workflows::error::WorkflowError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const MANIFEST_FILE: &str = "manifest.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PublishedStructure {
    pub model: String,
    pub file: String, // File name inside the published directory
    pub mean_confidence: f64,
}

/// Provenance written next to the published structures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProvenanceManifest {
    pub origin: PredictorOrigin,
    pub best_model: String,
    pub best_file: String,
    pub structures: Vec<PublishedStructure>,
}

#[derive(Debug, Clone)]
pub struct PublishedSet {
    pub directory: PathBuf,
    pub manifest: ProvenanceManifest,
}

impl PublishedSet {
    pub fn best_path(&self) -> PathBuf {
        self.directory.join(&self.manifest.best_file)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.directory.join(MANIFEST_FILE)
    }

    pub fn len(&self) -> usize {
        self.manifest.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.manifest.structures.is_empty()
    }
}

fn published_name(file: &StructureFile) -> Result<String, WorkflowError> {
    file.file_name().map(str::to_string).ok_or_else(|| {
        WorkflowError::io(
            &file.path,
            io::Error::new(io::ErrorKind::InvalidInput, "path has no UTF-8 file name"),
        )
    })
}

/// Copies every scored structure into `dest` and writes the provenance manifest.
///
/// Files are published flat under their own file names. Two inputs sharing a
/// file name are rejected before anything is copied.
pub fn publish(
    files: &[StructureFile],
    report: &ConfidenceReport,
    origin: PredictorOrigin,
    dest: &Path,
) -> Result<PublishedSet, WorkflowError> {
    let mut claimed: HashMap<String, &Path> = HashMap::with_capacity(files.len());
    let mut structures = Vec::with_capacity(files.len());
    let mut best_file = None;

    for file in files {
        let name = published_name(file)?;
        if let Some(first) = claimed.insert(name.clone(), file.path.as_path()) {
            return Err(WorkflowError::PublishCollision {
                file: name,
                first: first.to_path_buf(),
                second: file.path.clone(),
            });
        }
        let mean_confidence = report
            .get(&file.name)
            .ok_or_else(|| WorkflowError::UnscoredModel(file.name.clone()))?;
        if file.name == report.best_model() {
            best_file = Some(name.clone());
        }
        structures.push(PublishedStructure {
            model: file.name.clone(),
            file: name,
            mean_confidence,
        });
    }
    let best_file =
        best_file.ok_or_else(|| WorkflowError::UnscoredModel(report.best_model().to_string()))?;

    fs::create_dir_all(dest).map_err(|e| WorkflowError::io(dest, e))?;
    for (file, published) in files.iter().zip(&structures) {
        let target = dest.join(&published.file);
        debug!("Publishing {:?} -> {:?}", file.path, target);
        fs::copy(&file.path, &target).map_err(|e| WorkflowError::io(&file.path, e))?;
    }

    let manifest = ProvenanceManifest {
        origin,
        best_model: report.best_model().to_string(),
        best_file,
        structures,
    };
    let manifest_path = dest.join(MANIFEST_FILE);
    fs::write(&manifest_path, toml::to_string_pretty(&manifest)?)
        .map_err(|e| WorkflowError::io(&manifest_path, e))?;

    info!(
        "Published {} structure(s) to {:?} (best: {})",
        manifest.structures.len(),
        dest,
        manifest.best_file
    );
    Ok(PublishedSet {
        directory: dest.to_path_buf(),
        manifest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::report::ModelScore;
    use tempfile::tempdir;

    fn structure(root: &Path, relative: &str) -> StructureFile {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, format!("data_{}\n", relative)).unwrap();
        StructureFile::relative_to(root, path).unwrap()
    }

    #[test]
    fn publishes_files_and_manifest() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        let files = vec![
            structure(&src, "fold/fold_model_0.cif"),
            structure(&src, "fold/fold_model_1.cif"),
        ];
        let report = ConfidenceReport::new(vec![
            ModelScore::new("fold/fold_model_0", 71.5),
            ModelScore::new("fold/fold_model_1", 88.25),
        ])
        .unwrap();

        let dest = dir.path().join("outputs");
        let published = publish(&files, &report, PredictorOrigin::AlphaFold3, &dest).unwrap();

        assert_eq!(published.len(), 2);
        assert_eq!(published.best_path(), dest.join("fold_model_1.cif"));
        assert_eq!(
            fs::read_to_string(dest.join("fold_model_0.cif")).unwrap(),
            "data_fold/fold_model_0.cif\n"
        );

        let written: ProvenanceManifest =
            toml::from_str(&fs::read_to_string(published.manifest_path()).unwrap()).unwrap();
        assert_eq!(written, published.manifest);
        assert_eq!(written.origin, PredictorOrigin::AlphaFold3);
        assert_eq!(written.best_model, "fold/fold_model_1");
        assert_eq!(written.structures[0].mean_confidence, 71.5);
    }

    #[test]
    fn manifest_uses_kebab_case_keys() {
        let manifest = ProvenanceManifest {
            origin: PredictorOrigin::Chai1,
            best_model: "pred.model_idx_0".into(),
            best_file: "pred.model_idx_0.cif".into(),
            structures: vec![PublishedStructure {
                model: "pred.model_idx_0".into(),
                file: "pred.model_idx_0.cif".into(),
                mean_confidence: 90.0,
            }],
        };
        let text = toml::to_string_pretty(&manifest).unwrap();
        assert!(text.contains("origin = \"chai-1\""));
        assert!(text.contains("best-file = \"pred.model_idx_0.cif\""));
        assert!(text.contains("[[structures]]"));
        assert!(text.contains("mean-confidence = 90.0"));
    }

    #[test]
    fn colliding_file_names_are_rejected_before_copying() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        let files = vec![
            structure(&src, "seed_1/predictions/sample_0.cif"),
            structure(&src, "seed_2/predictions/sample_0.cif"),
        ];
        let report = ConfidenceReport::new(vec![
            ModelScore::new("seed_1/predictions/sample_0", 50.0),
            ModelScore::new("seed_2/predictions/sample_0", 60.0),
        ])
        .unwrap();

        let dest = dir.path().join("outputs");
        let err = publish(&files, &report, PredictorOrigin::Protenix, &dest).unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::PublishCollision { ref file, .. } if file == "sample_0.cif"
        ));
        assert!(!dest.exists());
    }

    #[test]
    fn unscored_model_is_rejected() {
        let dir = tempdir().unwrap();
        let files = vec![structure(dir.path(), "a.cif")];
        let report = ConfidenceReport::new(vec![ModelScore::new("b", 1.0)]).unwrap();
        let err = publish(&files, &report, PredictorOrigin::Chai1, &dir.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, WorkflowError::UnscoredModel(ref m) if m == "a"));
    }
}
