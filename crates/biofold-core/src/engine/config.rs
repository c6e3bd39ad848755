use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_RESULTS_FILE: &str = "results.txt";
pub const DEFAULT_OUTPUTS_DIR: &str = "outputs";
pub const DEFAULT_SKIP_DIRS: [&str; 1] = ["templates"];
pub const DEFAULT_EXTENSIONS: [&str; 2] = ["cif", "pdb"];

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
}

/// The structure predictor whose results are being imported.
///
/// The origin decides where prediction files live in a results directory and
/// is recorded as provenance on every published structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PredictorOrigin {
    #[serde(rename = "alphafold3")]
    AlphaFold3,
    Protenix,
    #[serde(rename = "chai-1")]
    Chai1,
    #[serde(rename = "boltz-2")]
    Boltz2,
}

impl PredictorOrigin {
    pub const ALL: [PredictorOrigin; 4] = [
        PredictorOrigin::AlphaFold3,
        PredictorOrigin::Protenix,
        PredictorOrigin::Chai1,
        PredictorOrigin::Boltz2,
    ];

    pub fn key(self) -> &'static str {
        match self {
            PredictorOrigin::AlphaFold3 => "alphafold3",
            PredictorOrigin::Protenix => "protenix",
            PredictorOrigin::Chai1 => "chai-1",
            PredictorOrigin::Boltz2 => "boltz-2",
        }
    }
}

impl fmt::Display for PredictorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PredictorOrigin::AlphaFold3 => "AlphaFold3",
            PredictorOrigin::Protenix => "Protenix",
            PredictorOrigin::Chai1 => "Chai-1",
            PredictorOrigin::Boltz2 => "Boltz-2",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for PredictorOrigin {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "alphafold3" | "af3" => Ok(PredictorOrigin::AlphaFold3),
            "protenix" => Ok(PredictorOrigin::Protenix),
            "chai1" | "chai" => Ok(PredictorOrigin::Chai1),
            "boltz2" | "boltz" => Ok(PredictorOrigin::Boltz2),
            _ => Err(ConfigError::InvalidValue {
                parameter: "origin",
                reason: format!(
                    "unknown predictor '{}' (expected one of: {})",
                    s,
                    PredictorOrigin::ALL.map(|o| o.key()).join(", ")
                ),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    pub skip_dirs: Vec<String>,  // Directory names never descended into (case-insensitive)
    pub extensions: Vec<String>, // Accepted structure file extensions (case-insensitive)
}

impl DiscoveryConfig {
    pub fn accepts_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }

    pub fn skips_dir(&self, name: &str) -> bool {
        self.skip_dirs.iter().any(|d| d.eq_ignore_ascii_case(name))
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|s| s.to_string()).collect(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportConfig {
    pub origin: PredictorOrigin,
    pub results_file: String,
    pub outputs_dir: String,
    pub discovery: DiscoveryConfig,
}

impl ImportConfig {
    /// An import configuration with the default file names and discovery rules.
    pub fn with_defaults(origin: PredictorOrigin) -> Self {
        Self {
            origin,
            results_file: DEFAULT_RESULTS_FILE.to_string(),
            outputs_dir: DEFAULT_OUTPUTS_DIR.to_string(),
            discovery: DiscoveryConfig::default(),
        }
    }
}

#[derive(Default)]
pub struct ImportConfigBuilder {
    origin: Option<PredictorOrigin>,
    results_file: Option<String>,
    outputs_dir: Option<String>,
    skip_dirs: Option<Vec<String>>,
    extensions: Option<Vec<String>>,
}

impl ImportConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(mut self, origin: PredictorOrigin) -> Self {
        self.origin = Some(origin);
        self
    }
    pub fn results_file(mut self, name: impl Into<String>) -> Self {
        self.results_file = Some(name.into());
        self
    }
    pub fn outputs_dir(mut self, name: impl Into<String>) -> Self {
        self.outputs_dir = Some(name.into());
        self
    }
    pub fn skip_dirs(mut self, dirs: Vec<String>) -> Self {
        self.skip_dirs = Some(dirs);
        self
    }
    pub fn extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = Some(extensions);
        self
    }

    pub fn build(self) -> Result<ImportConfig, ConfigError> {
        let results_file = self
            .results_file
            .ok_or(ConfigError::MissingParameter("results_file"))?;
        let outputs_dir = self
            .outputs_dir
            .ok_or(ConfigError::MissingParameter("outputs_dir"))?;
        for (parameter, value) in [("results_file", &results_file), ("outputs_dir", &outputs_dir)] {
            if value.trim().is_empty() || value.contains(['/', '\\']) {
                return Err(ConfigError::InvalidValue {
                    parameter,
                    reason: format!("'{}' must be a plain, non-empty file name", value),
                });
            }
        }

        let extensions = self
            .extensions
            .ok_or(ConfigError::MissingParameter("extensions"))?;
        if extensions.is_empty() {
            return Err(ConfigError::InvalidValue {
                parameter: "extensions",
                reason: "at least one structure file extension is required".to_string(),
            });
        }

        Ok(ImportConfig {
            origin: self.origin.ok_or(ConfigError::MissingParameter("origin"))?,
            results_file,
            outputs_dir,
            discovery: DiscoveryConfig {
                skip_dirs: self
                    .skip_dirs
                    .ok_or(ConfigError::MissingParameter("skip_dirs"))?,
                extensions: extensions
                    .into_iter()
                    .map(|e| e.trim_start_matches('.').to_string())
                    .collect(),
            },
        })
    }
}
