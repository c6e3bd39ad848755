use crate::cli::ImportArgs;
use crate::error::{CliError, Result};
use biofold::engine::config::{
    self as core_config, DEFAULT_EXTENSIONS, DEFAULT_OUTPUTS_DIR, DEFAULT_RESULTS_FILE,
    DEFAULT_SKIP_DIRS, PredictorOrigin,
};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialDiscoveryConfig {
    #[serde(rename = "skip-dirs")]
    skip_dirs: Option<Vec<String>>,
    extensions: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialImportConfig {
    origin: Option<String>,
    #[serde(rename = "results-file")]
    results_file: Option<String>,
    #[serde(rename = "outputs-dir")]
    outputs_dir: Option<String>,
    discovery: Option<PartialDiscoveryConfig>,
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl PartialImportConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads the file layer, or starts from an empty one when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn merge_with_cli(mut self, args: &ImportArgs) -> Result<core_config::ImportConfig> {
        self.apply_set_values(&args.set_values)?;

        let origin_name = args
            .origin
            .as_ref()
            .or(self.origin.as_ref())
            .ok_or_else(|| {
                CliError::Config(
                    "A predictor origin is required either in the config file or via --origin."
                        .to_string(),
                )
            })?;
        let origin: PredictorOrigin = origin_name
            .parse()
            .map_err(|e: core_config::ConfigError| CliError::Argument(e.to_string()))?;

        let discovery = self.discovery.take().unwrap_or_default();

        core_config::ImportConfigBuilder::new()
            .origin(origin)
            .results_file(
                self.results_file
                    .unwrap_or_else(|| DEFAULT_RESULTS_FILE.to_string()),
            )
            .outputs_dir(
                self.outputs_dir
                    .unwrap_or_else(|| DEFAULT_OUTPUTS_DIR.to_string()),
            )
            .skip_dirs(
                discovery
                    .skip_dirs
                    .unwrap_or_else(|| owned(&DEFAULT_SKIP_DIRS)),
            )
            .extensions(
                discovery
                    .extensions
                    .unwrap_or_else(|| owned(&DEFAULT_EXTENSIONS)),
            )
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key.trim() {
                "origin" => self.origin = Some(value.to_string()),
                "results-file" => self.results_file = Some(value.to_string()),
                "outputs-dir" => self.outputs_dir = Some(value.to_string()),
                "discovery.skip-dirs" => {
                    self.discovery
                        .get_or_insert_with(Default::default)
                        .skip_dirs = Some(split_list(value));
                }
                "discovery.extensions" => {
                    self.discovery
                        .get_or_insert_with(Default::default)
                        .extensions = Some(split_list(value));
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use once_cell::sync::Lazy;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    static TEST_DIR: Lazy<TempDir> = Lazy::new(|| tempdir().expect("Failed to create temp dir"));

    fn write_config_file(name: &str, content: &str) -> PathBuf {
        let file_path = TEST_DIR.path().join(name);
        fs::write(&file_path, content).unwrap();
        file_path
    }

    fn import_args(extra: &[&str]) -> ImportArgs {
        let mut args = vec!["biofold", "import", "-i", "run.zip", "-o", "work"];
        args.extend_from_slice(extra);
        match Cli::parse_from(args).command {
            Commands::Import(args) => args,
            _ => panic!("Expected 'import' subcommand"),
        }
    }

    #[test]
    fn defaults_apply_without_config_file() {
        let args = import_args(&["--origin", "chai-1"]);
        let config = PartialImportConfig::load(None)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();

        assert_eq!(
            config,
            core_config::ImportConfig::with_defaults(PredictorOrigin::Chai1)
        );
    }

    #[test]
    fn file_values_are_loaded() {
        let path = write_config_file(
            "file_values.toml",
            r#"
        origin = "boltz-2"
        results-file = "scores.tsv"

        [discovery]
        extensions = ["cif"]
        "#,
        );
        let args = import_args(&[]);
        let config = PartialImportConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();

        assert_eq!(config.origin, PredictorOrigin::Boltz2);
        assert_eq!(config.results_file, "scores.tsv");
        assert_eq!(config.outputs_dir, DEFAULT_OUTPUTS_DIR);
        assert_eq!(config.discovery.extensions, ["cif"]);
        assert_eq!(config.discovery.skip_dirs, ["templates"]);
    }

    #[test]
    fn cli_origin_overrides_file() {
        let path = write_config_file("cli_override.toml", "origin = \"protenix\"\n");
        let args = import_args(&["--origin", "af3"]);
        let config = PartialImportConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();
        assert_eq!(config.origin, PredictorOrigin::AlphaFold3);
    }

    #[test]
    fn set_values_override_file_values() {
        let path = write_config_file(
            "set_override.toml",
            "origin = \"protenix\"\noutputs-dir = \"published\"\n",
        );
        let args = import_args(&[
            "-S",
            "outputs-dir=final",
            "-S",
            "discovery.skip-dirs=templates, msa",
        ]);
        let config = PartialImportConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();

        assert_eq!(config.outputs_dir, "final");
        assert_eq!(config.discovery.skip_dirs, ["templates", "msa"]);
    }

    #[test]
    fn missing_origin_returns_error() {
        let args = import_args(&[]);
        let result = PartialImportConfig::default().merge_with_cli(&args);
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn unknown_origin_is_an_argument_error() {
        let args = import_args(&["--origin", "rosettafold"]);
        let result = PartialImportConfig::default().merge_with_cli(&args);
        assert!(matches!(result, Err(CliError::Argument(_))));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let path = write_config_file("unknown_key.toml", "num-models = 5\n");
        assert!(matches!(
            PartialImportConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));

        let args = import_args(&["--origin", "chai-1", "-S", "num-models=5"]);
        let result = PartialImportConfig::default().merge_with_cli(&args);
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
