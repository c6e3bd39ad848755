use biofold::engine::config::DEFAULT_RESULTS_FILE;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "biofold CLI - Extract per-model confidence from predicted structures (AlphaFold3, Protenix, Chai-1, Boltz-2) and select the best model.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score explicit CIF/PDB files and report the best model.
    Score(ScoreArgs),
    /// Import a predictor run: unpack, discover, score and publish its models.
    Import(ImportArgs),
    /// Show the per-model summary of a finished run.
    Summary(SummaryArgs),
}

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Structure files to score (.cif or .pdb). Order decides ties.
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Also write the results table to this path.
    #[arg(short, long, value_name = "PATH")]
    pub results: Option<PathBuf>,
}

/// Arguments for the `import` subcommand.
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Results directory or archive (.zip, .tar, .tar.gz, .tgz) to import.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Working directory receiving the results table and the published structures.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub output: PathBuf,

    /// Predictor that produced the results (alphafold3, protenix, chai-1, boltz-2).
    #[arg(long, value_name = "NAME")]
    pub origin: Option<String>,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S results-file=scores.txt
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `summary` subcommand.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Working directory of an import, or a results table.
    #[arg(required = true, value_name = "DIR_OR_RESULTS")]
    pub target: PathBuf,

    /// Name of the results table inside a working directory, as set by the
    /// `results-file` import option.
    #[arg(long, value_name = "NAME", default_value = DEFAULT_RESULTS_FILE)]
    pub results_file: String,

    /// Chai-1 `run.stdout` log whose aggregate scores are reported as well.
    #[arg(long, value_name = "PATH")]
    pub chai_log: Option<PathBuf>,
}
