use crate::error::{CliError, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, Layer, Registry, filter::LevelFilter, fmt, prelude::*};

/// Environment variable holding `tracing` directives that refine the level
/// chosen by `-v`/`-q`, e.g. `BIOFOLD_LOG=biofold::core::io=trace`.
pub const LOG_ENV_VAR: &str = "BIOFOLD_LOG";

fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn env_filter(level: LevelFilter, directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(directives.unwrap_or_default())
}

/// Plain-text layer for `--log-file`, with thread ids and module targets so
/// that interleaved scoring logs can be told apart. It sits directly on the
/// registry; the level filter above it still applies to every layer.
fn file_layer(path: &Path) -> Result<impl Layer<Registry>> {
    let file = File::create(path).map_err(CliError::Io)?;
    Ok(fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_target(true))
}

pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let directives = std::env::var(LOG_ENV_VAR).ok();
    let filter = env_filter(level_filter(verbosity, quiet), directives.as_deref());
    let file = log_file.as_deref().map(file_layer).transpose()?;

    tracing_subscriber::registry()
        .with(file)
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init()
        .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to install logger: {}", e)))
}
