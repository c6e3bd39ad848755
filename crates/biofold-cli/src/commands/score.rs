use crate::cli::ScoreArgs;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use biofold::{
    core::io::results::ResultsTable,
    engine::{extract, progress::ProgressReporter},
};
use tracing::info;

pub async fn run(args: ScoreArgs) -> Result<()> {
    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.callback());

    println!("Scoring {} structure file(s)...", args.files.len());
    info!("Invoking the confidence extractor...");

    let report =
        tokio::task::block_in_place(|| extract::extract_paths(&args.files, &reporter))?;

    let mut table = Vec::new();
    ResultsTable::write_to(&report, &mut table)
        .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to render results table: {}", e)))?;
    print!("{}", String::from_utf8_lossy(&table));

    if let Some(path) = &args.results {
        info!("Writing results table to {:?}", path);
        ResultsTable::write_to_path(&report, path).map_err(|source| CliError::Results {
            path: path.clone(),
            source,
        })?;
        println!("Results table written to: {}", path.display());
    }

    println!(
        "✓ Best model: {} (mean confidence {:.2})",
        report.best_model(),
        report.best().mean
    );
    Ok(())
}
