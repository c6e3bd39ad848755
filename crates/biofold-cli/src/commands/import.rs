use crate::cli::ImportArgs;
use crate::config::PartialImportConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use biofold::{engine::progress::ProgressReporter, workflows};
use tracing::info;

pub async fn run(args: ImportArgs) -> Result<()> {
    let partial_config = PartialImportConfig::load(args.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.callback());

    println!(
        "Importing {} results from {}...",
        config.origin,
        args.input.display()
    );
    info!("Invoking the import workflow...");

    let result = tokio::task::block_in_place(|| {
        workflows::import::run(&args.input, &args.output, &config, &reporter)
    })?;

    info!(
        "Workflow finished, scored {} model(s) from {:?}.",
        result.report.len(),
        result.source_dir
    );
    println!(
        "Scored {} model(s). Results table written to: {}",
        result.report.len(),
        result.results_path.display()
    );
    println!(
        "✓ Best model '{}' (mean confidence {:.2}) published to: {}",
        result.report.best_model(),
        result.report.best().mean,
        result.published.best_path().display()
    );
    println!(
        "  Provenance manifest: {}",
        result.published.manifest_path().display()
    );
    Ok(())
}
