use crate::cli::SummaryArgs;
use crate::error::Result;
use biofold::workflows::summary;
use tracing::warn;

pub async fn run(args: SummaryArgs) -> Result<()> {
    match summary::results_summary(&args.target, &args.results_file)? {
        Some(results) => println!("{}", results),
        None => {
            warn!("No results table found at {:?}", args.target);
            println!("No results table found at {}", args.target.display());
        }
    }

    if let Some(log) = &args.chai_log {
        match summary::chai_log_summary(log)? {
            Some(scores) => println!("\n{}", scores),
            None => println!("\nNo Chai-1 scores found in {}", log.display()),
        }
    }
    Ok(())
}
