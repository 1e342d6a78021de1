//! `volby` - scrape volby.cz election results into per-region CSV files
//!
//! Prints `Saved <file>` for every region written. Logs go to stderr.

mod cli;
mod logging;

use clap::Parser;
use volby_core::{Pipeline, VolbyError, VolbyScraper};

use crate::cli::Args;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logging::init_cli_logger(args.verbose);
    tracing::debug!(?args, "Parsed arguments");

    if let Err(e) = run(&args).await {
        tracing::debug!(kind = ?e.kind(), error = ?e, "Run failed");
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: &Args) -> Result<(), VolbyError> {
    let scraper = VolbyScraper::with_config(args.client_config())?;
    let pipeline = Pipeline::new(scraper, args.pipeline_config());

    if args.list_regions {
        for region in pipeline.list_regions().await? {
            let line = serde_json::to_string(&region).map_err(std::io::Error::from)?;
            println!("{}", line);
        }
        return Ok(());
    }

    let saved = pipeline
        .run(|entry| {
            tracing::debug!(path = %entry.path.display(), rows = entry.rows, "Region file written");
            println!("Saved {}", entry.filename);
        })
        .await?;
    tracing::info!(regions = saved.len(), "Done");

    Ok(())
}
