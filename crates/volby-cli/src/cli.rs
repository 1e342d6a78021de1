//! Command-line arguments
//!
//! Every flag has a default, so `volby` with no arguments scrapes the
//! whole site into the current directory.

use std::path::PathBuf;

use clap::Parser;
use volby_core::client::DEFAULT_BASE_URL;
use volby_core::scraper::DEFAULT_START_PATH;
use volby_core::{ClientConfig, PipelineConfig};

#[derive(Debug, Clone, Parser)]
#[command(name = "volby")]
#[command(about = "Scrape volby.cz election results into one CSV file per region")]
pub struct Args {
    /// Results root that page paths are resolved against
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Region listing page, relative to the results root
    #[arg(long, default_value = DEFAULT_START_PATH)]
    pub start_path: String,

    /// Directory the region CSV files are written into
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Maximum requests per second (0 disables throttling)
    #[arg(long, default_value_t = 5.0)]
    pub requests_per_second: f64,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Print the discovered regions as JSON lines and exit
    #[arg(long)]
    pub list_regions: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Args {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            requests_per_second: self.requests_per_second,
            timeout_secs: self.timeout_secs,
        }
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            start_path: self.start_path.clone(),
            output_dir: self.output_dir.clone(),
        }
    }
}
