//! volby.cz Scraper Core Library
//!
//! This crate scrapes the 2017 Czech Chamber of Deputies election results
//! published on volby.cz and flattens them into one CSV file per region.
//!
//! # Features
//! - List regions and the municipalities of each region
//! - Parse a municipality's result tables (turnout figures, votes per party)
//! - Write per-region CSV tables with a consistent party column layout
//! - Rate-limited HTTP client to avoid server overload

pub mod client;
pub mod error;
pub mod export;
pub mod parser;
pub mod pipeline;
pub mod scraper;
pub mod types;

// Re-export main types for convenience
pub use client::{ClientConfig, RateLimiter, VolbyClient};
pub use error::{ErrorKind, Result, VolbyError};
pub use export::{FilenameAllocator, RegionTable};
pub use pipeline::{Pipeline, PipelineConfig, SavedRegion};
pub use scraper::VolbyScraper;
pub use types::{Municipality, MunicipalityResults, PartyVotes, Region, ResultRow};
