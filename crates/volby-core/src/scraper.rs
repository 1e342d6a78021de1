//! Main volby.cz scraper API
//!
//! This module combines the HTTP client with the parsers: one method per
//! level of the results site (regions, municipalities of a region, results
//! of a municipality). Every method performs exactly one request.

use url::Url;

use crate::client::{ClientConfig, VolbyClient};
use crate::error::{Result, VolbyError};
use crate::parser::{parse_municipalities, parse_regions, parse_results};
use crate::types::{Municipality, Region, ResultRow};

/// Page listing all regions, relative to the results root
pub const DEFAULT_START_PATH: &str = "ps3?xjazyk=CZ";

/// Main scraper API for volby.cz
///
/// # Example
/// ```no_run
/// use volby_core::VolbyScraper;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let scraper = VolbyScraper::new()?;
///
///     let start = scraper.page_url(volby_core::scraper::DEFAULT_START_PATH)?;
///     let regions = scraper.list_regions(&start).await?;
///     println!("Found {} regions", regions.len());
///
///     Ok(())
/// }
/// ```
pub struct VolbyScraper {
    client: VolbyClient,
}

impl VolbyScraper {
    /// Create a new scraper with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        let client = VolbyClient::new()?;
        Ok(Self { client })
    }

    /// Create a new scraper from client configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = VolbyClient::with_config(config)?;
        Ok(Self { client })
    }

    /// Resolve a page path against the configured results root.
    pub fn page_url(&self, path: &str) -> Result<Url> {
        self.client.page_url(path)
    }

    /// List the regions on the top-level results page.
    ///
    /// # Returns
    /// * `Ok(Vec<Region>)` in page order, never empty
    /// * `Err(VolbyError::HttpError | HttpStatus)` if the page cannot be fetched
    /// * `Err(VolbyError::ElementNotFound)` if the region table is missing
    pub async fn list_regions(&self, start_url: &Url) -> Result<Vec<Region>> {
        let html = self.client.fetch(start_url).await?;
        parse_regions(&html, start_url)
    }

    /// List the municipalities of one region.
    ///
    /// An empty list is not an error; the region simply has no rows.
    pub async fn list_municipalities(&self, region: &Region) -> Result<Vec<Municipality>> {
        let url = parse_scraped_url(&region.url)?;
        let html = self.client.fetch(&url).await?;
        parse_municipalities(&html, &url)
    }

    /// Fetch and parse one municipality's results.
    pub async fn fetch_results(&self, municipality: &Municipality) -> Result<ResultRow> {
        let url = parse_scraped_url(&municipality.url)?;
        let html = self.client.fetch(&url).await?;
        let results = parse_results(&html)?;
        Ok(ResultRow::new(municipality, results))
    }
}

fn parse_scraped_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| VolbyError::InvalidUrl(format!("{}: {}", raw, e)))
}
