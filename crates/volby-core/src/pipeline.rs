//! Region-by-region scrape and export
//!
//! The pipeline lists regions once, then for each region lists its
//! municipalities, fetches every municipality's results and writes the
//! region's CSV. Everything runs strictly in sequence and the first error
//! ends the run; files written for earlier regions are left in place.

use std::fs;
use std::path::PathBuf;

use crate::error::Result;
use crate::export::{FilenameAllocator, RegionTable};
use crate::scraper::{VolbyScraper, DEFAULT_START_PATH};
use crate::types::{Region, ResultRow};

/// Configuration for a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Path of the region listing, relative to the results root
    pub start_path: String,
    /// Directory the region CSV files are written into
    pub output_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            start_path: DEFAULT_START_PATH.to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

/// A region whose CSV file has been written
#[derive(Debug, Clone)]
pub struct SavedRegion {
    pub region: Region,
    /// Bare filename, as reported to the user
    pub filename: String,
    /// Full path of the written file
    pub path: PathBuf,
    /// Number of municipality rows in the file
    pub rows: usize,
}

/// Sequential region → municipality → CSV pipeline
pub struct Pipeline {
    scraper: VolbyScraper,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(scraper: VolbyScraper, config: PipelineConfig) -> Self {
        Self { scraper, config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Fetch the region listing only.
    pub async fn list_regions(&self) -> Result<Vec<Region>> {
        let start_url = self.scraper.page_url(&self.config.start_path)?;
        self.scraper.list_regions(&start_url).await
    }

    /// Scrape every region and write one CSV per region.
    ///
    /// `on_saved` is called right after each file is in place, before the
    /// next region is started.
    ///
    /// # Errors
    /// The first fetch, parse or write error aborts the run. The region in
    /// progress gets no file; regions already reported keep theirs.
    pub async fn run<F>(&self, mut on_saved: F) -> Result<Vec<SavedRegion>>
    where
        F: FnMut(&SavedRegion),
    {
        fs::create_dir_all(&self.config.output_dir)?;

        let regions = self.list_regions().await?;
        tracing::info!(count = regions.len(), "Found regions");

        let mut filenames = FilenameAllocator::new();
        let mut saved = Vec::with_capacity(regions.len());

        for region in regions {
            let rows = self.collect_rows(&region).await?;
            let table = RegionTable::from_rows(&rows);

            let filename = filenames.allocate(&region);
            let path = self.config.output_dir.join(&filename);
            table.write_file(&path)?;

            tracing::info!(region = %region.name, rows = rows.len(), path = %path.display(), "Saved region");

            let entry = SavedRegion {
                region,
                filename,
                path,
                rows: rows.len(),
            };
            on_saved(&entry);
            saved.push(entry);
        }

        Ok(saved)
    }

    async fn collect_rows(&self, region: &Region) -> Result<Vec<ResultRow>> {
        let municipalities = self.scraper.list_municipalities(region).await?;
        tracing::info!(
            region = %region.name,
            code = %region.code,
            municipalities = municipalities.len(),
            "Scraping region"
        );

        let mut rows = Vec::with_capacity(municipalities.len());
        for municipality in &municipalities {
            tracing::debug!(code = %municipality.code, name = %municipality.name, "Fetching municipality");
            rows.push(self.scraper.fetch_results(municipality).await?);
        }

        Ok(rows)
    }
}
