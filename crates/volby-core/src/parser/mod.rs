//! HTML parsers for volby.cz pages
//!
//! This module contains parsers for extracting data from the results pages:
//! - `regions`: Parse the top-level region listing
//! - `municipalities`: Parse a region's municipality listing
//! - `results`: Parse a municipality's result tables
//!
//! All locators live here, so a layout change on the site only touches
//! this module.

pub mod municipalities;
pub mod regions;
pub mod results;

// Re-export main parsing functions
pub use municipalities::parse_municipalities;
pub use regions::parse_regions;
pub use results::parse_results;

use regex_lite::Regex;
use scraper::{ElementRef, Selector};
use url::Url;

use crate::error::{Result, VolbyError};

/// Compile a CSS selector, reporting failures as parse errors.
pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| VolbyError::ParseError(format!("Invalid selector {}: {:?}", css, e)))
}

/// Compile a pattern matched against `headers` attribute values.
pub(crate) fn headers_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| VolbyError::ParseError(format!("Invalid pattern {}: {}", pattern, e)))
}

/// Whether a cell's `headers` attribute matches `pattern` anywhere.
pub(crate) fn headers_match(cell: &ElementRef, pattern: &Regex) -> bool {
    cell.value()
        .attr("headers")
        .map(|headers| pattern.is_match(headers))
        .unwrap_or(false)
}

/// Whether an element carries the given class.
pub(crate) fn has_class(element: &ElementRef, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// Cell text with surrounding whitespace (including `&nbsp;`) removed.
pub(crate) fn cell_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// The `<td>` children of a row, skipping cells of nested tables.
pub(crate) fn row_cells<'a>(row: &ElementRef<'a>) -> Vec<ElementRef<'a>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "td")
        .collect()
}

/// Resolve a scraped `href` against the page it was found on.
pub(crate) fn resolve_link(page_url: &Url, href: &str) -> Result<Url> {
    page_url
        .join(href.trim())
        .map_err(|e| VolbyError::InvalidUrl(format!("{}: {}", href, e)))
}
