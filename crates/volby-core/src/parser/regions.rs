//! Region listing parser for volby.cz
//!
//! The top-level page holds one table per kraj. Each row is a region
//! whose cells are told apart by their `headers` attribute:
//! `tNsa1 tNsb1` is the code, `tNsa1 tNsb2` the name and `tNsa3` holds
//! the link to the municipality listing.

use scraper::Html;
use url::Url;

use super::{cell_text, headers_match, headers_pattern, resolve_link, row_cells, selector};
use crate::error::{Result, VolbyError};
use crate::types::Region;

/// Parse the regions listed on the top-level results page.
///
/// # Arguments
/// * `html` - Raw HTML content of the page
/// * `page_url` - URL the page was fetched from, used to resolve links
///
/// # Returns
/// * `Ok(Vec<Region>)` in page order, never empty
/// * `Err(VolbyError::ElementNotFound)` if no region rows were found
pub fn parse_regions(html: &str, page_url: &Url) -> Result<Vec<Region>> {
    let document = Html::parse_document(html);

    let row_selector = selector("tr")?;
    let link_selector = selector("a[href]")?;
    let name_pattern = headers_pattern(r"t.+sa1\s+t.+sb2")?;
    let code_pattern = headers_pattern(r"t.+sa1\s+t.+sb1")?;
    let link_pattern = headers_pattern(r"t.+sa3")?;

    let mut regions = Vec::new();

    for row in document.select(&row_selector) {
        let mut name = None;
        let mut code = None;
        let mut href = None;

        for cell in row_cells(&row) {
            if name.is_none() && headers_match(&cell, &name_pattern) {
                name = Some(cell_text(&cell));
            } else if code.is_none() && headers_match(&cell, &code_pattern) {
                code = Some(cell_text(&cell));
            } else if href.is_none() && headers_match(&cell, &link_pattern) {
                href = cell
                    .select(&link_selector)
                    .next()
                    .and_then(|a| a.value().attr("href"));
            }
        }

        let (Some(name), Some(href)) = (name, href) else {
            continue;
        };

        let url = resolve_link(page_url, href)?;
        let code = code
            .filter(|c| !c.is_empty())
            .or_else(|| query_param(&url, "xnumnuts"))
            .unwrap_or_else(|| (regions.len() + 1).to_string());

        regions.push(Region {
            code,
            name,
            url: url.to_string(),
        });
    }

    if regions.is_empty() {
        return Err(VolbyError::ElementNotFound(
            "region table rows (td[headers~=sb2] with a link in td[headers~=sa3])".to_string(),
        ));
    }

    Ok(regions)
}

/// Value of a query parameter, if present and non-empty.
fn query_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, v)| k == key && !v.is_empty())
        .map(|(_, v)| v.into_owned())
}
