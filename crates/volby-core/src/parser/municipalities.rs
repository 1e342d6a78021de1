//! Municipality listing parser for volby.cz
//!
//! A region page lists its municipalities in rows where `td.cislo` holds
//! the code linked to the result page and `td.overflow_name` the name.

use scraper::Html;
use url::Url;

use super::{cell_text, has_class, resolve_link, row_cells, selector};
use crate::error::{Result, VolbyError};
use crate::types::Municipality;

/// Parse the municipalities listed on a region page.
///
/// # Arguments
/// * `html` - Raw HTML content of the region page
/// * `page_url` - URL the page was fetched from, used to resolve links
///
/// # Returns
/// * `Ok(Vec<Municipality>)` in page order; empty when the tables list none
/// * `Err(VolbyError::ElementNotFound)` if the page has no table at all,
///   its data rows carry neither `td.cislo` nor `td.overflow_name`, or a
///   linked row has no name cell
pub fn parse_municipalities(html: &str, page_url: &Url) -> Result<Vec<Municipality>> {
    let document = Html::parse_document(html);

    let table_selector = selector("table")?;
    if document.select(&table_selector).next().is_none() {
        return Err(VolbyError::ElementNotFound("municipality table".to_string()));
    }

    let row_selector = selector("tr")?;
    let link_selector = selector("a[href]")?;

    let mut municipalities = Vec::new();
    let mut data_rows = 0usize;
    let mut listing_rows = 0usize;

    for row in document.select(&row_selector) {
        let cells = row_cells(&row);
        if cells.is_empty() {
            continue;
        }
        data_rows += 1;

        if cells
            .iter()
            .any(|cell| has_class(cell, "cislo") || has_class(cell, "overflow_name"))
        {
            listing_rows += 1;
        }

        let Some(link) = cells
            .iter()
            .filter(|cell| has_class(cell, "cislo"))
            .find_map(|cell| cell.select(&link_selector).next())
        else {
            continue;
        };

        let code = cell_text(&link);
        let href = link.value().attr("href").unwrap_or_default();

        let name = cells
            .iter()
            .find(|cell| has_class(cell, "overflow_name"))
            .map(cell_text)
            .ok_or_else(|| {
                VolbyError::ElementNotFound(format!("td.overflow_name for municipality {}", code))
            })?;

        let url = resolve_link(page_url, href)?;

        municipalities.push(Municipality {
            code,
            name,
            url: url.to_string(),
        });
    }

    // Rows of data without a single listing cell mean the layout changed.
    if data_rows > 0 && listing_rows == 0 {
        return Err(VolbyError::ElementNotFound(
            "municipality listing cells (td.cislo, td.overflow_name)".to_string(),
        ));
    }

    Ok(municipalities)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("https://www.volby.cz/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=2&xnumnuts=2101")
            .unwrap()
    }

    #[test]
    fn test_parse_municipalities() {
        let html = r#"
            <html><body>
            <table class="table">
              <tr><th>Obec číslo</th><th>název</th><th>Výběr okrsku</th></tr>
              <tr>
                <td class="cislo" headers="t1sa1 t1sb1"><a href="ps311?xjazyk=CZ&amp;xkraj=2&amp;xobec=529303&amp;xvyber=2101">529303</a></td>
                <td class="overflow_name" headers="t1sa1 t1sb2">Benešov</td>
                <td class="center" headers="t1sa2"><a href="ps34?xjazyk=CZ&amp;xkraj=2&amp;xobec=529303">X</a></td>
              </tr>
              <tr>
                <td class="cislo" headers="t1sa1 t1sb1"><a href="ps311?xjazyk=CZ&amp;xkraj=2&amp;xobec=532568&amp;xvyber=2101">532568</a></td>
                <td class="overflow_name" headers="t1sa1 t1sb2"> Bernartice </td>
              </tr>
            </table>
            <table class="table">
              <tr>
                <td class="cislo" headers="t2sa1 t2sb1"><a href="ps311?xjazyk=CZ&amp;xkraj=2&amp;xobec=530743&amp;xvyber=2101">530743</a></td>
                <td class="overflow_name" headers="t2sa1 t2sb2">Bílkovice</td>
              </tr>
              <tr><td class="cislo" headers="t2sa1 t2sb1">-</td><td class="overflow_name">-</td></tr>
            </table>
            </body></html>
        "#;

        let municipalities = parse_municipalities(html, &page_url()).unwrap();
        assert_eq!(municipalities.len(), 3);
        assert_eq!(municipalities[0].code, "529303");
        assert_eq!(municipalities[0].name, "Benešov");
        assert_eq!(
            municipalities[0].url,
            "https://www.volby.cz/pls/ps2017nss/ps311?xjazyk=CZ&xkraj=2&xobec=529303&xvyber=2101"
        );
        assert_eq!(municipalities[1].name, "Bernartice");
        assert_eq!(municipalities[2].code, "530743");
    }

    #[test]
    fn test_parse_municipalities_empty_table() {
        let html = r#"<table class="table"><tr><th>Obec číslo</th><th>název</th></tr></table>"#;
        let municipalities = parse_municipalities(html, &page_url()).unwrap();
        assert!(municipalities.is_empty());
    }

    #[test]
    fn test_parse_municipalities_renamed_cells() {
        let html = r#"
            <table class="table">
              <tr><th>Obec číslo</th><th>název</th></tr>
              <tr>
                <td class="number"><a href="ps311?xobec=529303">529303</a></td>
                <td class="name">Benešov</td>
              </tr>
              <tr>
                <td class="number"><a href="ps311?xobec=532568">532568</a></td>
                <td class="name">Bernartice</td>
              </tr>
            </table>
        "#;
        match parse_municipalities(html, &page_url()) {
            Err(VolbyError::ElementNotFound(msg)) => assert!(msg.contains("td.cislo")),
            other => panic!("Expected ElementNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_municipalities_missing_table() {
        let result = parse_municipalities("<html><body>Stránka nenalezena</body></html>", &page_url());
        match result {
            Err(VolbyError::ElementNotFound(msg)) => assert!(msg.contains("municipality table")),
            _ => panic!("Expected ElementNotFound error"),
        }
    }

    #[test]
    fn test_parse_municipalities_row_without_name() {
        let html = r#"
            <table><tr>
              <td class="cislo"><a href="ps311?xobec=1">500011</a></td>
            </tr></table>
        "#;
        match parse_municipalities(html, &page_url()) {
            Err(VolbyError::ElementNotFound(msg)) => assert!(msg.contains("500011")),
            _ => panic!("Expected ElementNotFound error"),
        }
    }
}
