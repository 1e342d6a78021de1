//! Municipality result parser for volby.cz
//!
//! The summary table tags its cells with plain header ids (`sa2` voters in
//! the register, `sa3` envelopes issued, `sa6` valid votes). Party tables
//! put the party name in `td.overflow_name` and the vote count in the cell
//! headed `tNsa2 tNsb3`.

use scraper::Html;

use super::{cell_text, has_class, headers_match, headers_pattern, row_cells, selector};
use crate::error::{Result, VolbyError};
use crate::types::{MunicipalityResults, PartyVotes};

/// Parse the result tables of a municipality page.
///
/// Summary cells that are missing come back as empty strings.
///
/// # Returns
/// * `Ok(MunicipalityResults)` with party votes in page order
/// * `Err(VolbyError::ElementNotFound)` if the page has neither summary
///   cells nor party rows, a party row has no vote cell, or vote cells
///   are present without any party name next to them
pub fn parse_results(html: &str) -> Result<MunicipalityResults> {
    let document = Html::parse_document(html);

    let registered_voters = first_cell_text(&document, r#"td[headers~="sa2"]"#)?;
    let envelopes_issued = first_cell_text(&document, r#"td[headers~="sa3"]"#)?;
    let valid_votes = first_cell_text(&document, r#"td[headers~="sa6"]"#)?;
    let party_votes = parse_party_votes(&document)?;

    if registered_voters.is_none()
        && envelopes_issued.is_none()
        && valid_votes.is_none()
        && party_votes.is_empty()
    {
        return Err(VolbyError::ElementNotFound("results table".to_string()));
    }

    Ok(MunicipalityResults {
        registered_voters: registered_voters.unwrap_or_default(),
        envelopes_issued: envelopes_issued.unwrap_or_default(),
        valid_votes: valid_votes.unwrap_or_default(),
        party_votes,
    })
}

fn first_cell_text(document: &Html, css: &str) -> Result<Option<String>> {
    let cell_selector = selector(css)?;
    Ok(document.select(&cell_selector).next().map(|cell| cell_text(&cell)))
}

fn parse_party_votes(document: &Html) -> Result<Vec<PartyVotes>> {
    let row_selector = selector("tr")?;
    let votes_pattern = headers_pattern(r"t[12]sa2\s+t[12]sb3")?;

    let mut party_votes = Vec::new();
    let mut unpaired_votes = false;

    for row in document.select(&row_selector) {
        let cells = row_cells(&row);

        let Some(party) = cells
            .iter()
            .find(|cell| has_class(cell, "overflow_name"))
            .map(cell_text)
        else {
            unpaired_votes |= cells.iter().any(|cell| headers_match(cell, &votes_pattern));
            continue;
        };

        let votes = cells
            .iter()
            .find(|cell| headers_match(cell, &votes_pattern))
            .map(cell_text)
            .ok_or_else(|| VolbyError::ElementNotFound(format!("vote count for party {}", party)))?;

        party_votes.push(PartyVotes { party, votes });
    }

    if party_votes.is_empty() && unpaired_votes {
        return Err(VolbyError::ElementNotFound(
            "party name cells (td.overflow_name)".to_string(),
        ));
    }

    Ok(party_votes)
}
