//! Data types for the volby.cz scraper
//!
//! Regions and municipalities are discovered from listing pages,
//! result rows are scraped from municipality pages. Every value scraped
//! from a table cell is kept as trimmed text.

use serde::{Deserialize, Serialize};

/// A region listed on the top-level results page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Region code as shown on the site (e.g. "CZ0100")
    pub code: String,
    /// Display name (e.g. "Praha")
    pub name: String,
    /// Absolute URL of the page listing the region's municipalities
    pub url: String,
}

/// A municipality listed on a region page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Municipality {
    /// Municipality code (e.g. "529303")
    pub code: String,
    /// Display name
    pub name: String,
    /// Absolute URL of the municipality's result page
    pub url: String,
}

/// Votes received by one party in one municipality
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyVotes {
    /// Party name as shown in the results table
    pub party: String,
    /// Vote count, as printed
    pub votes: String,
}

/// Figures scraped from a municipality result page
///
/// Summary fields the page lacks are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MunicipalityResults {
    /// Voters in the register
    pub registered_voters: String,
    /// Envelopes issued
    pub envelopes_issued: String,
    /// Valid votes cast
    pub valid_votes: String,
    /// Per-party votes in page order
    pub party_votes: Vec<PartyVotes>,
}

/// One municipality's flattened results, ready for export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub municipality_code: String,
    pub municipality_name: String,
    pub registered_voters: String,
    pub envelopes_issued: String,
    pub valid_votes: String,
    pub party_votes: Vec<PartyVotes>,
}

impl ResultRow {
    /// Combine a listed municipality with the figures from its result page
    pub fn new(municipality: &Municipality, results: MunicipalityResults) -> Self {
        Self {
            municipality_code: municipality.code.clone(),
            municipality_name: municipality.name.clone(),
            registered_voters: results.registered_voters,
            envelopes_issued: results.envelopes_issued,
            valid_votes: results.valid_votes,
            party_votes: results.party_votes,
        }
    }
}
