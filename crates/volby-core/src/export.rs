//! CSV export of one region's results
//!
//! A region table has five fixed columns followed by one column per party
//! seen anywhere in the region, sorted by name. Municipalities without
//! votes for a party get `0` in that column.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, VolbyError};
use crate::types::{Region, ResultRow};

/// Leading columns of every region table
pub const FIXED_COLUMNS: [&str; 5] = [
    "id",
    "location",
    "registered voters",
    "envelopes",
    "valid votes",
];

/// Prefix of every output filename ("results" in Czech)
const FILENAME_PREFIX: &str = "vysledky_";

/// Header plus records for one region, with a consistent column layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionTable {
    header: Vec<String>,
    records: Vec<Vec<String>>,
}

impl RegionTable {
    /// Flatten result rows into a table.
    ///
    /// Rows keep the order they are given in. A party listed twice on one
    /// municipality page keeps its last value.
    pub fn from_rows(rows: &[ResultRow]) -> Self {
        let parties: BTreeSet<&str> = rows
            .iter()
            .flat_map(|row| row.party_votes.iter().map(|p| p.party.as_str()))
            .collect();

        let header = FIXED_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(parties.iter().map(|p| p.to_string()))
            .collect();

        let records = rows
            .iter()
            .map(|row| {
                let votes: BTreeMap<&str, &str> = row
                    .party_votes
                    .iter()
                    .map(|p| (p.party.as_str(), p.votes.as_str()))
                    .collect();

                let mut record = vec![
                    row.municipality_code.clone(),
                    row.municipality_name.clone(),
                    row.registered_voters.clone(),
                    row.envelopes_issued.clone(),
                    row.valid_votes.clone(),
                ];
                record.extend(
                    parties
                        .iter()
                        .map(|party| votes.get(party).copied().unwrap_or("0").to_string()),
                );
                record
            })
            .collect();

        Self { header, records }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn records(&self) -> &[Vec<String>] {
        &self.records
    }

    /// Serialize the table as CSV (CRLF line endings, minimal quoting).
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .from_writer(writer);

        csv_writer.write_record(&self.header)?;
        for record in &self.records {
            csv_writer.write_record(record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Write the table to `path`, replacing any existing file.
    ///
    /// The data goes to `<path>.part` first and is renamed into place, so
    /// `path` only ever holds a complete table.
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let part = part_path(path);

        let written = File::create(&part)
            .map_err(VolbyError::from)
            .and_then(|file| self.write_to(BufWriter::new(file)));

        if let Err(e) = written {
            let _ = fs::remove_file(&part);
            return Err(e);
        }

        if let Err(e) = fs::rename(&part, path) {
            let _ = fs::remove_file(&part);
            return Err(e.into());
        }
        Ok(())
    }
}

fn part_path(path: &Path) -> PathBuf {
    let mut part = OsString::from(path.as_os_str());
    part.push(".part");
    PathBuf::from(part)
}

/// Turn a region name into a filename-safe slug.
///
/// Diacritics are folded to ASCII and other non-ASCII characters dropped,
/// the result is lowercased, whitespace becomes `_` and anything outside
/// `[a-z0-9_.-]` is removed.
///
/// # Examples
/// ```
/// use volby_core::export::slugify;
///
/// assert_eq!(slugify("Ústí nad Labem"), "usti_nad_labem");
/// assert_eq!(slugify("Frýdek-Místek"), "frydek-mistek");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());

    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_whitespace() {
            slug.push('_');
        } else if ch.is_ascii() {
            if ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '-') {
                slug.push(ch);
            }
        } else if let Some(folded) = fold_diacritic(ch) {
            slug.push(folded);
        }
    }

    slug
}

/// ASCII base letter of a lowercase Latin letter with diacritics.
fn fold_diacritic(ch: char) -> Option<char> {
    let folded = match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'ď' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => 'e',
        'ì' | 'í' | 'î' | 'ï' | 'ī' => 'i',
        'ĺ' | 'ľ' => 'l',
        'ñ' | 'ń' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ō' | 'ő' => 'o',
        'ŕ' | 'ř' => 'r',
        'ś' | 'š' => 's',
        'ť' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        _ => return None,
    };
    Some(folded)
}

/// Filename for a region, before collision handling.
pub fn region_filename(region_name: &str) -> String {
    format!("{}{}.csv", FILENAME_PREFIX, region_stem(region_name))
}

fn region_stem(region_name: &str) -> String {
    let slug = slugify(region_name);
    if slug.is_empty() {
        "region".to_string()
    } else {
        slug
    }
}

/// Hands out unique region filenames within one run.
///
/// The first region with a given slug gets `vysledky_<slug>.csv`. Later ones
/// get the slugified region code appended, then `_2`, `_3`, ... until the
/// name is free. The outcome depends only on the order regions are seen in.
#[derive(Debug, Default)]
pub struct FilenameAllocator {
    used: HashSet<String>,
}

impl FilenameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self, region: &Region) -> String {
        let first = region_filename(&region.name);
        let base = first.strip_suffix(".csv").unwrap_or(&first);
        let code = slugify(&region.code);

        let stem = if code.is_empty() {
            base.to_string()
        } else {
            format!("{}_{}", base, code)
        };

        let filename = std::iter::once(first.clone())
            .chain(std::iter::once(format!("{}.csv", stem)))
            .chain((2u32..).map(|n| format!("{}_{}.csv", stem, n)))
            .find(|candidate| !self.used.contains(candidate))
            .unwrap_or_default();

        self.used.insert(filename.clone());
        filename
    }
}
