use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use thiserror::Error;

use super::model::{Dataset, StartupRecord};

// ---------------------------------------------------------------------------
// Load-failure taxonomy
// ---------------------------------------------------------------------------

/// Terminal load failures. A failed load leaves the dashboard empty; there
/// is no retry path. Unparseable *cells* are not errors (see
/// [`parse_f64`] and friends).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("CSV missing required column '{0}'")]
    MissingColumn(&'static str),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the startup dataset from a file. Dispatch by extension; only
/// `.csv` with the published header is accepted.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            load_csv_reader(file)
        }
        other => bail!(LoadError::UnsupportedExtension(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// The one accepted header. Names are matched literally and
/// case-sensitively; a missing column is a [`LoadError::MissingColumn`].
pub const CSV_COLUMNS: [&str; 9] = [
    "Startup Name",
    "Industry",
    "Funding Rounds",
    "Investment Amount (USD)",
    "Valuation (USD)",
    "Number of Investors",
    "Country",
    "Year Founded",
    "Growth Rate (%)",
];

/// Column positions resolved once from the header row.
struct Columns {
    name: usize,
    industry: usize,
    funding_rounds: usize,
    investment: usize,
    valuation: usize,
    investors: usize,
    country: usize,
    year: usize,
    growth: usize,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        let position = |wanted: &'static str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h == wanted)
                .ok_or_else(|| LoadError::MissingColumn(wanted).into())
        };
        Ok(Columns {
            name: position("Startup Name")?,
            industry: position("Industry")?,
            funding_rounds: position("Funding Rounds")?,
            investment: position("Investment Amount (USD)")?,
            valuation: position("Valuation (USD)")?,
            investors: position("Number of Investors")?,
            country: position("Country")?,
            year: position("Year Founded")?,
            growth: position("Growth Rate (%)")?,
        })
    }
}

/// Parse the startup CSV from any reader. Every data row yields exactly
/// one record; rows are never merged, deduplicated, or rejected over
/// cell contents.
pub fn load_csv_reader<R: Read>(reader: R) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers().context("reading CSV headers")?.clone();
    let columns = Columns::resolve(&headers)?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(normalize_record(&row, &columns));
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Record normalizer
// ---------------------------------------------------------------------------

/// Convert one raw CSV row into a typed record. Total: no field is
/// dropped and no row is rejected; a cell that fails its numeric parse
/// simply becomes `None` and poisons downstream statistics.
fn normalize_record(row: &csv::StringRecord, columns: &Columns) -> StartupRecord {
    let cell = |idx: usize| row.get(idx).unwrap_or("");

    let investment = parse_f64(cell(columns.investment));
    let funding_rounds = parse_u32(cell(columns.funding_rounds));
    // Eager and unguarded: zero rounds yields a non-finite value inside
    // Some.
    let investment_per_round = match (investment, funding_rounds) {
        (Some(amount), Some(rounds)) => Some(amount / rounds as f64),
        _ => None,
    };

    StartupRecord {
        name: cell(columns.name).to_string(),
        industry: cell(columns.industry).to_string(),
        country: cell(columns.country).to_string(),
        year: parse_i32(cell(columns.year)),
        funding_rounds,
        investors: parse_u32(cell(columns.investors)),
        investment,
        valuation: parse_f64(cell(columns.valuation)),
        growth: parse_f64(cell(columns.growth)),
        investment_per_round,
    }
}

fn parse_f64(s: &str) -> Option<f64> {
    s.trim().parse().ok()
}

fn parse_u32(s: &str) -> Option<u32> {
    s.trim().parse().ok()
}

fn parse_i32(s: &str) -> Option<i32> {
    s.trim().parse().ok()
}
