use std::collections::BTreeSet;

use serde::Serialize;

// ---------------------------------------------------------------------------
// StartupRecord – one row of the source CSV
// ---------------------------------------------------------------------------

/// A single startup (one row of the source dataset).
///
/// Numeric fields are `None` when the source cell could not be parsed;
/// that absence propagates through every downstream statistic and is
/// rendered as "N/A", never coerced to zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartupRecord {
    /// Startup name. Not guaranteed unique.
    pub name: String,
    /// Industry sector, categorical.
    pub industry: String,
    /// Country of origin, categorical.
    pub country: String,
    /// Founding year.
    pub year: Option<i32>,
    /// Number of funding rounds raised.
    pub funding_rounds: Option<u32>,
    /// Number of distinct investors.
    pub investors: Option<u32>,
    /// Total investment raised (USD).
    pub investment: Option<f64>,
    /// Latest valuation (USD).
    pub valuation: Option<f64>,
    /// Growth rate (%). May be zero or negative; the source is not validated.
    pub growth: Option<f64>,
    /// `investment / funding_rounds`, computed once at normalization time.
    /// Non-finite when `funding_rounds` is zero.
    pub investment_per_round: Option<f64>,
}

// ---------------------------------------------------------------------------
// DatasetIndex – distinct values used to populate the filter controls
// ---------------------------------------------------------------------------

/// Year range shown before any data is loaded or when no row has a year.
pub const FALLBACK_YEAR_RANGE: (i32, i32) = (2000, 2023);

/// Distinct categorical values and the founding-year extent, computed once
/// after load. Re-derivable from the records at any time; never a source
/// of truth on its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetIndex {
    /// Distinct industries, lexicographically ascending.
    pub industries: Vec<String>,
    /// Distinct countries, lexicographically ascending.
    pub countries: Vec<String>,
    /// `(min, max)` founding year over all records with a parseable year;
    /// [`FALLBACK_YEAR_RANGE`] when there is none.
    pub year_range: (i32, i32),
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full normalized dataset with its pre-computed index.
/// Write-once after load; the pipeline only ever borrows subsets of it.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All records in source order.
    pub records: Vec<StartupRecord>,
    /// Distinct-value lists for the filter controls.
    pub index: DatasetIndex,
}

impl Dataset {
    /// Build the index from freshly normalized records.
    pub fn from_records(records: Vec<StartupRecord>) -> Self {
        let mut industries: BTreeSet<&str> = BTreeSet::new();
        let mut countries: BTreeSet<&str> = BTreeSet::new();
        let mut year_range: Option<(i32, i32)> = None;

        for rec in &records {
            industries.insert(&rec.industry);
            countries.insert(&rec.country);
            if let Some(year) = rec.year {
                year_range = Some(match year_range {
                    Some((lo, hi)) => (lo.min(year), hi.max(year)),
                    None => (year, year),
                });
            }
        }

        let index = DatasetIndex {
            industries: industries.into_iter().map(str::to_string).collect(),
            countries: countries.into_iter().map(str::to_string).collect(),
            year_range: year_range.unwrap_or(FALLBACK_YEAR_RANGE),
        };
        Dataset { records, index }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Materialize a filtered subset from the indices produced by
    /// [`crate::data::filter::filtered_indices`].
    pub fn select(&self, indices: &[usize]) -> Vec<&StartupRecord> {
        indices.iter().map(|&i| &self.records[i]).collect()
    }
}
