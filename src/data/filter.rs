use serde::Serialize;

use super::model::{DatasetIndex, StartupRecord};

// ---------------------------------------------------------------------------
// Filter criteria: the state of the three dashboard filter controls
// ---------------------------------------------------------------------------

/// One dropdown's selection: everything, or exactly one categorical value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum Selection {
    /// No constraint (the "all" option).
    #[default]
    All,
    /// Only records whose field equals this value.
    Only(String),
}

impl Selection {
    fn admits(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(only) => only == value,
        }
    }
}

/// The current filter-control values.
///
/// Only a *lower* bound on the founding year is enforced; the range
/// control in the dashboard narrows from the minimum side only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterCriteria {
    pub industry: Selection,
    pub country: Selection,
    pub min_year: i32,
}

impl FilterCriteria {
    /// The reset state: everything visible, `min_year` at the bottom of
    /// the dataset's year range.
    pub fn unfiltered(index: &DatasetIndex) -> Self {
        FilterCriteria {
            industry: Selection::All,
            country: Selection::All,
            min_year: index.year_range.0,
        }
    }

    /// Whether a single record passes all three filter clauses.
    ///
    /// A record without a parseable founding year never passes the year
    /// clause.
    pub fn matches(&self, rec: &StartupRecord) -> bool {
        self.industry.admits(&rec.industry)
            && self.country.admits(&rec.country)
            && rec.year.is_some_and(|y| y >= self.min_year)
    }
}

/// Return indices of records that pass the current criteria, preserving
/// the original relative order.
pub fn filtered_indices(records: &[StartupRecord], criteria: &FilterCriteria) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, rec)| criteria.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Dataset;

    fn record(name: &str, industry: &str, country: &str, year: Option<i32>) -> StartupRecord {
        StartupRecord {
            name: name.to_string(),
            industry: industry.to_string(),
            country: country.to_string(),
            year,
            funding_rounds: Some(2),
            investors: Some(5),
            investment: Some(1e6),
            valuation: Some(4e6),
            growth: Some(10.0),
            investment_per_round: Some(5e5),
        }
    }

    fn sample() -> Vec<StartupRecord> {
        vec![
            record("a", "AI", "USA", Some(2010)),
            record("b", "Fintech", "UK", Some(2015)),
            record("c", "AI", "UK", Some(2020)),
            record("d", "Fintech", "USA", None),
        ]
    }

    #[test]
    fn unfiltered_passes_every_dated_record() {
        let records = sample();
        let index = Dataset::from_records(records.clone()).index;
        let criteria = FilterCriteria::unfiltered(&index);
        // "d" has no year, so NaN-style semantics exclude it.
        assert_eq!(filtered_indices(&records, &criteria), vec![0, 1, 2]);
    }

    #[test]
    fn industry_and_country_clauses_combine() {
        let records = sample();
        let criteria = FilterCriteria {
            industry: Selection::Only("AI".into()),
            country: Selection::Only("UK".into()),
            min_year: 2000,
        };
        assert_eq!(filtered_indices(&records, &criteria), vec![2]);
    }

    #[test]
    fn year_filter_is_lower_bound_only() {
        let records = sample();
        let criteria = FilterCriteria {
            industry: Selection::All,
            country: Selection::All,
            min_year: 2015,
        };
        // 2020 passes: there is intentionally no upper bound.
        assert_eq!(filtered_indices(&records, &criteria), vec![1, 2]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let records = sample();
        let criteria = FilterCriteria {
            industry: Selection::All,
            country: Selection::Only("UK".into()),
            min_year: 2012,
        };
        let once: Vec<StartupRecord> = filtered_indices(&records, &criteria)
            .into_iter()
            .map(|i| records[i].clone())
            .collect();
        let twice: Vec<StartupRecord> = filtered_indices(&once, &criteria)
            .into_iter()
            .map(|i| once[i].clone())
            .collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn raising_min_year_never_grows_the_subset() {
        let records = sample();
        let mut previous = usize::MAX;
        for min_year in 2000..=2025 {
            let criteria = FilterCriteria {
                industry: Selection::All,
                country: Selection::All,
                min_year,
            };
            let n = filtered_indices(&records, &criteria).len();
            assert!(n <= previous, "min_year {min_year} grew the subset");
            previous = n;
        }
    }
}
