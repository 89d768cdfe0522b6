use serde::Serialize;

use crate::data::model::StartupRecord;

use super::aggregate::{GroupField, GroupKey, NumericField, group_by, group_by_pair, mean_opt};

// ---------------------------------------------------------------------------
// Headline metric cards
// ---------------------------------------------------------------------------

/// The four summary cards at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub total: usize,
    pub avg_investment: Option<f64>,
    pub avg_growth: Option<f64>,
    pub avg_valuation: Option<f64>,
}

/// Compute the summary cards over an already-filtered subset.
pub fn summary(records: &[&StartupRecord]) -> SummaryMetrics {
    let count = records.len();
    SummaryMetrics {
        total: count,
        avg_investment: mean_opt(records.iter().map(|r| r.investment), count),
        avg_growth: mean_opt(records.iter().map(|r| r.growth), count),
        avg_valuation: mean_opt(records.iter().map(|r| r.valuation), count),
    }
}

/// Percentage change of `current` against `baseline`:
/// `100 * current / baseline - 100`. Absent when either side is absent
/// or the baseline is zero.
pub fn relative_change(current: Option<f64>, baseline: Option<f64>) -> Option<f64> {
    match (current, baseline) {
        (Some(cur), Some(base)) if base != 0.0 => Some(cur / base * 100.0 - 100.0),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Share-of-total (pie chart)
// ---------------------------------------------------------------------------

/// One pie slice: a group's record count and its share of the filtered
/// total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareSlice {
    pub key: GroupKey,
    pub count: usize,
    pub percentage: f64,
}

/// Per-group share of the filtered set, largest group first (ties keep
/// the grouping order). `None` when the subset is empty: there is no
/// total to take shares of.
pub fn share_of_total(records: &[&StartupRecord], field: GroupField) -> Option<Vec<ShareSlice>> {
    if records.is_empty() {
        return None;
    }
    let total = records.len() as f64;
    let mut slices: Vec<ShareSlice> = group_by(records, field)
        .into_iter()
        .map(|(key, bucket)| ShareSlice {
            key,
            count: bucket.count,
            percentage: bucket.count as f64 / total * 100.0,
        })
        .collect();
    slices.sort_by(|a, b| b.count.cmp(&a.count));
    Some(slices)
}

// ---------------------------------------------------------------------------
// Top-N ranking (bar chart)
// ---------------------------------------------------------------------------

/// Number of bars in the growth-leaders chart.
pub const TOP_GROWTH_N: usize = 10;

/// The `n` fastest-growing startups, descending by growth rate. The sort
/// is stable, so ties keep their filtered-input order; records without a
/// growth rate rank below every valued one.
pub fn top_by_growth<'a>(records: &[&'a StartupRecord], n: usize) -> Vec<&'a StartupRecord> {
    let mut ranked = records.to_vec();
    ranked.sort_by(|a, b| {
        let ga = a.growth.unwrap_or(f64::NEG_INFINITY);
        let gb = b.growth.unwrap_or(f64::NEG_INFINITY);
        gb.total_cmp(&ga)
    });
    ranked.truncate(n);
    ranked
}

// ---------------------------------------------------------------------------
// Time-series rollup (line chart)
// ---------------------------------------------------------------------------

/// One point of the investment-over-time line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearPoint {
    /// `None` collects every record without a parseable founding year.
    pub year: Option<i32>,
    pub count: usize,
    pub total_investment: Option<f64>,
    pub avg_valuation: Option<f64>,
}

/// Per-year totals and means, ascending by year with the yearless bucket
/// first.
pub fn yearly_rollup(records: &[&StartupRecord]) -> Vec<YearPoint> {
    group_by(records, GroupField::Year)
        .into_iter()
        .map(|(key, bucket)| YearPoint {
            year: match key {
                GroupKey::Year(year) => year,
                GroupKey::Label(_) => None,
            },
            count: bucket.count,
            total_investment: bucket.total_investment,
            avg_valuation: bucket.avg_valuation,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Bubble chart: industry × country
// ---------------------------------------------------------------------------

/// One bubble: an (industry, country) cell of the two-level aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubblePoint {
    pub industry: String,
    pub country: String,
    pub count: usize,
    pub total_investment: Option<f64>,
    pub avg_growth: Option<f64>,
}

/// Flatten the industry × country aggregation into chart-ready bubbles.
pub fn bubble_points(records: &[&StartupRecord]) -> Vec<BubblePoint> {
    group_by_pair(records, GroupField::Industry, GroupField::Country)
        .into_iter()
        .flat_map(|(industry, countries)| {
            countries.into_iter().map(move |(country, bucket)| BubblePoint {
                industry: industry.to_string(),
                country: country.to_string(),
                count: bucket.count,
                total_investment: bucket.total_investment,
                avg_growth: bucket.avg_growth,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Linear regression (scatter plot)
// ---------------------------------------------------------------------------

/// Minimum number of complete (x, y) pairs before a line is fit.
pub const MIN_REGRESSION_POINTS: usize = 3;

/// Outcome of an ordinary-least-squares fit over the filtered subset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Regression {
    /// Fewer than [`MIN_REGRESSION_POINTS`] records carry both values.
    InsufficientData,
    /// The x values have zero variance; no slope exists.
    Undefined,
    Fit(RegressionFit),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination. 1.0 when the y values have zero
    /// variance (the fit is exact).
    pub r_squared: f64,
    /// Number of complete pairs the line was fit over.
    pub points: usize,
}

/// Fit `y = slope * x + intercept` over every record carrying both
/// values. Degenerate inputs return a marker instead of a malformed
/// line; nothing here can divide by zero or panic.
pub fn linear_regression(
    records: &[&StartupRecord],
    x: NumericField,
    y: NumericField,
) -> Regression {
    let pairs: Vec<(f64, f64)> = records
        .iter()
        .filter_map(|rec| Some((x.value(rec)?, y.value(rec)?)))
        .collect();

    if pairs.len() < MIN_REGRESSION_POINTS {
        return Regression::InsufficientData;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|&(px, _)| px).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|&(_, py)| py).sum::<f64>() / n;

    let mut ss_xx = 0.0;
    let mut ss_xy = 0.0;
    let mut ss_yy = 0.0;
    for &(px, py) in &pairs {
        let dx = px - mean_x;
        let dy = py - mean_y;
        ss_xx += dx * dx;
        ss_xy += dx * dy;
        ss_yy += dy * dy;
    }

    if ss_xx == 0.0 {
        return Regression::Undefined;
    }

    let slope = ss_xy / ss_xx;
    let intercept = mean_y - slope * mean_x;
    let ss_res = ss_yy - slope * ss_xy;
    let r_squared = if ss_yy == 0.0 { 1.0 } else { 1.0 - ss_res / ss_yy };

    Regression::Fit(RegressionFit {
        slope,
        intercept,
        r_squared,
        points: pairs.len(),
    })
}
