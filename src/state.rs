use std::path::Path;

use serde::Serialize;

use crate::analytics::aggregate::{GroupField, NumericField};
use crate::analytics::derive::{
    BubblePoint, Regression, ShareSlice, SummaryMetrics, TOP_GROWTH_N, YearPoint, bubble_points,
    linear_regression, relative_change, share_of_total, summary, top_by_growth, yearly_rollup,
};
use crate::data::filter::{FilterCriteria, Selection, filtered_indices};
use crate::data::model::{Dataset, FALLBACK_YEAR_RANGE, StartupRecord};

// ---------------------------------------------------------------------------
// Control state
// ---------------------------------------------------------------------------

/// Which series the line chart plots; a single button toggles between
/// the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineMetric {
    TotalInvestment,
    AvgValuation,
}

impl LineMetric {
    /// The plotted value of one time-series point under this metric.
    pub fn of(&self, point: &YearPoint) -> Option<f64> {
        match self {
            LineMetric::TotalInvestment => point.total_investment,
            LineMetric::AvgValuation => point.avg_valuation,
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// The full dashboard session state, independent of any rendering.
///
/// The dataset is written exactly once, when the load resolves; until
/// then every view accessor returns `None` and control changes are
/// inert. Each control change re-runs the filter and every chart
/// recomputes from the full filtered subset on demand.
pub struct DashboardState {
    /// Loaded dataset (`None` until the load resolves).
    pub dataset: Option<Dataset>,

    /// Current filter-control values.
    pub criteria: FilterCriteria,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Scatter-plot axis selections.
    pub x_field: NumericField,
    pub y_field: NumericField,

    /// Line-chart series toggle.
    pub line_metric: LineMetric,

    /// Diagnostic from a failed load, for display. A failed load is
    /// terminal: the dashboard stays empty and there is no retry path.
    pub status_message: Option<String>,
}

impl Default for DashboardState {
    fn default() -> Self {
        DashboardState {
            dataset: None,
            criteria: FilterCriteria {
                industry: Selection::All,
                country: Selection::All,
                min_year: FALLBACK_YEAR_RANGE.0,
            },
            visible_indices: Vec::new(),
            x_field: NumericField::FundingRounds,
            y_field: NumericField::Growth,
            line_metric: LineMetric::TotalInvestment,
            status_message: None,
        }
    }
}

impl DashboardState {
    /// Load the dataset from disk. On failure, log and record the
    /// diagnostic; the dashboard remains empty.
    pub fn load_from_path(&mut self, path: &Path) {
        match crate::data::loader::load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} startups across {} industries and {} countries",
                    dataset.len(),
                    dataset.index.industries.len(),
                    dataset.index.countries.len()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load dataset: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded dataset and reset the controls to their
    /// defaults (everything visible).
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.criteria = FilterCriteria::unfiltered(&dataset.index);
        self.visible_indices = (0..dataset.len()).collect();
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(&ds.records, &self.criteria);
        }
    }

    /// Set the industry dropdown.
    pub fn set_industry(&mut self, selection: Selection) {
        self.criteria.industry = selection;
        self.refilter();
    }

    /// Set the country dropdown.
    pub fn set_country(&mut self, selection: Selection) {
        self.criteria.country = selection;
        self.refilter();
    }

    /// Set the minimum founding year. The range control narrows from the
    /// bottom only; there is no upper bound.
    pub fn set_min_year(&mut self, min_year: i32) {
        self.criteria.min_year = min_year;
        self.refilter();
    }

    /// Restore the default criteria.
    pub fn reset_filters(&mut self) {
        if let Some(ds) = &self.dataset {
            self.criteria = FilterCriteria::unfiltered(&ds.index);
        }
        self.refilter();
    }

    /// Select the scatter-plot axes.
    pub fn set_axes(&mut self, x_field: NumericField, y_field: NumericField) {
        self.x_field = x_field;
        self.y_field = y_field;
    }

    /// Flip the line chart between total investment and mean valuation.
    pub fn toggle_line_metric(&mut self) {
        self.line_metric = match self.line_metric {
            LineMetric::TotalInvestment => LineMetric::AvgValuation,
            LineMetric::AvgValuation => LineMetric::TotalInvestment,
        };
    }

    /// The records passing the current filters, in source order.
    pub fn filtered(&self) -> Vec<&StartupRecord> {
        match &self.dataset {
            Some(ds) => ds.select(&self.visible_indices),
            None => Vec::new(),
        }
    }

    /// Recompute the complete chart-ready snapshot. `None` until a
    /// dataset has loaded.
    pub fn view(&self) -> Option<DashboardView<'_>> {
        let dataset = self.dataset.as_ref()?;
        let filtered = dataset.select(&self.visible_indices);
        let baseline_refs: Vec<&StartupRecord> = dataset.records.iter().collect();

        let current = summary(&filtered);
        let baseline = summary(&baseline_refs);
        let changes = SummaryChanges {
            total: relative_change(
                Some(current.total as f64),
                Some(baseline.total as f64),
            ),
            avg_investment: relative_change(current.avg_investment, baseline.avg_investment),
            avg_growth: relative_change(current.avg_growth, baseline.avg_growth),
            avg_valuation: relative_change(current.avg_valuation, baseline.avg_valuation),
        };

        Some(DashboardView {
            summary: current,
            changes,
            bubbles: bubble_points(&filtered),
            industry_shares: share_of_total(&filtered, GroupField::Industry),
            top_growth: top_by_growth(&filtered, TOP_GROWTH_N),
            timeline: yearly_rollup(&filtered),
            regression: linear_regression(&filtered, self.x_field, self.y_field),
            line_metric: self.line_metric,
        })
    }
}

// ---------------------------------------------------------------------------
// Chart-ready snapshot
// ---------------------------------------------------------------------------

/// Relative change of each summary card versus the unfiltered dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryChanges {
    pub total: Option<f64>,
    pub avg_investment: Option<f64>,
    pub avg_growth: Option<f64>,
    pub avg_valuation: Option<f64>,
}

/// Everything the chart renderers consume, recomputed in full on every
/// control change. The renderers never feed state back except through
/// the control setters on [`DashboardState`].
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView<'a> {
    pub summary: SummaryMetrics,
    pub changes: SummaryChanges,
    pub bubbles: Vec<BubblePoint>,
    pub industry_shares: Option<Vec<ShareSlice>>,
    pub top_growth: Vec<&'a StartupRecord>,
    pub timeline: Vec<YearPoint>,
    pub regression: Regression,
    pub line_metric: LineMetric,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_csv_reader;

    const SAMPLE: &str = "\
Startup Name,Industry,Funding Rounds,Investment Amount (USD),Valuation (USD),Number of Investors,Country,Year Founded,Growth Rate (%)
Startup_1,AI,2,1000000,5000000,4,USA,2010,50
Startup_2,Fintech,3,2000000,8000000,6,UK,2015,30
Startup_3,AI,1,500000,1000000,2,USA,2020,70
Startup_4,Biotech,4,4000000,20000000,8,India,2018,20";

    fn loaded_state() -> DashboardState {
        let mut state = DashboardState::default();
        let dataset = load_csv_reader(SAMPLE.as_bytes()).expect("sample parses");
        state.set_dataset(dataset);
        state
    }

    #[test]
    fn state_is_inert_before_load() {
        let mut state = DashboardState::default();
        assert!(state.view().is_none());
        assert!(state.filtered().is_empty());
        state.set_min_year(2015);
        assert!(state.visible_indices.is_empty());
    }

    #[test]
    fn loading_resets_criteria_to_dataset_defaults() {
        let state = loaded_state();
        assert_eq!(state.criteria.industry, Selection::All);
        assert_eq!(state.criteria.min_year, 2010);
        assert_eq!(state.visible_indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn control_changes_recompute_the_subset() {
        let mut state = loaded_state();
        state.set_industry(Selection::Only("AI".into()));
        assert_eq!(state.visible_indices, vec![0, 2]);

        state.set_min_year(2015);
        assert_eq!(state.visible_indices, vec![2]);

        state.reset_filters();
        assert_eq!(state.visible_indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn view_recomputes_every_chart() {
        let mut state = loaded_state();
        state.set_industry(Selection::Only("AI".into()));
        let view = state.view().expect("dataset loaded");

        assert_eq!(view.summary.total, 2);
        assert_eq!(view.summary.avg_growth, Some(60.0));
        let shares = view.industry_shares.expect("non-empty subset");
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].percentage, 100.0);
        assert_eq!(view.top_growth[0].name, "Startup_3");
        assert_eq!(view.timeline.len(), 2);
        // Two AI records leave the regression short of its 3-point floor.
        assert_eq!(view.regression, Regression::InsufficientData);
    }

    #[test]
    fn empty_subset_yields_no_data_markers() {
        let mut state = loaded_state();
        state.set_min_year(2030);
        let view = state.view().expect("dataset loaded");
        assert_eq!(view.summary.total, 0);
        assert_eq!(view.industry_shares, None);
        assert!(view.bubbles.is_empty());
        assert!(view.top_growth.is_empty());
    }

    #[test]
    fn failed_load_is_terminal_and_recorded() {
        let mut state = DashboardState::default();
        state.load_from_path(Path::new("does-not-exist.csv"));
        assert!(state.dataset.is_none());
        assert!(state.status_message.is_some());
        assert!(state.view().is_none());
    }

    #[test]
    fn line_metric_toggles_between_the_two_series() {
        let mut state = loaded_state();
        assert_eq!(state.line_metric, LineMetric::TotalInvestment);
        state.toggle_line_metric();
        assert_eq!(state.line_metric, LineMetric::AvgValuation);

        let view = state.view().expect("dataset loaded");
        let first = &view.timeline[0];
        assert_eq!(view.line_metric.of(first), first.avg_valuation);
    }
}
