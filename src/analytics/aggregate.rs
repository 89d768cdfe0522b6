use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::data::model::StartupRecord;

// ---------------------------------------------------------------------------
// Key selectors: the closed set of fields charts may group or plot by
// ---------------------------------------------------------------------------

/// Fields the dashboard groups records by. Using an enum instead of raw
/// column-name strings means an invalid grouping key cannot be
/// constructed at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupField {
    Industry,
    Country,
    Year,
}

impl GroupField {
    /// The grouping key of one record under this field.
    pub fn key(&self, rec: &StartupRecord) -> GroupKey {
        match self {
            GroupField::Industry => GroupKey::Label(rec.industry.clone()),
            GroupField::Country => GroupKey::Label(rec.country.clone()),
            GroupField::Year => GroupKey::Year(rec.year),
        }
    }
}

/// Numeric fields a scatter-plot axis may select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NumericField {
    FundingRounds,
    Investment,
    Investors,
    Growth,
    Valuation,
}

impl NumericField {
    /// Every selectable axis, in control-display order.
    pub const ALL: [NumericField; 5] = [
        NumericField::FundingRounds,
        NumericField::Investment,
        NumericField::Investors,
        NumericField::Growth,
        NumericField::Valuation,
    ];

    /// Typed accessor for this field's value on a record.
    pub fn value(&self, rec: &StartupRecord) -> Option<f64> {
        match self {
            NumericField::FundingRounds => rec.funding_rounds.map(f64::from),
            NumericField::Investment => rec.investment,
            NumericField::Investors => rec.investors.map(f64::from),
            NumericField::Growth => rec.growth,
            NumericField::Valuation => rec.valuation,
        }
    }

    /// Human-readable label, matching the source column names.
    pub fn label(&self) -> &'static str {
        match self {
            NumericField::FundingRounds => "Funding Rounds",
            NumericField::Investment => "Investment Amount (USD)",
            NumericField::Investors => "Number of Investors",
            NumericField::Growth => "Growth Rate (%)",
            NumericField::Valuation => "Valuation (USD)",
        }
    }
}

/// The value of a grouping key for one bucket. All records without a
/// parseable year share the single `Year(None)` key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum GroupKey {
    Label(String),
    Year(Option<i32>),
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Label(s) => write!(f, "{s}"),
            GroupKey::Year(Some(y)) => write!(f, "{y}"),
            GroupKey::Year(None) => write!(f, "N/A"),
        }
    }
}

// ---------------------------------------------------------------------------
// Buckets
// ---------------------------------------------------------------------------

/// Aggregate statistics and the member list for one distinct key value.
///
/// A statistic is `None` as soon as any member is missing the underlying
/// value, so an absent cell stays distinguishable from zero all the way
/// to the rendered "N/A".
#[derive(Debug, Clone, Serialize)]
pub struct Bucket<'a> {
    pub count: usize,
    pub total_investment: Option<f64>,
    pub avg_growth: Option<f64>,
    pub avg_valuation: Option<f64>,
    /// Members in filtered-input order.
    pub members: Vec<&'a StartupRecord>,
}

impl<'a> Bucket<'a> {
    fn from_members(members: Vec<&'a StartupRecord>) -> Self {
        let count = members.len();
        Bucket {
            count,
            total_investment: sum_opt(members.iter().map(|r| r.investment)),
            avg_growth: mean_opt(members.iter().map(|r| r.growth), count),
            avg_valuation: mean_opt(members.iter().map(|r| r.valuation), count),
            members,
        }
    }
}

/// Sum that goes absent if any term is absent.
pub fn sum_opt(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    values.sum()
}

/// Arithmetic mean with the same poisoning rule; `None` for an empty
/// sequence (buckets are never empty by construction, but callers over
/// arbitrary subsets may be).
pub fn mean_opt(values: impl Iterator<Item = Option<f64>>, count: usize) -> Option<f64> {
    if count == 0 {
        return None;
    }
    sum_opt(values).map(|total| total / count as f64)
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Group records by a single field. Exact-match grouping; the buckets
/// partition the input. No particular output ordering is promised beyond
/// the map's own; chart-specific ordering belongs to the derived
/// calculators.
pub fn group_by<'a>(
    records: &[&'a StartupRecord],
    field: GroupField,
) -> BTreeMap<GroupKey, Bucket<'a>> {
    let mut groups: BTreeMap<GroupKey, Vec<&StartupRecord>> = BTreeMap::new();
    for rec in records {
        groups.entry(field.key(rec)).or_default().push(rec);
    }
    groups
        .into_iter()
        .map(|(key, members)| (key, Bucket::from_members(members)))
        .collect()
}

/// Two-level grouping: outer key → inner key → bucket. Used by the
/// bubble chart (industry × country) and the map (country × industry).
pub fn group_by_pair<'a>(
    records: &[&'a StartupRecord],
    outer: GroupField,
    inner: GroupField,
) -> BTreeMap<GroupKey, BTreeMap<GroupKey, Bucket<'a>>> {
    let mut groups: BTreeMap<GroupKey, Vec<&StartupRecord>> = BTreeMap::new();
    for rec in records {
        groups.entry(outer.key(rec)).or_default().push(rec);
    }
    groups
        .into_iter()
        .map(|(key, members)| (key, group_by(&members, inner)))
        .collect()
}
