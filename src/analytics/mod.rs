/// Analytics layer: grouping and chart-ready derivations.
///
/// Everything here is a pure function over an already-filtered record
/// subset; each filter change recomputes all of it from scratch. The
/// aggregation engine does the grouping, `derive` turns buckets into
/// per-chart structures, and `geo` handles the map's country rollups.

pub mod aggregate;
pub mod derive;
pub mod geo;
