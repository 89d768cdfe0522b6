/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  startup_growth_investment_data.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + normalize rows → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<StartupRecord> + distinct-value index
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply FilterCriteria → ordered index subset
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
