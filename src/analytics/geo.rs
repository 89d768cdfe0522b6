use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value as JsonValue;

use crate::data::model::StartupRecord;

// ---------------------------------------------------------------------------
// Country-name canonicalization
// ---------------------------------------------------------------------------

/// Stand-in country for records whose country cell is empty.
pub const UNKNOWN_COUNTRY: &str = "Unknown Country";

/// Map a source country name onto the canonical gazetteer name used by
/// the world-countries boundary file.
///
/// The alias table is fixed and small. Unmapped names pass
/// through unchanged; if the boundary file spells such a name
/// differently, the country silently gets no geometry and its startups
/// fall back to a default position at render time.
pub fn canonical_country_name(name: &str) -> &str {
    match name {
        "" => UNKNOWN_COUNTRY,
        "USA" | "United States" => "United States of America",
        "UK" => "United Kingdom",
        "Russia" => "Russian Federation",
        "South Korea" => "Korea, Republic of",
        "Iran" => "Iran, Islamic Republic of",
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Rollups feeding the map
// ---------------------------------------------------------------------------

/// Startup count per canonical country (the choropleth density layer).
pub fn startups_by_country(records: &[&StartupRecord]) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for rec in records {
        *counts
            .entry(canonical_country_name(&rec.country).to_string())
            .or_insert(0) += 1;
    }
    counts
}

/// Canonical country → industry → member list, in input order. Feeds the
/// per-country bubble placement.
pub fn geographic_rollup<'a>(
    records: &[&'a StartupRecord],
) -> BTreeMap<String, BTreeMap<String, Vec<&'a StartupRecord>>> {
    let mut rollup: BTreeMap<String, BTreeMap<String, Vec<&StartupRecord>>> = BTreeMap::new();
    for rec in records {
        rollup
            .entry(canonical_country_name(&rec.country).to_string())
            .or_default()
            .entry(rec.industry.clone())
            .or_default()
            .push(rec);
    }
    rollup
}

// ---------------------------------------------------------------------------
// World atlas: which canonical names have geometry at all
// ---------------------------------------------------------------------------

/// The set of country names present in the world-countries boundary
/// file. Placement itself is the renderer's job; the pipeline only needs
/// to know which canonical names will match a geometry.
#[derive(Debug, Clone)]
pub struct WorldAtlas {
    names: BTreeSet<String>,
}

impl WorldAtlas {
    /// Load a TopoJSON world-countries file and extract the geometry
    /// names.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).context("reading world atlas")?;
        let doc: JsonValue = serde_json::from_str(&text).context("parsing world atlas JSON")?;
        Self::from_topojson(&doc)
    }

    /// Extract `objects.countries.geometries[].properties.name`.
    pub fn from_topojson(doc: &JsonValue) -> Result<Self> {
        let geometries = doc["objects"]["countries"]["geometries"]
            .as_array()
            .context("TopoJSON missing objects.countries.geometries")?;

        let names = geometries
            .iter()
            .filter_map(|g| g["properties"]["name"].as_str())
            .map(str::to_string)
            .collect();

        Ok(WorldAtlas { names })
    }

    /// Whether a canonical country name has a geometry.
    pub fn contains(&self, canonical_name: &str) -> bool {
        self.names.contains(canonical_name)
    }

    /// Number of named geometries.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the atlas is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(name: &str, industry: &str, country: &str) -> StartupRecord {
        StartupRecord {
            name: name.to_string(),
            industry: industry.to_string(),
            country: country.to_string(),
            year: Some(2015),
            funding_rounds: Some(2),
            investors: Some(5),
            investment: Some(1e6),
            valuation: Some(4e6),
            growth: Some(10.0),
            investment_per_round: Some(5e5),
        }
    }

    #[test]
    fn aliases_map_to_gazetteer_names() {
        assert_eq!(canonical_country_name("USA"), "United States of America");
        assert_eq!(canonical_country_name("United States"), "United States of America");
        assert_eq!(canonical_country_name("UK"), "United Kingdom");
        assert_eq!(canonical_country_name("South Korea"), "Korea, Republic of");
        assert_eq!(canonical_country_name("Russia"), "Russian Federation");
        assert_eq!(canonical_country_name("Iran"), "Iran, Islamic Republic of");
    }

    #[test]
    fn unmapped_names_pass_through_unchanged() {
        assert_eq!(canonical_country_name("Singapore"), "Singapore");
        assert_eq!(canonical_country_name("Deutschland"), "Deutschland");
        assert_eq!(canonical_country_name(""), UNKNOWN_COUNTRY);
    }

    #[test]
    fn density_counts_merge_aliases() {
        let records = vec![
            record("a", "AI", "USA"),
            record("b", "Fintech", "United States"),
            record("c", "AI", "UK"),
        ];
        let refs: Vec<&StartupRecord> = records.iter().collect();
        let counts = startups_by_country(&refs);
        assert_eq!(counts["United States of America"], 2);
        assert_eq!(counts["United Kingdom"], 1);
    }

    #[test]
    fn rollup_groups_country_then_industry() {
        let records = vec![
            record("a", "AI", "USA"),
            record("b", "Fintech", "USA"),
            record("c", "AI", "USA"),
            record("d", "AI", ""),
        ];
        let refs: Vec<&StartupRecord> = records.iter().collect();
        let rollup = geographic_rollup(&refs);

        let usa = &rollup["United States of America"];
        assert_eq!(usa["AI"].len(), 2);
        assert_eq!(usa["Fintech"].len(), 1);
        assert_eq!(usa["AI"][0].name, "a");
        assert!(rollup.contains_key(UNKNOWN_COUNTRY));
    }

    #[test]
    fn atlas_reads_geometry_names() {
        let doc = json!({
            "type": "Topology",
            "objects": {
                "countries": {
                    "geometries": [
                        { "properties": { "name": "United States of America" } },
                        { "properties": { "name": "Singapore" } }
                    ]
                }
            }
        });
        let atlas = WorldAtlas::from_topojson(&doc).expect("valid topology");
        assert_eq!(atlas.len(), 2);
        assert!(atlas.contains("United States of America"));
        // An unmapped source spelling simply fails to match.
        assert!(!atlas.contains("USA"));
    }

    #[test]
    fn malformed_topology_is_a_load_failure() {
        let doc = json!({ "objects": {} });
        assert!(WorldAtlas::from_topojson(&doc).is_err());
    }
}
