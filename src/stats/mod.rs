//! Per-region statistics as served by the disease.sh API, and the table the
//! selection store keeps them in.

mod client;
mod dispatch;

pub use client::{HttpStatsSource, StatsSource};
pub use dispatch::FetchDispatcher;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::catalog::{self, RegionId};
use crate::severity::{classify, Severity};

/// One region's statistics. Every figure is optional: the upstream API
/// omits or nulls fields for some regions.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionStats {
    #[serde(rename = "state")]
    pub region_label: String,
    /// Milliseconds since the Unix epoch
    pub updated: Option<i64>,
    #[serde(default, deserialize_with = "count")]
    pub cases: Option<u64>,
    #[serde(default, deserialize_with = "count")]
    pub today_cases: Option<u64>,
    #[serde(default, deserialize_with = "count")]
    pub deaths: Option<u64>,
    #[serde(default, deserialize_with = "count")]
    pub today_deaths: Option<u64>,
    #[serde(default, deserialize_with = "count")]
    pub recovered: Option<u64>,
    #[serde(default, deserialize_with = "count")]
    pub active: Option<u64>,
    pub cases_per_one_million: Option<f64>,
    pub deaths_per_one_million: Option<f64>,
    #[serde(default, deserialize_with = "count")]
    pub tests: Option<u64>,
    pub tests_per_one_million: Option<f64>,
    #[serde(default, deserialize_with = "count")]
    pub population: Option<u64>,
}

/// Counts arrive negative when upstream corrects earlier reports; clamp to zero
fn count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.map(|n| n.max(0) as u64))
}

/// Entry of the all-regions list
pub type RegionStatSummary = RegionStats;
/// Statistics of the selected region
pub type RegionStatDetail = RegionStats;

impl RegionStats {
    pub fn severity(&self) -> Severity {
        classify(self.today_deaths)
    }

    /// Catalog region this entry belongs to, joined by label
    pub fn region_id(&self) -> Option<RegionId> {
        catalog::by_label(&self.region_label).map(|r| r.id)
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated.and_then(DateTime::from_timestamp_millis)
    }
}

/// Ordered summary list plus an index by region id.
/// Entries that do not resolve to a catalog region stay listed but unindexed.
#[derive(Debug, Clone, Default)]
pub struct StatsTable {
    entries: Vec<RegionStatSummary>,
    by_region: HashMap<RegionId, usize>,
}

impl StatsTable {
    pub fn new(entries: Vec<RegionStatSummary>) -> Self {
        let mut by_region = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            if let Some(id) = entry.region_id() {
                by_region.entry(id).or_insert(idx);
            }
        }
        Self { entries, by_region }
    }

    pub fn get(&self, id: RegionId) -> Option<&RegionStatSummary> {
        self.by_region.get(&id).map(|&idx| &self.entries[idx])
    }

    /// Tier of a region; `NoData` when it has no entry
    pub fn severity(&self, id: RegionId) -> Severity {
        self.get(id)
            .map(RegionStats::severity)
            .unwrap_or(Severity::NoData)
    }

    pub fn entries(&self) -> &[RegionStatSummary] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries that joined to a catalog region
    pub fn indexed_len(&self) -> usize {
        self.by_region.len()
    }
}

/// Decode a JSON body in place
pub(crate) fn decode<T: for<'de> Deserialize<'de>>(body: &mut [u8]) -> Result<T, simd_json::Error> {
    simd_json::serde::from_slice(body)
}
