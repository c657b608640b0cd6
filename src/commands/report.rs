use serde::Serialize;
use std::sync::Arc;

use kol_analytics::common::{KolRecord, OverviewStats};
use kol_analytics::filter::FilterCriteria;
use kol_analytics::store::StoreSnapshot;

/// JSON document written by the summarizing commands
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub filters: FilterCriteria,
    pub total_records: usize,
    pub filtered_count: usize,
    pub stats: Arc<OverviewStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_stats: Option<Arc<OverviewStats>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filtered_records: Option<Arc<Vec<KolRecord>>>,
}

impl StatsReport {
    pub fn from_snapshot(snapshot: StoreSnapshot, include_records: bool) -> Self {
        Self {
            total_records: snapshot.records.len(),
            filtered_count: snapshot.filtered_records.len(),
            filters: snapshot.filters,
            stats: snapshot.stats,
            server_stats: snapshot.server_stats,
            error: snapshot.error,
            filtered_records: include_records.then_some(snapshot.filtered_records),
        }
    }
}
