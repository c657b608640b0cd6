use serde::Serialize;
use std::sync::Arc;

use crate::common::{KolRecord, OverviewStats};
use crate::filter::FilterCriteria;

/// Loading status of the store's records fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Consistent view of the store for presentation consumers
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub records: Arc<Vec<KolRecord>>,
    pub filtered_records: Arc<Vec<KolRecord>>,
    pub stats: Arc<OverviewStats>,
    pub server_stats: Option<Arc<OverviewStats>>,
    pub filters: FilterCriteria,
    pub is_loading: bool,
    pub error: Option<String>,
    pub status: LoadStatus,
    pub revision: u64,
}
