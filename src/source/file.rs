use log::{info, warn};
use reqwest::StatusCode;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::{FetchError, KolSource};
use crate::common::{format_elapsed, KolRecord, OverviewStats};
use crate::stats::summarize;

/// Only the first few invalid entries are logged individually
const MAX_LOGGED_FAILURES: usize = 5;

/// Outcome of loading a roster file
#[derive(Debug, Clone, Default)]
pub struct RosterLoad {
    pub records: Vec<KolRecord>,
    pub skipped: usize,
}

/// Parse a JSON roster (an array of KOL objects).
///
/// Entries that do not decode, or whose name is blank, are skipped and
/// counted. A document that is not an array is rejected outright.
pub fn parse_roster(path: &str, content: &str) -> Result<RosterLoad, FetchError> {
    let raw: Value = serde_json::from_str(content).map_err(|e| FetchError::InvalidRoster {
        path: path.to_string(),
        reason: format!("error decoding JSON: {}", e),
    })?;

    let Value::Array(items) = raw else {
        return Err(FetchError::InvalidRoster {
            path: path.to_string(),
            reason: "JSON data must be a list of KOL objects".to_string(),
        });
    };

    let mut load = RosterLoad {
        records: Vec::with_capacity(items.len()),
        skipped: 0,
    };

    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<KolRecord>(item) {
            Ok(record) if record.name.trim().is_empty() => {
                if load.skipped < MAX_LOGGED_FAILURES {
                    warn!("Skipping item {}: name must not be empty", index);
                }
                load.skipped += 1;
            }
            Ok(record) => load.records.push(record),
            Err(e) => {
                if load.skipped < MAX_LOGGED_FAILURES {
                    warn!("Skipping item {}: {}", index, e);
                }
                load.skipped += 1;
            }
        }
    }

    Ok(load)
}

/// Read and parse a roster file from disk
pub fn load_kol_data<P: AsRef<Path>>(path: P) -> Result<RosterLoad, FetchError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    info!("Loading KOL roster from: {}", display);
    let start = Instant::now();

    let content = fs::read_to_string(path).map_err(|source| FetchError::Io {
        path: display.clone(),
        source,
    })?;
    let load = parse_roster(&display, &content)?;

    info!(
        "Loaded {} KOL records in {}",
        load.records.len(),
        format_elapsed(start.elapsed())
    );
    if load.skipped > 0 {
        warn!("Skipped {} invalid roster entries", load.skipped);
    }

    Ok(load)
}

/// KOL data source backed by a local JSON roster file, re-read on every fetch
#[derive(Debug, Clone)]
pub struct RosterFileSource {
    path: PathBuf,
}

impl RosterFileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl KolSource for RosterFileSource {
    async fn fetch_kols(&self) -> Result<Vec<KolRecord>, FetchError> {
        Ok(load_kol_data(&self.path)?.records)
    }

    async fn fetch_stats(&self) -> Result<OverviewStats, FetchError> {
        let load = load_kol_data(&self.path)?;
        Ok(summarize(&load.records))
    }

    async fn fetch_kol(&self, id: &str) -> Result<KolRecord, FetchError> {
        load_kol_data(&self.path)?
            .records
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| FetchError::Status {
                status: StatusCode::NOT_FOUND,
                detail: format!("KOL with id '{}' not found", id),
            })
    }
}
