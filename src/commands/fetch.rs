use anyhow::{bail, Context, Result};
use futures::future;
use log::{debug, info};
use std::time::{Duration, Instant};

use kol_analytics::common::{create_spinner, emit_json, format_elapsed, setup_logging};
use kol_analytics::source::HttpKolSource;
use kol_analytics::store::KolStore;

use super::StatsReport;
use crate::cli::FetchArgs;

pub async fn run_fetch_async(args: FetchArgs) -> Result<StatsReport> {
    let start_time = Instant::now();

    setup_logging(&args.log_level)?;

    info!("Fetching KOL roster");
    info!("Base URL: {}", args.base_url);
    info!("Timeout: {}s", args.timeout);

    let source = HttpKolSource::new(&args.base_url, Duration::from_secs(args.timeout))
        .context("Failed to create HTTP client")?;

    let store = KolStore::new();
    store.update_filters(args.filters.to_update());

    let spinner = create_spinner("Fetching KOLs...");
    let outcome = if args.server_stats {
        let (outcome, _) = future::join(store.fetch(&source), store.refetch_stats(&source)).await;
        outcome
    } else {
        store.fetch(&source).await
    };
    debug!("Records fetch outcome: {:?}", outcome);
    spinner.finish_and_clear();

    let snapshot = store.snapshot();
    let error = snapshot.error.clone();
    let report = StatsReport::from_snapshot(snapshot, args.include_records);

    emit_json(&report, args.output.as_deref())?;

    if let Some(error) = error {
        bail!(error);
    }

    info!(
        "{} of {} records match the filters",
        report.filtered_count, report.total_records
    );
    info!("Done in {}", format_elapsed(start_time.elapsed()));

    Ok(report)
}

pub fn run_fetch(args: FetchArgs) -> Result<StatsReport> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_fetch_async(args))
}
