use anyhow::{Context, Result};
use log::info;
use std::time::Instant;

use kol_analytics::common::{emit_json, format_elapsed, setup_logging};
use kol_analytics::source::load_kol_data;
use kol_analytics::store::KolStore;

use super::StatsReport;
use crate::cli::SummarizeArgs;

pub fn run_summarize(args: SummarizeArgs) -> Result<StatsReport> {
    let start_time = Instant::now();

    setup_logging(&args.log_level)?;

    info!("Summarizing KOL roster");
    info!("Input: {}", args.input);

    let roster = load_kol_data(&args.input)
        .with_context(|| format!("Failed to load roster: {}", args.input))?;

    let store = KolStore::with_records(roster.records);
    store.update_filters(args.filters.to_update());

    let report = StatsReport::from_snapshot(store.snapshot(), args.include_records);

    info!(
        "{} of {} records match the filters ({} skipped as invalid)",
        report.filtered_count, report.total_records, roster.skipped
    );

    emit_json(&report, args.output.as_deref())?;

    info!("Done in {}", format_elapsed(start_time.elapsed()));
    Ok(report)
}
