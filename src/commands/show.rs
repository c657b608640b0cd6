use anyhow::{Context, Result};
use log::info;
use std::time::Duration;

use kol_analytics::common::{emit_json, setup_logging, KolRecord};
use kol_analytics::source::{HttpKolSource, KolSource, RosterFileSource};

use crate::cli::ShowArgs;

async fn lookup<S: KolSource>(source: &S, id: &str) -> Result<KolRecord> {
    source
        .fetch_kol(id)
        .await
        .with_context(|| format!("Failed to fetch KOL '{}'", id))
}

pub async fn run_show_async(args: ShowArgs) -> Result<KolRecord> {
    setup_logging(&args.log_level)?;

    let record = match &args.input {
        Some(path) => {
            info!("Looking up KOL {} in roster: {}", args.id, path);
            lookup(&RosterFileSource::new(path), &args.id).await?
        }
        None => {
            info!("Looking up KOL {} at: {}", args.id, args.base_url);
            let source = HttpKolSource::new(&args.base_url, Duration::from_secs(args.timeout))
                .context("Failed to create HTTP client")?;
            lookup(&source, &args.id).await?
        }
    };

    emit_json(&record, args.output.as_deref())?;
    Ok(record)
}

pub fn run_show(args: ShowArgs) -> Result<KolRecord> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_show_async(args))
}
