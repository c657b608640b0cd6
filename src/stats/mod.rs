//! Aggregation of KOL records into overview statistics.
//!
//! [`summarize`] is a pure, total function: any finite collection, the empty
//! one included, produces an [`OverviewStats`]. Distributions are ordered by
//! count descending; equal counts are ordered by name ascending (byte-wise),
//! which also decides which countries survive the top-10 cut.

pub mod rounding;

pub use rounding::round2_ratio;

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::common::{CountryStat, ExpertiseStat, KolRecord, OverviewStats};

/// Maximum number of entries kept in `top_countries`
pub const TOP_COUNTRIES_LIMIT: usize = 10;

#[derive(Debug, Default)]
struct AreaTotals {
    count: usize,
    h_index_sum: u64,
    publications_sum: u64,
}

/// Summarize a collection of records.
///
/// Records duplicated by id are counted once per occurrence.
pub fn summarize<'a, I>(records: I) -> OverviewStats
where
    I: IntoIterator<Item = &'a KolRecord>,
{
    let mut total_kols = 0usize;
    let mut total_publications = 0u64;
    let mut h_index_sum = 0u64;
    let mut countries: HashMap<&str, usize> = HashMap::new();
    let mut areas: HashMap<&str, AreaTotals> = HashMap::new();

    for record in records {
        total_kols += 1;
        total_publications += record.publications_count;
        h_index_sum += record.h_index;

        *countries.entry(record.country.as_str()).or_insert(0) += 1;

        let area = areas.entry(record.expertise_area.as_str()).or_default();
        area.count += 1;
        area.h_index_sum += record.h_index;
        area.publications_sum += record.publications_count;
    }

    if total_kols == 0 {
        return OverviewStats::default();
    }

    let countries_represented = countries.len();

    let mut top_countries: Vec<CountryStat> = countries
        .into_iter()
        .map(|(country, count)| CountryStat {
            country: country.to_string(),
            count,
            percentage: round2_ratio(count as u64 * 100, total_kols as u64),
        })
        .collect();
    top_countries.sort_by(|a, b| by_count_then_name(a.count, &a.country, b.count, &b.country));
    top_countries.truncate(TOP_COUNTRIES_LIMIT);

    let mut expertise_distribution: Vec<ExpertiseStat> = areas
        .into_iter()
        .map(|(area, totals)| ExpertiseStat {
            area: area.to_string(),
            count: totals.count,
            average_h_index: round2_ratio(totals.h_index_sum, totals.count as u64),
            average_publications: round2_ratio(totals.publications_sum, totals.count as u64),
        })
        .collect();
    expertise_distribution.sort_by(|a, b| by_count_then_name(a.count, &a.area, b.count, &b.area));

    OverviewStats {
        total_kols,
        total_publications,
        average_h_index: round2_ratio(h_index_sum, total_kols as u64),
        countries_represented,
        top_countries,
        expertise_distribution,
    }
}

fn by_count_then_name(a_count: usize, a_name: &str, b_count: usize, b_name: &str) -> Ordering {
    b_count.cmp(&a_count).then_with(|| a_name.cmp(b_name))
}
