use serde::{Deserialize, Deserializer, Serialize};

/// A single Key Opinion Leader record as supplied by the data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KolRecord {
    pub id: String,
    pub name: String,
    pub affiliation: String,
    pub country: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub city: String,
    pub expertise_area: String,
    pub publications_count: u64,
    pub h_index: u64,
    /// Carried through for consumers; no statistic is derived from it
    #[serde(deserialize_with = "count_from_number")]
    pub citations: u64,
}

/// Per-country share of a summarized collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryStat {
    pub country: String,
    pub count: usize,
    pub percentage: f64,
}

/// Per-expertise-area breakdown of a summarized collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertiseStat {
    pub area: String,
    pub count: usize,
    #[serde(alias = "average_h_index")]
    pub average_h_index: f64,
    #[serde(alias = "average_publications")]
    pub average_publications: f64,
}

/// Aggregate summary of a record collection
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    pub total_kols: usize,
    pub total_publications: u64,
    pub average_h_index: f64,
    pub countries_represented: usize,
    pub top_countries: Vec<CountryStat>,
    pub expertise_distribution: Vec<ExpertiseStat>,
}

/// Envelope returned by the list-records endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KolListResponse {
    pub data: Vec<KolRecord>,
    pub total: usize,
}

/// Stats-overview payload as served over HTTP (snake_case top level)
#[derive(Debug, Clone, Deserialize)]
pub struct StatsOverviewResponse {
    pub total_kols: usize,
    pub total_publications: u64,
    pub average_h_index: f64,
    pub countries_represented: usize,
    pub top_countries: Vec<CountryStat>,
    pub expertise_distribution: Vec<ExpertiseStat>,
}

impl From<StatsOverviewResponse> for OverviewStats {
    fn from(raw: StatsOverviewResponse) -> Self {
        Self {
            total_kols: raw.total_kols,
            total_publications: raw.total_publications,
            average_h_index: raw.average_h_index,
            countries_represented: raw.countries_represented,
            top_countries: raw.top_countries,
            expertise_distribution: raw.expertise_distribution,
        }
    }
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Integer(u64),
    Float(f64),
}

/// Accept integer or float counts; only floats are truncated
fn count_from_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawCount::deserialize(deserializer)? {
        RawCount::Integer(count) => Ok(count),
        RawCount::Float(value) if value.is_finite() && value >= 0.0 => Ok(value.trunc() as u64),
        RawCount::Float(value) => Err(serde::de::Error::custom(format!(
            "expected a non-negative count, got {}",
            value
        ))),
    }
}
