use clap::{Args, Parser, Subcommand};

use kol_analytics::filter::FilterUpdate;
use kol_analytics::source::DEFAULT_BASE_URL;

#[derive(Parser)]
#[command(name = "kol-analytics")]
#[command(about = "Filter and summarize Key Opinion Leader (KOL) rosters")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize a local JSON roster file
    Summarize(SummarizeArgs),

    /// Fetch the roster from the KOL API and summarize it
    Fetch(FetchArgs),

    /// Show a single KOL by id
    Show(ShowArgs),
}

/// Filter flags shared by the summarizing commands
#[derive(Args, Clone, Debug, Default)]
pub struct FilterArgs {
    /// Case-insensitive substring matched against name and affiliation
    #[arg(short, long)]
    pub search: Option<String>,

    /// Keep only these countries (repeatable)
    #[arg(long = "country")]
    pub countries: Vec<String>,

    /// Keep only these expertise areas (repeatable)
    #[arg(long = "expertise")]
    pub expertise_areas: Vec<String>,

    /// Minimum publications count (inclusive)
    #[arg(long)]
    pub min_publications: Option<u64>,

    /// Maximum publications count (inclusive)
    #[arg(long)]
    pub max_publications: Option<u64>,
}

impl FilterArgs {
    /// Only flags actually given on the command line end up in the update
    pub fn to_update(&self) -> FilterUpdate {
        let mut update = FilterUpdate::new();
        if let Some(search) = &self.search {
            update = update.search_term(search.clone());
        }
        if !self.countries.is_empty() {
            update = update.countries(self.countries.iter().cloned());
        }
        if !self.expertise_areas.is_empty() {
            update = update.expertise_areas(self.expertise_areas.iter().cloned());
        }
        if self.min_publications.is_some() {
            update = update.min_publications(self.min_publications);
        }
        if self.max_publications.is_some() {
            update = update.max_publications(self.max_publications);
        }
        update
    }
}

#[derive(Parser, Clone)]
pub struct SummarizeArgs {
    /// JSON roster file (array of KOL objects)
    #[arg(short, long, required = true)]
    pub input: String,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Include the filtered records in the output
    #[arg(long, default_value = "false")]
    pub include_records: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Logging level (DEBUG, INFO, WARN, ERROR)
    #[arg(short, long, default_value = "INFO")]
    pub log_level: String,
}

#[derive(Parser, Clone)]
pub struct FetchArgs {
    /// Base URL of the KOL API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Timeout in seconds per request
    #[arg(short, long, default_value = "10")]
    pub timeout: u64,

    /// Also fetch the API's own overview stats for the full collection
    #[arg(long, default_value = "false")]
    pub server_stats: bool,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Include the filtered records in the output
    #[arg(long, default_value = "false")]
    pub include_records: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Logging level (DEBUG, INFO, WARN, ERROR)
    #[arg(short, long, default_value = "INFO")]
    pub log_level: String,
}

#[derive(Parser, Clone)]
pub struct ShowArgs {
    /// KOL id
    pub id: String,

    /// Read from a local JSON roster file instead of the API
    #[arg(short, long)]
    pub input: Option<String>,

    /// Base URL of the KOL API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Timeout in seconds per request
    #[arg(short, long, default_value = "10")]
    pub timeout: u64,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Logging level (DEBUG, INFO, WARN, ERROR)
    #[arg(short, long, default_value = "INFO")]
    pub log_level: String,
}
