pub mod error;
pub mod file;
pub mod http;

pub use error::FetchError;
pub use file::{load_kol_data, parse_roster, RosterFileSource, RosterLoad};
pub use http::{create_api_client, decode_response, HttpKolSource, DEFAULT_BASE_URL};

use crate::common::{KolRecord, OverviewStats};

/// Where the authoritative KOL collection comes from
#[allow(async_fn_in_trait)]
pub trait KolSource {
    /// List every record
    async fn fetch_kols(&self) -> Result<Vec<KolRecord>, FetchError>;

    /// Overview statistics for the full collection, as computed by the source
    async fn fetch_stats(&self) -> Result<OverviewStats, FetchError>;

    /// A single record by id
    async fn fetch_kol(&self, id: &str) -> Result<KolRecord, FetchError>;
}
