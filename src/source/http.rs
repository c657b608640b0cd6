use log::debug;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::{FetchError, KolSource};
use crate::common::{KolListResponse, KolRecord, OverviewStats, StatsOverviewResponse};

/// Default location of the KOL API
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/kols";

/// KOL data source backed by the HTTP JSON API
#[derive(Debug, Clone)]
pub struct HttpKolSource {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpKolSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let invalid = |reason: String| FetchError::InvalidUrl {
            url: base_url.to_string(),
            reason,
        };
        let url = Url::parse(base_url.trim_end_matches('/')).map_err(|e| invalid(e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(invalid("URL cannot carry a path".to_string()));
        }

        Ok(Self {
            client: create_api_client()?,
            base_url: url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Append path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so this always succeeds
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, FetchError> {
        let url = self.endpoint(segments);
        debug!("GET {}", url);

        let resp = self.client.get(url.clone()).timeout(self.timeout).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        decode_response(status, &body)
    }
}

impl KolSource for HttpKolSource {
    async fn fetch_kols(&self) -> Result<Vec<KolRecord>, FetchError> {
        let list: KolListResponse = self.get_json(&[""]).await?;
        if list.total != list.data.len() {
            debug!("List envelope reports total {} but carries {} records", list.total, list.data.len());
        }
        Ok(list.data)
    }

    async fn fetch_stats(&self) -> Result<OverviewStats, FetchError> {
        let raw: StatsOverviewResponse = self.get_json(&["stats", "overview"]).await?;
        Ok(raw.into())
    }

    async fn fetch_kol(&self, id: &str) -> Result<KolRecord, FetchError> {
        self.get_json(&[id]).await
    }
}

/// Create an HTTP client for the KOL API
pub fn create_api_client() -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(concat!("kol-analytics/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Turn a status and body into a decoded payload or a [`FetchError`].
///
/// Non-success bodies surface their `detail` field verbatim when present.
pub fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, FetchError> {
    if !status.is_success() {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
            .unwrap_or_else(|| format!("API call failed with status: {}", status.as_u16()));
        return Err(FetchError::Status { status, detail });
    }
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_list_response() {
        let body = r#"{"data":[{"id":"1","name":"A","affiliation":"B","country":"US","city":"NYC","expertiseArea":"X","publicationsCount":3,"hIndex":4,"citations":5}],"total":1}"#;
        let list: KolListResponse = decode_response(StatusCode::OK, body).unwrap();
        assert_eq!(list.total, 1);
        assert_eq!(list.data[0].country, "US");
    }

    #[test]
    fn test_decode_error_detail() {
        let body = r#"{"detail":"KOL with id '42' not found"}"#;
        let err = decode_response::<KolRecord>(StatusCode::NOT_FOUND, body).unwrap_err();
        assert!(err.is_status(StatusCode::NOT_FOUND));
        assert_eq!(err.detail(), "KOL with id '42' not found");
    }

    #[test]
    fn test_decode_error_without_detail() {
        let err = decode_response::<KolRecord>(StatusCode::BAD_GATEWAY, "<html>oops</html>").unwrap_err();
        assert_eq!(err.detail(), "API call failed with status: 502");
    }

    #[test]
    fn test_decode_missing_fields_is_malformed() {
        let err = decode_response::<StatsOverviewResponse>(StatusCode::OK, r#"{"total_kols": 1}"#).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let source = HttpKolSource::new("http://localhost:8000/api/kols/", Duration::from_secs(5)).unwrap();
        assert_eq!(source.base_url(), "http://localhost:8000/api/kols");
        assert_eq!(
            source.endpoint(&["stats", "overview"]).as_str(),
            "http://localhost:8000/api/kols/stats/overview"
        );
        assert_eq!(source.endpoint(&[""]).as_str(), "http://localhost:8000/api/kols/");
    }

    #[test]
    fn test_record_id_is_escaped_as_one_segment() {
        let source = HttpKolSource::new("http://localhost:8000/api/kols", Duration::from_secs(5)).unwrap();
        assert_eq!(
            source.endpoint(&["a/b?c#d"]).as_str(),
            "http://localhost:8000/api/kols/a%2Fb%3Fc%23d"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpKolSource::new("not a url", Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));

        let err = HttpKolSource::new("mailto:someone@example.org", Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_request_error() {
        // Port 9 (discard) on loopback is expected to refuse connections
        let source = HttpKolSource::new("http://127.0.0.1:9/api/kols", Duration::from_secs(2)).unwrap();
        let err = source.fetch_kols().await.unwrap_err();
        assert!(matches!(err, FetchError::Request(_)));
    }
}
