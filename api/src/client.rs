use crate::espn::Scoreboard;
use log::debug;
use reqwest::{Client, StatusCode, header};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const ESPN_SITE_V2: &str = "https://site.api.espn.com/apis/site/v2/sports/football/nfl";
const ACCEPT_LD_JSON: &str = "application/ld+json";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// NFL scoreboard client backed by ESPN's public site v2 endpoint.
#[derive(Debug, Clone)]
pub struct NflApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for NflApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("nfl-tracker/0.1 (team status poller)")
                .build()
                .unwrap_or_default(),
            base_url: ESPN_SITE_V2.to_owned(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Timeout(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Timeout(url) => write!(f, "Request to {url} timed out"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Network(e, _) => Some(e),
            ApiError::Timeout(_) => None,
        }
    }
}

impl NflApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at a different host. Used by tests.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Fetch the league scoreboard.
    ///
    /// `Ok(None)` is the "no data" case: a non-200 status, an unparseable
    /// body, or a body without the expected top-level structure. Only
    /// transport failures and timeouts surface as errors.
    pub async fn fetch_scoreboard(&self) -> ApiResult<Option<Scoreboard>> {
        let url = format!("{}/scoreboard", self.base_url);
        debug!("fetching scoreboard from {url}");

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, ACCEPT_LD_JSON)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| classify(e, &url))?;

        if response.status() != StatusCode::OK {
            debug!("scoreboard returned {}, treating as no data", response.status());
            return Ok(None);
        }

        let body = response.text().await.map_err(|e| classify(e, &url))?;
        match serde_json::from_str::<Value>(&body) {
            Ok(value) => {
                let doc = Scoreboard::from_value(value);
                if doc.is_none() {
                    debug!("scoreboard body lacks an events array, treating as no data");
                }
                Ok(doc)
            }
            Err(e) => {
                debug!("scoreboard body is not JSON ({e}), treating as no data");
                Ok(None)
            }
        }
    }
}

fn classify(e: reqwest::Error, url: &str) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout(url.to_owned())
    } else {
        ApiError::Network(e, url.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn mock_scoreboard(server: &mut mockito::ServerGuard, status: usize, body: &str) {
        server
            .mock("GET", "/scoreboard")
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;
    }

    #[tokio::test]
    async fn ok_response_yields_scoreboard() {
        let mut server = mockito::Server::new_async().await;
        let body = json!({
            "events": [{"shortName": "NYG @ TEN"}],
            "week": {"teamsOnBye": []},
        })
        .to_string();
        mock_scoreboard(&mut server, 200, &body).await;

        let api = NflApi::with_base_url(server.url());
        let doc = api.fetch_scoreboard().await.unwrap();
        assert!(doc.is_some_and(|d| d.find_event("TEN").is_some()));
    }

    #[tokio::test]
    async fn non_200_status_is_no_data() {
        for status in [404, 500, 503] {
            let mut server = mockito::Server::new_async().await;
            mock_scoreboard(&mut server, status, "{\"events\": []}").await;

            let api = NflApi::with_base_url(server.url());
            assert!(api.fetch_scoreboard().await.unwrap().is_none(), "status {status}");
        }
    }

    #[tokio::test]
    async fn malformed_body_is_no_data() {
        let mut server = mockito::Server::new_async().await;
        mock_scoreboard(&mut server, 200, "<html>not json</html>").await;

        let api = NflApi::with_base_url(server.url());
        assert!(api.fetch_scoreboard().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_events_key_is_no_data() {
        let mut server = mockito::Server::new_async().await;
        mock_scoreboard(&mut server, 200, "{\"leagues\": []}").await;

        let api = NflApi::with_base_url(server.url());
        assert!(api.fetch_scoreboard().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn transport_failure_is_an_error() {
        // Nothing listens on the discard port; connect fails immediately.
        let api = NflApi::with_base_url("http://127.0.0.1:9");
        let err = api.fetch_scoreboard().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(..)), "got {err}");
    }
}
