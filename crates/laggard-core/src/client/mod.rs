//! Report client for fetching CI report documents.
//!
//! Public API: no status code knowledge. All HTTP/status mapping in http.rs.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::config::AggregatorConfig;
use crate::error::{AggregateError, AggregateResult};

mod http;

use http::HttpBackend;

const USER_AGENT_VALUE: &str = concat!("laggard/", env!("CARGO_PKG_VERSION"));

/// Client for a CI server's JSON report tree.
#[derive(Debug, Clone)]
pub struct ReportClient {
    http: HttpBackend,
}

impl ReportClient {
    /// Create a client with the configured timeout.
    pub fn new(config: &AggregatorConfig) -> AggregateResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|e| AggregateError::Network {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            http: HttpBackend { client },
        })
    }

    /// Fetch the build document at `<build_url>/api/json`.
    pub async fn fetch_build(&self, build_url: &str) -> AggregateResult<serde_json::Value> {
        let url = join(build_url, "api/json");
        debug!(url = %url, "fetching build report");
        self.http.get_json(&url).await
    }

    /// Fetch the test report document at `<build_url>/testReport/api/json`.
    pub async fn fetch_test_report(&self, build_url: &str) -> AggregateResult<serde_json::Value> {
        let url = join(build_url, "testReport/api/json");
        debug!(url = %url, "fetching test report");
        self.http.get_json(&url).await
    }
}

fn join(base: &str, suffix: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), suffix)
}
