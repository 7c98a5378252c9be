//! HTTP layer: status mapping for report endpoints.
//!
//! This is the ONLY place for status code handling. client/mod.rs never
//! interprets status codes.

use tracing::debug;

use crate::error::{AggregateError, AggregateResult};

/// HTTP backend for report requests (holds the reqwest client).
#[derive(Debug, Clone)]
pub(crate) struct HttpBackend {
    pub(crate) client: reqwest::Client,
}

impl HttpBackend {
    /// GET a JSON document; 404 => ReportNotFound, other non-2xx => Http.
    pub(crate) async fn get_json(&self, url: &str) -> AggregateResult<serde_json::Value> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        match status.as_u16() {
            200..=299 => response
                .json::<serde_json::Value>()
                .await
                .map_err(|e| AggregateError::InvalidReport {
                    message: format!("failed to decode report body from {url}: {e}"),
                }),

            404 => {
                debug!(url = %url, "report endpoint returned 404");
                Err(AggregateError::ReportNotFound {
                    url: url.to_string(),
                })
            }

            _ => Err(AggregateError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            }),
        }
    }
}
