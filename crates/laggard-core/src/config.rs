//! Aggregator configuration.

use serde::{Deserialize, Serialize};

/// Configuration for report fetching and retry behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retries after the first attempt when a child report has not been
    /// computed yet.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Fixed wait between retry attempts in seconds.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_secs: u64,

    /// Overall deadline for one aggregation call in seconds.
    #[serde(default)]
    pub deadline_secs: Option<u64>,
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    5
}

fn default_retry_delay() -> u64 {
    30
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            retry_delay_secs: default_retry_delay(),
            deadline_secs: None,
        }
    }
}

impl AggregatorConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `LAGGARD_TIMEOUT` | HTTP request timeout in seconds |
    /// | `LAGGARD_MAX_RETRIES` | Retries after the first attempt |
    /// | `LAGGARD_RETRY_DELAY` | Wait between attempts in seconds |
    /// | `LAGGARD_DEADLINE` | Overall deadline per aggregation in seconds |
    pub fn from_env() -> Self {
        Self {
            timeout_secs: std::env::var("LAGGARD_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_timeout),
            max_retries: std::env::var("LAGGARD_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_max_retries),
            retry_delay_secs: std::env::var("LAGGARD_RETRY_DELAY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_retry_delay),
            deadline_secs: std::env::var("LAGGARD_DEADLINE")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }

    /// Set the HTTP timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the retry budget.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the wait between retry attempts.
    pub fn with_retry_delay(mut self, secs: u64) -> Self {
        self.retry_delay_secs = secs;
        self
    }

    /// Set the overall aggregation deadline.
    pub fn with_deadline(mut self, secs: u64) -> Self {
        self.deadline_secs = Some(secs);
        self
    }
}
