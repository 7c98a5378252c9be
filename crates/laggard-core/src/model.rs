//! Result record produced by extraction.

use serde::Serialize;

use crate::error::{AggregateError, AggregateResult};

/// One test (or build) execution's timing and identity.
///
/// Constructed once during extraction and never mutated; held by
/// [`SlowestResults`](crate::store::SlowestResults) until evicted by
/// truncation or an explicit reset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    /// CI job that produced the result.
    pub job_name: String,

    /// Fully-qualified test class; empty for build-level results.
    pub class_name: String,

    /// Test or build display name.
    pub name: String,

    /// Wall-clock duration in seconds.
    pub duration_secs: f64,

    /// Test status or build result (passed/failed/SUCCESS/...).
    pub status: String,

    /// Matrix axis label; empty for non-matrix builds.
    pub axis: String,

    /// Absolute, ASCII-safe link to the individual report page.
    pub url: String,
}

impl TestResult {
    /// Create a record, rejecting negative or non-finite durations.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        job_name: impl Into<String>,
        class_name: impl Into<String>,
        name: impl Into<String>,
        duration_secs: f64,
        status: impl Into<String>,
        axis: impl Into<String>,
        url: impl Into<String>,
    ) -> AggregateResult<Self> {
        let name = name.into();
        if !duration_secs.is_finite() || duration_secs < 0.0 {
            return Err(AggregateError::InvalidReport {
                message: format!("invalid duration {duration_secs} for {name}"),
            });
        }
        Ok(Self {
            job_name: job_name.into(),
            class_name: class_name.into(),
            name,
            duration_secs,
            status: status.into(),
            axis: axis.into(),
            url: url.into(),
        })
    }
}
