//! Error types for report aggregation.

/// Aggregation errors.
#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    /// A matrix child's report has not been computed yet.
    #[error("result is not available for {url}")]
    IncompleteData { url: String },

    /// A child report never became available within the retry budget.
    #[error("result never became available for {url} after {attempts} attempts")]
    ReportNeverAvailable { url: String, attempts: u32 },

    /// Report endpoint returned 404.
    #[error("report not found: {url}")]
    ReportNotFound { url: String },

    /// Report endpoint returned a non-2xx status other than 404.
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    /// Transport-level failure.
    #[error("network error: {message}")]
    Network { message: String },

    /// The report document does not match the expected shape.
    #[error("invalid report: {message}")]
    InvalidReport { message: String },

    /// A reconstructed report URL failed to parse.
    #[error("invalid report URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    /// The aggregation deadline elapsed.
    #[error("aggregation deadline of {secs}s exceeded")]
    DeadlineExceeded { secs: u64 },
}

impl AggregateError {
    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            // Missing reports / bad references
            Self::ReportNotFound { .. } => 1,
            Self::InvalidUrl { .. } => 1,

            // Report data never materialized
            Self::IncompleteData { .. } => 3,
            Self::ReportNeverAvailable { .. } => 3,
            Self::DeadlineExceeded { .. } => 3,

            // Network/transport
            Self::Http { .. } => 5,
            Self::Network { .. } => 5,

            // Malformed data
            Self::InvalidReport { .. } => 6,
        }
    }

    /// Whether the error is retryable.
    ///
    /// Only "result not yet available" is transient: the CI server
    /// populates matrix sub-reports asynchronously after job completion.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::IncompleteData { .. })
    }
}

impl From<reqwest::Error> for AggregateError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

/// Result type for aggregation operations.
pub type AggregateResult<T> = Result<T, AggregateError>;
