//! Aggregation entry point: fetch, extract, retry, merge.

use std::time::Duration;

use tracing::{debug, warn};

use crate::client::ReportClient;
use crate::config::AggregatorConfig;
use crate::error::{AggregateError, AggregateResult};
use crate::extract;
use crate::model::TestResult;
use crate::store::SlowestResults;

/// Retry behavior for child reports the CI server has not computed yet.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,

    /// Fixed wait between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            delay: Duration::from_secs(30),
        }
    }
}

/// Polls a job's report tree and produces batches of result records.
#[derive(Debug, Clone)]
pub struct Aggregator {
    client: ReportClient,
    policy: RetryPolicy,
    deadline: Option<Duration>,
}

impl Aggregator {
    /// Create an aggregator from configuration.
    pub fn new(config: &AggregatorConfig) -> AggregateResult<Self> {
        Ok(Self {
            client: ReportClient::new(config)?,
            policy: RetryPolicy {
                max_retries: config.max_retries,
                delay: Duration::from_secs(config.retry_delay_secs),
            },
            deadline: config.deadline_secs.map(Duration::from_secs),
        })
    }

    /// Override the retry policy (tests use a zero delay).
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Aggregate one job invocation into a batch of result records.
    ///
    /// Matrix sub-reports populate asynchronously after job completion, so
    /// "result not yet available" is absorbed by bounded retry; every other
    /// failure aborts immediately. The batch is complete or the call fails.
    pub async fn aggregate(
        &self,
        job_name: &str,
        build_url: &str,
    ) -> AggregateResult<Vec<TestResult>> {
        match self.deadline {
            Some(deadline) => {
                match tokio::time::timeout(deadline, self.aggregate_inner(job_name, build_url))
                    .await
                {
                    Ok(result) => result,
                    Err(_) => Err(AggregateError::DeadlineExceeded {
                        secs: deadline.as_secs(),
                    }),
                }
            }
            None => self.aggregate_inner(job_name, build_url).await,
        }
    }

    /// Aggregate and merge into `store`, all-or-nothing: a failed
    /// aggregation never mutates the store.
    pub async fn aggregate_into(
        &self,
        store: &SlowestResults,
        job_name: &str,
        build_url: &str,
    ) -> AggregateResult<()> {
        let batch = self.aggregate(job_name, build_url).await?;
        store.add(batch);
        Ok(())
    }

    async fn aggregate_inner(
        &self,
        job_name: &str,
        build_url: &str,
    ) -> AggregateResult<Vec<TestResult>> {
        // Source jobs publish a single build document instead of a test report.
        if is_source_build(build_url) {
            let report = self.client.fetch_build(build_url).await?;
            return extract::extract_build(job_name, &report).map(|result| vec![result]);
        }

        let mut attempts = 0u32;
        loop {
            attempts += 1;

            let report = match self.client.fetch_test_report(build_url).await {
                Ok(report) => report,
                Err(AggregateError::ReportNotFound { .. }) => {
                    // Jobs without a test report still expose build timing.
                    debug!(url = %build_url, "no test report; falling back to the build report");
                    let report = self.client.fetch_build(build_url).await?;
                    return extract::extract_build(job_name, &report).map(|result| vec![result]);
                }
                Err(e) => return Err(e),
            };

            match extract::extract_results(job_name, &report) {
                Ok(results) => return Ok(results),
                Err(AggregateError::IncompleteData { url }) => {
                    if attempts > self.policy.max_retries {
                        warn!(url = %url, attempts, "exceeded max retries");
                        return Err(AggregateError::ReportNeverAvailable { url, attempts });
                    }
                    warn!(
                        url = %url,
                        attempt = attempts,
                        delay_secs = self.policy.delay.as_secs(),
                        "result not yet available; retrying"
                    );
                    tokio::time::sleep(self.policy.delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Source jobs are recognized by their URL.
fn is_source_build(build_url: &str) -> bool {
    build_url.contains("-source")
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{is_source_build, RetryPolicy};

    #[test]
    fn default_policy_matches_the_documented_budget() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 5);
        assert_eq!(policy.delay, Duration::from_secs(30));
    }

    #[test]
    fn source_builds_are_recognized_by_url() {
        assert!(is_source_build(
            "https://ci.example.com/job/portal-source/17/"
        ));
        assert!(!is_source_build(
            "https://ci.example.com/job/portal-acceptance/17/"
        ));
    }
}
