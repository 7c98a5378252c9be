//! Slowest-test aggregation over a CI server's federated JSON report tree.
//!
//! This crate harvests per-test timing records from (possibly matrix) build
//! reports and maintains a globally ranked, bounded list of the slowest test
//! executions across repeated polls:
//!
//! - Extraction of timing records from single-build and matrix reports
//! - Bounded retry while matrix sub-reports are still being computed
//! - A mutex-guarded top-K store shared by concurrent aggregations
//! - Per-test report-URL reconstruction and axis extraction
//!
//! # Quick Start
//!
//! ```no_run
//! use laggard_core::{Aggregator, AggregatorConfig, SlowestResults};
//!
//! # async fn example() -> laggard_core::AggregateResult<()> {
//! let aggregator = Aggregator::new(&AggregatorConfig::from_env())?;
//! let store = SlowestResults::new(10);
//!
//! aggregator
//!     .aggregate_into(&store, "portal-acceptance", "https://ci.example.com/job/portal-acceptance/17")
//!     .await?;
//!
//! for result in store.snapshot() {
//!     println!("{:10.3}s  {}", result.duration_secs, result.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `LAGGARD_TIMEOUT` | HTTP request timeout in seconds (default: 30) |
//! | `LAGGARD_MAX_RETRIES` | Retries after the first attempt (default: 5) |
//! | `LAGGARD_RETRY_DELAY` | Wait between attempts in seconds (default: 30) |
//! | `LAGGARD_DEADLINE` | Overall deadline per aggregation in seconds (default: none) |

pub mod aggregator;
pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod report;
pub mod report_url;
pub mod store;

// Re-export main types
pub use aggregator::{Aggregator, RetryPolicy};
pub use client::ReportClient;
pub use config::AggregatorConfig;
pub use error::{AggregateError, AggregateResult};
pub use extract::{extract_build, extract_results};
pub use model::TestResult;
pub use report::{BuildReport, CaseReport, ChildRef, ChildReport, ChildResult, MatrixReport, SuiteReport};
pub use report_url::NamingStrategy;
pub use store::SlowestResults;
