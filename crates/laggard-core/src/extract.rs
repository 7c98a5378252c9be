//! Walks report documents and produces result records.

use serde_json::Value;

use crate::error::{AggregateError, AggregateResult};
use crate::model::TestResult;
use crate::report::{BuildReport, MatrixReport};
use crate::report_url;

/// Produce result records from a report document, in discovery order
/// (child, then suite, then case).
///
/// A document carrying `childReports` is a matrix report; anything else is
/// a single-build report yielding exactly one record.
pub fn extract_results(job_name: &str, report: &Value) -> AggregateResult<Vec<TestResult>> {
    if report.get("childReports").is_some() {
        extract_matrix(job_name, report)
    } else {
        extract_build(job_name, report).map(|result| vec![result])
    }
}

/// One build-level record for a single (non-matrix) build document.
///
/// The wire duration is in milliseconds; the record carries seconds.
pub fn extract_build(job_name: &str, report: &Value) -> AggregateResult<TestResult> {
    let build: BuildReport = deserialize(report)?;
    let status = build.result.ok_or_else(|| AggregateError::InvalidReport {
        message: format!("build result missing in {}", build.url),
    })?;

    TestResult::new(
        job_name,
        "",
        &build.full_display_name,
        build.duration / 1000.0,
        &status,
        "",
        report_url::normalize(&build.url)?,
    )
}

fn extract_matrix(job_name: &str, report: &Value) -> AggregateResult<Vec<TestResult>> {
    let matrix: MatrixReport = deserialize(report)?;

    let mut results = Vec::new();
    for child_report in &matrix.child_reports {
        let child_url = &child_report.child.url;
        let Some(child_result) = &child_report.result else {
            return Err(AggregateError::IncompleteData {
                url: child_url.clone(),
            });
        };

        let axis = report_url::extract_axis(child_url)?;
        for suite in &child_result.suites {
            for case in &suite.cases {
                let url = report_url::reconstruct(child_url, &case.class_name, &case.name)?;
                results.push(TestResult::new(
                    job_name,
                    &case.class_name,
                    &case.name,
                    case.duration,
                    &case.status,
                    &axis,
                    url,
                )?);
            }
        }
    }
    Ok(results)
}

fn deserialize<T: serde::de::DeserializeOwned>(value: &Value) -> AggregateResult<T> {
    serde_json::from_value(value.clone()).map_err(|e| AggregateError::InvalidReport {
        message: e.to_string(),
    })
}
