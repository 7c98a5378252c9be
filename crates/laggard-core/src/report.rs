//! Wire types for the CI server's JSON report tree.

use serde::Deserialize;

/// Root document of a single (non-matrix) build, `<build>/api/json`.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildReport {
    /// Build duration in milliseconds.
    pub duration: f64,

    /// Build display name (job + build number).
    #[serde(rename = "fullDisplayName")]
    pub full_display_name: String,

    /// Build result (SUCCESS/FAILURE/...); null while the build runs.
    #[serde(default)]
    pub result: Option<String>,

    /// Absolute build URL.
    pub url: String,
}

/// Root document of a matrix test report, `<build>/testReport/api/json`.
#[derive(Debug, Clone, Deserialize)]
pub struct MatrixReport {
    /// One entry per axis combination.
    #[serde(rename = "childReports", default)]
    pub child_reports: Vec<ChildReport>,
}

/// One axis combination's report entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ChildReport {
    /// The axis build this entry belongs to.
    pub child: ChildRef,

    /// Absent or null until the CI server has computed this axis.
    #[serde(default)]
    pub result: Option<ChildResult>,
}

/// Reference to an axis build.
#[derive(Debug, Clone, Deserialize)]
pub struct ChildRef {
    /// Absolute (possibly percent-encoded) axis build URL.
    pub url: String,
}

/// Computed test result tree for one axis.
#[derive(Debug, Clone, Deserialize)]
pub struct ChildResult {
    /// Test suites, each holding individual cases.
    #[serde(default)]
    pub suites: Vec<SuiteReport>,
}

/// One test suite.
#[derive(Debug, Clone, Deserialize)]
pub struct SuiteReport {
    /// Individual test executions.
    #[serde(default)]
    pub cases: Vec<CaseReport>,
}

/// One test execution.
#[derive(Debug, Clone, Deserialize)]
pub struct CaseReport {
    /// Fully-qualified test class.
    #[serde(rename = "className")]
    pub class_name: String,

    /// Case duration in seconds.
    pub duration: f64,

    /// Test method or scenario name.
    pub name: String,

    /// Case status (PASSED/FAILED/SKIPPED/...).
    pub status: String,
}
