//! Ranking output.

use laggard_core::TestResult;

/// Render the ranking as an aligned table. Deterministic, unit-testable.
#[must_use]
pub fn render_table(results: &[TestResult]) -> String {
    if results.is_empty() {
        return "no results\n".to_string();
    }

    let name_width = results
        .iter()
        .map(|r| display_name(r).len())
        .chain(["NAME".len()])
        .max()
        .unwrap_or(0);
    let status_width = results
        .iter()
        .map(|r| r.status.len())
        .chain(["STATUS".len()])
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!(
        "{:>4}  {:>12}  {:<status_width$}  {:<name_width$}  URL\n",
        "#", "DURATION", "STATUS", "NAME",
    ));
    for (rank, result) in results.iter().enumerate() {
        out.push_str(&format!(
            "{:>4}  {:>11.3}s  {:<status_width$}  {:<name_width$}  {}\n",
            rank + 1,
            result.duration_secs,
            result.status,
            display_name(result),
            result.url,
        ));
    }
    out
}

/// Class-qualified name for matrix cases, display name otherwise.
fn display_name(result: &TestResult) -> String {
    if result.class_name.is_empty() {
        result.name.clone()
    } else {
        format!("{}.{}", result.class_name, result.name)
    }
}
