//! Per-test report URL reconstruction and axis extraction.
//!
//! Child URLs arrive percent-encoded from the report tree. They are decoded
//! exactly once before assembly so reconstruction never double-encodes, and
//! the assembled URL is re-encoded as an ASCII-safe absolute URL at the end.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use url::Url;

use crate::error::{AggregateError, AggregateResult};

/// Marker token naming the axis variable inside a matrix child URL.
const AXIS_MARKER: &str = "AXIS_VARIABLE";

/// ASCII characters percent-encoded when serializing a reconstructed URL.
/// Non-ASCII bytes are always encoded.
const REPORT_PATH_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'#')
    .add(b'?');

/// Naming convention used for individual test report pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingStrategy {
    /// JUnit-style pages: the test name is used verbatim, no trailing slash.
    Standard,

    /// Poshi-style pages: `[`, `]` and `#` collapse to `_` and the page URL
    /// carries a trailing slash.
    Poshi,
}

impl NamingStrategy {
    /// Classify a fully-qualified class name.
    pub fn classify(class_name: &str) -> Self {
        if class_name.contains("poshi") {
            Self::Poshi
        } else {
            Self::Standard
        }
    }

    fn segment(self, test_name: &str) -> String {
        match self {
            Self::Standard => test_name.to_string(),
            Self::Poshi => {
                let mut segment: String = test_name
                    .chars()
                    .map(|c| match c {
                        '[' | ']' | '#' => '_',
                        c => c,
                    })
                    .collect();
                segment.push('/');
                segment
            }
        }
    }
}

/// Build the `testReport/...` path for one test case.
///
/// The class name splits at its last `.`: package dots become path
/// separators, the simple class name follows, then the strategy-specific
/// test segment. A class name without a package uses no package path.
pub fn test_report_path(class_name: &str, test_name: &str, strategy: NamingStrategy) -> String {
    let (package, simple) = match class_name.rfind('.') {
        Some(idx) => (&class_name[..idx], &class_name[idx + 1..]),
        None => ("", class_name),
    };

    let mut path = String::from("testReport/");
    if !package.is_empty() {
        path.push_str(&package.replace('.', "/"));
        path.push('/');
    }
    path.push_str(simple);
    path.push('/');
    path.push_str(&strategy.segment(test_name));
    path
}

/// Reconstruct the absolute report page URL for one test case.
pub fn reconstruct(child_url: &str, class_name: &str, test_name: &str) -> AggregateResult<String> {
    let mut assembled = decode(child_url)?;
    if !assembled.ends_with('/') {
        assembled.push('/');
    }
    assembled.push_str(&test_report_path(
        class_name,
        test_name,
        NamingStrategy::classify(class_name),
    ));
    to_ascii_url(&assembled)
}

/// Normalize a build URL to an ASCII-safe absolute form.
pub fn normalize(build_url: &str) -> AggregateResult<String> {
    let decoded = decode(build_url)?;
    to_ascii_url(&decoded)
}

/// Extract the axis label (`AXIS_VARIABLE=<value>`) from a matrix child URL.
///
/// The label runs from the marker token to the following comma of the axis
/// combination; a URL without the marker yields an empty label.
pub fn extract_axis(child_url: &str) -> AggregateResult<String> {
    let decoded = decode(child_url)?;
    let Some(start) = decoded.find(AXIS_MARKER) else {
        return Ok(String::new());
    };
    let tail = &decoded[start..];
    let end = tail.find([',', '/']).unwrap_or(tail.len());
    Ok(tail[..end].to_string())
}

fn decode(url: &str) -> AggregateResult<String> {
    percent_decode_str(url)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|e| AggregateError::InvalidUrl {
            url: url.to_string(),
            message: format!("percent-decoding produced invalid UTF-8: {e}"),
        })
}

fn to_ascii_url(assembled: &str) -> AggregateResult<String> {
    let encoded = utf8_percent_encode(assembled, REPORT_PATH_SET).to_string();
    Url::parse(&encoded).map_err(|e| AggregateError::InvalidUrl {
        url: encoded.clone(),
        message: e.to_string(),
    })?;
    Ok(encoded)
}
