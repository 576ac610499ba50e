// Copyright 2024 The DocAssert Authors
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

use std::fmt;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

mod json_diff;
#[cfg(test)]
mod tests;

pub use json_diff::array_size::ArraySizeComparator;
pub use json_diff::comparator::{Comparator, DefaultComparator};
pub use json_diff::customization::{
    CustomComparator, Customization, RegexValueMatcher, ValueMatcher, ValueMatcherError,
};
pub use json_diff::mode::CompareMode;
pub use json_diff::path;
pub use json_diff::result::{ComparisonResult, FieldComparisonFailure};

/// Which of the two documents an error refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Document {
    Expected,
    Actual,
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Document::Expected => write!(f, "expected"),
            Document::Actual => write!(f, "actual"),
        }
    }
}

/// Error type for the comparison entry points and their configuration.
///
/// A comparison itself never fails: every difference ends up in the
/// [`ComparisonResult`]. Errors are limited to inputs that cannot be
/// compared at all.
#[derive(Debug, Error)]
pub enum CompareError {
    /// One of the documents is not valid JSON
    #[error("invalid {document} JSON: {source}")]
    Parse {
        document: Document,
        #[source]
        source: serde_json::Error,
    },
    /// A pattern could not be compiled
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    /// Unknown name of a compare mode
    #[error("unknown compare mode `{0}`, expected one of: strict, lenient, non-extensible, strict-order")]
    InvalidMode(String),
}

/// Compares two JSON documents given as text.
///
/// # Examples
///
/// ```
/// use json_assert::{compare_json, CompareMode};
///
/// let result = compare_json(
///     r#"{"id": 1, "tags": ["a", "b"]}"#,
///     r#"{"tags": ["b", "a"], "id": 1, "name": "x"}"#,
///     CompareMode::Lenient,
/// )
/// .unwrap();
/// assert!(result.passed());
///
/// let result = compare_json(r#"{"id": 1}"#, r#"{"id": 1, "name": "x"}"#, CompareMode::Strict).unwrap();
/// assert_eq!(result.message(), "\nUnexpected: name\n");
/// ```
pub fn compare_json(
    expected: &str,
    actual: &str,
    mode: CompareMode,
) -> Result<ComparisonResult, CompareError> {
    compare_json_with(expected, actual, &DefaultComparator::new(mode))
}

/// Compares two JSON documents given as text using a custom [`Comparator`].
///
/// # Examples
///
/// ```
/// use json_assert::{compare_json_with, CompareMode, CustomComparator, Customization};
///
/// let comparator = CustomComparator::new(CompareMode::Strict)
///     .with_customization(Customization::ignore("id").unwrap());
///
/// let result = compare_json_with(r#"{"id": 1}"#, r#"{"id": 2}"#, &comparator).unwrap();
/// assert!(result.passed());
///
/// let err = compare_json_with(r#"{"id": 1}"#, r#"{"id": "#, &comparator).unwrap_err();
/// assert!(err.to_string().starts_with("invalid actual JSON"));
/// ```
pub fn compare_json_with<C: Comparator + ?Sized>(
    expected: &str,
    actual: &str,
    comparator: &C,
) -> Result<ComparisonResult, CompareError> {
    let expected = parse(expected, Document::Expected)?;
    let actual = parse(actual, Document::Actual)?;
    Ok(compare_values_with(&expected, &actual, comparator))
}

/// Compares two parsed JSON values.
///
/// # Examples
///
/// ```
/// use json_assert::{compare_values, CompareMode};
/// use serde_json::json;
///
/// let result = compare_values(&json!([1, 2, 3]), &json!([3, 2, 1]), CompareMode::StrictOrder);
/// assert_eq!(result.field_failures().len(), 2);
/// assert_eq!(result.field_failures()[0].path(), "[0]");
/// ```
pub fn compare_values(expected: &Value, actual: &Value, mode: CompareMode) -> ComparisonResult {
    compare_values_with(expected, actual, &DefaultComparator::new(mode))
}

/// Compares two parsed JSON values using a custom [`Comparator`].
pub fn compare_values_with<C: Comparator + ?Sized>(
    expected: &Value,
    actual: &Value,
    comparator: &C,
) -> ComparisonResult {
    debug!(mode = %comparator.mode(), "comparing documents");

    let mut result = ComparisonResult::new();
    comparator.compare_values("", expected, actual, &mut result);

    debug!(
        passed = result.passed(),
        failures = result.messages().len(),
        "comparison finished"
    );
    result
}

fn parse(text: &str, document: Document) -> Result<Value, CompareError> {
    serde_json::from_str(text).map_err(|source| CompareError::Parse { document, source })
}
