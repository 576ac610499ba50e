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

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::scalar::describe;
use super::MAX_DEPTH;

/// A single field-level failure.
///
/// Depending on the list it was recorded in, it is a missing entry (only
/// `expected` is set), an unexpected entry (only `actual` is set) or a value
/// mismatch (both are set).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldComparisonFailure {
    path: String,
    expected: Option<Value>,
    actual: Option<Value>,
}

impl FieldComparisonFailure {
    /// Location of the failure, e.g. `obj.arr[2].field`. The root is `""`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn expected(&self) -> Option<&Value> {
        self.expected.as_ref()
    }

    pub fn actual(&self) -> Option<&Value> {
        self.actual.as_ref()
    }
}

/// Outcome of one comparison.
///
/// The result collects every mismatch found while walking both documents.
/// It passes when nothing was recorded.
///
/// # Examples
///
/// ```
/// use json_assert::{compare_json, CompareMode};
///
/// let result = compare_json(r#"{"obj": {"id": 3}}"#, r#"{"obj": {}}"#, CompareMode::Lenient).unwrap();
/// assert!(result.failed());
/// assert_eq!(result.field_missing().len(), 1);
/// assert_eq!(result.message(), "obj\nExpected: id\n     but none found\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonResult {
    messages: Vec<String>,
    field_failures: Vec<FieldComparisonFailure>,
    field_missing: Vec<FieldComparisonFailure>,
    field_unexpected: Vec<FieldComparisonFailure>,
    #[serde(skip)]
    depth: usize,
    #[serde(skip)]
    depth_exceeded_at: Vec<String>,
}

impl ComparisonResult {
    /// Constructs an empty, passing result.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn passed(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn failed(&self) -> bool {
        !self.passed()
    }

    /// Every failure message joined with `" ; "`. Empty when the comparison passed.
    pub fn message(&self) -> String {
        self.messages.join(" ; ")
    }

    /// Failure messages in the order they were recorded.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Value mismatches.
    pub fn field_failures(&self) -> &[FieldComparisonFailure] {
        &self.field_failures
    }

    /// Fields or elements present in expected but absent from actual.
    pub fn field_missing(&self) -> &[FieldComparisonFailure] {
        &self.field_missing
    }

    /// Fields or elements present in actual but absent from expected.
    pub fn field_unexpected(&self) -> &[FieldComparisonFailure] {
        &self.field_unexpected
    }

    pub fn is_failure_on_field(&self) -> bool {
        !self.field_failures.is_empty()
    }

    pub fn is_missing_on_field(&self) -> bool {
        !self.field_missing.is_empty()
    }

    pub fn is_unexpected_on_field(&self) -> bool {
        !self.field_unexpected.is_empty()
    }

    /// Records a failure that isn't tied to a single field, such as an array
    /// length mismatch.
    pub fn fail(&mut self, message: impl Into<String>) -> &mut Self {
        self.messages.push(message.into());
        self
    }

    /// Records a value mismatch at `path`.
    pub fn fail_field(&mut self, path: &str, expected: &Value, actual: &Value) -> &mut Self {
        self.fail(format!(
            "{}\nExpected: {}\n     got: {}\n",
            path,
            describe(expected),
            describe(actual)
        ));
        self.push_field_failure(path, expected, actual)
    }

    /// Records a value mismatch at `path` along with the reason a matcher gave.
    pub fn fail_field_with_reason(
        &mut self,
        path: &str,
        reason: &str,
        expected: &Value,
        actual: &Value,
    ) -> &mut Self {
        self.fail(format!(
            "{}: {}\nExpected: {}\n     got: {}\n",
            path,
            reason,
            describe(expected),
            describe(actual)
        ));
        self.push_field_failure(path, expected, actual)
    }

    /// Records that `expected` was not found at `path`.
    pub fn missing(&mut self, path: &str, expected: &Value) -> &mut Self {
        self.fail(format!(
            "{}\nExpected: {}\n     but none found\n",
            path,
            describe(expected)
        ));
        self.field_missing.push(FieldComparisonFailure {
            path: path.to_string(),
            expected: Some(expected.clone()),
            actual: None,
        });
        self
    }

    /// Records that `actual` was found at `path` although nothing was expected there.
    pub fn unexpected(&mut self, path: &str, actual: &Value) -> &mut Self {
        self.fail(format!("{}\nUnexpected: {}\n", path, describe(actual)));
        self.field_unexpected.push(FieldComparisonFailure {
            path: path.to_string(),
            expected: None,
            actual: Some(actual.clone()),
        });
        self
    }

    fn push_field_failure(&mut self, path: &str, expected: &Value, actual: &Value) -> &mut Self {
        self.field_failures.push(FieldComparisonFailure {
            path: path.to_string(),
            expected: Some(expected.clone()),
            actual: Some(actual.clone()),
        });
        self
    }

    /// Records that the depth limit stopped the comparison at `path`.
    pub(crate) fn exceed_depth(&mut self, path: &str) -> &mut Self {
        self.depth_exceeded_at.push(path.to_string());
        self.fail(format!(
            "{}: Maximum comparison depth of {} exceeded",
            path, MAX_DEPTH
        ))
    }

    pub(crate) fn depth_exceeded(&self) -> bool {
        !self.depth_exceeded_at.is_empty()
    }

    /// Copies the depth-limit failures of a discarded trial into this result.
    pub(crate) fn carry_depth_failures(&mut self, trial: &ComparisonResult) {
        for path in &trial.depth_exceeded_at {
            self.exceed_depth(path);
        }
    }

    /// Empty result used to try a pairing without committing its failures.
    /// It keeps the current nesting depth so trials stay bounded too.
    pub(crate) fn scratch(&self) -> Self {
        Self {
            depth: self.depth,
            ..Self::default()
        }
    }

    /// Steps one level down; `false` once the depth limit is reached.
    pub(crate) fn enter(&mut self) -> bool {
        if self.depth >= MAX_DEPTH {
            return false;
        }
        self.depth += 1;
        true
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
