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

use serde_json::{Map, Value};

use super::mode::CompareMode;
use super::result::ComparisonResult;
use super::{array, object};

/// Strategy invoked for every pair of nodes during a comparison.
///
/// Every method has a default body holding the standard algorithm, and the
/// defaults always recurse through `self`. An implementation therefore only
/// overrides the cases it cares about; everything else, including values
/// nested below an overridden node, keeps flowing through the overrides.
///
/// # Examples
///
/// Pair up array elements by their unique key even in strict-order mode:
///
/// ```
/// use json_assert::{compare_json_with, CompareMode, Comparator, ComparisonResult};
/// use serde_json::Value;
///
/// struct ByIdentity;
///
/// impl Comparator for ByIdentity {
///     fn mode(&self) -> CompareMode {
///         CompareMode::Strict
///     }
///
///     fn compare_arrays(
///         &self,
///         path: &str,
///         expected: &[Value],
///         actual: &[Value],
///         result: &mut ComparisonResult,
///     ) {
///         self.compare_array_of_objects(path, expected, actual, result);
///     }
/// }
///
/// let result = compare_json_with(
///     r#"[{"id": 1}, {"id": 2}]"#,
///     r#"[{"id": 2}, {"id": 1}]"#,
///     &ByIdentity,
/// )
/// .unwrap();
/// assert!(result.passed());
/// ```
pub trait Comparator {
    /// Strictness used by the default algorithms.
    fn mode(&self) -> CompareMode;

    /// Compares two values of any kind.
    fn compare_values(
        &self,
        path: &str,
        expected: &Value,
        actual: &Value,
        result: &mut ComparisonResult,
    ) {
        super::compare_values(self, path, expected, actual, result)
    }

    /// Compares the fields of two objects.
    fn compare_objects(
        &self,
        path: &str,
        expected: &Map<String, Value>,
        actual: &Map<String, Value>,
        result: &mut ComparisonResult,
    ) {
        object::compare_objects(self, path, expected, actual, result)
    }

    /// Compares two arrays, picking a strategy from the mode and the kinds
    /// of elements in `expected`.
    fn compare_arrays(
        &self,
        path: &str,
        expected: &[Value],
        actual: &[Value],
        result: &mut ComparisonResult,
    ) {
        array::compare_arrays(self, path, expected, actual, result)
    }

    /// Compares arrays index by index over their shared length.
    fn compare_array_with_strict_order(
        &self,
        path: &str,
        expected: &[Value],
        actual: &[Value],
        result: &mut ComparisonResult,
    ) {
        array::compare_with_strict_order(self, path, expected, actual, result)
    }

    /// Compares arrays of scalars as multisets.
    fn compare_array_of_scalars(
        &self,
        path: &str,
        expected: &[Value],
        actual: &[Value],
        result: &mut ComparisonResult,
    ) {
        array::compare_scalars(path, expected, actual, result)
    }

    /// Compares arrays of objects, pairing elements by an inferred unique
    /// key and falling back to [`Comparator::compare_array_by_matching`]
    /// when no key is usable in both arrays.
    fn compare_array_of_objects(
        &self,
        path: &str,
        expected: &[Value],
        actual: &[Value],
        result: &mut ComparisonResult,
    ) {
        array::compare_objects_by_key(self, path, expected, actual, result)
    }

    /// Finds, for every expected element, the first unused actual element
    /// that compares cleanly.
    fn compare_array_by_matching(
        &self,
        path: &str,
        expected: &[Value],
        actual: &[Value],
        result: &mut ComparisonResult,
    ) {
        array::compare_by_matching(self, path, expected, actual, result)
    }
}

/// The standard algorithms under a fixed [`CompareMode`].
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct DefaultComparator {
    mode: CompareMode,
}

impl DefaultComparator {
    pub fn new(mode: CompareMode) -> Self {
        Self { mode }
    }
}

impl From<CompareMode> for DefaultComparator {
    fn from(mode: CompareMode) -> Self {
        Self::new(mode)
    }
}

impl Comparator for DefaultComparator {
    fn mode(&self) -> CompareMode {
        self.mode
    }
}
