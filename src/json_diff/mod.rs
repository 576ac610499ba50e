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

mod array;
pub(crate) mod array_size;
pub(crate) mod comparator;
pub(crate) mod customization;
pub(crate) mod mode;
mod object;
pub mod path;
pub(crate) mod result;
mod scalar;

use serde_json::Value;

use comparator::Comparator;
use result::ComparisonResult;

/// Deepest nesting the dispatcher descends into.
pub(crate) const MAX_DEPTH: usize = 256;

/// Dispatches a pair of nodes by kind.
///
/// Objects and arrays go to the comparator, scalars are compared here. A kind
/// disagreement, such as an object where an array was expected, is a single
/// value mismatch at `path`.
pub(crate) fn compare_values<C: Comparator + ?Sized>(
    comparator: &C,
    path: &str,
    expected: &Value,
    actual: &Value,
    result: &mut ComparisonResult,
) {
    if !result.enter() {
        result.exceed_depth(path);
        return;
    }

    match (expected, actual) {
        (Value::Object(expected), Value::Object(actual)) => {
            comparator.compare_objects(path, expected, actual, result)
        }
        (Value::Array(expected), Value::Array(actual)) => {
            comparator.compare_arrays(path, expected, actual, result)
        }
        _ if scalar::equal(expected, actual) => {}
        _ => {
            result.fail_field(path, expected, actual);
        }
    }

    result.leave();
}
