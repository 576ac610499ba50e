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

use super::comparator::Comparator;
use super::path::{append, Key};
use super::result::ComparisonResult;

/// Reconciles the field sets of two objects.
///
/// Missing and unexpected fields are recorded at the object's own path with
/// the field name as the value, expected keys first, then actual keys.
pub(crate) fn compare_objects<C: Comparator + ?Sized>(
    comparator: &C,
    path: &str,
    expected: &Map<String, Value>,
    actual: &Map<String, Value>,
    result: &mut ComparisonResult,
) {
    for (key, expected_value) in expected {
        match actual.get(key) {
            Some(actual_value) => comparator.compare_values(
                &append(path, Key::Field(key)),
                expected_value,
                actual_value,
                result,
            ),
            None => {
                result.missing(path, &Value::String(key.clone()));
            }
        }
    }

    if !comparator.mode().is_extensible() {
        for key in actual.keys().filter(|key| !expected.contains_key(*key)) {
            result.unexpected(path, &Value::String(key.clone()));
        }
    }
}
