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

use serde_json::Value;

use super::comparator::Comparator;
use super::mode::CompareMode;
use super::path::{append, Key};
use super::result::ComparisonResult;

/// Checks array lengths instead of array contents.
///
/// Every array in the expected document describes the accepted size of the
/// actual array at the same path: `[n]` for exactly `n` elements, `[min, max]`
/// for an inclusive range. Objects and scalars are compared as usual.
///
/// # Examples
///
/// ```
/// use json_assert::{compare_json_with, ArraySizeComparator, CompareMode};
///
/// let comparator = ArraySizeComparator::new(CompareMode::Lenient);
/// let result = compare_json_with(
///     r#"{"pets": [1, 3]}"#,
///     r#"{"pets": ["dog", "cat", "bird", "fish"]}"#,
///     &comparator,
/// )
/// .unwrap();
/// assert_eq!(
///     result.message(),
///     "pets[]\nExpected: array size of 1 to 3 elements\n     got: array size of 4 elements\n"
/// );
/// ```
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ArraySizeComparator {
    mode: CompareMode,
}

impl ArraySizeComparator {
    pub fn new(mode: CompareMode) -> Self {
        Self { mode }
    }
}

impl Comparator for ArraySizeComparator {
    fn mode(&self) -> CompareMode {
        self.mode
    }

    fn compare_arrays(
        &self,
        path: &str,
        expected: &[Value],
        actual: &[Value],
        result: &mut ComparisonResult,
    ) {
        let elements = append(path, Key::Elements);
        let (min, max) = match size_range(expected) {
            Ok(range) => range,
            Err(reason) => {
                result.fail(format!("{}: invalid expectation: {}", elements, reason));
                return;
            }
        };

        let len = actual.len() as u64;
        if len < min || len > max {
            let expected = if min == max {
                format!("array size of {} elements", min)
            } else {
                format!("array size of {} to {} elements", min, max)
            };
            result.fail_field(
                &elements,
                &Value::String(expected),
                &Value::String(format!("array size of {} elements", len)),
            );
        }
    }
}

fn size_range(expected: &[Value]) -> Result<(u64, u64), String> {
    let bound = |value: &Value, name: &str| match value {
        Value::Number(number) => number
            .as_u64()
            .ok_or_else(|| format!("{} must be a non-negative integer, got {}", name, number)),
        other => Err(format!("{} must be a number, got {}", name, other)),
    };

    match expected {
        [exact] => {
            let size = bound(exact, "size")?;
            Ok((size, size))
        }
        [min, max] => {
            let min = bound(min, "minimum")?;
            let max = bound(max, "maximum")?;
            if max < min {
                return Err(format!("maximum {} is less than minimum {}", max, min));
            }
            Ok((min, max))
        }
        _ => Err(format!(
            "expected [size] or [minimum, maximum], got {} elements",
            expected.len()
        )),
    }
}
