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

use serde_json::{Number, Value};

/// Hashable identity of a scalar JSON value.
///
/// Two scalars are equal exactly when their keys are equal, so numbers are
/// normalized: `3`, `3.0` and `3e0` share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum ScalarKey<'a> {
    Null,
    Bool(bool),
    Int(i128),
    Float(u64),
    String(&'a str),
}

impl<'a> ScalarKey<'a> {
    /// Returns `None` for arrays and objects.
    pub(crate) fn of(value: &'a Value) -> Option<Self> {
        match value {
            Value::Null => Some(ScalarKey::Null),
            Value::Bool(b) => Some(ScalarKey::Bool(*b)),
            Value::Number(n) => Some(number_key(n)),
            Value::String(s) => Some(ScalarKey::String(s)),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

// i128 holds every integral f64 below this bound.
const INTEGRAL_LIMIT: f64 = 1e38;

fn number_key(n: &Number) -> ScalarKey<'static> {
    if let Some(i) = n.as_i64() {
        return ScalarKey::Int(i128::from(i));
    }
    if let Some(u) = n.as_u64() {
        return ScalarKey::Int(i128::from(u));
    }

    let f = n.as_f64().unwrap_or(f64::NAN);
    if f.fract() == 0.0 && f.abs() < INTEGRAL_LIMIT {
        ScalarKey::Int(f as i128)
    } else {
        ScalarKey::Float(f.to_bits())
    }
}

pub(crate) fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

/// Equality of two scalar values. Arrays and objects are never equal here.
///
/// Numbers match across literal formats (`1`, `1.0`, `1e0`) but a string
/// never equals a number, so `"1"` and `1` differ.
pub(crate) fn equal(expected: &Value, actual: &Value) -> bool {
    match (ScalarKey::of(expected), ScalarKey::of(actual)) {
        (Some(expected), Some(actual)) => expected == actual,
        _ => false,
    }
}

/// Short human-readable description used in failure messages.
pub(crate) fn describe(value: &Value) -> String {
    match value {
        Value::Array(_) => "a JSON array".to_string(),
        Value::Object(_) => "a JSON object".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Compact literal rendering of a value: JSON text for arrays and objects,
/// the raw scalar otherwise.
pub(crate) fn literal(value: &Value) -> String {
    if is_scalar(value) {
        describe(value)
    } else {
        value.to_string()
    }
}
