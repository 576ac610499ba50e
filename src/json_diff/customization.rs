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

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use super::comparator::Comparator;
use super::mode::CompareMode;
use super::result::ComparisonResult;
use super::scalar::describe;
use crate::CompareError;

/// Reason a [`ValueMatcher`] refused a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValueMatcherError {
    message: String,
}

impl ValueMatcherError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Decides whether an actual value is acceptable in place of an expected one.
///
/// Any `Fn(&Value, &Value) -> bool` taking `(actual, expected)` is a matcher.
pub trait ValueMatcher {
    fn equal(&self, actual: &Value, expected: &Value) -> Result<bool, ValueMatcherError>;
}

impl<F> ValueMatcher for F
where
    F: Fn(&Value, &Value) -> bool,
{
    fn equal(&self, actual: &Value, expected: &Value) -> Result<bool, ValueMatcherError> {
        Ok(self(actual, expected))
    }
}

/// Matches the textual form of the actual value against a regular expression.
///
/// The expression must match the whole value. It is either fixed up front
/// with [`RegexValueMatcher::with_pattern`] or, with
/// [`RegexValueMatcher::new`], read from the expected value itself.
#[derive(Debug, Clone, Default)]
pub struct RegexValueMatcher {
    constant: Option<Regex>,
}

impl RegexValueMatcher {
    /// Matcher taking its pattern from each expected value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Matcher using `pattern` for every value.
    pub fn with_pattern(pattern: &str) -> Result<Self, CompareError> {
        let regex = full_match(pattern).map_err(|source| CompareError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            constant: Some(regex),
        })
    }
}

fn full_match(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{})$", pattern))
}

impl ValueMatcher for RegexValueMatcher {
    fn equal(&self, actual: &Value, expected: &Value) -> Result<bool, ValueMatcherError> {
        let text = describe(actual);
        match &self.constant {
            Some(regex) if regex.is_match(&text) => Ok(true),
            Some(_) => Err(ValueMatcherError::new(
                "Constant expected pattern did not match value",
            )),
            None => {
                let regex = full_match(&describe(expected))
                    .map_err(|_| ValueMatcherError::new("Dynamic expected pattern invalid"))?;
                if regex.is_match(&text) {
                    Ok(true)
                } else {
                    Err(ValueMatcherError::new(
                        "Dynamic expected pattern did not match value",
                    ))
                }
            }
        }
    }
}

/// A matcher bound to the paths selected by a pattern.
///
/// Patterns use the same notation as failure paths. `*` stands for one path
/// segment (a segment may carry an index, e.g. `arr[*]`) and a whole `**`
/// segment for any number of segments, none included:
///
/// * `user.id`: exactly that path,
/// * `items[*].price`: `price` of every element of `items`,
/// * `**.timestamp`: `timestamp` at any depth,
/// * `audit.**`: `audit` and everything below it.
pub struct Customization {
    pattern: String,
    regex: Regex,
    matcher: Box<dyn ValueMatcher>,
}

impl Customization {
    pub fn new(pattern: &str, matcher: impl ValueMatcher + 'static) -> Result<Self, CompareError> {
        let regex =
            Regex::new(&path_regex(pattern)).map_err(|source| CompareError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            matcher: Box::new(matcher),
        })
    }

    /// Accepts whatever value sits at the matching paths.
    pub fn ignore(pattern: &str) -> Result<Self, CompareError> {
        Self::new(pattern, |_: &Value, _: &Value| true)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn applies_to(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    pub fn matches(&self, actual: &Value, expected: &Value) -> Result<bool, ValueMatcherError> {
        self.matcher.equal(actual, expected)
    }
}

impl fmt::Debug for Customization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Customization")
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

fn path_regex(pattern: &str) -> String {
    let segments: Vec<&str> = pattern.split('.').collect();
    let mut regex = String::from("^");

    for (idx, segment) in segments.iter().enumerate() {
        let first = idx == 0;
        let last = idx + 1 == segments.len();

        if *segment == "**" {
            regex.push_str(match (first, last) {
                (true, true) => ".*",
                (true, false) => r"(?:.+\.)?",
                (false, false) => r"\.(?:.+\.)?",
                (false, true) => r"(?:\..+)?",
            });
            continue;
        }

        if !first && segments[idx - 1] != "**" {
            regex.push_str(r"\.");
        }
        let literal_parts: Vec<String> = segment.split('*').map(regex::escape).collect();
        regex.push_str(&literal_parts.join(r"[^.]+"));
    }

    regex.push('$');
    regex
}

/// Comparator applying [`Customization`]s on top of the standard algorithms.
///
/// The first customization whose pattern matches a path decides the value
/// found there. Everything else is compared under `mode`.
///
/// # Examples
///
/// ```
/// use json_assert::{compare_json_with, CompareMode, CustomComparator, Customization};
///
/// let comparator = CustomComparator::new(CompareMode::Strict)
///     .with_customization(Customization::ignore("**.updated_at").unwrap());
///
/// let result = compare_json_with(
///     r#"{"user": {"name": "ann", "updated_at": 1}}"#,
///     r#"{"user": {"name": "ann", "updated_at": 2}}"#,
///     &comparator,
/// )
/// .unwrap();
/// assert!(result.passed());
/// ```
#[derive(Debug, Default)]
pub struct CustomComparator {
    mode: CompareMode,
    customizations: Vec<Customization>,
}

impl CustomComparator {
    pub fn new(mode: CompareMode) -> Self {
        Self {
            mode,
            customizations: vec![],
        }
    }

    /// Add a customization. Earlier ones take precedence.
    pub fn with_customization(mut self, customization: Customization) -> Self {
        self.customizations.push(customization);
        self
    }

    fn customization(&self, path: &str) -> Option<&Customization> {
        self.customizations.iter().find(|c| c.applies_to(path))
    }
}

impl Comparator for CustomComparator {
    fn mode(&self) -> CompareMode {
        self.mode
    }

    fn compare_values(
        &self,
        path: &str,
        expected: &Value,
        actual: &Value,
        result: &mut ComparisonResult,
    ) {
        let Some(customization) = self.customization(path) else {
            super::compare_values(self, path, expected, actual, result);
            return;
        };

        match customization.matches(actual, expected) {
            Ok(true) => {}
            Ok(false) => {
                result.fail_field(path, expected, actual);
            }
            Err(err) => {
                result.fail_field_with_reason(path, err.message(), expected, actual);
            }
        }
    }
}
