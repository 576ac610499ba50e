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

//! Array reconciliation.
//!
//! Ordered arrays are compared index by index. Unordered arrays use one of
//! three strategies, chosen from the kinds of elements in the expected array:
//!
//! * only scalars: multiset matching by occurrence count,
//! * only objects: pairing by an inferred unique key such as `id`,
//! * anything else, or no usable key: greedy first-fit matching.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use serde_json::Value;
use tracing::{debug, trace};

use super::comparator::Comparator;
use super::path::{append, Key};
use super::result::ComparisonResult;
use super::scalar::{describe, is_scalar, literal, ScalarKey};

pub(crate) fn compare_arrays<C: Comparator + ?Sized>(
    comparator: &C,
    path: &str,
    expected: &[Value],
    actual: &[Value],
    result: &mut ComparisonResult,
) {
    let strict_order = comparator.mode().has_strict_order();

    if expected.len() != actual.len() {
        result.fail(format!(
            "{}: Expected {} values but got {}",
            append(path, Key::Elements),
            expected.len(),
            actual.len()
        ));
        // Ordered arrays still get their shared prefix compared; unordered
        // ones can't be paired up meaningfully.
        if !strict_order {
            return;
        }
    }

    if expected.is_empty() {
        return;
    }

    if strict_order {
        comparator.compare_array_with_strict_order(path, expected, actual, result);
    } else if expected.iter().all(is_scalar) {
        comparator.compare_array_of_scalars(path, expected, actual, result);
    } else if expected.iter().all(Value::is_object) {
        comparator.compare_array_of_objects(path, expected, actual, result);
    } else {
        comparator.compare_array_by_matching(path, expected, actual, result);
    }
}

pub(crate) fn compare_with_strict_order<C: Comparator + ?Sized>(
    comparator: &C,
    path: &str,
    expected: &[Value],
    actual: &[Value],
    result: &mut ComparisonResult,
) {
    for (idx, (expected, actual)) in expected.iter().zip(actual).enumerate() {
        comparator.compare_values(&append(path, Key::Idx(idx)), expected, actual, result);
    }
}

/// Occurrence counts of the distinct scalars of an array, in order of
/// first appearance. Arrays and objects are skipped.
struct Cardinality<'a> {
    entries: Vec<(&'a Value, usize)>,
    index: HashMap<ScalarKey<'a>, usize>,
}

impl<'a> Cardinality<'a> {
    fn of(values: &'a [Value]) -> Self {
        let mut entries: Vec<(&'a Value, usize)> = vec![];
        let mut index: HashMap<ScalarKey<'a>, usize> = HashMap::new();

        for value in values {
            let Some(key) = ScalarKey::of(value) else {
                continue;
            };
            match index.entry(key) {
                Entry::Occupied(slot) => entries[*slot.get()].1 += 1,
                Entry::Vacant(slot) => {
                    slot.insert(entries.len());
                    entries.push((value, 1));
                }
            }
        }

        Self { entries, index }
    }

    fn count(&self, value: &Value) -> usize {
        ScalarKey::of(value)
            .and_then(|key| self.index.get(&key))
            .map_or(0, |&idx| self.entries[idx].1)
    }
}

pub(crate) fn compare_scalars(
    path: &str,
    expected: &[Value],
    actual: &[Value],
    result: &mut ComparisonResult,
) {
    let elements = append(path, Key::Elements);
    let expected_counts = Cardinality::of(expected);
    let actual_counts = Cardinality::of(actual);

    for &(value, expected_count) in &expected_counts.entries {
        let actual_count = actual_counts.count(value);
        if actual_count == 0 {
            result.missing(&elements, value);
        } else if actual_count < expected_count {
            result.fail(format!(
                "{}: Expected {} occurrence(s) of {} but got {} occurrence(s)",
                elements,
                expected_count,
                describe(value),
                actual_count
            ));
        }
    }

    for &(value, actual_count) in &actual_counts.entries {
        if actual_count > expected_counts.count(value) {
            result.unexpected(&elements, value);
        }
    }

    for value in actual.iter().filter(|value| !is_scalar(value)) {
        result.unexpected(&elements, value);
    }
}

/// Finds a field that identifies every object of `expected`.
///
/// First pass: candidates are the fields of the first element, in document
/// order, that every element carries. Second pass: the first candidate whose
/// values are scalars and pairwise distinct wins. Later candidates are never
/// weighed against it, so `{"id": .., "name": ..}` always keys by `id` when
/// both would do.
pub(crate) fn find_unique_key(expected: &[Value]) -> Option<&str> {
    let first = expected.first()?.as_object()?;

    let mut candidates = first.keys().map(String::as_str).filter(|candidate| {
        expected
            .iter()
            .all(|item| item.as_object().is_some_and(|item| item.contains_key(*candidate)))
    });

    candidates.find(|candidate| is_usable_as_unique_key(candidate, expected))
}

/// Whether every element of `array` is an object holding a distinct scalar
/// under `candidate`.
pub(crate) fn is_usable_as_unique_key(candidate: &str, array: &[Value]) -> bool {
    let mut seen = HashSet::new();
    array.iter().all(|item| {
        item.get(candidate)
            .and_then(ScalarKey::of)
            .is_some_and(|key| seen.insert(key))
    })
}

pub(crate) fn compare_objects_by_key<C: Comparator + ?Sized>(
    comparator: &C,
    path: &str,
    expected: &[Value],
    actual: &[Value],
    result: &mut ComparisonResult,
) {
    let Some(unique_key) =
        find_unique_key(expected).filter(|key| is_usable_as_unique_key(key, actual))
    else {
        debug!(path, "no unique key usable in both arrays, matching elements one by one");
        comparator.compare_array_by_matching(path, expected, actual, result);
        return;
    };
    debug!(path, unique_key, "pairing array elements by unique key");

    let expected_items = identified(expected, unique_key);
    let actual_items = identified(actual, unique_key);

    let actual_by_key: HashMap<&ScalarKey, &Value> = actual_items
        .iter()
        .map(|identified| (&identified.key, identified.item))
        .collect();
    let expected_keys: HashSet<&ScalarKey> =
        expected_items.iter().map(|identified| &identified.key).collect();

    for expected_item in &expected_items {
        let item_path = append(path, Key::Unique(unique_key, expected_item.id));
        match actual_by_key.get(&expected_item.key) {
            Some(&actual_item) => {
                comparator.compare_values(&item_path, expected_item.item, actual_item, result)
            }
            None => {
                result.missing(&item_path, expected_item.item);
            }
        }
    }

    for actual_item in &actual_items {
        if !expected_keys.contains(&actual_item.key) {
            result.unexpected(
                &append(path, Key::Unique(unique_key, actual_item.id)),
                actual_item.item,
            );
        }
    }
}

/// An array element along with the value of its unique key.
struct Identified<'a> {
    key: ScalarKey<'a>,
    id: &'a Value,
    item: &'a Value,
}

fn identified<'a>(items: &'a [Value], unique_key: &str) -> Vec<Identified<'a>> {
    items
        .iter()
        .filter_map(|item| {
            let id = item.get(unique_key)?;
            Some(Identified {
                key: ScalarKey::of(id)?,
                id,
                item,
            })
        })
        .collect()
}

/// Greedy first-fit matching. Each expected element, in order, takes the
/// earliest unused actual element that compares cleanly; no globally optimal
/// pairing is attempted, so ties go to the lowest actual index. Leftover
/// actual elements are not reported. A trial stopped by the depth limit ends
/// the search for that element and its depth failure is reported instead.
pub(crate) fn compare_by_matching<C: Comparator + ?Sized>(
    comparator: &C,
    path: &str,
    expected: &[Value],
    actual: &[Value],
    result: &mut ComparisonResult,
) {
    debug!(path, "matching array elements one by one");
    let mut matched = vec![false; actual.len()];

    for (idx, expected_item) in expected.iter().enumerate() {
        let item_path = append(path, Key::Idx(idx));

        let mut found = None;
        let mut limited = false;
        for (candidate, actual_item) in actual.iter().enumerate() {
            if matched[candidate] {
                continue;
            }
            let mut trial = result.scratch();
            comparator.compare_values(&item_path, expected_item, actual_item, &mut trial);
            if trial.passed() {
                found = Some(candidate);
                break;
            }
            if trial.depth_exceeded() {
                // Depth-limit failures outlive the trial.
                result.carry_depth_failures(&trial);
                limited = true;
                break;
            }
            trace!(path = item_path.as_str(), candidate, "candidate rejected");
        }

        match found {
            Some(candidate) => matched[candidate] = true,
            None if limited => {}
            None => {
                result.fail(format!(
                    "{} Could not find match for element {}",
                    item_path,
                    literal(expected_item)
                ));
            }
        }
    }
}
