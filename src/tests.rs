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

use proptest::prelude::*;
use regex::Regex;
use serde_json::{json, Map, Value};

use crate::{
    compare_json, compare_json_with, compare_values, ArraySizeComparator, CompareError,
    CompareMode, Comparator, ComparisonResult, CustomComparator, Customization, Document,
    RegexValueMatcher,
};

fn lenient(expected: &str, actual: &str) -> ComparisonResult {
    compare_json(expected, actual, CompareMode::Lenient).unwrap()
}

fn assert_fails_with(result: &ComparisonResult, message: &str) {
    assert!(result.failed());
    assert_eq!(result.message(), message);
}

#[test]
fn succeeds_with_empty_arrays() {
    assert!(lenient("[]", "[]").passed());
}

#[test]
fn reports_arrays_of_unequal_length() {
    assert_fails_with(&lenient("[4]", "[]"), "[]: Expected 1 values but got 0");
}

#[test]
fn reports_array_missing_expected_element() {
    let result = lenient("[4]", "[7]");
    assert_fails_with(
        &result,
        "[]\nExpected: 4\n     but none found\n ; []\nUnexpected: 7\n",
    );
    assert_eq!(result.field_missing().len(), 1);
    assert_eq!(result.field_unexpected().len(), 1);
}

#[test]
fn reports_mismatched_field_values() {
    assert_fails_with(
        &lenient(r#"{"id": 3}"#, r#"{"id": 5}"#),
        "id\nExpected: 3\n     got: 5\n",
    );
}

#[test]
fn reports_missing_field() {
    let result = lenient(r#"{"obj": {"id": 3}}"#, r#"{"obj": {}}"#);
    assert_fails_with(&result, "obj\nExpected: id\n     but none found\n");
    assert_eq!(result.field_missing().len(), 1);
}

#[test]
fn reports_mismatched_container_kinds() {
    assert_fails_with(
        &lenient("{}", "[]"),
        "\nExpected: a JSON object\n     got: a JSON array\n",
    );
    assert_fails_with(
        &lenient("[]", "{}"),
        "\nExpected: a JSON array\n     got: a JSON object\n",
    );
    assert_fails_with(
        &lenient(r#"{"arr":[]}"#, r#"{"arr":{}}"#),
        "arr\nExpected: a JSON array\n     got: a JSON object\n",
    );
}

#[test]
fn reports_unexpected_null_and_non_null() {
    assert_fails_with(
        &lenient(r#"{"id": 3}"#, r#"{"id": null}"#),
        "id\nExpected: 3\n     got: null\n",
    );
    assert_fails_with(
        &lenient(r#"{"id": null}"#, r#"{"id": "abc"}"#),
        "id\nExpected: null\n     got: abc\n",
    );
}

#[test]
fn reports_unexpected_field_in_non_extensible_mode() {
    let result = compare_json(
        r#"{"obj": {}}"#,
        r#"{"obj": {"id": 3}}"#,
        CompareMode::NonExtensible,
    )
    .unwrap();
    assert_fails_with(&result, "obj\nUnexpected: id\n");
    assert_eq!(result.field_unexpected().len(), 1);
}

#[test]
fn reports_wrong_scalar_count_in_unordered_array() {
    let result = lenient("[5, 5]", "[5, 7]");
    assert_fails_with(
        &result,
        "[]: Expected 2 occurrence(s) of 5 but got 1 occurrence(s) ; []\nUnexpected: 7\n",
    );
    assert_eq!(result.field_unexpected().len(), 1);
}

#[test]
fn reports_missing_object_with_unique_key_in_unordered_array() {
    let result = lenient(r#"[{"id" : 3}]"#, r#"[{"id" : 5}]"#);
    assert_fails_with(
        &result,
        "[id=3]\nExpected: a JSON object\n     but none found\n ; [id=5]\nUnexpected: a JSON object\n",
    );
    assert_eq!(result.field_missing().len(), 1);
    assert_eq!(result.field_unexpected().len(), 1);
}

#[test]
fn reports_unmatched_objects_in_unordered_array() {
    assert_fails_with(
        &lenient(
            r#"[{"address" : {"street" : "Acacia Avenue"}}]"#,
            r#"[{"age" : 23}]"#,
        ),
        r#"[0] Could not find match for element {"address":{"street":"Acacia Avenue"}}"#,
    );
    assert_fails_with(
        &lenient(r#"[{"id": 3}]"#, "[{}]"),
        r#"[0] Could not find match for element {"id":3}"#,
    );
    assert_fails_with(
        &lenient(r#"[{"id": 3}]"#, "[5]"),
        r#"[0] Could not find match for element {"id":3}"#,
    );
}

#[test]
fn matches_mixed_unordered_arrays() {
    assert!(lenient(
        r#"[{"address" : {"street" : "Acacia Avenue"}}, 5]"#,
        r#"[5, {"address" : {"street" : "Acacia Avenue"}}]"#,
    )
    .passed());

    assert_fails_with(
        &lenient(
            r#"[{"address" : {"street" : "Acacia Avenue"}}, 5]"#,
            r#"[{"address" : {"street" : "Acacia Avenue"}}, 2]"#,
        ),
        "[1] Could not find match for element 5",
    );
}

#[test]
fn matches_objects_without_unique_key() {
    let doc = r#"[{"age" : 43}, {"age" : 43}]"#;
    assert!(lenient(doc, doc).passed());

    let doc = r#"[{"age" : 43}, {"age" : {"years" : 43}}]"#;
    assert!(lenient(doc, doc).passed());
}

#[test]
fn compares_arrays_with_nulls() {
    let doc = json!([1, null, 3, 2]);
    for mode in CompareMode::ALL {
        assert!(compare_values(&doc, &doc, mode).passed());
    }

    let expected = json!([1, null, 3, 2, {"hey": "value"}]);
    let actual = json!([1, null, 3, 2, {"hey": "value"}]);
    for mode in [CompareMode::Strict, CompareMode::Lenient] {
        assert!(compare_values(&expected, &actual, mode).passed());
    }
}

struct ArrayOfObjectsComparator {
    mode: CompareMode,
}

impl Comparator for ArrayOfObjectsComparator {
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
        self.compare_array_of_objects(path, expected, actual, result);
    }
}

#[test]
fn custom_comparator_pairs_objects_by_key() {
    let result = compare_json_with(
        r#"[{"id":1}, {"id":3}, {"id":5}]"#,
        r#"[{"id":1}, {"id":3}, {"id":6}, {"id":7}]"#,
        &ArrayOfObjectsComparator {
            mode: CompareMode::Lenient,
        },
    )
    .unwrap();

    assert!(result.failed());
    let message = result.message().replace('\n', "");
    let expected = Regex::new("^.*id=5.*Expected.*id=6.*Unexpected.*id=7.*Unexpected.*$").unwrap();
    assert!(expected.is_match(&message), "{}", message);
}

#[test]
fn mode_semantics() {
    let expected = json!({"id": 1, "tags": ["a", "b"]});
    let reordered = json!({"id": 1, "tags": ["b", "a"]});
    let extended = json!({"id": 1, "tags": ["a", "b"], "extra": true});

    assert!(compare_values(&expected, &reordered, CompareMode::Lenient).passed());
    assert!(compare_values(&expected, &reordered, CompareMode::NonExtensible).passed());
    assert!(compare_values(&expected, &reordered, CompareMode::Strict).failed());
    assert!(compare_values(&expected, &reordered, CompareMode::StrictOrder).failed());

    assert!(compare_values(&expected, &extended, CompareMode::Lenient).passed());
    assert!(compare_values(&expected, &extended, CompareMode::StrictOrder).passed());
    assert!(compare_values(&expected, &extended, CompareMode::Strict).failed());
    assert!(compare_values(&expected, &extended, CompareMode::NonExtensible).failed());
}

#[test]
fn strict_order_reports_positions() {
    let result = compare_values(
        &json!({"tags": ["a", "b"]}),
        &json!({"tags": ["b", "a"]}),
        CompareMode::Strict,
    );
    assert_eq!(
        result.messages(),
        &[
            "tags[0]\nExpected: a\n     got: b\n".to_string(),
            "tags[1]\nExpected: b\n     got: a\n".to_string(),
        ]
    );
}

#[test]
fn numbers_compare_by_value() {
    assert!(lenient(r#"{"n": 1}"#, r#"{"n": 1.0}"#).passed());
    assert!(lenient(r#"{"n": 1e2}"#, r#"{"n": 100}"#).passed());
    assert!(lenient("[1, 2.0]", "[2, 1.0]").passed());
    assert_fails_with(
        &lenient(r#"{"n": 1}"#, r#"{"n": "1"}"#),
        "n\nExpected: 1\n     got: 1\n",
    );
}

#[test]
fn deep_document_paths() {
    let result = lenient(
        r#"{"data": {"users": [{"id": 1, "country": {"cities": [{"id": 3, "name": "Copenhagen"}]}}]}}"#,
        r#"{"data": {"users": [{"id": 1, "country": {"cities": [{"id": 3, "name": "Aarhus"}]}}]}}"#,
    );
    assert_fails_with(
        &result,
        "data.users[id=1].country.cities[id=3].name\nExpected: Copenhagen\n     got: Aarhus\n",
    );
    assert_eq!(
        result.field_failures()[0].path(),
        "data.users[id=1].country.cities[id=3].name"
    );
}

#[test]
fn ignores_customized_paths() {
    let comparator = CustomComparator::new(CompareMode::Strict)
        .with_customization(Customization::ignore("**.updated_at").unwrap())
        .with_customization(
            Customization::new("users[*].email", RegexValueMatcher::with_pattern(r"\S+@\S+").unwrap())
                .unwrap(),
        );

    let result = compare_json_with(
        r#"{"updated_at": 1, "users": [{"id": 1, "email": "?", "updated_at": 1}]}"#,
        r#"{"updated_at": 2, "users": [{"id": 1, "email": "ann@example.com", "updated_at": 2}]}"#,
        &comparator,
    )
    .unwrap();
    assert!(result.passed(), "{}", result);

    let result = compare_json_with(
        r#"{"users": [{"id": 1, "email": "?"}]}"#,
        r#"{"users": [{"id": 1, "email": "ann"}]}"#,
        &comparator,
    )
    .unwrap();
    assert_fails_with(
        &result,
        "users[0].email: Constant expected pattern did not match value\nExpected: ?\n     got: ann\n",
    );
}

#[test]
fn array_size_comparator_on_documents() {
    let comparator = ArraySizeComparator::new(CompareMode::Lenient);
    let result = compare_json_with(
        r#"{"pets": [1, 3], "tags": [0]}"#,
        r#"{"pets": ["dog", "cat", "bird", "fish"], "tags": []}"#,
        &comparator,
    )
    .unwrap();
    assert_fails_with(
        &result,
        "pets[]\nExpected: array size of 1 to 3 elements\n     got: array size of 4 elements\n",
    );
}

#[test]
fn parse_errors_name_the_document() {
    let err = compare_json("{", "{}", CompareMode::Strict).unwrap_err();
    assert!(matches!(
        err,
        CompareError::Parse {
            document: Document::Expected,
            ..
        }
    ));

    let err = compare_json("{}", "[1,", CompareMode::Strict).unwrap_err();
    assert!(matches!(
        err,
        CompareError::Parse {
            document: Document::Actual,
            ..
        }
    ));
    assert!(err.to_string().starts_with("invalid actual JSON: "));
}

#[test]
fn unquoted_keys_are_rejected() {
    assert!(compare_json("{id: 1}", r#"{"id": 1}"#, CompareMode::Lenient).is_err());
}

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-z]{0,6}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(("[a-z]{1,4}", inner), 0..6)
                .prop_map(|fields| Value::Object(fields.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

proptest! {
    #[test]
    fn every_document_equals_itself(doc in arb_json()) {
        for mode in CompareMode::ALL {
            let result = compare_values(&doc, &doc, mode);
            prop_assert!(result.passed(), "{} under {}", result, mode);
        }
    }

    #[test]
    fn comparison_is_idempotent(expected in arb_json(), actual in arb_json()) {
        for mode in CompareMode::ALL {
            prop_assert_eq!(
                compare_values(&expected, &actual, mode),
                compare_values(&expected, &actual, mode)
            );
        }
    }

    #[test]
    fn lenient_accepts_extra_fields(doc in arb_json(), extra in arb_json()) {
        if let Value::Object(fields) = &doc {
            let mut extended = fields.clone();
            extended.insert("__extra".to_string(), extra);
            let extended = Value::Object(extended);
            prop_assert!(compare_values(&doc, &extended, CompareMode::Lenient).passed());
            prop_assert!(compare_values(&doc, &extended, CompareMode::Strict).failed());
        }
    }
}
