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

//! Paths identifying a location inside a compared document.
//!
//! Paths are plain strings such as `obj.arr[2].field` or `users[id=3].name`.
//! The root is the empty string.

use std::fmt;

use serde_json::Value;

use super::scalar::describe;

/// One step down from a path.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Key<'a> {
    /// Object field, rendered as `.name` (or `name` at the root).
    Field(&'a str),
    /// Array element by position, rendered as `[2]`.
    Idx(usize),
    /// Array element by the value of its unique key, rendered as `[id=3]`.
    Unique(&'a str, &'a Value),
    /// The elements of an array taken together, rendered as `[]`.
    Elements,
}

impl<'a> fmt::Display for Key<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Key::Field(name) => write!(f, ".{}", name),
            Key::Idx(idx) => write!(f, "[{}]", idx),
            Key::Unique(name, value) => write!(f, "[{}={}]", name, describe(value)),
            Key::Elements => write!(f, "[]"),
        }
    }
}

/// Returns `path` extended by `key`.
pub fn append(path: &str, key: Key) -> String {
    match key {
        Key::Field(name) if path.is_empty() => name.to_string(),
        key => format!("{}{}", path, key),
    }
}
