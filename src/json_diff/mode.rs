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
use std::str::FromStr;

use serde::Serialize;

use crate::CompareError;

/// Mode for how JSON values should be compared.
///
/// Every mode is a combination of two independent switches:
///
/// | mode              | extensible | strict order |
/// |-------------------|------------|--------------|
/// | [`Strict`]        | no         | yes          |
/// | [`Lenient`]       | yes        | no           |
/// | [`NonExtensible`] | no         | no           |
/// | [`StrictOrder`]   | yes        | yes          |
///
/// *Extensible* means the actual object may carry fields the expected object
/// doesn't mention. *Strict order* means arrays are compared index by index.
///
/// [`Strict`]: CompareMode::Strict
/// [`Lenient`]: CompareMode::Lenient
/// [`NonExtensible`]: CompareMode::NonExtensible
/// [`StrictOrder`]: CompareMode::StrictOrder
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompareMode {
    /// Field sets must match exactly and arrays must keep their order.
    #[default]
    Strict,
    /// Extra fields in actual are fine and arrays may be reordered.
    Lenient,
    /// Arrays may be reordered but actual must not carry extra fields.
    NonExtensible,
    /// Extra fields in actual are fine but arrays must keep their order.
    StrictOrder,
}

impl CompareMode {
    /// Every mode, in declaration order.
    pub const ALL: [CompareMode; 4] = [
        CompareMode::Strict,
        CompareMode::Lenient,
        CompareMode::NonExtensible,
        CompareMode::StrictOrder,
    ];

    /// Returns the mode with the given pair of switches.
    pub const fn from_flags(strict_order: bool, extensible: bool) -> Self {
        match (strict_order, extensible) {
            (true, false) => CompareMode::Strict,
            (false, true) => CompareMode::Lenient,
            (false, false) => CompareMode::NonExtensible,
            (true, true) => CompareMode::StrictOrder,
        }
    }

    /// Whether actual objects may contain fields absent from expected.
    pub const fn is_extensible(&self) -> bool {
        matches!(self, CompareMode::Lenient | CompareMode::StrictOrder)
    }

    /// Whether arrays have to be in the same order.
    pub const fn has_strict_order(&self) -> bool {
        matches!(self, CompareMode::Strict | CompareMode::StrictOrder)
    }

    /// Change the mode's array ordering, keeping its extensibility.
    pub const fn with_strict_order(self, strict_order: bool) -> Self {
        Self::from_flags(strict_order, self.is_extensible())
    }

    /// Change the mode's extensibility, keeping its array ordering.
    pub const fn with_extensible(self, extensible: bool) -> Self {
        Self::from_flags(self.has_strict_order(), extensible)
    }
}

/// `true` selects [`CompareMode::Strict`], `false` selects [`CompareMode::Lenient`].
impl From<bool> for CompareMode {
    fn from(strict: bool) -> Self {
        if strict {
            CompareMode::Strict
        } else {
            CompareMode::Lenient
        }
    }
}

impl fmt::Display for CompareMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareMode::Strict => write!(f, "strict"),
            CompareMode::Lenient => write!(f, "lenient"),
            CompareMode::NonExtensible => write!(f, "non-extensible"),
            CompareMode::StrictOrder => write!(f, "strict-order"),
        }
    }
}

impl FromStr for CompareMode {
    type Err = CompareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "strict" => Ok(CompareMode::Strict),
            "lenient" => Ok(CompareMode::Lenient),
            "non-extensible" => Ok(CompareMode::NonExtensible),
            "strict-order" => Ok(CompareMode::StrictOrder),
            _ => Err(CompareError::InvalidMode(s.to_string())),
        }
    }
}
