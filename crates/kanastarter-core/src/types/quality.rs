// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;

/// How well an answer was recalled, on the closed scale 0 to 5. A value of
/// this type is always in range.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Quality(u8);

impl Quality {
    pub const MAX: u8 = 5;

    /// Answers at or above this quality count as successful recall.
    pub const PASSING: u8 = 3;

    /// What answer controls report for a correct answer.
    pub const CORRECT: Quality = Quality(5);

    /// What answer controls report for an incorrect answer.
    pub const INCORRECT: Quality = Quality(1);

    pub fn new(value: u8) -> Fallible<Self> {
        if value > Self::MAX {
            return fail(format!(
                "quality must be between 0 and {}, got {value}",
                Self::MAX
            ));
        }
        Ok(Self(value))
    }

    /// Clamps an arbitrary integer into the valid range.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(0, i64::from(Self::MAX)) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_success(self) -> bool {
        self.0 >= Self::PASSING
    }
}

impl From<Quality> for f64 {
    fn from(q: Quality) -> f64 {
        f64::from(q.0)
    }
}

impl From<Quality> for u8 {
    fn from(q: Quality) -> u8 {
        q.0
    }
}

impl TryFrom<u8> for Quality {
    type Error = ErrorReport;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Quality::new(value)
    }
}

impl Display for Quality {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
