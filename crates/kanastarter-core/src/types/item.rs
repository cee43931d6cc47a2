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

use std::borrow::Borrow;
use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::fail;

/// The stable key of a learning item, e.g. `h-ka`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of content an item belongs to.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Hiragana,
    Katakana,
    Numbers,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Hiragana, Category::Katakana, Category::Numbers];

    pub fn as_str(&self) -> &str {
        match self {
            Category::Hiragana => "hiragana",
            Category::Katakana => "katakana",
            Category::Numbers => "numbers",
        }
    }
}

impl TryFrom<String> for Category {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "hiragana" => Ok(Category::Hiragana),
            "katakana" => Ok(Category::Katakana),
            "numbers" => Ok(Category::Numbers),
            _ => fail(format!("invalid category: {value}")),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An entry in the item catalog. The scheduler only looks at `id` and
/// `category`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LearningItem {
    pub id: ItemId,
    pub category: Category,
    #[serde(default)]
    pub display: String,
}

impl LearningItem {
    pub fn new(id: impl Into<String>, category: Category, display: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(id),
            category,
            display: display.into(),
        }
    }
}
