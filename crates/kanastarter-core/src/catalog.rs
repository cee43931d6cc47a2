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

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::item::LearningItem;

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    items: Vec<LearningItem>,
}

/// Parses a TOML catalog of `[[items]]` tables.
pub fn parse_catalog_toml(text: &str) -> Fallible<Vec<LearningItem>> {
    let file: CatalogFile = toml::from_str(text)?;
    check_unique(file.items)
}

/// Parses a JSON array of items.
pub fn parse_catalog_json(text: &str) -> Fallible<Vec<LearningItem>> {
    let items: Vec<LearningItem> = serde_json::from_str(text)?;
    check_unique(items)
}

fn check_unique(items: Vec<LearningItem>) -> Fallible<Vec<LearningItem>> {
    let mut seen = HashSet::new();
    for item in &items {
        if !seen.insert(&item.id) {
            return fail(format!("duplicate item in catalog: {}", item.id));
        }
    }
    Ok(items)
}
