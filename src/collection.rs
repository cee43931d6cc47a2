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

use std::env::current_dir;
use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use kanastarter_core::catalog::parse_catalog_toml;
use kanastarter_core::error::Fallible;
use kanastarter_core::error::fail;
use kanastarter_core::repository::ProgressRepository;
use kanastarter_core::types::item::LearningItem;

use crate::db::Database;

pub const DB_FILE: &str = "kanastarter.db";
pub const CATALOG_FILE: &str = "catalog.toml";

/// A study directory: the progress database and the item catalog.
pub struct Collection {
    pub directory: PathBuf,
    pub repository: ProgressRepository<Database>,
    pub catalog: Vec<LearningItem>,
}

impl Collection {
    /// Opens the collection in `directory`, or the current directory.
    pub fn new(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        if !directory.exists() {
            return fail("directory does not exist.");
        }
        let directory = directory.canonicalize()?;
        let db = Database::new(&directory.join(DB_FILE))?;
        let catalog = load_catalog(&directory.join(CATALOG_FILE))?;
        log::debug!(
            "Opened collection at {} with {} catalog items.",
            directory.display(),
            catalog.len()
        );
        Ok(Self {
            directory,
            repository: ProgressRepository::new(db),
            catalog,
        })
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.catalog.iter().any(|item| item.id.as_str() == item_id)
    }
}

fn load_catalog(path: &Path) -> Fallible<Vec<LearningItem>> {
    if !path.exists() {
        log::warn!("No {CATALOG_FILE} in the collection, the catalog is empty.");
        return Ok(Vec::new());
    }
    let text = read_to_string(path)?;
    parse_catalog_toml(&text)
}
