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

//! WASM bindings for kanastarter - runs the scheduler in the browser.

use std::collections::BTreeSet;
use std::mem::take;

use wasm_bindgen::prelude::*;
use web_sys::console;

use kanastarter_core::catalog::parse_catalog_json;
use kanastarter_core::error::ErrorReport;
use kanastarter_core::progress::category_progress;
use kanastarter_core::progress::due_items;
use kanastarter_core::progress::mastered_count;
use kanastarter_core::progress::reviewed_count;
use kanastarter_core::progress::weak_items;
use kanastarter_core::repository::ProgressRepository;
use kanastarter_core::snapshot::export_snapshot;
use kanastarter_core::types::item::Category;
use kanastarter_core::types::item::ItemId;
use kanastarter_core::types::item::LearningItem;
use kanastarter_core::types::learner::LearnerState;
use kanastarter_core::types::quality::Quality;
use kanastarter_core::types::timestamp::Timestamp;

mod storage;

use storage::Storage;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console::log_1(&"kanastarter WASM initialized".into());
}

fn js_error(e: ErrorReport) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_timestamp(now_str: &str) -> Result<Timestamp, JsValue> {
    Timestamp::try_from(now_str.to_string())
        .map_err(|e| JsValue::from_str(&format!("Invalid timestamp: {}", e)))
}

fn parse_goals(goals_json: &str) -> Result<BTreeSet<Category>, JsValue> {
    let goals: Vec<Category> = serde_json::from_str(goals_json)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse goals: {}", e)))?;
    Ok(goals.into_iter().collect())
}

fn items_json(items: Vec<&LearningItem>) -> String {
    serde_json::to_string(&items).unwrap_or_else(|_| "[]".to_string())
}

/// The learner's progress, managed from JavaScript.
#[wasm_bindgen]
pub struct KanaApp {
    /// The item catalog supplied by the page
    catalog: Vec<LearningItem>,
    /// The current snapshot
    state: LearnerState,
    /// Persists every new snapshot to localStorage
    repository: ProgressRepository<Storage>,
}

#[wasm_bindgen]
impl KanaApp {
    /// Create a new app, restoring progress from localStorage.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let repository = ProgressRepository::new(Storage::new());
        let state = repository.load();
        Self {
            catalog: Vec::new(),
            state,
            repository,
        }
    }

    /// Load the item catalog from a JSON array of `{id, category, display}`.
    #[wasm_bindgen]
    pub fn load_catalog(&mut self, catalog_json: &str) -> Result<usize, JsValue> {
        self.catalog = parse_catalog_json(catalog_json).map_err(js_error)?;
        Ok(self.catalog.len())
    }

    /// Record an answer. Out-of-range qualities are clamped to 0..=5.
    #[wasm_bindgen]
    pub fn record_answer(&mut self, item_id: &str, quality: i32, now_str: &str) -> Result<(), JsValue> {
        let now = parse_timestamp(now_str)?;
        let quality = Quality::clamped(i64::from(quality));
        self.state = self
            .repository
            .record_answer(take(&mut self.state), &ItemId::from(item_id), quality, now);
        Ok(())
    }

    /// Record the results of a lesson, given as an array of `[itemId, quality]` pairs.
    #[wasm_bindgen]
    pub fn record_lesson(&mut self, results_json: &str, now_str: &str) -> Result<(), JsValue> {
        let now = parse_timestamp(now_str)?;
        let results: Vec<(String, i64)> = serde_json::from_str(results_json)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse lesson results: {}", e)))?;
        let results: Vec<(ItemId, Quality)> = results
            .into_iter()
            .map(|(id, quality)| (ItemId::new(id), Quality::clamped(quality)))
            .collect();
        self.state = self
            .repository
            .record_lesson(take(&mut self.state), &results, now);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn add_study_time(&mut self, minutes: u32, now_str: &str) -> Result<(), JsValue> {
        let now = parse_timestamp(now_str)?;
        self.state = self
            .repository
            .add_study_time(take(&mut self.state), minutes, now);
        Ok(())
    }

    /// Finish onboarding. `goals_json` is an array of category names.
    #[wasm_bindgen]
    pub fn complete_onboarding(&mut self, goals_json: &str, daily_minutes: u32) -> Result<(), JsValue> {
        let goals = parse_goals(goals_json)?;
        let state = self
            .repository
            .complete_onboarding(self.state.clone(), goals, daily_minutes)
            .map_err(js_error)?;
        self.state = state;
        Ok(())
    }

    #[wasm_bindgen]
    pub fn set_goals(&mut self, goals_json: &str) -> Result<(), JsValue> {
        let goals = parse_goals(goals_json)?;
        let state = self
            .repository
            .set_goals(self.state.clone(), goals)
            .map_err(js_error)?;
        self.state = state;
        Ok(())
    }

    #[wasm_bindgen]
    pub fn toggle_goal(&mut self, category: &str) -> Result<(), JsValue> {
        let category = Category::try_from(category.to_string()).map_err(js_error)?;
        self.state = self.repository.toggle_goal(take(&mut self.state), category);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn set_daily_goal(&mut self, minutes: u32) -> Result<(), JsValue> {
        let state = self
            .repository
            .set_daily_goal(self.state.clone(), minutes)
            .map_err(js_error)?;
        self.state = state;
        Ok(())
    }

    /// Items due at `now_str`, as a JSON array.
    #[wasm_bindgen]
    pub fn due_items(&self, now_str: &str) -> Result<String, JsValue> {
        let now = parse_timestamp(now_str)?;
        Ok(items_json(due_items(&self.state, &self.catalog, now)))
    }

    /// Weak items, as a JSON array.
    #[wasm_bindgen]
    pub fn weak_items(&self) -> String {
        items_json(weak_items(&self.state, &self.catalog))
    }

    #[wasm_bindgen]
    pub fn mastered_count(&self) -> usize {
        mastered_count(&self.state)
    }

    #[wasm_bindgen]
    pub fn reviewed_count(&self) -> usize {
        reviewed_count(&self.state)
    }

    /// Per-category mastery, as a JSON array.
    #[wasm_bindgen]
    pub fn category_progress(&self) -> String {
        serde_json::to_string(&category_progress(&self.state, &self.catalog))
            .unwrap_or_else(|_| "[]".to_string())
    }

    /// The schedule of one item as JSON, if it has been answered.
    #[wasm_bindgen]
    pub fn item_schedule(&self, item_id: &str) -> Option<String> {
        self.state
            .item(item_id)
            .and_then(|record| serde_json::to_string(record).ok())
    }

    /// The whole snapshot as compact JSON.
    #[wasm_bindgen]
    pub fn state_json(&self) -> String {
        serde_json::to_string(&self.state).unwrap_or_else(|_| "{}".to_string())
    }

    #[wasm_bindgen]
    pub fn export_snapshot(&self) -> Result<String, JsValue> {
        export_snapshot(&self.state).map_err(js_error)
    }

    /// Replace the current progress with an exported snapshot. Returns
    /// `false`, leaving progress untouched, if the text can't be read.
    #[wasm_bindgen]
    pub fn import_snapshot(&mut self, text: &str) -> bool {
        match self.repository.import(text) {
            Ok(state) => {
                self.state = state;
                true
            }
            Err(e) => {
                console::warn_1(&format!("Failed to import progress: {}", e).into());
                false
            }
        }
    }

    /// Delete all progress.
    #[wasm_bindgen]
    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.state = self.repository.reset().map_err(js_error)?;
        Ok(())
    }
}

impl Default for KanaApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the current local time in the timestamp format the app expects.
#[wasm_bindgen]
pub fn now_timestamp() -> String {
    let date = js_sys::Date::new_0();
    let year = date.get_full_year();
    let month = date.get_month() + 1;
    let day = date.get_date();
    let hours = date.get_hours();
    let minutes = date.get_minutes();
    let seconds = date.get_seconds();
    let millis = date.get_milliseconds();
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}",
        year, month, day, hours, minutes, seconds, millis
    )
}
