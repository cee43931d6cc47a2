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

//! Durable learner snapshots.
//!
//! The in-memory `LearnerState` is the source of truth. After every
//! transition the repository writes the new snapshot to its store; if that
//! write fails, the failure is logged and the new state is still returned.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::collections::HashMap;

use crate::error::Fallible;
use crate::progress;
use crate::snapshot::export_snapshot;
use crate::snapshot::import_snapshot;
use crate::types::item::Category;
use crate::types::item::ItemId;
use crate::types::learner::LearnerState;
use crate::types::quality::Quality;
use crate::types::timestamp::Timestamp;

/// The key snapshots are stored under unless configured otherwise.
pub const STORAGE_KEY: &str = "kanastarter_progress";

/// A string key-value store, shaped like browser `localStorage`.
pub trait SnapshotStore {
    fn get(&self, key: &str) -> Fallible<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Fallible<()>;

    fn remove(&self, key: &str) -> Fallible<()>;
}

/// A store that lives for as long as the process does.
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn get(&self, key: &str) -> Fallible<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Fallible<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Fallible<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

pub struct ProgressRepository<S: SnapshotStore> {
    store: S,
    key: String,
}

impl<S: SnapshotStore> ProgressRepository<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads the persisted snapshot. Falls back to the defaults if there is
    /// none or it can't be read.
    pub fn load(&self) -> LearnerState {
        let text = match self.store.get(&self.key) {
            Ok(Some(text)) => text,
            Ok(None) => return LearnerState::default(),
            Err(e) => {
                log::error!("Failed to load progress: {e}");
                return LearnerState::default();
            }
        };
        match import_snapshot(&text) {
            Ok(state) => state,
            Err(e) => {
                log::warn!("Discarding unreadable progress snapshot: {e}");
                LearnerState::default()
            }
        }
    }

    pub fn save(&self, state: &LearnerState) -> Fallible<()> {
        let text = export_snapshot(state)?;
        self.store.set(&self.key, &text)
    }

    /// Deletes the persisted snapshot and returns the defaults.
    pub fn reset(&self) -> Fallible<LearnerState> {
        self.store.remove(&self.key)?;
        Ok(LearnerState::default())
    }

    /// Parses an exported snapshot and makes it the current one.
    pub fn import(&self, text: &str) -> Fallible<LearnerState> {
        let state = import_snapshot(text)?;
        Ok(self.commit(state))
    }

    pub fn record_answer(
        &self,
        state: LearnerState,
        item_id: &ItemId,
        quality: Quality,
        now: Timestamp,
    ) -> LearnerState {
        log::debug!("Recording quality {quality} for {item_id}.");
        self.commit(progress::apply_answer(state, item_id, quality, now))
    }

    pub fn record_lesson(
        &self,
        state: LearnerState,
        results: &[(ItemId, Quality)],
        now: Timestamp,
    ) -> LearnerState {
        self.commit(progress::apply_lesson(state, results, now))
    }

    pub fn add_study_time(&self, state: LearnerState, minutes: u32, now: Timestamp) -> LearnerState {
        self.commit(progress::add_study_time(state, minutes, now))
    }

    pub fn complete_onboarding(
        &self,
        state: LearnerState,
        goals: BTreeSet<Category>,
        daily_goal_minutes: u32,
    ) -> Fallible<LearnerState> {
        let state = progress::complete_onboarding(state, goals, daily_goal_minutes)?;
        Ok(self.commit(state))
    }

    pub fn set_goals(&self, state: LearnerState, goals: BTreeSet<Category>) -> Fallible<LearnerState> {
        let state = progress::set_goals(state, goals)?;
        Ok(self.commit(state))
    }

    pub fn toggle_goal(&self, state: LearnerState, category: Category) -> LearnerState {
        self.commit(progress::toggle_goal(state, category))
    }

    pub fn set_daily_goal(&self, state: LearnerState, minutes: u32) -> Fallible<LearnerState> {
        let state = progress::set_daily_goal(state, minutes)?;
        Ok(self.commit(state))
    }

    /// Persists a new state, logging rather than propagating failures.
    fn commit(&self, state: LearnerState) -> LearnerState {
        if let Err(e) = self.save(&state) {
            log::error!("Failed to save progress: {e}");
        }
        state
    }
}
