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

use std::collections::BTreeSet;
use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use crate::types::item::Category;
use crate::types::item::ItemId;
use crate::types::schedule::ItemScheduleRecord;
use crate::types::timestamp::Timestamp;

pub const DEFAULT_DAILY_GOAL_MINUTES: u32 = 5;

/// Everything we know about a learner. Missing fields in a persisted
/// snapshot take their default values; `items` is replaced wholesale, not
/// merged per key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LearnerState {
    pub onboarding_complete: bool,
    pub selected_goals: BTreeSet<Category>,
    pub daily_goal_minutes: u32,
    pub current_streak: u32,
    /// Always at least `current_streak`.
    pub longest_streak: u32,
    pub last_study_date: Option<Timestamp>,
    pub total_study_minutes: u32,
    pub items: HashMap<ItemId, ItemScheduleRecord>,
}

impl Default for LearnerState {
    fn default() -> Self {
        Self {
            onboarding_complete: false,
            selected_goals: BTreeSet::new(),
            daily_goal_minutes: DEFAULT_DAILY_GOAL_MINUTES,
            current_streak: 0,
            longest_streak: 0,
            last_study_date: None,
            total_study_minutes: 0,
            items: HashMap::new(),
        }
    }
}

impl LearnerState {
    pub fn item(&self, item_id: &str) -> Option<&ItemScheduleRecord> {
        self.items.get(item_id)
    }
}
