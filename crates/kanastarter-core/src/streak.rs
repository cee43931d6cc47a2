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

use crate::types::date::Date;
use crate::types::learner::LearnerState;
use crate::types::timestamp::Timestamp;

/// Records that the learner studied at `now`. Streaks count calendar days,
/// so studying again on the same day leaves the state untouched.
pub fn update_streak(state: LearnerState, now: Timestamp) -> LearnerState {
    let today: Date = now.date();
    let last_study: Option<Date> = state.last_study_date.map(Timestamp::date);
    if last_study == Some(today) {
        return state;
    }
    let current_streak = if last_study.is_some() && last_study == today.yesterday() {
        state.current_streak.saturating_add(1)
    } else {
        1
    };
    LearnerState {
        current_streak,
        longest_streak: u32::max(state.longest_streak, current_streak),
        last_study_date: Some(now),
        ..state
    }
}
