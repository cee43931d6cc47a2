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

//! The JSON form of a learner snapshot.

use crate::error::Fallible;
use crate::types::learner::DEFAULT_DAILY_GOAL_MINUTES;
use crate::types::learner::LearnerState;

pub fn export_snapshot(state: &LearnerState) -> Fallible<String> {
    Ok(serde_json::to_string_pretty(state)?)
}

/// Parses a snapshot. Top-level fields that are missing take their default
/// values. Out-of-range aggregates are repaired rather than rejected, so a
/// slightly inconsistent snapshot doesn't cost the learner their history.
pub fn import_snapshot(text: &str) -> Fallible<LearnerState> {
    let state: LearnerState = serde_json::from_str(text)?;
    Ok(repair(state))
}

fn repair(state: LearnerState) -> LearnerState {
    let daily_goal_minutes = if state.daily_goal_minutes == 0 {
        log::warn!("snapshot has a zero daily goal, using the default.");
        DEFAULT_DAILY_GOAL_MINUTES
    } else {
        state.daily_goal_minutes
    };
    LearnerState {
        daily_goal_minutes,
        longest_streak: u32::max(state.longest_streak, state.current_streak),
        ..state
    }
}
