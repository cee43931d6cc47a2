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

use clap::ValueEnum;
use kanastarter_core::error::Fallible;
use kanastarter_core::progress::CategoryProgress;
use kanastarter_core::progress::category_progress;
use kanastarter_core::progress::due_items;
use kanastarter_core::progress::mastered_count;
use kanastarter_core::progress::reviewed_count;
use kanastarter_core::progress::weak_items;
use kanastarter_core::types::item::Category;
use kanastarter_core::types::learner::LearnerState;
use kanastarter_core::types::timestamp::Timestamp;
use serde::Serialize;

use crate::collection::Collection;

#[derive(ValueEnum, Clone, Copy, PartialEq)]
pub enum StatsFormat {
    /// Human-readable summary.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Serialize, Debug, PartialEq)]
pub struct Stats {
    pub onboarding_complete: bool,
    pub selected_goals: Vec<Category>,
    pub daily_goal_minutes: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_study_minutes: u32,
    pub catalog_size: usize,
    pub reviewed: usize,
    pub mastered: usize,
    pub due: usize,
    pub weak: usize,
    pub categories: Vec<CategoryProgress>,
}

pub fn print_stats(directory: Option<String>, format: StatsFormat, now: Timestamp) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let state = collection.repository.load();
    let stats = compute_stats(&state, &collection, now);
    match format {
        StatsFormat::Text => print!("{}", render_text(&stats)),
        StatsFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
    }
    Ok(())
}

fn compute_stats(state: &LearnerState, collection: &Collection, now: Timestamp) -> Stats {
    let catalog = &collection.catalog;
    // Only categories the learner studies are shown.
    let categories = category_progress(state, catalog)
        .into_iter()
        .filter(|p| state.selected_goals.contains(&p.category))
        .collect();
    Stats {
        onboarding_complete: state.onboarding_complete,
        selected_goals: state.selected_goals.iter().copied().collect(),
        daily_goal_minutes: state.daily_goal_minutes,
        current_streak: state.current_streak,
        longest_streak: state.longest_streak,
        total_study_minutes: state.total_study_minutes,
        catalog_size: catalog.len(),
        reviewed: reviewed_count(state),
        mastered: mastered_count(state),
        due: due_items(state, catalog, now).len(),
        weak: weak_items(state, catalog).len(),
        categories,
    }
}

fn render_text(stats: &Stats) -> String {
    let mut out = String::new();
    if !stats.onboarding_complete {
        out.push_str("Onboarding not complete.\n");
    }
    out.push_str(&format!(
        "Streak: {} day(s) (best: {})\n",
        stats.current_streak, stats.longest_streak
    ));
    out.push_str(&format!(
        "Study time: {} min (daily goal: {} min)\n",
        stats.total_study_minutes, stats.daily_goal_minutes
    ));
    out.push_str(&format!(
        "Items: {} reviewed, {} mastered, {} due, {} weak, {} in catalog\n",
        stats.reviewed, stats.mastered, stats.due, stats.weak, stats.catalog_size
    ));
    for p in &stats.categories {
        out.push_str(&format!(
            "{}: {}/{} mastered ({:.0}%)\n",
            p.category, p.mastered, p.total, p.percentage
        ));
    }
    out
}
