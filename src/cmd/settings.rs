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

use kanastarter_core::error::Fallible;
use kanastarter_core::types::item::Category;
use kanastarter_core::types::learner::LearnerState;
use kanastarter_core::types::timestamp::Timestamp;

use crate::collection::Collection;

pub fn parse_category(s: &str) -> Result<Category, String> {
    Category::try_from(s.to_string()).map_err(|e| e.message().to_string())
}

pub fn onboard(directory: Option<String>, goals: Vec<Category>, minutes: u32) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let repository = &collection.repository;
    let goals: BTreeSet<Category> = goals.into_iter().collect();
    let state = repository.complete_onboarding(repository.load(), goals, minutes)?;
    print_goals(&state);
    Ok(())
}

pub fn set_goals(directory: Option<String>, goals: Vec<Category>) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let repository = &collection.repository;
    let state = repository.set_goals(repository.load(), goals.into_iter().collect())?;
    print_goals(&state);
    Ok(())
}

pub fn toggle_goal(directory: Option<String>, category: Category) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let repository = &collection.repository;
    let before = repository.load();
    let was_only_goal = before.selected_goals.len() == 1 && before.selected_goals.contains(&category);
    let state = repository.toggle_goal(before, category);
    if was_only_goal {
        log::warn!("{category} is the only goal, keeping it.");
    }
    print_goals(&state);
    Ok(())
}

pub fn set_daily_goal(directory: Option<String>, minutes: u32) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let repository = &collection.repository;
    let state = repository.set_daily_goal(repository.load(), minutes)?;
    println!("Daily goal: {} min", state.daily_goal_minutes);
    Ok(())
}

pub fn add_study_time(directory: Option<String>, minutes: u32, now: Timestamp) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let repository = &collection.repository;
    let state = repository.add_study_time(repository.load(), minutes, now);
    println!(
        "Total study time: {} min. Streak: {} day(s).",
        state.total_study_minutes, state.current_streak
    );
    Ok(())
}

fn print_goals(state: &LearnerState) {
    let goals: Vec<&str> = state.selected_goals.iter().map(Category::as_str).collect();
    println!(
        "Goals: {} ({} min/day)",
        goals.join(", "),
        state.daily_goal_minutes
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_collection;
    use crate::helper::make_timestamp;

    fn load(directory: &str) -> Fallible<LearnerState> {
        Ok(Collection::new(Some(directory.to_string()))?.repository.load())
    }

    #[test]
    fn test_onboarding() -> Fallible<()> {
        let directory = create_tmp_collection()?;
        onboard(Some(directory.clone()), vec![Category::Hiragana, Category::Hiragana], 15)?;
        let state = load(&directory)?;
        assert!(state.onboarding_complete);
        assert_eq!(state.selected_goals, BTreeSet::from([Category::Hiragana]));
        assert_eq!(state.daily_goal_minutes, 15);
        Ok(())
    }

    #[test]
    fn test_onboarding_requires_goals() -> Fallible<()> {
        let directory = create_tmp_collection()?;
        assert!(onboard(Some(directory.clone()), vec![], 15).is_err());
        assert!(!load(&directory)?.onboarding_complete);
        Ok(())
    }

    #[test]
    fn test_goal_changes() -> Fallible<()> {
        let directory = create_tmp_collection()?;
        set_goals(Some(directory.clone()), vec![Category::Katakana])?;
        toggle_goal(Some(directory.clone()), Category::Numbers)?;
        toggle_goal(Some(directory.clone()), Category::Katakana)?;
        toggle_goal(Some(directory.clone()), Category::Numbers)?;
        assert_eq!(load(&directory)?.selected_goals, BTreeSet::from([Category::Numbers]));
        assert!(set_goals(Some(directory), vec![]).is_err());
        Ok(())
    }

    #[test]
    fn test_daily_goal() -> Fallible<()> {
        let directory = create_tmp_collection()?;
        set_daily_goal(Some(directory.clone()), 20)?;
        assert_eq!(load(&directory)?.daily_goal_minutes, 20);
        assert!(set_daily_goal(Some(directory.clone()), 0).is_err());
        assert_eq!(load(&directory)?.daily_goal_minutes, 20);
        Ok(())
    }

    #[test]
    fn test_study_time() -> Fallible<()> {
        let directory = create_tmp_collection()?;
        let now = make_timestamp("2024-01-01T09:00:00.000");
        add_study_time(Some(directory.clone()), 5, now)?;
        add_study_time(Some(directory.clone()), 10, now.plus_days(1))?;
        let state = load(&directory)?;
        assert_eq!(state.total_study_minutes, 15);
        assert_eq!(state.current_streak, 2);
        Ok(())
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("numbers"), Ok(Category::Numbers));
        assert!(parse_category("kanji").is_err());
    }
}
