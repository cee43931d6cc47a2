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

//! Transitions and queries over a learner snapshot. Every transition takes
//! the old state by value and returns the new one.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::streak::update_streak;
use crate::types::item::Category;
use crate::types::item::ItemId;
use crate::types::item::LearningItem;
use crate::types::learner::LearnerState;
use crate::types::quality::Quality;
use crate::types::schedule::ItemScheduleRecord;
use crate::types::schedule::compute_next_schedule;
use crate::types::timestamp::Timestamp;

pub fn apply_answer(
    state: LearnerState,
    item_id: &ItemId,
    quality: Quality,
    now: Timestamp,
) -> LearnerState {
    let mut state = state;
    let record = state
        .items
        .get(item_id)
        .cloned()
        .unwrap_or_else(|| ItemScheduleRecord::new(item_id.clone()));
    let updated = compute_next_schedule(&record, quality, now);
    state.items.insert(item_id.clone(), updated);
    update_streak(state, now)
}

/// Applies the results of a lesson in order.
pub fn apply_lesson(
    state: LearnerState,
    results: &[(ItemId, Quality)],
    now: Timestamp,
) -> LearnerState {
    results
        .iter()
        .fold(state, |state, (item_id, quality)| {
            apply_answer(state, item_id, *quality, now)
        })
}

pub fn add_study_time(state: LearnerState, minutes: u32, now: Timestamp) -> LearnerState {
    let state = LearnerState {
        total_study_minutes: state.total_study_minutes.saturating_add(minutes),
        ..state
    };
    update_streak(state, now)
}

pub fn complete_onboarding(
    state: LearnerState,
    goals: BTreeSet<Category>,
    daily_goal_minutes: u32,
) -> Fallible<LearnerState> {
    let state = set_goals(state, goals)?;
    let state = set_daily_goal(state, daily_goal_minutes)?;
    Ok(LearnerState {
        onboarding_complete: true,
        ..state
    })
}

pub fn set_goals(state: LearnerState, goals: BTreeSet<Category>) -> Fallible<LearnerState> {
    if goals.is_empty() {
        return fail("at least one goal must be selected.");
    }
    Ok(LearnerState {
        selected_goals: goals,
        ..state
    })
}

/// Adds the category if absent, removes it otherwise. The last remaining goal
/// can't be removed.
pub fn toggle_goal(state: LearnerState, category: Category) -> LearnerState {
    let mut state = state;
    if !state.selected_goals.contains(&category) {
        state.selected_goals.insert(category);
    } else if state.selected_goals.len() > 1 {
        state.selected_goals.remove(&category);
    }
    state
}

pub fn set_daily_goal(state: LearnerState, minutes: u32) -> Fallible<LearnerState> {
    if minutes == 0 {
        return fail("the daily goal must be at least one minute.");
    }
    Ok(LearnerState {
        daily_goal_minutes: minutes,
        ..state
    })
}

/// Items to review: never answered, or past their next review.
pub fn due_items<'a>(
    state: &LearnerState,
    catalog: &'a [LearningItem],
    now: Timestamp,
) -> Vec<&'a LearningItem> {
    catalog
        .iter()
        .filter(|item| match state.items.get(&item.id) {
            None => true,
            Some(record) => record.is_due(now),
        })
        .collect()
}

/// Items answered at least twice with low accuracy. Items with no record are
/// never weak, even though they are always due.
pub fn weak_items<'a>(state: &LearnerState, catalog: &'a [LearningItem]) -> Vec<&'a LearningItem> {
    catalog
        .iter()
        .filter(|item| {
            state
                .items
                .get(&item.id)
                .is_some_and(ItemScheduleRecord::is_weak)
        })
        .collect()
}

pub fn mastered_count(state: &LearnerState) -> usize {
    state.items.values().filter(|r| r.is_mastered()).count()
}

pub fn reviewed_count(state: &LearnerState) -> usize {
    state.items.values().filter(|r| r.review_count > 0).count()
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryProgress {
    pub category: Category,
    pub mastered: usize,
    pub total: usize,
    /// 0 to 100.
    pub percentage: f64,
}

/// Mastery per category, over the items of that category in the catalog.
pub fn category_progress(state: &LearnerState, catalog: &[LearningItem]) -> Vec<CategoryProgress> {
    Category::ALL
        .into_iter()
        .map(|category| {
            let items = catalog.iter().filter(|item| item.category == category);
            let total = items.clone().count();
            let mastered = items
                .filter(|item| state.items.get(&item.id).is_some_and(|r| r.is_mastered()))
                .count();
            let percentage = if total > 0 {
                (mastered as f64 / total as f64) * 100.0
            } else {
                0.0
            };
            CategoryProgress {
                category,
                mastered,
                total,
                percentage,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;

    fn make_timestamp(s: &str) -> Timestamp {
        let ndt = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.3f").unwrap();
        Timestamp::new(ndt)
    }

    fn catalog() -> Vec<LearningItem> {
        vec![
            LearningItem::new("h-a", Category::Hiragana, "あ"),
            LearningItem::new("h-i", Category::Hiragana, "い"),
            LearningItem::new("k-a", Category::Katakana, "ア"),
            LearningItem::new("n-1", Category::Numbers, "一"),
        ]
    }

    fn record(id: &str, reviews: u32, correct: u32, next_review: Option<Timestamp>) -> ItemScheduleRecord {
        ItemScheduleRecord {
            review_count: reviews,
            correct_count: correct,
            next_review,
            ..ItemScheduleRecord::new(ItemId::from(id))
        }
    }

    fn state_with(records: Vec<ItemScheduleRecord>) -> LearnerState {
        LearnerState {
            items: records.into_iter().map(|r| (r.item_id.clone(), r)).collect(),
            ..LearnerState::default()
        }
    }

    fn ids(items: Vec<&LearningItem>) -> Vec<&str> {
        items.into_iter().map(|item| item.id.as_str()).collect()
    }

    #[test]
    fn test_apply_answer_creates_record() {
        let now = make_timestamp("2024-01-01T09:00:00.000");
        let id = ItemId::from("h-a");
        let state = apply_answer(LearnerState::default(), &id, Quality::CORRECT, now);
        let record = state.item("h-a").unwrap();
        assert_eq!(record.review_count, 1);
        assert_eq!(record.interval, 1);
        assert_eq!(state.current_streak, 1);
        assert_eq!(state.last_study_date, Some(now));
    }

    #[test]
    fn test_apply_answer_updates_existing_record() {
        let day0 = make_timestamp("2024-01-01T09:00:00.000");
        let day1 = make_timestamp("2024-01-02T09:00:00.000");
        let id = ItemId::from("h-a");
        let state = apply_answer(LearnerState::default(), &id, Quality::CORRECT, day0);
        let state = apply_answer(state, &id, Quality::CORRECT, day1);
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.item("h-a").unwrap().interval, 6);
        assert_eq!(state.current_streak, 2);
    }

    #[test]
    fn test_apply_lesson() {
        let now = make_timestamp("2024-01-01T09:00:00.000");
        let results = vec![
            (ItemId::from("h-a"), Quality::CORRECT),
            (ItemId::from("h-i"), Quality::INCORRECT),
            (ItemId::from("h-a"), Quality::CORRECT),
        ];
        let state = apply_lesson(LearnerState::default(), &results, now);
        assert_eq!(state.item("h-a").unwrap().review_count, 2);
        assert_eq!(state.item("h-i").unwrap().correct_count, 0);
        assert_eq!(state.current_streak, 1);
    }

    #[test]
    fn test_due_items() {
        let now = make_timestamp("2024-01-10T09:00:00.000");
        let past = make_timestamp("2024-01-09T09:00:00.000");
        let future = make_timestamp("2024-01-11T09:00:00.000");
        let state = state_with(vec![
            record("h-a", 1, 1, Some(past)),
            record("h-i", 1, 1, Some(future)),
            record("k-a", 1, 0, Some(now)),
        ]);
        let catalog = catalog();
        assert_eq!(ids(due_items(&state, &catalog, now)), vec!["h-a", "k-a", "n-1"]);
    }

    #[test]
    fn test_record_without_next_review_is_due() {
        let now = make_timestamp("2024-01-10T09:00:00.000");
        let state = state_with(vec![record("h-a", 0, 0, None)]);
        let catalog = catalog();
        assert!(ids(due_items(&state, &catalog, now)).contains(&"h-a"));
    }

    #[test]
    fn test_weak_items() {
        let state = state_with(vec![
            record("h-a", 1, 0, None),
            record("h-i", 4, 2, None),
            record("k-a", 10, 7, None),
        ]);
        let catalog = catalog();
        assert_eq!(ids(weak_items(&state, &catalog)), vec!["h-i"]);
    }

    #[test]
    fn test_unreviewed_items_are_due_but_not_weak() {
        let now = make_timestamp("2024-01-10T09:00:00.000");
        let state = LearnerState::default();
        let catalog = catalog();
        assert_eq!(due_items(&state, &catalog, now).len(), catalog.len());
        assert!(weak_items(&state, &catalog).is_empty());
    }

    #[test]
    fn test_counts() {
        let state = state_with(vec![
            record("h-a", 5, 5, None),
            record("h-i", 5, 3, None),
            record("k-a", 0, 0, None),
        ]);
        assert_eq!(mastered_count(&state), 1);
        assert_eq!(reviewed_count(&state), 2);
    }

    #[test]
    fn test_category_progress() {
        let state = state_with(vec![record("h-a", 5, 5, None), record("k-a", 5, 1, None)]);
        let progress = category_progress(&state, &catalog()[..3]);
        assert_eq!(
            progress,
            vec![
                CategoryProgress {
                    category: Category::Hiragana,
                    mastered: 1,
                    total: 2,
                    percentage: 50.0,
                },
                CategoryProgress {
                    category: Category::Katakana,
                    mastered: 0,
                    total: 1,
                    percentage: 0.0,
                },
                CategoryProgress {
                    category: Category::Numbers,
                    mastered: 0,
                    total: 0,
                    percentage: 0.0,
                },
            ]
        );
    }

    #[test]
    fn test_complete_onboarding() -> Fallible<()> {
        let goals = BTreeSet::from([Category::Hiragana]);
        let state = complete_onboarding(LearnerState::default(), goals.clone(), 10)?;
        assert!(state.onboarding_complete);
        assert_eq!(state.selected_goals, goals);
        assert_eq!(state.daily_goal_minutes, 10);

        assert!(complete_onboarding(LearnerState::default(), BTreeSet::new(), 10).is_err());
        assert!(complete_onboarding(LearnerState::default(), goals, 0).is_err());
        Ok(())
    }

    #[test]
    fn test_toggle_goal_keeps_last() {
        let state = LearnerState::default();
        let state = toggle_goal(state, Category::Hiragana);
        let state = toggle_goal(state, Category::Numbers);
        assert_eq!(state.selected_goals.len(), 2);
        let state = toggle_goal(state, Category::Hiragana);
        assert_eq!(state.selected_goals, BTreeSet::from([Category::Numbers]));
        let state = toggle_goal(state, Category::Numbers);
        assert_eq!(state.selected_goals, BTreeSet::from([Category::Numbers]));
    }

    #[test]
    fn test_add_study_time_counts_towards_streak() {
        let now = make_timestamp("2024-01-01T09:00:00.000");
        let state = add_study_time(LearnerState::default(), 15, now);
        let state = add_study_time(state, 5, now);
        assert_eq!(state.total_study_minutes, 20);
        assert_eq!(state.current_streak, 1);
    }
}
