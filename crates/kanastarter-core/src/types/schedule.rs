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

use serde::Deserialize;
use serde::Serialize;

use crate::sm2::Ease;
use crate::sm2::INITIAL_EASE;
use crate::sm2::Interval;
use crate::sm2::accuracy;
use crate::sm2::ease_after_failure;
use crate::sm2::ease_after_success;
use crate::sm2::interval_after_success;
use crate::sm2::is_mastered;
use crate::sm2::is_weak;
use crate::types::item::ItemId;
use crate::types::quality::Quality;
use crate::types::timestamp::Timestamp;

/// Scheduling information for a single item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredRecord", into = "StoredRecord")]
pub struct ItemScheduleRecord {
    pub item_id: ItemId,
    /// Multiplier for interval growth. Never below `MIN_EASE`.
    pub ease: Ease,
    /// Days until the next review. Zero means due immediately.
    pub interval: Interval,
    /// Number of answers recorded.
    pub review_count: u32,
    /// Number of answers with a passing quality.
    pub correct_count: u32,
    pub last_reviewed: Option<Timestamp>,
    /// The item is due once this moment has passed.
    pub next_review: Option<Timestamp>,
}

impl ItemScheduleRecord {
    /// The record of an item that has never been answered.
    pub fn new(item_id: ItemId) -> Self {
        Self {
            item_id,
            ease: INITIAL_EASE,
            interval: 0,
            review_count: 0,
            correct_count: 0,
            last_reviewed: None,
            next_review: None,
        }
    }

    pub fn accuracy(&self) -> Option<f64> {
        accuracy(self.correct_count, self.review_count)
    }

    pub fn is_mastered(&self) -> bool {
        is_mastered(self.correct_count, self.review_count)
    }

    pub fn is_weak(&self) -> bool {
        is_weak(self.correct_count, self.review_count)
    }

    pub fn is_due(&self, now: Timestamp) -> bool {
        match self.next_review {
            None => true,
            Some(next_review) => next_review <= now,
        }
    }
}

/// Computes the record after answering an item with the given quality.
pub fn compute_next_schedule(
    record: &ItemScheduleRecord,
    quality: Quality,
    now: Timestamp,
) -> ItemScheduleRecord {
    let review_count = record.review_count.saturating_add(1);
    let (ease, interval, correct_count): (Ease, Interval, u32) = if quality.is_success() {
        (
            ease_after_success(record.ease, quality),
            interval_after_success(record.interval, record.ease),
            record.correct_count.saturating_add(1),
        )
    } else {
        (ease_after_failure(record.ease), 0, record.correct_count)
    };
    ItemScheduleRecord {
        item_id: record.item_id.clone(),
        ease,
        interval,
        review_count,
        correct_count,
        last_reviewed: Some(now),
        next_review: Some(now.plus_days(interval)),
    }
}

/// On-disk shape of a record. `mastered` is written for readers of the
/// snapshot, and ignored on the way back in.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord {
    item_id: ItemId,
    ease: Ease,
    interval: Interval,
    review_count: u32,
    correct_count: u32,
    last_reviewed: Option<Timestamp>,
    next_review: Option<Timestamp>,
    #[serde(default)]
    mastered: bool,
}

impl From<StoredRecord> for ItemScheduleRecord {
    fn from(stored: StoredRecord) -> Self {
        Self {
            item_id: stored.item_id,
            ease: stored.ease,
            interval: stored.interval,
            review_count: stored.review_count,
            correct_count: stored.correct_count,
            last_reviewed: stored.last_reviewed,
            next_review: stored.next_review,
        }
    }
}

impl From<ItemScheduleRecord> for StoredRecord {
    fn from(record: ItemScheduleRecord) -> Self {
        let mastered = record.is_mastered();
        Self {
            item_id: record.item_id,
            ease: record.ease,
            interval: record.interval,
            review_count: record.review_count,
            correct_count: record.correct_count,
            last_reviewed: record.last_reviewed,
            next_review: record.next_review,
            mastered,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::error::Fallible;
    use crate::sm2::MIN_EASE;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn make_timestamp(s: &str) -> Timestamp {
        let ndt = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.3f").unwrap();
        Timestamp::new(ndt)
    }

    fn q(value: u8) -> Quality {
        Quality::new(value).unwrap()
    }

    fn fresh() -> ItemScheduleRecord {
        ItemScheduleRecord::new(ItemId::from("h-a"))
    }

    #[test]
    fn test_new_record() {
        let record = fresh();
        assert_eq!(record.ease, 2.5);
        assert_eq!(record.interval, 0);
        assert_eq!(record.review_count, 0);
        assert_eq!(record.correct_count, 0);
        assert_eq!(record.last_reviewed, None);
        assert_eq!(record.next_review, None);
        assert!(!record.is_mastered());
        assert_eq!(record.accuracy(), None);
    }

    /// Two perfect answers, then a miss a week in.
    #[test]
    fn test_scenario() {
        let day0 = make_timestamp("2024-01-01T09:00:00.000");
        let day1 = make_timestamp("2024-01-02T09:00:00.000");
        let day7 = make_timestamp("2024-01-08T09:00:00.000");

        let first = compute_next_schedule(&fresh(), q(5), day0);
        assert_eq!(first.interval, 1);
        assert!(approx_eq(first.ease, 2.6));
        assert_eq!(first.last_reviewed, Some(day0));
        assert_eq!(first.next_review, Some(day1));
        assert!(!first.is_mastered());

        let second = compute_next_schedule(&first, q(5), day1);
        assert_eq!(second.interval, 6);
        assert!(approx_eq(second.ease, 2.7));

        let third = compute_next_schedule(&second, q(1), day7);
        assert_eq!(third.interval, 0);
        assert!(approx_eq(third.ease, second.ease - 0.2));
        assert_eq!(third.correct_count, 2);
        assert_eq!(third.review_count, 3);
        assert_eq!(third.next_review, Some(day7));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let now = make_timestamp("2024-01-01T09:00:00.000");
        let record = fresh();
        let before = record.clone();
        let _ = compute_next_schedule(&record, q(5), now);
        assert_eq!(record, before);
    }

    #[test]
    fn test_interval_sequence_for_perfect_answers() {
        let mut now = make_timestamp("2024-01-01T09:00:00.000");
        let mut record = fresh();
        let mut intervals = vec![record.interval];
        for _ in 0..6 {
            let prior_ease = record.ease;
            let prior_interval = record.interval;
            record = compute_next_schedule(&record, q(5), now);
            if prior_interval > 1 {
                let expected = (f64::from(prior_interval) * prior_ease).round() as u32;
                assert_eq!(record.interval, expected);
            }
            intervals.push(record.interval);
            now = record.next_review.unwrap();
        }
        assert_eq!(&intervals[..4], &[0, 1, 6, 16]);
        assert!(intervals.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_failure_resets_interval() {
        let now = make_timestamp("2024-06-01T09:00:00.000");
        for interval in [0, 1, 6, 42, 365] {
            let record = ItemScheduleRecord {
                interval,
                review_count: 3,
                correct_count: 3,
                ..fresh()
            };
            let next = compute_next_schedule(&record, q(2), now);
            assert_eq!(next.interval, 0);
            assert_eq!(next.next_review, Some(now));
            assert!(next.is_due(now));
        }
    }

    #[test]
    fn test_ease_never_below_floor() {
        let now = make_timestamp("2024-01-01T09:00:00.000");
        for quality in 0..=5 {
            let mut record = fresh();
            for _ in 0..20 {
                record = compute_next_schedule(&record, q(quality), now);
                assert!(record.ease >= MIN_EASE);
            }
        }
        // Alternating passes and failures.
        let mut record = fresh();
        for i in 0..40u8 {
            record = compute_next_schedule(&record, q(i % 4), now);
            assert!(record.ease >= MIN_EASE);
        }
    }

    #[test]
    fn test_mastery_is_recomputed() {
        let now = make_timestamp("2024-01-01T09:00:00.000");
        let mut record = fresh();
        for _ in 0..4 {
            record = compute_next_schedule(&record, q(5), now);
            assert!(!record.is_mastered());
        }
        record = compute_next_schedule(&record, q(5), now);
        assert!(record.is_mastered());

        // 5/6 is still above 80%.
        record = compute_next_schedule(&record, q(0), now);
        assert!(record.is_mastered());

        // 5/7 is not.
        record = compute_next_schedule(&record, q(0), now);
        assert!(!record.is_mastered());

        record = compute_next_schedule(&record, q(4), now);
        record = compute_next_schedule(&record, q(4), now);
        record = compute_next_schedule(&record, q(4), now);
        // 8/10.
        assert!(record.is_mastered());
    }

    #[test]
    fn test_serialization_format() -> Fallible<()> {
        let now = make_timestamp("2024-01-01T09:00:00.000");
        let record = compute_next_schedule(&fresh(), q(5), now);
        let value: serde_json::Value = serde_json::to_value(&record)?;
        assert_eq!(value["itemId"], "h-a");
        assert_eq!(value["interval"], 1);
        assert_eq!(value["reviewCount"], 1);
        assert_eq!(value["correctCount"], 1);
        assert_eq!(value["lastReviewed"], "2024-01-01T09:00:00.000");
        assert_eq!(value["nextReview"], "2024-01-02T09:00:00.000");
        assert_eq!(value["mastered"], false);
        Ok(())
    }

    #[test]
    fn test_stored_mastered_flag_is_ignored() -> Fallible<()> {
        let json = r#"{
            "itemId": "h-a",
            "ease": 2.5,
            "interval": 0,
            "reviewCount": 1,
            "correctCount": 0,
            "lastReviewed": null,
            "nextReview": null,
            "mastered": true
        }"#;
        let record: ItemScheduleRecord = serde_json::from_str(json)?;
        assert!(!record.is_mastered());
        Ok(())
    }
}
