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

use kanastarter_core::error::Fallible;
use kanastarter_core::types::item::ItemId;
use kanastarter_core::types::quality::Quality;
use kanastarter_core::types::schedule::ItemScheduleRecord;
use kanastarter_core::types::timestamp::Timestamp;

use crate::collection::Collection;

pub fn record_answer(
    directory: Option<String>,
    item_id: String,
    quality: Quality,
    now: Timestamp,
) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    warn_if_unknown(&collection, &item_id);
    let item_id = ItemId::new(item_id);
    let repository = &collection.repository;
    let state = repository.record_answer(repository.load(), &item_id, quality, now);
    if let Some(record) = state.item(item_id.as_str()) {
        println!("{}", describe_record(record));
    }
    Ok(())
}

/// Records a whole lesson's results, in order, with a single write.
pub fn record_lesson(
    directory: Option<String>,
    results: Vec<(String, Quality)>,
    now: Timestamp,
) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let results: Vec<(ItemId, Quality)> = results
        .into_iter()
        .map(|(item_id, quality)| {
            warn_if_unknown(&collection, &item_id);
            (ItemId::new(item_id), quality)
        })
        .collect();
    let repository = &collection.repository;
    let state = repository.record_lesson(repository.load(), &results, now);
    let correct = results.iter().filter(|(_, q)| q.is_success()).count();
    println!(
        "Lesson recorded: {correct}/{} correct. Streak: {} day(s).",
        results.len(),
        state.current_streak
    );
    Ok(())
}

/// Parses an `item=quality` pair as given on the command line.
pub fn parse_lesson_result(s: &str) -> Result<(String, Quality), String> {
    let (item_id, quality) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected ITEM=QUALITY, got '{s}'"))?;
    if item_id.is_empty() {
        return Err(format!("missing item in '{s}'"));
    }
    let quality: u8 = quality
        .parse()
        .map_err(|_| format!("invalid quality in '{s}'"))?;
    let quality = Quality::new(quality).map_err(|e| e.message().to_string())?;
    Ok((item_id.to_string(), quality))
}

pub fn describe_record(record: &ItemScheduleRecord) -> String {
    let next_review = record
        .next_review
        .map(|ts| ts.to_string())
        .unwrap_or_else(|| "now".to_string());
    let mastered = if record.is_mastered() { ", mastered" } else { "" };
    format!(
        "{}: next review {} (interval {} day(s), ease {:.2}, {}/{} correct{})",
        record.item_id,
        next_review,
        record.interval,
        record.ease,
        record.correct_count,
        record.review_count,
        mastered
    )
}

fn warn_if_unknown(collection: &Collection, item_id: &str) {
    if !collection.catalog.is_empty() && !collection.contains(item_id) {
        log::warn!("'{item_id}' is not in the catalog.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_collection;
    use crate::helper::make_timestamp;

    #[test]
    fn test_record_answer() -> Fallible<()> {
        let directory = create_tmp_collection()?;
        let now = make_timestamp("2024-01-01T09:00:00.000");
        record_answer(Some(directory.clone()), "h-a".to_string(), Quality::CORRECT, now)?;
        record_answer(
            Some(directory.clone()),
            "h-a".to_string(),
            Quality::CORRECT,
            now.plus_days(1),
        )?;
        let state = Collection::new(Some(directory))?.repository.load();
        let record = state.item("h-a").unwrap();
        assert_eq!(record.review_count, 2);
        assert_eq!(record.interval, 6);
        assert_eq!(state.current_streak, 2);
        Ok(())
    }

    #[test]
    fn test_record_lesson() -> Fallible<()> {
        let directory = create_tmp_collection()?;
        let now = make_timestamp("2024-01-01T09:00:00.000");
        let results = vec![
            parse_lesson_result("h-a=5").unwrap(),
            parse_lesson_result("h-i=1").unwrap(),
        ];
        record_lesson(Some(directory.clone()), results, now)?;
        let state = Collection::new(Some(directory))?.repository.load();
        assert_eq!(state.item("h-a").unwrap().correct_count, 1);
        assert_eq!(state.item("h-i").unwrap().correct_count, 0);
        assert_eq!(state.item("h-i").unwrap().review_count, 1);
        Ok(())
    }

    #[test]
    fn test_parse_lesson_result() {
        assert_eq!(
            parse_lesson_result("h-a=4"),
            Ok(("h-a".to_string(), Quality::new(4).unwrap()))
        );
        assert!(parse_lesson_result("h-a").is_err());
        assert!(parse_lesson_result("=3").is_err());
        assert!(parse_lesson_result("h-a=6").is_err());
        assert!(parse_lesson_result("h-a=x").is_err());
    }

    #[test]
    fn test_describe_record() {
        let record = ItemScheduleRecord {
            interval: 6,
            ease: 2.7,
            review_count: 2,
            correct_count: 2,
            next_review: Some(make_timestamp("2024-01-08T09:00:00.000")),
            ..ItemScheduleRecord::new(ItemId::from("h-a"))
        };
        assert_eq!(
            describe_record(&record),
            "h-a: next review 2024-01-08T09:00:00.000 (interval 6 day(s), ease 2.70, 2/2 correct)"
        );
    }
}
