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
use kanastarter_core::error::fail;
use kanastarter_core::progress::due_items;
use kanastarter_core::progress::weak_items;
use kanastarter_core::types::item::LearningItem;
use kanastarter_core::types::timestamp::Timestamp;

use crate::cmd::answer::describe_record;
use crate::collection::Collection;

/// Prints the items due for review at `now`, in catalog order.
pub fn list_due(directory: Option<String>, now: Timestamp) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let state = collection.repository.load();
    let due = due_items(&state, &collection.catalog, now);
    print_items(&due);
    Ok(())
}

/// Prints the items with low accuracy.
pub fn list_weak(directory: Option<String>) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let state = collection.repository.load();
    let weak = weak_items(&state, &collection.catalog);
    print_items(&weak);
    Ok(())
}

/// Prints the schedule of a single item.
pub fn show_item(directory: Option<String>, item_id: String) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let state = collection.repository.load();
    match state.item(&item_id) {
        Some(record) => {
            println!("{}", describe_record(record));
            Ok(())
        }
        None if collection.contains(&item_id) => {
            println!("{item_id}: never reviewed");
            Ok(())
        }
        None => fail(format!("no such item: {item_id}")),
    }
}

fn print_items(items: &[&LearningItem]) {
    for line in format_items(items) {
        println!("{line}");
    }
}

fn format_items(items: &[&LearningItem]) -> Vec<String> {
    items
        .iter()
        .map(|item| format!("{}\t{}\t{}", item.id, item.category, item.display))
        .collect()
}
