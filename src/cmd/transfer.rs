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

use std::fs::read_to_string;
use std::fs::write;

use kanastarter_core::error::ErrorReport;
use kanastarter_core::error::Fallible;
use kanastarter_core::snapshot::export_snapshot;

use crate::collection::Collection;

/// Writes the learner snapshot to `output`, or stdout.
pub fn export_progress(directory: Option<String>, output: Option<String>) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let text = export_snapshot(&collection.repository.load())?;
    match output {
        Some(path) => write(path, text)?,
        None => println!("{text}"),
    }
    Ok(())
}

/// Replaces the learner snapshot with the one in `input`. An unreadable file
/// leaves the current progress untouched.
pub fn import_progress(directory: Option<String>, input: String) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let text = read_to_string(&input)?;
    let state = collection
        .repository
        .import(&text)
        .map_err(|e| ErrorReport::new(format!("could not import {input}: {}", e.message())))?;
    println!("Imported progress for {} item(s).", state.items.len());
    Ok(())
}

/// Deletes all progress.
pub fn reset_progress(directory: Option<String>) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    collection.repository.reset()?;
    println!("Progress reset in {}.", collection.directory.display());
    Ok(())
}
