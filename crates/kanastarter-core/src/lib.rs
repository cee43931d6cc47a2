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

//! kanastarter-core: spaced repetition scheduling for kana drills.
//!
//! This library provides WASM-compatible types and algorithms for:
//! - The SM-2 review scheduler
//! - Learner state, streaks, and due/weak item queries
//! - Snapshot export/import and the persistence contract
//! - Loading item catalogs

pub mod catalog;
pub mod error;
pub mod progress;
pub mod repository;
pub mod sm2;
pub mod snapshot;
pub mod streak;
pub mod types;

// Re-exports for convenience
pub use error::{ErrorReport, Fallible, fail};
pub use repository::{MemoryStore, ProgressRepository, STORAGE_KEY, SnapshotStore};
pub use types::date::Date;
pub use types::item::{Category, ItemId, LearningItem};
pub use types::learner::LearnerState;
pub use types::quality::Quality;
pub use types::schedule::{ItemScheduleRecord, compute_next_schedule};
pub use types::timestamp::Timestamp;
