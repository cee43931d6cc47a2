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

use clap::Parser;
use kanastarter_core::error::Fallible;
use kanastarter_core::types::item::Category;
use kanastarter_core::types::quality::Quality;
use kanastarter_core::types::timestamp::Timestamp;

use crate::cmd::answer::parse_lesson_result;
use crate::cmd::answer::record_answer;
use crate::cmd::answer::record_lesson;
use crate::cmd::review::list_due;
use crate::cmd::review::list_weak;
use crate::cmd::review::show_item;
use crate::cmd::settings::add_study_time;
use crate::cmd::settings::onboard;
use crate::cmd::settings::parse_category;
use crate::cmd::settings::set_daily_goal;
use crate::cmd::settings::set_goals;
use crate::cmd::settings::toggle_goal;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;
use crate::cmd::transfer::export_progress;
use crate::cmd::transfer::import_progress;
use crate::cmd::transfer::reset_progress;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Record the answer to a single item.
    Answer {
        /// The item's identifier, e.g. `h-a`.
        item: String,
        /// Recall quality, from 0 (blackout) to 5 (perfect).
        #[arg(value_parser = clap::value_parser!(u8).range(0..=5))]
        quality: u8,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Record the results of a lesson, as ITEM=QUALITY pairs.
    Lesson {
        #[arg(required = true, value_parser = parse_lesson_result)]
        results: Vec<(String, Quality)>,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
    },
    /// List the items due for review.
    Due {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// List the items with low accuracy.
    Weak {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Show the schedule of an item.
    Show {
        item: String,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Print learner statistics.
    Stats {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Which output format to use.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
    },
    /// Export the learner's progress as JSON.
    Export {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Optional path to the output file. By default, the output is printed to stdout.
        #[arg(long)]
        output: Option<String>,
    },
    /// Replace the learner's progress with an exported snapshot.
    Import {
        /// Path to the snapshot file.
        input: String,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Delete all progress.
    Reset {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Finish onboarding with the given goals and daily goal.
    Onboard {
        #[arg(required = true, value_parser = parse_category)]
        goals: Vec<Category>,
        /// Daily study goal, in minutes.
        #[arg(long, default_value_t = 5)]
        minutes: u32,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Replace the selected goals.
    Goals {
        #[arg(required = true, value_parser = parse_category)]
        goals: Vec<Category>,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Add or remove a single goal.
    ToggleGoal {
        #[arg(value_parser = parse_category)]
        category: Category,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Set the daily study goal, in minutes.
    DailyGoal {
        minutes: u32,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Log study time, in minutes.
    StudyTime {
        minutes: u32,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Answer {
            item,
            quality,
            directory,
        } => record_answer(directory, item, Quality::new(quality)?, Timestamp::now()),
        Command::Lesson { results, directory } => {
            record_lesson(directory, results, Timestamp::now())
        }
        Command::Due { directory } => list_due(directory, Timestamp::now()),
        Command::Weak { directory } => list_weak(directory),
        Command::Show { item, directory } => show_item(directory, item),
        Command::Stats { directory, format } => print_stats(directory, format, Timestamp::now()),
        Command::Export { directory, output } => export_progress(directory, output),
        Command::Import { input, directory } => import_progress(directory, input),
        Command::Reset { directory } => reset_progress(directory),
        Command::Onboard {
            goals,
            minutes,
            directory,
        } => onboard(directory, goals, minutes),
        Command::Goals { goals, directory } => set_goals(directory, goals),
        Command::ToggleGoal {
            category,
            directory,
        } => toggle_goal(directory, category),
        Command::DailyGoal { minutes, directory } => set_daily_goal(directory, minutes),
        Command::StudyTime { minutes, directory } => {
            add_study_time(directory, minutes, Timestamp::now())
        }
    }
}
