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

use std::fs::write;

use chrono::NaiveDateTime;
use kanastarter_core::error::Fallible;
use kanastarter_core::types::timestamp::Timestamp;
use tempfile::tempdir;

use crate::collection::CATALOG_FILE;

const TEST_CATALOG: &str = r#"
[[items]]
id = "h-a"
category = "hiragana"
display = "あ"

[[items]]
id = "h-i"
category = "hiragana"
display = "い"

[[items]]
id = "h-u"
category = "hiragana"
display = "う"

[[items]]
id = "k-a"
category = "katakana"
display = "ア"

[[items]]
id = "n-1"
category = "numbers"
display = "一"

[[items]]
id = "n-2"
category = "numbers"
display = "二"
"#;

/// Creates a collection directory with a small catalog and returns its path.
/// The directory outlives the test.
pub fn create_tmp_collection() -> Fallible<String> {
    let dir = tempdir()?.keep();
    write(dir.join(CATALOG_FILE), TEST_CATALOG)?;
    Ok(dir.display().to_string())
}

pub fn make_timestamp(s: &str) -> Timestamp {
    let ndt = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.3f").unwrap();
    Timestamp::new(ndt)
}
