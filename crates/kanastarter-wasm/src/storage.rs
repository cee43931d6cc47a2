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

//! Browser localStorage as a snapshot store.

use kanastarter_core::error::ErrorReport;
use kanastarter_core::error::Fallible;
use kanastarter_core::repository::SnapshotStore;
use wasm_bindgen::prelude::*;
use web_sys::Storage as WebStorage;

/// Falls back to a no-op store when localStorage is unavailable (private
/// browsing, sandboxed iframes).
pub struct Storage {
    inner: Option<WebStorage>,
}

impl Storage {
    pub fn new() -> Self {
        let inner = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        Self { inner }
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

fn js_error(op: &str, value: JsValue) -> ErrorReport {
    let detail = value.as_string().unwrap_or_else(|| format!("{value:?}"));
    ErrorReport::new(format!("localStorage {op} failed: {detail}"))
}

impl SnapshotStore for Storage {
    fn get(&self, key: &str) -> Fallible<Option<String>> {
        match &self.inner {
            Some(storage) => storage.get_item(key).map_err(|e| js_error("read", e)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Fallible<()> {
        match &self.inner {
            Some(storage) => storage
                .set_item(key, value)
                .map_err(|e| js_error("write", e)),
            None => Ok(()),
        }
    }

    fn remove(&self, key: &str) -> Fallible<()> {
        match &self.inner {
            Some(storage) => storage
                .remove_item(key)
                .map_err(|e| js_error("remove", e)),
            None => Ok(()),
        }
    }
}
