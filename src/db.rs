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

use std::path::Path;

use kanastarter_core::error::ErrorReport;
use kanastarter_core::error::Fallible;
use kanastarter_core::repository::SnapshotStore;
use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::params;

const SCHEMA: &str = "
create table if not exists snapshots (
    key text primary key,
    value text not null
) strict;
";

fn db_error(e: rusqlite::Error) -> ErrorReport {
    ErrorReport::new(format!("database error: {e}"))
}

/// Snapshots stored in a SQLite key-value table.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn new(path: &Path) -> Fallible<Self> {
        let conn = Connection::open(path).map_err(db_error)?;
        Self::with_connection(conn)
    }

    #[cfg(test)]
    pub fn in_memory() -> Fallible<Self> {
        let conn = Connection::open_in_memory().map_err(db_error)?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Fallible<Self> {
        conn.execute_batch(SCHEMA).map_err(db_error)?;
        Ok(Self { conn })
    }
}

impl SnapshotStore for Database {
    fn get(&self, key: &str) -> Fallible<Option<String>> {
        self.conn
            .query_row(
                "select value from snapshots where key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(db_error)
    }

    fn set(&self, key: &str, value: &str) -> Fallible<()> {
        self.conn
            .execute(
                "insert into snapshots (key, value) values (?1, ?2)
                 on conflict (key) do update set value = excluded.value",
                params![key, value],
            )
            .map_err(db_error)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Fallible<()> {
        self.conn
            .execute("delete from snapshots where key = ?1", params![key])
            .map_err(db_error)?;
        Ok(())
    }
}
