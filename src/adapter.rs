// Copyright 2023 RisingWave Labs
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

//! The database adapter the splitter consumes, and nothing more: it never opens
//! a connection, manages a pool, or builds an actual client. That's the physical
//! driver's job (spec §1, "out of scope"); the splitter only calls through this
//! trait on the enumerator thread and blocks on the result (spec §5).

use std::fmt;

use crate::key::KeyValue;

/// Identifies the table a split is over. Opaque to this crate beyond `Display`;
/// the adapter decides how to turn it into a quoted, dialect-correct identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TablePath(pub String);

impl fmt::Display for TablePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TablePath {
    fn from(value: &str) -> Self {
        TablePath(value.to_string())
    }
}

impl From<String> for TablePath {
    fn from(value: String) -> Self {
        TablePath(value)
    }
}

/// The physical-driver interface the splitter depends on (spec §6).
///
/// Every method is a blocking call: the splitter runs single-threaded and
/// one-shot (spec §5), so there is no async boundary to cross here. An adapter
/// backed by an async client (e.g. `sqlx`, `tokio-postgres`) should bridge with
/// its runtime's blocking-call facility; that bridge lives in the embedding
/// application, not in this crate.
pub trait DbAdapter {
    /// `(min, max)` of `column` in `table`. `(None, None)` for an empty table.
    fn min_max(&self, table: &TablePath, column: &str) -> anyhow::Result<(Option<KeyValue>, Option<KeyValue>)>;

    /// An approximate row count for `table` (e.g. from planner statistics).
    fn approximate_row_count(&self, table: &TablePath) -> anyhow::Result<u64>;

    /// The value of `column` at ordinal position `size` strictly greater than
    /// `after` (or from the start of the column if `after` is `None`). `None`
    /// if fewer than `size` rows remain past `after`.
    fn next_chunk_max(
        &self,
        table: &TablePath,
        column: &str,
        size: u32,
        after: Option<&KeyValue>,
    ) -> anyhow::Result<Option<KeyValue>>;

    /// The smallest value of `column` strictly greater than `after`, used to
    /// step past a run of duplicate values when `next_chunk_max` makes no
    /// progress (spec §4.4).
    fn query_min_greater_than(
        &self,
        table: &TablePath,
        column: &str,
        after: &KeyValue,
    ) -> anyhow::Result<Option<KeyValue>>;

    /// A sorted sample of `column`, picking roughly 1 row in every
    /// `inverse_rate`.
    fn sample_column(
        &self,
        table: &TablePath,
        column: &str,
        inverse_rate: u32,
    ) -> anyhow::Result<Vec<KeyValue>>;

    /// A dialect-quoted identifier for `table`, for embedding in generated SQL.
    fn table_identifier(&self, table: &TablePath) -> String;
}
