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

//! `TableChunkSplitter`, the crate's entry point: wires a [`DbAdapter`] and a
//! [`SplitterConfig`] to the strategy selector and turns its [`ChunkRange`]s
//! into numbered [`Split`]s. Plays the composition-root role
//! `RowSeqScanExecutorBuilder` plays for a single table scan: it does not
//! implement any chunking logic itself, only assembles it.

use crate::adapter::{DbAdapter, TablePath};
use crate::algorithm::selector;
use crate::config::SplitterConfig;
use crate::error::Result;
use crate::key::KeyKind;
use crate::split::{BaseQuery, Split};

/// Splits one table into a sequence of [`Split`]s over a single adapter and
/// configuration. Stateless between calls to [`TableChunkSplitter::split`]
/// beyond the adapter/config it was built with.
pub struct TableChunkSplitter<'a> {
    adapter: &'a dyn DbAdapter,
    config: SplitterConfig,
}

impl<'a> TableChunkSplitter<'a> {
    pub fn new(adapter: &'a dyn DbAdapter, config: SplitterConfig) -> Self {
        TableChunkSplitter { adapter, config }
    }

    /// Splits `table` on `key_name` (of domain `key_kind`), reading rows via
    /// `base_query`. Returns the splits in the order chunk boundaries were
    /// discovered -- the order the enumerator should hand them out in.
    pub fn split(
        &self,
        table: TablePath,
        base_query: BaseQuery,
        key_name: &str,
        key_kind: KeyKind,
    ) -> Result<Vec<Split>> {
        tracing::debug!(%table, key_name, "starting table split");

        let ranges =
            selector::select_and_split(self.adapter, &table, key_name, key_kind, &self.config)?;

        tracing::debug!(%table, chunk_count = ranges.len(), "split complete");

        let query = base_query.render();
        let splits = ranges
            .into_iter()
            .enumerate()
            .map(|(ordinal, range)| Split {
                split_id: Split::id_for(&table, ordinal),
                table_path: table.clone(),
                query: query.clone(),
                key_name: key_name.to_string(),
                key_kind,
                start: range.start,
                end: range.end,
            })
            .collect();

        Ok(splits)
    }
}
