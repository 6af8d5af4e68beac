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

//! `Split`, the unit of work this crate hands to the enumerator: a table
//! descriptor composed with one `ChunkRange`. Plays the same role `FsSplit` does
//! for a filesystem source — a plain data record identifying one chunk of
//! parallel work, not an executor itself.

use crate::adapter::TablePath;
use crate::key::{KeyKind, KeyValue};

/// How the base query for a table's splits is built, before any chunk
/// boundary predicate is appended (spec §4.5).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseQuery {
    /// Read the whole table: `SELECT * FROM <quoted identifier>`.
    Table(String),
    /// Wrap a user-supplied query as a subquery: `SELECT * FROM (<query>) t`.
    Raw(String),
}

impl BaseQuery {
    pub(crate) fn render(&self) -> String {
        match self {
            BaseQuery::Table(ident) => format!("SELECT * FROM {ident}"),
            BaseQuery::Raw(query) => format!("SELECT * FROM ({query}) chunk_splitter_base"),
        }
    }
}

/// One chunk of a table, ready for the enumerator to hand to a reader.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub table_path: TablePath,
    pub split_id: String,
    pub query: String,
    pub key_name: String,
    pub key_kind: KeyKind,
    pub start: Option<KeyValue>,
    pub end: Option<KeyValue>,
}

impl Split {
    /// `split_id = fmt(table_path, ordinal)` per spec §3.
    pub(crate) fn id_for(table: &TablePath, ordinal: usize) -> String {
        format!("{table}-{ordinal}")
    }
}
