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

//! Dynamic chunk splitting for parallel relational-table ingest.
//!
//! Given a table, a split column, and a [`DbAdapter`] through which to query
//! it, [`TableChunkSplitter`] divides the column's key space into
//! [`Split`]s sized for parallel, resumable reads. It picks between arithmetic
//! striding, sampling-based sharding, and server-driven boundary discovery
//! depending on how the key is distributed, and hands back the bound SQL
//! predicate for each chunk through [`predicate::generate`].

mod adapter;
mod algorithm;
mod config;
mod error;
mod key;
mod predicate;
mod range;
mod split;
mod splitter;
mod throttle;

pub use adapter::{DbAdapter, TablePath};
pub use config::SplitterConfig;
pub use error::{Result, SplitterError};
pub use key::{KeyKind, KeyValue};
pub use predicate::generate as generate_predicate;
pub use range::ChunkRange;
pub use split::{BaseQuery, Split};
pub use splitter::TableChunkSplitter;
