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

//! Unevenly-sized chunking: server-driven boundary discovery for key types
//! that don't support arithmetic striding, or that are evenly-splittable but
//! too sparse below the sample threshold (spec §4.4).

use std::cmp::Ordering;

use crate::adapter::{DbAdapter, TablePath};
use crate::error::Result;
use crate::key::KeyValue;
use crate::range::ChunkRange;
use crate::throttle::throttle;

/// Repeatedly asks the adapter for the next chunk boundary `split_size` rows
/// past the previous one, until it runs out of rows or passes `max`.
///
/// A `next_chunk_max` result equal to the value just advanced past means "no
/// progress" (a long duplicate run, most likely); in that case a follow-up
/// `query_min_greater_than` is issued to step past the duplicates. If that
/// still makes no progress, the loop terminates and the closing chunk absorbs
/// the rest of the key space.
pub fn split(
    adapter: &dyn DbAdapter,
    table: &TablePath,
    column: &str,
    min: Option<&KeyValue>,
    max: Option<&KeyValue>,
    split_size: u64,
) -> Result<Vec<ChunkRange>> {
    let mut chunks = Vec::new();
    let mut chunk_start: Option<KeyValue> = None;
    let mut after = min.cloned();
    let mut candidate = adapter.next_chunk_max(table, column, split_size as u32, after.as_ref())?;
    let mut iteration = 0u64;

    loop {
        let Some(mut next) = candidate else {
            break;
        };

        // `next_chunk_max` landed exactly back on `after`: no progress, most
        // likely a long run of duplicate values. Step past it explicitly.
        let made_no_progress = match &after {
            Some(after_val) => after_val.compare(&next)? == Ordering::Equal,
            None => false,
        };
        if made_no_progress {
            match adapter.query_min_greater_than(table, column, after.as_ref().unwrap())? {
                Some(advanced) => next = advanced,
                None => break,
            }
        }

        if let Some(max_val) = max {
            if next.compare(max_val)?.is_gt() {
                break;
            }
        }

        chunks.push(ChunkRange::new(chunk_start.clone(), Some(next.clone())));
        throttle(iteration, table);
        iteration += 1;

        chunk_start = Some(next.clone());
        after = Some(next.clone());
        candidate = adapter.next_chunk_max(table, column, split_size as u32, after.as_ref())?;
    }

    chunks.push(ChunkRange::new(chunk_start, None));
    Ok(chunks)
}
