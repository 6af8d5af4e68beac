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

//! Evenly-sized chunking: arithmetic stride over a densely-packed key range
//! (spec §4.2). No adapter calls here — the selector already fetched `min`,
//! `max` and the row count.

use crate::error::Result;
use crate::key::KeyValue;
use crate::range::ChunkRange;

/// Emits `(null, min+stride), (min+stride, min+2*stride), ..., (last, null)`.
///
/// The first chunk's `start` is `null` rather than `min` so that a row with
/// `col == min` is captured by the first chunk's `col <= end AND col != end`
/// predicate; every later chunk is a plain half-open `[start, end)`. This
/// asymmetry is load-bearing for coverage (spec §4.2) and must not be "fixed".
pub fn split(min: &KeyValue, max: &KeyValue, row_count: u64, split_size: u64, stride: u64) -> Result<Vec<ChunkRange>> {
    if row_count <= split_size {
        return Ok(vec![ChunkRange::all()]);
    }

    let mut chunks = Vec::new();
    let mut chunk_start: Option<KeyValue> = None;
    let mut cursor = min.clone();

    loop {
        let Some(candidate_end) = cursor.plus(stride)? else {
            // Overflow advancing past `cursor`: stop, the closing chunk below
            // absorbs everything from `chunk_start` onward.
            break;
        };
        if candidate_end.compare(max)?.is_gt() {
            break;
        }
        chunks.push(ChunkRange::new(chunk_start.clone(), Some(candidate_end.clone())));
        chunk_start = Some(candidate_end.clone());
        cursor = candidate_end;
    }
    chunks.push(ChunkRange::new(chunk_start, None));
    Ok(chunks)
}
