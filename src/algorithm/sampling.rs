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

//! Sampling-based sharding: quantile boundaries over a sorted sample, used
//! when the key is evenly-splittable but too sparse for arithmetic striding
//! (spec §4.3).

use crate::key::KeyValue;
use crate::range::ChunkRange;

/// Builds shard boundaries from `sample`, a sorted 1-in-`rate` sample of the
/// split column, targeting `shard_count` shards.
///
/// When `sample.len() / shard_count <= 1` (the sample is no bigger than the
/// requested shard count), this falls back to one chunk per sample point,
/// which emits `sample.len() + 1` chunks regardless of `shard_count` -- more
/// shards than requested. Spec §9 flags this as a known over-sharding
/// behavior in the degenerate case; it is preserved here for fidelity rather
/// than silently capped, since capping it would change the exposed chunk
/// count in a way nothing downstream currently expects.
pub fn split(sample: Vec<KeyValue>, shard_count: u64) -> Vec<ChunkRange> {
    if shard_count == 0 {
        return vec![ChunkRange::all()];
    }

    let s = sample.len() as u64 / shard_count;
    if s <= 1 {
        return split_degenerate(sample);
    }

    let mut chunks = Vec::with_capacity(shard_count as usize);
    for i in 0..shard_count {
        let start = if i == 0 {
            None
        } else {
            Some(sample[(i * s) as usize].clone())
        };
        let end = if i == shard_count - 1 {
            None
        } else {
            Some(sample[((i + 1) * s) as usize].clone())
        };
        chunks.push(ChunkRange::new(start, end));
    }
    chunks
}

fn split_degenerate(sample: Vec<KeyValue>) -> Vec<ChunkRange> {
    if sample.is_empty() {
        return vec![ChunkRange::all()];
    }
    let mut chunks = Vec::with_capacity(sample.len() + 1);
    let mut prev: Option<KeyValue> = None;
    for value in &sample {
        chunks.push(ChunkRange::new(prev.clone(), Some(value.clone())));
        prev = Some(value.clone());
    }
    chunks.push(ChunkRange::new(prev, None));
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ik(v: i64) -> KeyValue {
        KeyValue::I64(v)
    }

    /// Scenario B from spec §8: shard_count=1 -> single full chunk.
    #[test]
    fn scenario_b_single_shard_is_full_chunk() {
        let sample = vec![ik(10), ik(20), ik(30)];
        let chunks = split(sample, 1);
        assert_eq!(chunks, vec![ChunkRange::all()]);
    }

    #[test]
    fn zero_shard_count_is_full_chunk() {
        let chunks = split(vec![ik(1), ik(2)], 0);
        assert_eq!(chunks, vec![ChunkRange::all()]);
    }

    #[test]
    fn degenerate_branch_emits_one_chunk_per_sample_point() {
        let sample = vec![ik(1), ik(2), ik(3)];
        // shard_count (5) > sample.len() (3) -> s = 0 -> degenerate.
        let chunks = split(sample.clone(), 5);
        assert_eq!(chunks.len(), sample.len() + 1);
        assert_eq!(chunks[0], ChunkRange::new(None, Some(ik(1))));
        assert_eq!(chunks[1], ChunkRange::new(Some(ik(1)), Some(ik(2))));
        assert_eq!(chunks[2], ChunkRange::new(Some(ik(2)), Some(ik(3))));
        assert_eq!(chunks[3], ChunkRange::new(Some(ik(3)), None));
    }

    #[test]
    fn normal_branch_builds_quantile_boundaries() {
        let sample: Vec<KeyValue> = (0..100).map(ik).collect();
        let chunks = split(sample.clone(), 10);
        assert_eq!(chunks.len(), 10);
        assert_eq!(chunks[0].start, None);
        assert_eq!(chunks[0].end, Some(ik(10)));
        assert_eq!(chunks[9].start, Some(ik(90)));
        assert_eq!(chunks[9].end, None);

        // Adjacent chunk boundaries line up (ordering invariant).
        for w in chunks.windows(2) {
            assert_eq!(w[0].end, w[1].start);
        }
    }
}
