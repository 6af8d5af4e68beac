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

//! The strategy selector (spec §4.1): queries bounds and row count, computes
//! the distribution factor, and dispatches to exactly one of the three
//! chunking algorithms.

use std::cmp::Ordering;

use crate::adapter::{DbAdapter, TablePath};
use crate::algorithm::{even, sampling, uneven};
use crate::config::SplitterConfig;
use crate::error::Result;
use crate::key::{ceil_to_f64, KeyKind, KeyValue};
use crate::range::ChunkRange;

/// Runs the selector and returns the chunk ranges for `column` of `table`.
pub fn select_and_split(
    adapter: &dyn DbAdapter,
    table: &TablePath,
    column: &str,
    key_kind: KeyKind,
    config: &SplitterConfig,
) -> Result<Vec<ChunkRange>> {
    let (min, max) = adapter.min_max(table, column)?;

    let (min, max) = match (min, max) {
        (Some(min), Some(max)) if min.compare(&max)? != Ordering::Equal => (min, max),
        // DegenerateBounds: empty table, or a single distinct key value.
        _ => return Ok(vec![ChunkRange::all()]),
    };

    if !key_kind.is_evenly_splittable() {
        return uneven::split(adapter, table, column, Some(&min), Some(&max), config.split_size);
    }

    let row_count = adapter.approximate_row_count(table)?;
    let factor = distribution_factor(&min, &max, row_count)?;

    tracing::debug!(
        %table,
        column,
        row_count,
        factor,
        "computed distribution factor"
    );

    if factor >= config.distribution_factor_lower && factor <= config.distribution_factor_upper {
        let stride = ((factor * config.split_size as f64).floor() as u64).max(1);
        tracing::debug!(%table, stride, "evenly distributed, arithmetic striding");
        return even::split(&min, &max, row_count, config.split_size, stride);
    }

    let shard_count = row_count / config.split_size;
    if shard_count > config.sample_sharding_threshold {
        let rate = config.effective_sample_rate();
        tracing::debug!(%table, shard_count, rate, "sparse key, sampling");
        let sample = adapter.sample_column(table, column, rate as u32)?;
        Ok(sampling::split(sample, shard_count))
    } else {
        tracing::debug!(%table, shard_count, "below sample threshold, server-driven chunking");
        uneven::split(adapter, table, column, Some(&min), Some(&max), config.split_size)
    }
}

/// `F := ceil_div((max - min) + 1, row_count)`, or `+inf` if `row_count == 0`
/// (spec §4.1 step 4).
fn distribution_factor(min: &KeyValue, max: &KeyValue, row_count: u64) -> Result<f64> {
    if row_count == 0 {
        return Ok(f64::INFINITY);
    }
    let span = max.minus(min)? + bigdecimal::BigDecimal::from(1);
    let quotient = span / bigdecimal::BigDecimal::from(row_count);
    Ok(ceil_to_f64(quotient))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FixedAdapter {
        min: Option<KeyValue>,
        max: Option<KeyValue>,
        row_count: u64,
        sample: Vec<KeyValue>,
        sample_calls: Cell<u32>,
    }

    impl DbAdapter for FixedAdapter {
        fn min_max(
            &self,
            _table: &TablePath,
            _column: &str,
        ) -> anyhow::Result<(Option<KeyValue>, Option<KeyValue>)> {
            Ok((self.min.clone(), self.max.clone()))
        }

        fn approximate_row_count(&self, _table: &TablePath) -> anyhow::Result<u64> {
            Ok(self.row_count)
        }

        fn next_chunk_max(
            &self,
            _table: &TablePath,
            _column: &str,
            _size: u32,
            _after: Option<&KeyValue>,
        ) -> anyhow::Result<Option<KeyValue>> {
            Ok(None)
        }

        fn query_min_greater_than(
            &self,
            _table: &TablePath,
            _column: &str,
            _after: &KeyValue,
        ) -> anyhow::Result<Option<KeyValue>> {
            Ok(None)
        }

        fn sample_column(
            &self,
            _table: &TablePath,
            _column: &str,
            _inverse_rate: u32,
        ) -> anyhow::Result<Vec<KeyValue>> {
            self.sample_calls.set(self.sample_calls.get() + 1);
            Ok(self.sample.clone())
        }

        fn table_identifier(&self, table: &TablePath) -> String {
            table.0.clone()
        }
    }

    fn ik(v: i64) -> KeyValue {
        KeyValue::I64(v)
    }

    /// Scenario C: min == max collapses to a single full-scan chunk regardless
    /// of row count.
    #[test]
    fn scenario_c_degenerate_bounds() {
        let adapter = FixedAdapter {
            min: Some(ik(1)),
            max: Some(ik(1)),
            row_count: 999,
            sample: vec![],
            sample_calls: Cell::new(0),
        };
        let config = SplitterConfig::default();
        let chunks =
            select_and_split(&adapter, &TablePath::from("t"), "id", KeyKind::I64, &config).unwrap();
        assert_eq!(chunks, vec![ChunkRange::all()]);
    }

    #[test]
    fn empty_table_is_degenerate() {
        let adapter = FixedAdapter {
            min: None,
            max: None,
            row_count: 0,
            sample: vec![],
            sample_calls: Cell::new(0),
        };
        let config = SplitterConfig::default();
        let chunks =
            select_and_split(&adapter, &TablePath::from("t"), "id", KeyKind::I64, &config).unwrap();
        assert_eq!(chunks, vec![ChunkRange::all()]);
    }

    #[test]
    fn scenario_a_dense_key_picks_even_strategy() {
        let adapter = FixedAdapter {
            min: Some(ik(1)),
            max: Some(ik(100)),
            row_count: 100,
            sample: vec![],
            sample_calls: Cell::new(0),
        };
        let config = SplitterConfig::new(10, 1000.0, 0.05, 1000, 1000).unwrap();
        let chunks =
            select_and_split(&adapter, &TablePath::from("t"), "id", KeyKind::I64, &config).unwrap();
        assert_eq!(chunks.len(), 10);
        assert_eq!(chunks[0], ChunkRange::new(None, Some(ik(11))));
        assert_eq!(chunks.last().unwrap(), &ChunkRange::new(Some(ik(91)), None));
    }

    /// Scenario B: a very sparse key (F = (1_000_000 - 1 + 1) / 100 = 10_000,
    /// well above the upper bound) drives `shard_count = row_count / split_size
    /// = 10`, which exceeds `sample_sharding_threshold = 1` and so picks the
    /// sampling strategy. The 2-element sample is smaller than `shard_count`,
    /// so the degenerate branch of `sampling::split` emits one chunk per
    /// sample point.
    #[test]
    fn scenario_b_sparse_key_picks_sampling_strategy() {
        let adapter = FixedAdapter {
            min: Some(ik(1)),
            max: Some(ik(1_000_000)),
            row_count: 100,
            sample: vec![ik(1), ik(500_000)],
            sample_calls: Cell::new(0),
        };
        let config = SplitterConfig::new(10, 1000.0, 0.05, 1, 1000).unwrap();
        let chunks =
            select_and_split(&adapter, &TablePath::from("t"), "id", KeyKind::I64, &config).unwrap();
        assert_eq!(adapter.sample_calls.get(), 1);
        assert_eq!(
            chunks,
            vec![
                ChunkRange::new(None, Some(ik(1))),
                ChunkRange::new(Some(ik(1)), Some(ik(500_000))),
                ChunkRange::new(Some(ik(500_000)), None),
            ]
        );
    }

    #[test]
    fn string_key_always_uses_uneven_strategy() {
        let adapter = FixedAdapter {
            min: Some(KeyValue::String("a".into())),
            max: Some(KeyValue::String("z".into())),
            row_count: 26,
            sample: vec![],
            sample_calls: Cell::new(0),
        };
        let config = SplitterConfig::default();
        // `next_chunk_max` returns None immediately, so the uneven path closes
        // with a single full-range chunk.
        let chunks = select_and_split(
            &adapter,
            &TablePath::from("t"),
            "id",
            KeyKind::String,
            &config,
        )
        .unwrap();
        assert_eq!(chunks, vec![ChunkRange::new(None, None)]);
    }
}
