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

//! An immutable half-open `[start, end)` interval over split-key values, with
//! `None` endpoints standing in for "unbounded" rather than "absent".

use crate::error::Result;
use crate::key::KeyValue;

/// A single chunk's key-space interval.
///
/// `start == None` marks the first chunk in an emission (predicate `col <= end
/// AND NOT (col = end)`); `end == None` marks the last (predicate `col >= start`).
/// Both `None` means a full table scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkRange {
    pub start: Option<KeyValue>,
    pub end: Option<KeyValue>,
}

impl ChunkRange {
    /// The trivial fully-unbounded range: one chunk, full table scan.
    pub fn all() -> Self {
        ChunkRange {
            start: None,
            end: None,
        }
    }

    pub fn new(start: Option<KeyValue>, end: Option<KeyValue>) -> Self {
        ChunkRange { start, end }
    }

    pub fn is_full_scan(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Evaluates this chunk's boundary predicate (spec §4.5) against `value`,
    /// the same logic `predicate::generate` renders to SQL. Used to check the
    /// coverage invariant in tests without parsing the generated query text.
    pub(crate) fn contains(&self, value: &KeyValue) -> Result<bool> {
        Ok(match (&self.start, &self.end) {
            (None, None) => true,
            (None, Some(end)) => {
                let cmp = value.compare(end)?;
                cmp.is_le() && cmp.is_ne()
            }
            (Some(start), None) => value.compare(start)?.is_ge(),
            (Some(start), Some(end)) => {
                let cmp_end = value.compare(end)?;
                value.compare(start)?.is_ge() && cmp_end.is_le() && cmp_end.is_ne()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_full_scan() {
        assert!(ChunkRange::all().is_full_scan());
    }

    #[test]
    fn bounded_range_is_not_full_scan() {
        let r = ChunkRange::new(Some(KeyValue::I32(1)), Some(KeyValue::I32(2)));
        assert!(!r.is_full_scan());
    }

    #[test]
    fn full_scan_contains_everything() {
        assert!(ChunkRange::all().contains(&KeyValue::I32(i32::MIN)).unwrap());
        assert!(ChunkRange::all().contains(&KeyValue::I32(i32::MAX)).unwrap());
    }

    #[test]
    fn first_chunk_excludes_its_own_end() {
        let r = ChunkRange::new(None, Some(KeyValue::I32(10)));
        assert!(r.contains(&KeyValue::I32(9)).unwrap());
        assert!(!r.contains(&KeyValue::I32(10)).unwrap());
    }

    #[test]
    fn middle_chunk_includes_start_excludes_end() {
        let r = ChunkRange::new(Some(KeyValue::I32(10)), Some(KeyValue::I32(20)));
        assert!(r.contains(&KeyValue::I32(10)).unwrap());
        assert!(r.contains(&KeyValue::I32(19)).unwrap());
        assert!(!r.contains(&KeyValue::I32(20)).unwrap());
        assert!(!r.contains(&KeyValue::I32(9)).unwrap());
    }

    #[test]
    fn last_chunk_includes_start_and_unbounded_above() {
        let r = ChunkRange::new(Some(KeyValue::I32(90)), None);
        assert!(r.contains(&KeyValue::I32(90)).unwrap());
        assert!(r.contains(&KeyValue::I32(i32::MAX)).unwrap());
        assert!(!r.contains(&KeyValue::I32(89)).unwrap());
    }
}
