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

//! A tagged variant over the split-column domains this crate understands, plus
//! the type-aware `compare`/`plus`/`minus` arithmetic the chunking algorithms need.
//!
//! The source this crate's behavior is modeled on leans on runtime type dispatch
//! over an object-typed column value. Here `KeyValue` plays the same role as
//! `ScalarImpl` does for RisingWave's own expression evaluator: one variant per
//! supported domain, with comparisons and arithmetic implemented per variant and
//! a hard error on cross-variant use.

use std::cmp::Ordering;

use bigdecimal::{BigDecimal, RoundingMode};
use chrono::{Days, NaiveDate};
use num_traits::ToPrimitive;

use crate::error::{Result, SplitterError};

/// The domain of a split column, as a bare type tag (no value).
///
/// `Timestamp` is treated as a "wide" temporal type and `Date` as "narrow" per the
/// evenly-splittable rule below: striding over whole days is meaningful for load
/// balancing, striding over sub-second timestamps is not (see DESIGN.md).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Decimal,
    String,
    Date,
    Timestamp,
}

impl KeyKind {
    /// Whether values of this kind admit a meaningful `plus(stride)` that stays
    /// within the domain, i.e. whether arithmetic striding is a valid chunking
    /// strategy at all.
    pub fn is_evenly_splittable(self) -> bool {
        !matches!(self, KeyKind::String | KeyKind::Timestamp)
    }
}

/// A value drawn from a split column's domain.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyValue {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Decimal(BigDecimal),
    String(String),
    Date(NaiveDate),
    Timestamp(chrono::NaiveDateTime),
}

impl KeyValue {
    pub fn kind(&self) -> KeyKind {
        match self {
            KeyValue::I8(_) => KeyKind::I8,
            KeyValue::I16(_) => KeyKind::I16,
            KeyValue::I32(_) => KeyKind::I32,
            KeyValue::I64(_) => KeyKind::I64,
            KeyValue::U8(_) => KeyKind::U8,
            KeyValue::U16(_) => KeyKind::U16,
            KeyValue::U32(_) => KeyKind::U32,
            KeyValue::U64(_) => KeyKind::U64,
            KeyValue::F32(_) => KeyKind::F32,
            KeyValue::F64(_) => KeyKind::F64,
            KeyValue::Decimal(_) => KeyKind::Decimal,
            KeyValue::String(_) => KeyKind::String,
            KeyValue::Date(_) => KeyKind::Date,
            KeyValue::Timestamp(_) => KeyKind::Timestamp,
        }
    }

    fn mismatch(&self, other: &KeyValue) -> SplitterError {
        SplitterError::KeyTypeMismatch {
            expected: self.kind(),
            found: other.kind(),
        }
    }

    /// Compares two keys of the same domain. Fails loudly on a variant mismatch
    /// rather than attempting an implicit numeric promotion, matching spec §4.1
    /// step 4's "fail loudly if min and max have incompatible domain types".
    pub fn compare(&self, other: &KeyValue) -> Result<Ordering> {
        use KeyValue::*;
        match (self, other) {
            (I8(a), I8(b)) => Ok(a.cmp(b)),
            (I16(a), I16(b)) => Ok(a.cmp(b)),
            (I32(a), I32(b)) => Ok(a.cmp(b)),
            (I64(a), I64(b)) => Ok(a.cmp(b)),
            (U8(a), U8(b)) => Ok(a.cmp(b)),
            (U16(a), U16(b)) => Ok(a.cmp(b)),
            (U32(a), U32(b)) => Ok(a.cmp(b)),
            (U64(a), U64(b)) => Ok(a.cmp(b)),
            (F32(a), F32(b)) => a
                .partial_cmp(b)
                .ok_or_else(|| SplitterError::ConfigInvalid("NaN split key value".into())),
            (F64(a), F64(b)) => a
                .partial_cmp(b)
                .ok_or_else(|| SplitterError::ConfigInvalid("NaN split key value".into())),
            (Decimal(a), Decimal(b)) => Ok(a.cmp(b)),
            (String(a), String(b)) => Ok(a.cmp(b)),
            (Date(a), Date(b)) => Ok(a.cmp(b)),
            (Timestamp(a), Timestamp(b)) => Ok(a.cmp(b)),
            _ => Err(self.mismatch(other)),
        }
    }

    /// Advances this key by `stride`. Returns `Ok(None)` when the advance would
    /// overflow the domain (spec §4.2's "arithmetic overflow ... terminates the
    /// loop gracefully"), never panics on overflow. Returns
    /// `Err(SplitterError::UnsupportedKeyType)` for `String`/`Timestamp`, which
    /// admit no meaningful stride; the selector never reaches this branch in
    /// practice since it routes those kinds to the unevenly-sized algorithm
    /// before calling `plus`.
    pub fn plus(&self, stride: u64) -> Result<Option<KeyValue>> {
        use KeyValue::*;
        Ok(match self {
            I8(v) => i8::try_from(stride)
                .ok()
                .and_then(|s| v.checked_add(s))
                .map(I8),
            I16(v) => i16::try_from(stride)
                .ok()
                .and_then(|s| v.checked_add(s))
                .map(I16),
            I32(v) => i32::try_from(stride)
                .ok()
                .and_then(|s| v.checked_add(s))
                .map(I32),
            I64(v) => i64::try_from(stride)
                .ok()
                .and_then(|s| v.checked_add(s))
                .map(I64),
            U8(v) => u8::try_from(stride)
                .ok()
                .and_then(|s| v.checked_add(s))
                .map(U8),
            U16(v) => u16::try_from(stride)
                .ok()
                .and_then(|s| v.checked_add(s))
                .map(U16),
            U32(v) => u32::try_from(stride)
                .ok()
                .and_then(|s| v.checked_add(s))
                .map(U32),
            U64(v) => v.checked_add(stride).map(U64),
            F32(v) => {
                let next = v + stride as f32;
                next.is_finite().then_some(F32(next))
            }
            F64(v) => {
                let next = v + stride as f64;
                next.is_finite().then_some(F64(next))
            }
            Decimal(v) => Some(Decimal(v + BigDecimal::from(stride))),
            Date(v) => v.checked_add_days(Days::new(stride)).map(Date),
            String(_) | Timestamp(_) => {
                return Err(SplitterError::UnsupportedKeyType(self.kind()));
            }
        })
    }

    /// `self - other` as an arbitrary-precision decimal, for distribution-factor
    /// and stride-rate calculations. Floating point is deliberately not used here:
    /// spec §9 calls out that `difference + 1` must stay exact as `difference`
    /// approaches `i64::MAX`.
    pub fn minus(&self, other: &KeyValue) -> Result<BigDecimal> {
        use KeyValue::*;
        match (self, other) {
            (I8(a), I8(b)) => Ok(BigDecimal::from(*a as i64) - BigDecimal::from(*b as i64)),
            (I16(a), I16(b)) => Ok(BigDecimal::from(*a as i64) - BigDecimal::from(*b as i64)),
            (I32(a), I32(b)) => Ok(BigDecimal::from(*a as i64) - BigDecimal::from(*b as i64)),
            (I64(a), I64(b)) => Ok(BigDecimal::from(*a) - BigDecimal::from(*b)),
            (U8(a), U8(b)) => Ok(BigDecimal::from(*a as u64) - BigDecimal::from(*b as u64)),
            (U16(a), U16(b)) => Ok(BigDecimal::from(*a as u64) - BigDecimal::from(*b as u64)),
            (U32(a), U32(b)) => Ok(BigDecimal::from(*a as u64) - BigDecimal::from(*b as u64)),
            (U64(a), U64(b)) => Ok(BigDecimal::from(*a) - BigDecimal::from(*b)),
            (F32(a), F32(b)) => Ok(BigDecimal::try_from(*a as f64)
                .map_err(|e| SplitterError::ConfigInvalid(e.to_string()))?
                - BigDecimal::try_from(*b as f64)
                    .map_err(|e| SplitterError::ConfigInvalid(e.to_string()))?),
            (F64(a), F64(b)) => Ok(BigDecimal::try_from(*a)
                .map_err(|e| SplitterError::ConfigInvalid(e.to_string()))?
                - BigDecimal::try_from(*b)
                    .map_err(|e| SplitterError::ConfigInvalid(e.to_string()))?),
            (Decimal(a), Decimal(b)) => Ok(a - b),
            (Date(a), Date(b)) => Ok(BigDecimal::from(a.signed_duration_since(*b).num_days())),
            _ => Err(self.mismatch(other)),
        }
    }
}

/// Rounds `value` up to 4 fractional digits, the precision spec §4.1 mandates
/// for the distribution factor, then narrows to `f64` for comparison against the
/// configured bounds.
pub(crate) fn ceil_to_f64(value: BigDecimal) -> f64 {
    value
        .with_scale_round(4, RoundingMode::Ceiling)
        .to_f64()
        .unwrap_or(f64::INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_same_variant() {
        assert_eq!(
            KeyValue::I32(1).compare(&KeyValue::I32(2)).unwrap(),
            Ordering::Less
        );
    }

    #[test]
    fn compare_mismatched_variant_errors() {
        let err = KeyValue::I32(1).compare(&KeyValue::I64(2)).unwrap_err();
        assert!(matches!(err, SplitterError::KeyTypeMismatch { .. }));
    }

    #[test]
    fn plus_overflow_returns_none() {
        assert_eq!(KeyValue::I8(120).plus(20).unwrap(), None);
        assert_eq!(KeyValue::I8(100).plus(20).unwrap(), Some(KeyValue::I8(120)));
    }

    #[test]
    fn plus_u64_saturating_boundary() {
        assert_eq!(KeyValue::U64(u64::MAX - 1).plus(5).unwrap(), None);
        assert_eq!(
            KeyValue::U64(u64::MAX - 5).plus(5).unwrap(),
            Some(KeyValue::U64(u64::MAX))
        );
    }

    #[test]
    fn plus_on_string_or_timestamp_is_unsupported() {
        let err = KeyValue::String("a".into()).plus(1).unwrap_err();
        assert!(matches!(err, SplitterError::UnsupportedKeyType(KeyKind::String)));

        let ts = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let err = KeyValue::Timestamp(ts).plus(1).unwrap_err();
        assert!(matches!(
            err,
            SplitterError::UnsupportedKeyType(KeyKind::Timestamp)
        ));
    }

    #[test]
    fn minus_integer_difference() {
        let diff = KeyValue::I64(100).minus(&KeyValue::I64(1)).unwrap();
        assert_eq!(diff, BigDecimal::from(99));
    }

    #[test]
    fn minus_date_difference_in_days() {
        let a = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let diff = KeyValue::Date(a).minus(&KeyValue::Date(b)).unwrap();
        assert_eq!(diff, BigDecimal::from(9));
    }

    #[test]
    fn string_is_not_evenly_splittable() {
        assert!(!KeyKind::String.is_evenly_splittable());
        assert!(!KeyKind::Timestamp.is_evenly_splittable());
        assert!(KeyKind::Date.is_evenly_splittable());
        assert!(KeyKind::I64.is_evenly_splittable());
    }

    #[test]
    fn ceil_to_f64_rounds_up_not_to_nearest() {
        // (100 - 1 + 1) / 100 = 1.00 exactly, should stay 1.0
        let f = ceil_to_f64(BigDecimal::from(100) / BigDecimal::from(100));
        assert!((f - 1.0).abs() < 1e-9);

        // 1_000_000 / 10 = 100000.0, no rounding needed
        let f = ceil_to_f64(BigDecimal::from(1_000_000) / BigDecimal::from(10));
        assert!((f - 100_000.0).abs() < 1e-6);

        // a non-terminating division must round UP at the 4th digit
        let f = ceil_to_f64(BigDecimal::from(1) / BigDecimal::from(3));
        assert!(f > 0.3333 && f <= 0.3334);
    }
}
