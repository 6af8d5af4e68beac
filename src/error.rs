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

use thiserror::Error;

use crate::key::KeyKind;

/// Errors the splitter can surface to its caller.
///
/// Overflow during stride advancement and bounds degeneracy are *not* represented
/// here: both are design-expected outcomes handled internally by the chunking
/// algorithms (see `algorithm::even` and `algorithm::selector`).
#[derive(Error, Debug)]
pub enum SplitterError {
    #[error("invalid splitter configuration: {0}")]
    ConfigInvalid(String),

    /// Raised by [`crate::key::KeyValue::plus`] for a key domain that has no
    /// meaningful arithmetic stride (`String`, `Timestamp`). The strategy
    /// selector already routes these kinds to the unevenly-sized algorithm
    /// before any `plus` call can happen, so in practice this only fires if
    /// `plus` is called directly, outside that dispatch.
    #[error("split column type {0:?} does not support arithmetic striding")]
    UnsupportedKeyType(KeyKind),

    #[error("key type mismatch: expected {expected:?}, found {found:?}")]
    KeyTypeMismatch { expected: KeyKind, found: KeyKind },

    #[error("database adapter failure: {0}")]
    Driver(anyhow::Error),
}

impl From<anyhow::Error> for SplitterError {
    fn from(err: anyhow::Error) -> Self {
        SplitterError::Driver(err)
    }
}

pub type Result<T> = std::result::Result<T, SplitterError>;
