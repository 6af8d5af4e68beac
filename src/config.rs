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

//! Splitter configuration: the five tunables of spec §6, validated once at
//! construction so the chunking algorithms never have to re-check them.

use crate::error::{Result, SplitterError};

/// `split.size` default (rows per chunk).
pub const DEFAULT_SPLIT_SIZE: u64 = 8192;
/// `split.even-distribution.factor.upper-bound` default.
pub const DEFAULT_DISTRIBUTION_FACTOR_UPPER: f64 = 1000.0;
/// `split.even-distribution.factor.lower-bound` default.
pub const DEFAULT_DISTRIBUTION_FACTOR_LOWER: f64 = 0.05;
/// `split.sample-sharding.threshold` default.
pub const DEFAULT_SAMPLE_SHARDING_THRESHOLD: u64 = 1000;
/// `split.inverse-sampling-rate` default.
pub const DEFAULT_INVERSE_SAMPLING_RATE: u64 = 1000;

/// Process-wide, immutable-for-the-run configuration of a [`crate::splitter::TableChunkSplitter`].
#[derive(Debug, Clone, PartialEq)]
pub struct SplitterConfig {
    pub split_size: u64,
    pub distribution_factor_upper: f64,
    pub distribution_factor_lower: f64,
    pub sample_sharding_threshold: u64,
    pub inverse_sampling_rate: u64,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        SplitterConfig {
            split_size: DEFAULT_SPLIT_SIZE,
            distribution_factor_upper: DEFAULT_DISTRIBUTION_FACTOR_UPPER,
            distribution_factor_lower: DEFAULT_DISTRIBUTION_FACTOR_LOWER,
            sample_sharding_threshold: DEFAULT_SAMPLE_SHARDING_THRESHOLD,
            inverse_sampling_rate: DEFAULT_INVERSE_SAMPLING_RATE,
        }
    }
}

impl SplitterConfig {
    /// Builds a config from explicit values, rejecting anything the selector or
    /// chunking algorithms could not safely act on.
    pub fn new(
        split_size: u64,
        distribution_factor_upper: f64,
        distribution_factor_lower: f64,
        sample_sharding_threshold: u64,
        inverse_sampling_rate: u64,
    ) -> Result<Self> {
        let config = SplitterConfig {
            split_size,
            distribution_factor_upper,
            distribution_factor_lower,
            sample_sharding_threshold,
            inverse_sampling_rate,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.split_size == 0 {
            return Err(SplitterError::ConfigInvalid(
                "split_size must be positive".into(),
            ));
        }
        if self.sample_sharding_threshold == 0 {
            return Err(SplitterError::ConfigInvalid(
                "sample_sharding_threshold must be positive".into(),
            ));
        }
        if self.inverse_sampling_rate == 0 {
            return Err(SplitterError::ConfigInvalid(
                "inverse_sampling_rate must be positive".into(),
            ));
        }
        if self.distribution_factor_lower <= 0.0 {
            return Err(SplitterError::ConfigInvalid(
                "distribution_factor_lower must be positive".into(),
            ));
        }
        if self.distribution_factor_lower >= self.distribution_factor_upper {
            return Err(SplitterError::ConfigInvalid(format!(
                "distribution_factor_lower ({}) must be less than distribution_factor_upper ({})",
                self.distribution_factor_lower, self.distribution_factor_upper
            )));
        }
        Ok(())
    }

    /// The sample rate actually used: `inverse_sampling_rate` clamped to
    /// `split_size`, per spec §4.3 step 1. Logs a warning when the clamp bites.
    pub(crate) fn effective_sample_rate(&self) -> u64 {
        if self.inverse_sampling_rate > self.split_size {
            tracing::warn!(
                configured = self.inverse_sampling_rate,
                clamped_to = self.split_size,
                "inverse_sampling_rate exceeds split_size; clamping"
            );
            self.split_size
        } else {
            self.inverse_sampling_rate
        }
    }
}
