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

//! Cooperative pacing between server round-trips during unevenly-sized
//! chunking (spec §4.4/§4.6). A pure function of the iteration count; no
//! shared state, nothing to construct.

use std::thread;
use std::time::Duration;

use crate::adapter::TablePath;

const SLEEP_EVERY_N_ITERATIONS: u64 = 10;
const SLEEP_DURATION: Duration = Duration::from_millis(100);

/// Sleeps ~100ms every 10th iteration (effectively ~1s of sleep per 100
/// iterations, matching spec §9's resolution of the stale "every 100 queries,
/// sleep 1s" comment against the code's actual 10-iteration cadence).
///
/// There is no interrupt to swallow on a plain OS thread in this
/// implementation; the function simply never returns an error, which is the
/// direct equivalent of "an interrupted sleep does not abort chunking".
pub(crate) fn throttle(iteration: u64, table: &TablePath) {
    if iteration > 0 && iteration % SLEEP_EVERY_N_ITERATIONS == 0 {
        tracing::debug!(iteration, %table, "throttling unevenly-sized chunking");
        thread::sleep(SLEEP_DURATION);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_sleeps_on_tenth_iterations() {
        let table = TablePath::from("t");
        // Not a timing test: just exercises the branch predicate directly,
        // since sleeping in a unit test would be wasteful.
        for i in 0..30u64 {
            let should_sleep = i > 0 && i % SLEEP_EVERY_N_ITERATIONS == 0;
            assert_eq!(should_sleep, i != 0 && i % 10 == 0);
        }
        // Smoke test the zero and non-multiple cases don't sleep (fast path).
        throttle(0, &table);
        throttle(3, &table);
    }
}
