// Copyright 2025 eraflo
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

//! Admission control: how many new fetches a tick may start.
//!
//! Throughput comes from overlapping many in-flight fetches issued across
//! many ticks, not from large per-tick batches, so the steady-state quota is
//! a single fetch per tick. When the still-pending backlog outgrows last
//! tick's resolutions the estimate drops to zero or below and admissions
//! pause until the backlog drains.

/// Number of new fetches that may be admitted this tick.
///
/// `processed_last_tick` is how many handles resolved since the previous
/// pass; `still_pending` is the pending-set size after draining. The result
/// is at most 1 and may be zero or negative; non-positive quotas admit
/// nothing.
#[must_use]
pub fn admission_quota(processed_last_tick: usize, still_pending: usize) -> i64 {
    let mut quota: i64 = 1;
    if processed_last_tick > 0 || still_pending > 0 {
        let estimate = (processed_last_tick as i64 - still_pending as i64) / 3 + 3;
        quota = quota.min(estimate);
    }
    quota
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_system_admits_one() {
        assert_eq!(admission_quota(0, 0), 1);
    }

    #[test]
    fn keeping_up_stays_at_one() {
        // Resolutions match or beat the backlog: the estimate exceeds 1 and
        // the quota is capped there.
        assert_eq!(admission_quota(1, 0), 1);
        assert_eq!(admission_quota(6, 2), 1);
        assert_eq!(admission_quota(30, 30), 1);
    }

    #[test]
    fn quota_never_exceeds_one() {
        for processed in 0..50 {
            for pending in 0..50 {
                assert!(admission_quota(processed, pending) <= 1);
            }
        }
    }

    #[test]
    fn growing_backlog_throttles_to_zero() {
        // (1 - 10) / 3 + 3 == 0 with truncating division.
        assert_eq!(admission_quota(1, 10), 0);
        assert_eq!(admission_quota(0, 9), 0);
    }

    #[test]
    fn deep_backlog_goes_negative() {
        // (0 - 30) / 3 + 3 == -7: strong backpressure signal.
        assert_eq!(admission_quota(0, 30), -7);
        assert!(admission_quota(2, 100) < 0);
    }

    #[test]
    fn truncating_division_matches_toward_zero() {
        // -8 / 3 truncates to -2, not -3.
        assert_eq!(admission_quota(1, 9), (1i64 - 9) / 3 + 3);
        assert_eq!(admission_quota(1, 9), 1);
    }
}
