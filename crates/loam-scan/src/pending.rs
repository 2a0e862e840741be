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

//! Tracking of outstanding asynchronous fetches.

use ahash::AHashMap;
use loam_core::coord::ChunkCoord;
use loam_core::handle::{FetchHandle, FetchPoll};

/// Key identifying one tracked fetch. Assigned internally; handle identity is
/// never derived from the handle itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct FetchId(u64);

#[derive(Debug)]
struct PendingFetch<C> {
    handle: FetchHandle<C>,
    coord: ChunkCoord,
}

/// The set of in-flight fetches, mapping each outstanding handle to the
/// coordinate it was issued for.
///
/// Entries live from the tick their fetch is issued to the tick it is
/// observed complete. Mutated only from the driver's tick context, so no
/// locking is involved.
#[derive(Debug)]
pub struct PendingSet<C> {
    entries: AHashMap<FetchId, PendingFetch<C>>,
    next_id: u64,
    lost: usize,
}

impl<C> PendingSet<C> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: AHashMap::new(),
            next_id: 0,
            lost: 0,
        }
    }

    /// Records a newly issued fetch for `coord`.
    pub fn track(&mut self, handle: FetchHandle<C>, coord: ChunkCoord) {
        let id = FetchId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, PendingFetch { handle, coord });
    }

    /// Polls every tracked handle once, removes the resolved ones, and
    /// returns their payloads with the coordinates they were issued for.
    ///
    /// Still-pending entries are retained untouched. Handles whose resolver
    /// vanished without a payload are retired and counted as lost rather
    /// than polled forever. Iteration order is unspecified.
    pub fn drain_completed(&mut self) -> Vec<(C, ChunkCoord)> {
        let mut completed = Vec::new();
        let lost = &mut self.lost;
        self.entries.retain(|_, entry| match entry.handle.poll() {
            FetchPoll::Pending => true,
            FetchPoll::Ready(chunk) => {
                completed.push((chunk, entry.coord));
                false
            }
            FetchPoll::Lost => {
                *lost += 1;
                false
            }
        });
        completed
    }

    /// Number of fetches still outstanding.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no fetches are outstanding.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of handles retired because their resolver vanished without a
    /// payload.
    #[must_use]
    pub fn lost_count(&self) -> usize {
        self.lost
    }

    /// Coordinates of every fetch still outstanding, in unspecified order.
    #[must_use]
    pub fn outstanding_coords(&self) -> Vec<ChunkCoord> {
        self.entries.values().map(|entry| entry.coord).collect()
    }
}

impl<C> Default for PendingSet<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loam_core::handle::FetchComplete;

    fn tracked(set: &mut PendingSet<u32>, x: i32) -> FetchComplete<u32> {
        let (complete, handle) = FetchHandle::channel();
        set.track(handle, ChunkCoord::new(x, 0));
        complete
    }

    #[test]
    fn drain_on_empty_set_yields_nothing() {
        let mut set = PendingSet::<u32>::new();
        assert!(set.drain_completed().is_empty());
        assert!(set.is_empty());
    }

    #[test]
    fn drain_partitions_completed_from_pending() {
        let mut set = PendingSet::new();
        let first = tracked(&mut set, 1);
        let _second = tracked(&mut set, 2);
        let third = tracked(&mut set, 3);
        assert_eq!(set.len(), 3);

        first.resolve(10);
        third.resolve(30);

        let mut completed = set.drain_completed();
        completed.sort_by_key(|(value, _)| *value);

        assert_eq!(
            completed,
            vec![(10, ChunkCoord::new(1, 0)), (30, ChunkCoord::new(3, 0))]
        );
        assert_eq!(set.len(), 1);
        assert_eq!(set.outstanding_coords(), vec![ChunkCoord::new(2, 0)]);
    }

    #[test]
    fn pending_entry_survives_repeated_drains() {
        let mut set = PendingSet::new();
        let complete = tracked(&mut set, 5);

        assert!(set.drain_completed().is_empty());
        assert!(set.drain_completed().is_empty());
        assert_eq!(set.len(), 1);

        complete.resolve(50);
        assert_eq!(set.drain_completed().len(), 1);
        assert!(set.is_empty());
    }

    #[test]
    fn vanished_resolver_is_retired_as_lost() {
        let mut set = PendingSet::new();
        let complete = tracked(&mut set, 7);
        drop(complete);

        assert!(set.drain_completed().is_empty());
        assert!(set.is_empty());
        assert_eq!(set.lost_count(), 1);
    }
}
