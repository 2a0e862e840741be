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

//! Work-source and consumer contracts for a chunk scan.
//!
//! A scan is fed by a [`ChunkQueue`] (what to visit, in FIFO order) and drains
//! into a [`ChunkSink`] (the downstream processor, which owns its own parallel
//! lifecycle). [`ScanOptions`] is the standard ready-made queue; embedders
//! with their own enumeration logic implement [`ChunkQueue`] directly.

use crate::coord::ChunkCoord;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// The work-item source a scan consumes coordinates from.
///
/// The driver only polls; it never reorders or re-inserts. Polling is the
/// sole mutation, so the trait takes `&self` and implementations keep the
/// queue behind interior mutability.
pub trait ChunkQueue: Send + Sync {
    /// Removes and returns the next coordinate to visit, in strict FIFO
    /// order. `None` once the queue is exhausted.
    fn next_coordinate(&self) -> Option<ChunkCoord>;

    /// Total number of coordinates this scan was created with. Fixed at
    /// start; used for reporting, never for loop bounds.
    fn total_count(&self) -> usize;

    /// Whether normal completion should trigger a persistence side-effect on
    /// the host's store.
    fn persist_on_completion(&self) -> bool;

    /// Optional identity of the scan's requester, used for message routing
    /// and registry lookup.
    fn owner(&self) -> Option<Uuid>;

    /// Human label for the scanned resource domain (e.g. a world name),
    /// used in user-facing messages.
    fn domain_label(&self) -> &str;
}

/// The downstream consumer a scan hands completed chunks to.
///
/// Hand-off order among fetches that resolved within the same tick is
/// unspecified; implementations must not depend on it.
pub trait ChunkSink<C>: Send + Sync {
    /// Signals that the scan has started. The sink starts its own parallel
    /// lifecycle here.
    fn begin(&self, started_at: Instant);

    /// Receives one resolved chunk. Called exactly once per completed fetch.
    fn on_resolved(&self, chunk: C);

    /// Signals a hard cancellation cascaded from the driver's force-stop.
    fn cancel(&self);
}

/// User-facing lifecycle notifications emitted by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanMessage {
    /// The scan started.
    Started {
        /// Total number of chunks the scan will visit.
        total: usize,
        /// Human label for the resource domain (e.g. a world name).
        domain: String,
    },
    /// The scan ran to normal completion.
    Finished {
        /// Total number of chunks the scan visited.
        total: usize,
        /// Wall-clock time from start to completion.
        elapsed: Duration,
    },
}

impl fmt::Display for ScanMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanMessage::Started { total, domain } => {
                let noun = if *total == 1 { "chunk" } else { "chunks" };
                write!(f, "Scanning {total} {noun} in {domain}...")
            }
            ScanMessage::Finished { total, elapsed } => {
                let noun = if *total == 1 { "chunk" } else { "chunks" };
                write!(f, "Finished scanning {total} {noun} in {:.2}s", elapsed.as_secs_f64())
            }
        }
    }
}

/// Routes [`ScanMessage`]s to whatever user-facing surface the embedding
/// provides (chat, console, toast). The driver treats this as fire-and-forget.
pub trait Notifier: Send + Sync {
    /// Delivers one message, optionally routed to the scan's owner.
    fn notify(&self, owner: Option<Uuid>, message: ScanMessage);
}

/// The standard [`ChunkQueue`] implementation: a FIFO coordinate queue with
/// the scan's persistence flag, owner identity, and domain label.
#[derive(Debug)]
pub struct ScanOptions {
    queue: Mutex<VecDeque<ChunkCoord>>,
    total: usize,
    persist: bool,
    owner: Option<Uuid>,
    domain: String,
}

impl ScanOptions {
    /// Creates options over the given coordinates, visited in iteration
    /// order. `domain` is the human label used in messages.
    pub fn new<I>(coords: I, domain: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = ChunkCoord>,
    {
        let queue: VecDeque<ChunkCoord> = coords.into_iter().collect();
        let total = queue.len();
        Self {
            queue: Mutex::new(queue),
            total,
            persist: false,
            owner: None,
            domain: domain.into(),
        }
    }

    /// Requests a persistence side-effect on normal completion.
    #[must_use]
    pub fn with_persistence(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    /// Attaches the requesting identity for message routing.
    #[must_use]
    pub fn with_owner(mut self, owner: Uuid) -> Self {
        self.owner = Some(owner);
        self
    }
}

impl ChunkQueue for ScanOptions {
    fn next_coordinate(&self) -> Option<ChunkCoord> {
        self.queue
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
    }

    fn total_count(&self) -> usize {
        self.total
    }

    fn persist_on_completion(&self) -> bool {
        self.persist
    }

    fn owner(&self) -> Option<Uuid> {
        self.owner
    }

    fn domain_label(&self) -> &str {
        &self.domain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(n: i32) -> Vec<ChunkCoord> {
        (0..n).map(|i| ChunkCoord::new(i, -i)).collect()
    }

    #[test]
    fn options_poll_in_fifo_order() {
        let options = ScanOptions::new(coords(3), "overworld");

        assert_eq!(options.total_count(), 3);
        assert_eq!(options.next_coordinate(), Some(ChunkCoord::new(0, 0)));
        assert_eq!(options.next_coordinate(), Some(ChunkCoord::new(1, -1)));
        assert_eq!(options.next_coordinate(), Some(ChunkCoord::new(2, -2)));
        assert_eq!(options.next_coordinate(), None);
        // Total stays fixed after exhaustion.
        assert_eq!(options.total_count(), 3);
    }

    #[test]
    fn options_flags_default_off() {
        let options = ScanOptions::new(coords(1), "overworld");
        assert!(!options.persist_on_completion());
        assert!(options.owner().is_none());
    }

    #[test]
    fn options_builders() {
        let owner = Uuid::new_v4();
        let options = ScanOptions::new(coords(1), "nether")
            .with_persistence(true)
            .with_owner(owner);

        assert!(options.persist_on_completion());
        assert_eq!(options.owner(), Some(owner));
        assert_eq!(options.domain_label(), "nether");
    }

    #[test]
    fn message_formatting_pluralizes() {
        let one = ScanMessage::Started { total: 1, domain: "end".into() };
        let many = ScanMessage::Started { total: 64, domain: "end".into() };

        assert_eq!(one.to_string(), "Scanning 1 chunk in end...");
        assert_eq!(many.to_string(), "Scanning 64 chunks in end...");
    }
}
