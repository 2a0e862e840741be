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

//! The tick driver: one cooperative, time-budgeted pass per host tick.
//!
//! Each pass drains resolved fetches to the downstream sink, releases their
//! pins, and admits new fetches under the [`admission`](crate::admission)
//! quota, returning early the moment the wall-clock budget is spent. The
//! driver never blocks, never spawns threads, and never awaits: fetches run
//! on the host's executor and are only ever polled.

use crate::admission::admission_quota;
use crate::pending::PendingSet;
use crate::pin::ChunkPinner;
use anyhow::{ensure, Result};
use loam_core::host::WorldHost;
use loam_core::scan::{ChunkQueue, ChunkSink, Notifier, ScanMessage};
use loam_core::ticker::TickTask;
use loam_core::utils::timer::Stopwatch;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Default wall-clock budget for one pass. Chosen to stay under one host
/// tick at common cadences (50 ms at 20 ticks per second) with headroom for
/// the host's own work.
pub const DEFAULT_TICK_BUDGET: Duration = Duration::from_millis(45);

/// Lifecycle state of a [`LoadScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Constructed but not started.
    Idle,
    /// Registered and advancing every tick.
    Running,
    /// Ran to normal completion (work source exhausted).
    Stopped,
    /// Hard-cancelled before completion.
    ForceStopped,
}

/// Drives one bulk chunk scan against a host, a work source, and a sink.
///
/// The scheduler owns its pending set and reentrancy guard exclusively; the
/// queue and sink are shared collaborators. Registered in a
/// [`ScanRegistry`](crate::registry::ScanRegistry), it is advanced once per
/// host tick and deregistered (reaped) once finished.
pub struct LoadScheduler<H, Q, S>
where
    H: WorldHost,
    Q: ChunkQueue,
    S: ChunkSink<H::Chunk>,
{
    host: Arc<H>,
    queue: Arc<Q>,
    sink: Arc<S>,
    notifier: Option<Arc<dyn Notifier>>,
    pinner: ChunkPinner<H>,
    pending: PendingSet<H::Chunk>,
    state: ScanState,
    // Reentrancy guard: true only while no pass is advancing. A plain bool,
    // not a mutex; a busy tick is skipped, never queued or waited on.
    ready: bool,
    clock: Stopwatch,
    total: usize,
    processed_total: usize,
    tick_budget: Duration,
}

impl<H, Q, S> LoadScheduler<H, Q, S>
where
    H: WorldHost,
    Q: ChunkQueue,
    S: ChunkSink<H::Chunk>,
{
    /// Creates an idle scheduler. Probes the host's force-load capability
    /// once, here.
    pub fn new(host: Arc<H>, queue: Arc<Q>, sink: Arc<S>) -> Self {
        let pinner = ChunkPinner::new(host.clone());
        Self {
            host,
            queue,
            sink,
            notifier: None,
            pinner,
            pending: PendingSet::new(),
            state: ScanState::Idle,
            ready: false,
            clock: Stopwatch::unstarted(),
            total: 0,
            processed_total: 0,
            tick_budget: DEFAULT_TICK_BUDGET,
        }
    }

    /// Attaches a user-facing notifier for start/finish messages.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Overrides the per-pass wall-clock budget.
    #[must_use]
    pub fn with_tick_budget(mut self, budget: Duration) -> Self {
        self.tick_budget = budget;
        self
    }

    /// Changes the per-pass wall-clock budget of a scheduler already built.
    pub fn set_tick_budget(&mut self, budget: Duration) {
        self.tick_budget = budget;
    }

    /// Starts the scan: captures the start time and total count, starts the
    /// sink's own lifecycle, and becomes ready for per-tick passes.
    ///
    /// Registration with the host's tick cadence is the caller's next step
    /// (insert into a [`ScanRegistry`](crate::registry::ScanRegistry)).
    pub fn start(&mut self) -> Result<()> {
        ensure!(
            self.state == ScanState::Idle,
            "scan already started (state {:?})",
            self.state
        );

        self.total = self.queue.total_count();
        self.clock.reset();
        self.state = ScanState::Running;
        self.ready = true;

        log::debug!(
            "started scan for {} chunks in {}",
            self.total,
            self.queue.domain_label()
        );
        if let Some(started_at) = self.clock.started_at() {
            self.sink.begin(started_at);
        }
        self.notify(ScanMessage::Started {
            total: self.total,
            domain: self.queue.domain_label().to_string(),
        });
        Ok(())
    }

    /// Runs one cooperative pass. Called once per host tick while Running.
    ///
    /// A tick that arrives while the previous pass is still marked busy is
    /// silently skipped. The guard is restored before every return path of
    /// an ongoing scan; the terminal transitions leave it down so late ticks
    /// before deregistration are no-ops.
    pub fn advance(&mut self) {
        if self.state != ScanState::Running || !self.ready {
            return;
        }
        self.ready = false;

        let pass = Stopwatch::new();

        // Observe resolved fetches and hand their chunks downstream. Order
        // among same-tick completions is unspecified.
        let completed = self.pending.drain_completed();
        let processed_this_tick = completed.len();
        self.processed_total += processed_this_tick;

        let mut to_release = Vec::with_capacity(processed_this_tick);
        for (chunk, coord) in completed {
            self.sink.on_resolved(chunk);
            to_release.push(coord);
        }
        for coord in to_release {
            self.pinner.release(coord);
        }

        let quota = admission_quota(processed_this_tick, self.pending.len());
        for _ in 0..quota.max(0) {
            // Budget check before polling the source, so a coordinate can
            // never be polled and then dropped under time pressure.
            if pass.elapsed().unwrap_or_default() > self.tick_budget {
                self.ready = true;
                return;
            }

            let Some(coord) = self.queue.next_coordinate() else {
                self.stop();
                return;
            };

            self.pinner.pin(coord);
            self.pending.track(self.host.fetch_chunk(coord), coord);
        }

        self.ready = true;
    }

    /// Hard-cancels the scan: cascades cancellation to the sink and abandons
    /// outstanding fetches. No persistence side-effect.
    pub fn force_stop(&mut self) {
        match self.state {
            ScanState::Stopped | ScanState::ForceStopped => return,
            ScanState::Idle => {
                self.state = ScanState::ForceStopped;
                return;
            }
            ScanState::Running => {}
        }

        self.state = ScanState::ForceStopped;
        self.ready = false;
        self.sink.cancel();
        log::debug!(
            "scan forcefully stopped with {} fetches outstanding",
            self.pending.len()
        );
    }

    // Normal terminal transition: the work source is exhausted. Outstanding
    // fetches already issued are not cancelled.
    fn stop(&mut self) {
        let elapsed = self.clock.elapsed().unwrap_or_default();
        log::debug!(
            "finished issuing fetches for {} chunks in {:.2}s ({} delivered, {} in flight)",
            self.total,
            elapsed.as_secs_f64(),
            self.processed_total,
            self.pending.len()
        );

        if self.queue.persist_on_completion() {
            if let Err(err) = self.host.save() {
                log::error!("failed to persist store after scan: {err}");
            }
        }

        self.notify(ScanMessage::Finished {
            total: self.total,
            elapsed,
        });
        self.state = ScanState::Stopped;
    }

    fn notify(&self, message: ScanMessage) {
        if let Some(notifier) = &self.notifier {
            notifier.notify(self.queue.owner(), message);
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Total coordinate count captured at start.
    #[must_use]
    pub fn total_chunks(&self) -> usize {
        self.total
    }

    /// Number of fetches currently outstanding.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    /// Chunks delivered to the sink so far.
    #[must_use]
    pub fn processed(&self) -> usize {
        self.processed_total
    }

    /// Wall-clock time since start, `None` before start.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        self.clock.elapsed()
    }

    /// Whether the scan reached either terminal state.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self.state, ScanState::Stopped | ScanState::ForceStopped)
    }
}

impl<H, Q, S> TickTask for LoadScheduler<H, Q, S>
where
    H: WorldHost,
    Q: ChunkQueue,
    S: ChunkSink<H::Chunk>,
{
    fn advance(&mut self) {
        LoadScheduler::advance(self);
    }

    fn force_stop(&mut self) {
        LoadScheduler::force_stop(self);
    }

    fn is_finished(&self) -> bool {
        self.is_cancelled()
    }

    fn owner(&self) -> Option<Uuid> {
        self.queue.owner()
    }
}
