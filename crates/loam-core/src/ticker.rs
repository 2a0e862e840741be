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

//! The contract between the host's periodic tick and long-running scan tasks.
//!
//! The host does not call individual tasks; it ticks a registry (see
//! `loam-scan`) which drives every registered [`TickTask`] once per tick and
//! reaps finished ones. Deregistration is therefore simply reporting
//! `is_finished() == true`.

use uuid::Uuid;

/// Identifier of a task registered with a scan registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScanId(pub u64);

/// A cooperative task driven once per host tick.
///
/// Implementations must return promptly from [`advance`](TickTask::advance):
/// the host's tick thread is shared and a bounded time budget applies.
pub trait TickTask: Send {
    /// Runs one cooperative pass. Called once per host tick while registered.
    fn advance(&mut self);

    /// Hard-cancels the task (host shutdown, user abort). The task must reach
    /// a finished state without waiting on outstanding work.
    fn force_stop(&mut self);

    /// Whether the task reached a terminal state and can be deregistered.
    fn is_finished(&self) -> bool;

    /// Optional identity of the task's requester, for registry lookup.
    fn owner(&self) -> Option<Uuid>;
}
