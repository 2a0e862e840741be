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

//! The explicit registry the host ticks to drive active scans.
//!
//! One registry per host embedding, created and dropped with the host's
//! lifecycle. There is no global singleton: the embedding owns the registry
//! and calls [`ScanRegistry::tick`] from its periodic timer at its native
//! cadence. Finished tasks are reaped automatically, which is what
//! "deregistering from the timer" means here.

use loam_core::ticker::{ScanId, TickTask};
use std::collections::HashMap;
use uuid::Uuid;

/// Owns and drives every active [`TickTask`].
#[derive(Default)]
pub struct ScanRegistry {
    tasks: HashMap<ScanId, Box<dyn TickTask>>,
    next_id: u64,
}

impl ScanRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
            next_id: 0,
        }
    }

    /// Registers a task and returns its id. The task is advanced on every
    /// subsequent [`tick`](ScanRegistry::tick) until it reports finished.
    pub fn insert(&mut self, task: impl TickTask + 'static) -> ScanId {
        let id = ScanId(self.next_id);
        self.next_id += 1;
        self.tasks.insert(id, Box::new(task));
        id
    }

    /// Advances every registered task once and reaps the finished ones.
    /// Invoked by the host once per tick.
    pub fn tick(&mut self) {
        for task in self.tasks.values_mut() {
            task.advance();
        }
        self.tasks.retain(|id, task| {
            let finished = task.is_finished();
            if finished {
                log::debug!("reaping finished scan task {id:?}");
            }
            !finished
        });
    }

    /// Hard-cancels and removes the task with `id`. Returns whether a task
    /// was registered under it.
    pub fn force_stop(&mut self, id: ScanId) -> bool {
        match self.tasks.remove(&id) {
            Some(mut task) => {
                task.force_stop();
                true
            }
            None => false,
        }
    }

    /// Hard-cancels and removes every task belonging to `owner`. Returns the
    /// number of tasks cancelled.
    pub fn force_stop_owner(&mut self, owner: Uuid) -> usize {
        let ids: Vec<ScanId> = self
            .tasks
            .iter()
            .filter(|(_, task)| task.owner() == Some(owner))
            .map(|(id, _)| *id)
            .collect();
        for id in &ids {
            self.force_stop(*id);
        }
        ids.len()
    }

    /// Hard-cancels and removes every task. Called at host shutdown.
    pub fn force_stop_all(&mut self) {
        for (_, mut task) in self.tasks.drain() {
            task.force_stop();
        }
    }

    /// Id of the task belonging to `owner`, if one is registered.
    #[must_use]
    pub fn scan_for_owner(&self, owner: Uuid) -> Option<ScanId> {
        self.tasks
            .iter()
            .find(|(_, task)| task.owner() == Some(owner))
            .map(|(id, _)| *id)
    }

    /// Whether a task is registered under `id`.
    #[must_use]
    pub fn contains(&self, id: ScanId) -> bool {
        self.tasks.contains_key(&id)
    }

    /// Number of registered tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether no tasks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FakeTask {
        ticks_left: usize,
        advances: Arc<AtomicUsize>,
        cancels: Arc<AtomicUsize>,
        owner: Option<Uuid>,
    }

    impl FakeTask {
        fn new(ticks_left: usize) -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let advances = Arc::new(AtomicUsize::new(0));
            let cancels = Arc::new(AtomicUsize::new(0));
            let task = Self {
                ticks_left,
                advances: advances.clone(),
                cancels: cancels.clone(),
                owner: None,
            };
            (task, advances, cancels)
        }
    }

    impl TickTask for FakeTask {
        fn advance(&mut self) {
            self.advances.fetch_add(1, Ordering::SeqCst);
            self.ticks_left = self.ticks_left.saturating_sub(1);
        }

        fn force_stop(&mut self) {
            self.cancels.fetch_add(1, Ordering::SeqCst);
            self.ticks_left = 0;
        }

        fn is_finished(&self) -> bool {
            self.ticks_left == 0
        }

        fn owner(&self) -> Option<Uuid> {
            self.owner
        }
    }

    #[test]
    fn tick_advances_and_reaps() {
        let mut registry = ScanRegistry::new();
        let (task, advances, _) = FakeTask::new(2);
        let id = registry.insert(task);

        registry.tick();
        assert!(registry.contains(id));
        registry.tick();
        assert!(!registry.contains(id));
        assert_eq!(advances.load(Ordering::SeqCst), 2);
        assert!(registry.is_empty());
    }

    #[test]
    fn force_stop_cancels_and_removes() {
        let mut registry = ScanRegistry::new();
        let (task, _, cancels) = FakeTask::new(100);
        let id = registry.insert(task);

        assert!(registry.force_stop(id));
        assert_eq!(cancels.load(Ordering::SeqCst), 1);
        assert!(!registry.force_stop(id));
    }

    #[test]
    fn owner_lookup_and_cancel() {
        let owner = Uuid::new_v4();
        let mut registry = ScanRegistry::new();
        let (mut task, _, cancels) = FakeTask::new(100);
        task.owner = Some(owner);
        let id = registry.insert(task);

        assert_eq!(registry.scan_for_owner(owner), Some(id));
        assert_eq!(registry.force_stop_owner(owner), 1);
        assert_eq!(cancels.load(Ordering::SeqCst), 1);
        assert_eq!(registry.scan_for_owner(owner), None);
    }

    #[test]
    fn shutdown_cancels_everything() {
        let mut registry = ScanRegistry::new();
        let (first, _, first_cancels) = FakeTask::new(100);
        let (second, _, second_cancels) = FakeTask::new(100);
        registry.insert(first);
        registry.insert(second);

        registry.force_stop_all();
        assert!(registry.is_empty());
        assert_eq!(first_cancels.load(Ordering::SeqCst), 1);
        assert_eq!(second_cancels.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn ids_are_not_reused() {
        let mut registry = ScanRegistry::new();
        let (first, _, _) = FakeTask::new(1);
        let (second, _, _) = FakeTask::new(1);

        let first_id = registry.insert(first);
        registry.tick(); // reaps the first task
        let second_id = registry.insert(second);
        assert_ne!(first_id, second_id);
    }
}
