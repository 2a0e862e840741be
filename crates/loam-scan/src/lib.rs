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

//! # Loam Scan
//!
//! The adaptive, time-budgeted scan driver.
//!
//! One [`LoadScheduler`] drives one bulk scan: each host tick it drains
//! resolved fetches to the downstream [`ChunkSink`](loam_core::scan::ChunkSink),
//! releases their pins, and admits a throttled number of new fetches, always
//! returning before the per-tick wall-clock budget runs out. Schedulers are
//! registered in a [`ScanRegistry`] which the host ticks at its native
//! cadence.
//!
//! ```rust,ignore
//! let options = ScanOptions::new(coords, "overworld").with_persistence(true);
//! let mut scheduler = LoadScheduler::new(host, Arc::new(options), sink);
//! scheduler.start()?;
//! let id = registry.insert(scheduler);
//! // every host tick:
//! registry.tick();
//! ```

#![warn(missing_docs)]

pub mod admission;
pub mod pending;
pub mod pin;
pub mod registry;
pub mod report;
pub mod scheduler;

pub use pending::PendingSet;
pub use pin::ChunkPinner;
pub use registry::ScanRegistry;
pub use report::LogNotifier;
pub use scheduler::{LoadScheduler, ScanState};
