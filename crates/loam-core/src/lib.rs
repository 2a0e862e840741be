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

//! # Loam Core
//!
//! Foundational crate containing traits, core types, and interface contracts
//! for chunk scanning on tick-driven hosts.
//!
//! The embedding host implements [`host::WorldHost`]; scan producers implement
//! [`scan::ChunkQueue`] (or use the provided [`scan::ScanOptions`]); downstream
//! processors implement [`scan::ChunkSink`]. The driver crate (`loam-scan`)
//! consumes these contracts and never blocks the host's tick thread.

#![warn(missing_docs)]

pub mod coord;
pub mod error;
pub mod handle;
pub mod host;
pub mod scan;
pub mod ticker;
pub mod utils;

pub use coord::ChunkCoord;
pub use error::HostError;
pub use handle::{FetchComplete, FetchHandle, FetchPoll};
pub use host::WorldHost;
pub use utils::timer::Stopwatch;
