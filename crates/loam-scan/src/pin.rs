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

//! Force-load pinning with capability probing and best-effort semantics.
//!
//! Pinning keeps a chunk resident while its fetch is outstanding. Hosts
//! without the capability are detected once at construction and every pin
//! call becomes a silent no-op; transient pin failures are logged and
//! swallowed. Either way the scheduling loop keeps running, at worst with
//! degraded eviction protection.

use loam_core::coord::ChunkCoord;
use loam_core::error::HostError;
use loam_core::host::WorldHost;
use std::sync::Arc;

/// Toggles the host's force-load flag on coordinates, degrading gracefully.
#[derive(Debug)]
pub struct ChunkPinner<H: WorldHost> {
    host: Arc<H>,
    supported: bool,
}

impl<H: WorldHost> ChunkPinner<H> {
    /// Creates a pinner, probing the host's capability once.
    pub fn new(host: Arc<H>) -> Self {
        let supported = host.supports_force_load();
        if !supported {
            log::debug!("host does not support force-loading; scanning without pin protection");
        }
        Self { host, supported }
    }

    /// Whether the host supports force-loading at all.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.supported
    }

    /// Pins the chunk at `coord` so the host will not evict it.
    pub fn pin(&self, coord: ChunkCoord) {
        self.set(coord, true);
    }

    /// Clears the pin on the chunk at `coord`.
    pub fn unpin(&self, coord: ChunkCoord) {
        self.set(coord, false);
    }

    /// Clears the pin and hands the chunk back to the host's eviction policy.
    pub fn release(&self, coord: ChunkCoord) {
        self.unpin(coord);
        self.host.request_unload(coord);
    }

    fn set(&self, coord: ChunkCoord, force_loaded: bool) {
        if !self.supported {
            return;
        }
        match self.host.set_force_loaded(coord, force_loaded) {
            Ok(()) => {}
            // The probe said yes but this call disagreed; treat like the
            // probe and stay quiet.
            Err(HostError::Unsupported) => {}
            Err(err) => {
                log::warn!("failed to set force-loaded={force_loaded} for chunk {coord}: {err}");
            }
        }
    }
}
