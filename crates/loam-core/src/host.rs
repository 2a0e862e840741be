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

//! The host platform contract.
//!
//! This is the seam between the scan driver and the embedding application
//! (game engine, world server, tile store). The host owns the chunk storage,
//! the eviction policy, and the executor that performs fetches; the driver
//! only issues requests and polls their handles.

use crate::coord::ChunkCoord;
use crate::error::HostError;
use crate::handle::FetchHandle;

/// Interface the embedding host exposes to the scan driver.
///
/// All methods take `&self`: the host is shared between the driver and its
/// own subsystems, and implementations are expected to use whatever interior
/// synchronization their storage already requires.
pub trait WorldHost: Send + Sync {
    /// Payload type a resolved fetch delivers to the downstream consumer.
    type Chunk: Send + 'static;

    /// Reports whether this host version supports force-load pinning.
    ///
    /// Probed once when a scan is constructed; call sites branch on the
    /// cached flag rather than re-probing every tick.
    fn supports_force_load(&self) -> bool;

    /// Sets or clears the force-load pin on the chunk at `coord`.
    ///
    /// While pinned, the host must not evict the chunk. Hosts without the
    /// capability return [`HostError::Unsupported`].
    fn set_force_loaded(&self, coord: ChunkCoord, force_loaded: bool) -> Result<(), HostError>;

    /// Asks the host to release the chunk at `coord` back to its eviction
    /// policy. Advisory; the host may keep the chunk resident.
    fn request_unload(&self, coord: ChunkCoord);

    /// Issues an asynchronous fetch for the chunk at `coord` on the host's
    /// own executor and returns the pollable handle.
    ///
    /// Must not block: the driver calls this from the tick thread.
    fn fetch_chunk(&self, coord: ChunkCoord) -> FetchHandle<Self::Chunk>;

    /// Persists the underlying store. Invoked once by a normal scan
    /// completion when the work source requested it.
    fn save(&self) -> Result<(), HostError>;
}
