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

//! Error taxonomy for host platform calls.
//!
//! Host failures never abort the scheduling loop: an [`HostError::Unsupported`]
//! degrades the affected feature silently, and an [`HostError::Transient`] is
//! logged and swallowed by the driver. There is no fatal internal error state.

use thiserror::Error;

/// An error reported by the embedding host platform.
#[derive(Debug, Error)]
pub enum HostError {
    /// The host's API surface does not offer this capability (e.g. an older
    /// host version without force-load support). Callers degrade gracefully.
    #[error("operation not supported by this host version")]
    Unsupported,

    /// Any other failure from a host call. Best-effort callers log and
    /// continue; the affected chunk may lose its eviction protection.
    #[error("transient host failure: {0}")]
    Transient(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl HostError {
    /// Wraps an arbitrary error as a transient host failure.
    pub fn transient<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        HostError::Transient(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn transient_preserves_source() {
        let err = HostError::transient(io::Error::new(io::ErrorKind::Other, "tile server down"));
        assert!(err.to_string().contains("tile server down"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn unsupported_has_no_source() {
        let err = HostError::Unsupported;
        assert!(std::error::Error::source(&err).is_none());
    }
}
