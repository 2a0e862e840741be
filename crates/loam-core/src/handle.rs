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

//! One-shot, pollable handles for in-flight asynchronous chunk fetches.
//!
//! A [`FetchHandle`] is the driver-side view of a fetch issued through
//! [`WorldHost::fetch_chunk`](crate::host::WorldHost::fetch_chunk). It is
//! observed with [`FetchHandle::poll`] and never awaited: the driver's
//! no-block contract forbids waiting on the host executor. The host side keeps
//! the paired [`FetchComplete`] and resolves it from whatever execution
//! context it owns.

/// Outcome of polling a [`FetchHandle`].
#[derive(Debug)]
pub enum FetchPoll<C> {
    /// The fetch has not resolved yet.
    Pending,
    /// The fetch resolved; the chunk payload is handed over exactly once.
    Ready(C),
    /// The resolver was dropped without producing a chunk. The handle is dead
    /// and must not be polled again.
    Lost,
}

/// The pollable half of an in-flight fetch.
#[derive(Debug)]
pub struct FetchHandle<C> {
    receiver: flume::Receiver<C>,
}

/// The resolver half of an in-flight fetch, held by the host executor.
#[derive(Debug)]
pub struct FetchComplete<C> {
    sender: flume::Sender<C>,
}

impl<C> FetchHandle<C> {
    /// Creates a connected resolver/handle pair.
    ///
    /// Hosts call this inside `fetch_chunk`, hand the [`FetchComplete`] to
    /// their executor, and return the [`FetchHandle`] to the driver.
    #[must_use]
    pub fn channel() -> (FetchComplete<C>, FetchHandle<C>) {
        let (sender, receiver) = flume::bounded(1);
        (FetchComplete { sender }, FetchHandle { receiver })
    }

    /// Observes the handle without blocking.
    ///
    /// A buffered chunk is returned even if the resolver has already been
    /// dropped; [`FetchPoll::Lost`] is reported only when the resolver
    /// vanished without ever sending.
    pub fn poll(&self) -> FetchPoll<C> {
        match self.receiver.try_recv() {
            Ok(chunk) => FetchPoll::Ready(chunk),
            Err(flume::TryRecvError::Empty) => FetchPoll::Pending,
            Err(flume::TryRecvError::Disconnected) => FetchPoll::Lost,
        }
    }
}

impl<C> FetchComplete<C> {
    /// Resolves the fetch with its chunk payload.
    ///
    /// If the driver already abandoned the handle (scan force-stopped), the
    /// chunk is dropped here; late resolutions after cancellation are never
    /// delivered.
    pub fn resolve(self, chunk: C) {
        let _ = self.sender.send(chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_before_resolution_is_pending() {
        let (_complete, handle) = FetchHandle::<u32>::channel();
        assert!(matches!(handle.poll(), FetchPoll::Pending));
        assert!(matches!(handle.poll(), FetchPoll::Pending));
    }

    #[test]
    fn resolved_value_is_observed_exactly_once() {
        let (complete, handle) = FetchHandle::channel();
        complete.resolve(7u32);

        assert!(matches!(handle.poll(), FetchPoll::Ready(7)));
        // The one-shot is spent; further polls see the dead channel.
        assert!(matches!(handle.poll(), FetchPoll::Lost));
    }

    #[test]
    fn dropped_resolver_reports_lost() {
        let (complete, handle) = FetchHandle::<u32>::channel();
        drop(complete);
        assert!(matches!(handle.poll(), FetchPoll::Lost));
    }

    #[test]
    fn late_resolution_after_handle_drop_is_silent() {
        let (complete, handle) = FetchHandle::channel();
        drop(handle);
        complete.resolve(99u32);
    }

    #[test]
    fn resolution_from_another_thread_is_observed() {
        let (complete, handle) = FetchHandle::channel();
        let worker = std::thread::spawn(move || complete.resolve(42u32));
        worker.join().expect("worker thread panicked");

        assert!(matches!(handle.poll(), FetchPoll::Ready(42)));
    }
}
