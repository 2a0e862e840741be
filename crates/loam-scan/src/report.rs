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

//! Default reporting: scan lifecycle messages routed to the log.
//!
//! Embeddings with a real user surface (chat, console, UI toast) implement
//! [`Notifier`] themselves; this one is for headless hosts and tests.

use loam_core::scan::{Notifier, ScanMessage};
use uuid::Uuid;

/// A [`Notifier`] that writes every message to the `log` facade at info
/// level, tagging the owner when present.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, owner: Option<Uuid>, message: ScanMessage) {
        match owner {
            Some(owner) => log::info!("[scan:{owner}] {message}"),
            None => log::info!("[scan] {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn notifier_accepts_all_message_shapes() {
        let notifier = LogNotifier;
        notifier.notify(
            None,
            ScanMessage::Started {
                total: 256,
                domain: "overworld".into(),
            },
        );
        notifier.notify(
            Some(Uuid::new_v4()),
            ScanMessage::Finished {
                total: 256,
                elapsed: Duration::from_secs(12),
            },
        );
    }
}
