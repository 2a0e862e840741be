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

//! A simple wall-clock stopwatch.

use std::time::{Duration, Instant};

/// Measures elapsed wall-clock time from its creation (or last reset).
#[derive(Debug, Clone)]
pub struct Stopwatch {
    start: Option<Instant>,
}

impl Stopwatch {
    /// Creates a stopwatch and starts it immediately.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Some(Instant::now()),
        }
    }

    /// Creates a stopwatch that has not been started yet.
    #[must_use]
    pub fn unstarted() -> Self {
        Self { start: None }
    }

    /// Restarts the measurement from now.
    pub fn reset(&mut self) {
        self.start = Some(Instant::now());
    }

    /// The instant this stopwatch was last started, if any.
    #[must_use]
    pub fn started_at(&self) -> Option<Instant> {
        self.start
    }

    /// Elapsed time since start, or `None` if never started.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        self.start.map(|start| start.elapsed())
    }

    /// Elapsed time in seconds as a float, or `None` if never started.
    #[must_use]
    pub fn elapsed_secs_f64(&self) -> Option<f64> {
        self.elapsed().map(|elapsed| elapsed.as_secs_f64())
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn unstarted_reports_none() {
        let stopwatch = Stopwatch::unstarted();
        assert!(stopwatch.elapsed().is_none());
        assert!(stopwatch.elapsed_secs_f64().is_none());
    }

    #[test]
    fn elapsed_advances() {
        let stopwatch = Stopwatch::new();
        thread::sleep(Duration::from_millis(10));
        let elapsed = stopwatch.elapsed().expect("started stopwatch");
        assert!(elapsed >= Duration::from_millis(10));
    }

    #[test]
    fn reset_restarts_measurement() {
        let mut stopwatch = Stopwatch::unstarted();
        stopwatch.reset();
        assert!(stopwatch.elapsed().is_some());
    }
}
