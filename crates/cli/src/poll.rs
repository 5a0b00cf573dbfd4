// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Polling loop helper for `ji jobs --watch`.
//!
//! Paces repeated controller queries at a fixed interval, with an optional
//! cap on the number of polls and Ctrl+C support.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Result of waiting for the next poll tick.
#[derive(Debug, PartialEq, Eq)]
pub enum Tick {
    /// Ready for the next poll iteration.
    Ready,
    /// The configured number of polls has been made.
    Done,
    /// Ctrl+C was pressed.
    Interrupted,
}

/// A polling loop helper with interval timing, an optional poll cap, and Ctrl+C handling.
pub struct Poller {
    interval: Duration,
    remaining: Option<usize>,
    first: bool,
    ctrl_c: Pin<Box<dyn Future<Output = std::io::Result<()>>>>,
}

impl Poller {
    /// Create a new poller. `count` limits the total number of polls.
    pub fn new(interval: Duration, count: Option<usize>) -> Self {
        Self {
            interval,
            remaining: count,
            first: true,
            ctrl_c: Box::pin(tokio::signal::ctrl_c()),
        }
    }

    /// Wait for the next poll tick.
    ///
    /// The first call returns [`Tick::Ready`] immediately so the caller polls
    /// once up front. Later calls sleep for the configured interval first.
    /// Returns [`Tick::Done`] once `count` polls have been handed out, and
    /// [`Tick::Interrupted`] if Ctrl+C was pressed during the sleep.
    pub async fn tick(&mut self) -> Tick {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return Tick::Done;
            }
            *remaining -= 1;
        }

        if std::mem::take(&mut self.first) {
            return Tick::Ready;
        }

        tokio::select! {
            _ = &mut self.ctrl_c => Tick::Interrupted,
            _ = tokio::time::sleep(self.interval) => Tick::Ready,
        }
    }
}

#[cfg(test)]
#[path = "poll_tests.rs"]
mod tests;
