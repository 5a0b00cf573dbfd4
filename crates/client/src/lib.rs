// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job state queries against the controller.
//!
//! [`query_jobs`] performs one blocking open/send/receive/close cycle over a
//! [`Transport`] and classifies the reply. It never retries.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod query;
mod socket;
mod transport;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeTransport, Stage, TransportCall};

pub use query::{classify, query_jobs, JobsUpdate, QueryError, QueryOutcome};
pub use socket::{ControllerAddr, SocketSession, SocketTransport};
pub use transport::{SessionGuard, Transport, TransportError};
