// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake transport for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use std::collections::HashSet;
use std::sync::Arc;

use ji_wire::{ProtocolError, Request, Response};
use parking_lot::Mutex;

use super::{Transport, TransportError};

/// Session stage that can be scripted to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Open,
    Send,
    Receive,
    Close,
}

/// Recorded transport call
#[derive(Debug, Clone, PartialEq)]
pub enum TransportCall {
    Open,
    Send { session: u64, request: Request },
    Receive { session: u64 },
    Close { session: u64 },
}

struct FakeTransportState {
    calls: Vec<TransportCall>,
    failing: HashSet<Stage>,
    response: Option<Response>,
    next_session: u64,
}

/// Fake transport for testing
///
/// Replies with the scripted response (or reports a closed connection when
/// none is set) and fails at whichever stages were marked with `fail_at`.
#[derive(Clone)]
pub struct FakeTransport {
    inner: Arc<Mutex<FakeTransportState>>,
}

impl Default for FakeTransport {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeTransportState {
                calls: Vec::new(),
                failing: HashSet::new(),
                response: None,
                next_session: 1,
            })),
        }
    }
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fake that answers every receive with `response`
    pub fn responding(response: Response) -> Self {
        let fake = Self::new();
        fake.set_response(response);
        fake
    }

    pub fn set_response(&self, response: Response) {
        self.inner.lock().response = Some(response);
    }

    /// Make `stage` fail from now on
    pub fn fail_at(&self, stage: Stage) {
        self.inner.lock().failing.insert(stage);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<TransportCall> {
        self.inner.lock().calls.clone()
    }

    /// Requests that reached the send stage
    pub fn sent(&self) -> Vec<Request> {
        self.inner
            .lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                TransportCall::Send { request, .. } => Some(*request),
                _ => None,
            })
            .collect()
    }

    fn injected(stage: Stage) -> TransportError {
        TransportError::Io(std::io::Error::other(format!("injected {:?} failure", stage)))
    }
}

impl Transport for FakeTransport {
    type Session = u64;

    fn open(&self) -> Result<u64, TransportError> {
        let mut inner = self.inner.lock();
        inner.calls.push(TransportCall::Open);
        if inner.failing.contains(&Stage::Open) {
            return Err(Self::injected(Stage::Open));
        }
        let id = inner.next_session;
        inner.next_session += 1;
        Ok(id)
    }

    fn send(&self, session: &mut u64, request: &Request) -> Result<(), TransportError> {
        let mut inner = self.inner.lock();
        inner.calls.push(TransportCall::Send {
            session: *session,
            request: *request,
        });
        if inner.failing.contains(&Stage::Send) {
            return Err(Self::injected(Stage::Send));
        }
        Ok(())
    }

    fn receive(&self, session: &mut u64) -> Result<Response, TransportError> {
        let mut inner = self.inner.lock();
        inner.calls.push(TransportCall::Receive { session: *session });
        if inner.failing.contains(&Stage::Receive) {
            return Err(Self::injected(Stage::Receive));
        }
        inner
            .response
            .clone()
            .ok_or(TransportError::Protocol(ProtocolError::ConnectionClosed))
    }

    fn close(&self, session: u64) -> Result<(), TransportError> {
        let mut inner = self.inner.lock();
        inner.calls.push(TransportCall::Close { session });
        if inner.failing.contains(&Stage::Close) {
            return Err(Self::injected(Stage::Close));
        }
        Ok(())
    }
}
