// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transport sessions to the controller

use ji_wire::{ProtocolError, Request, Response};
use thiserror::Error;

/// Errors from transport operations
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Protocol(#[from] ProtocolError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid controller address: {0}")]
    InvalidAddress(String),

    #[error("session already closed")]
    Closed,
}

/// Connection to the controller.
///
/// Each stage is independently fallible. A session carries at most one
/// request at a time and is never shared between queries. Timeouts, if any,
/// belong to the implementation.
pub trait Transport {
    type Session;

    /// Open a new session
    fn open(&self) -> Result<Self::Session, TransportError>;

    /// Send one request
    fn send(&self, session: &mut Self::Session, request: &Request) -> Result<(), TransportError>;

    /// Receive one response
    fn receive(&self, session: &mut Self::Session) -> Result<Response, TransportError>;

    /// Tear the session down
    fn close(&self, session: Self::Session) -> Result<(), TransportError>;
}

/// An open session that is closed exactly once on every exit path.
///
/// Call [`SessionGuard::close`] to observe the shutdown result. If the guard
/// is dropped instead, the session is still closed and a failure is logged.
pub struct SessionGuard<'t, T: Transport> {
    transport: &'t T,
    session: Option<T::Session>,
}

impl<'t, T: Transport> SessionGuard<'t, T> {
    pub fn open(transport: &'t T) -> Result<Self, TransportError> {
        let session = transport.open()?;
        Ok(Self {
            transport,
            session: Some(session),
        })
    }

    pub fn send(&mut self, request: &Request) -> Result<(), TransportError> {
        let session = self.session.as_mut().ok_or(TransportError::Closed)?;
        self.transport.send(session, request)
    }

    pub fn receive(&mut self) -> Result<Response, TransportError> {
        let session = self.session.as_mut().ok_or(TransportError::Closed)?;
        self.transport.receive(session)
    }

    pub fn close(mut self) -> Result<(), TransportError> {
        match self.session.take() {
            Some(session) => self.transport.close(session),
            None => Ok(()),
        }
    }
}

impl<T: Transport> Drop for SessionGuard<'_, T> {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            if let Err(e) = self.transport.close(session) {
                tracing::warn!(error = %e, "failed to close dropped session");
            }
        }
    }
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
