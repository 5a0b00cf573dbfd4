// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Incremental job table query.
//!
//! One query is one session: open, send the `JobInfo` request, receive a
//! single reply, close. The reply is then classified into a fresh table, a
//! "nothing changed" signal, or an error.

use ji_core::JobTable;
use ji_wire::{Request, Response};
use thiserror::Error;

use crate::transport::{SessionGuard, Transport, TransportError};

/// Query errors, one per failing stage or reply kind
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("failed to connect to controller: {0}")]
    Connection(#[source] TransportError),

    #[error("failed to send request: {0}")]
    Send(#[source] TransportError),

    #[error("failed to receive response: {0}")]
    Receive(#[source] TransportError),

    #[error("failed to shut down connection: {0}")]
    Shutdown(#[source] TransportError),

    /// Controller-reported failure; `code` is passed through untouched
    #[error("controller returned error code {code}")]
    Remote { code: i32 },

    #[error("unexpected {kind} response from controller")]
    UnexpectedResponse { kind: &'static str },
}

/// Successful query result
#[derive(Debug, Clone, PartialEq)]
pub enum JobsUpdate {
    /// The controller sent a table newer than the requested `last_update`
    Updated(JobTable),
    /// Nothing changed since the requested `last_update`
    NoChange,
}

impl JobsUpdate {
    pub fn table(&self) -> Option<&JobTable> {
        match self {
            JobsUpdate::Updated(table) => Some(table),
            JobsUpdate::NoChange => None,
        }
    }

    /// Apply to a snapshot the caller already holds.
    ///
    /// `NoChange` keeps `previous`; `Updated` replaces it.
    pub fn merge_into(self, previous: Option<JobTable>) -> Option<JobTable> {
        match self {
            JobsUpdate::Updated(table) => Some(table),
            JobsUpdate::NoChange => previous,
        }
    }
}

/// Outcome of one query cycle.
///
/// `shutdown` holds a [`QueryError::Shutdown`] when closing the session
/// failed. It is reported next to `result` and never replaces it.
#[derive(Debug)]
#[must_use]
pub struct QueryOutcome {
    pub result: Result<JobsUpdate, QueryError>,
    pub shutdown: Option<QueryError>,
}

impl QueryOutcome {
    fn failed(error: QueryError) -> Self {
        Self {
            result: Err(error),
            shutdown: None,
        }
    }

    pub fn into_result(self) -> Result<JobsUpdate, QueryError> {
        self.result
    }
}

/// Fetch the job table if it changed after `last_update` (0 for everything).
pub fn query_jobs<T: Transport>(transport: &T, last_update: u64) -> QueryOutcome {
    tracing::debug!(last_update, "querying job table");

    let mut session = match SessionGuard::open(transport) {
        Ok(session) => session,
        Err(e) => {
            tracing::debug!(error = %e, "controller connection failed");
            return QueryOutcome::failed(QueryError::Connection(e));
        }
    };

    let exchanged = exchange(&mut session, last_update);

    let shutdown = session.close().err().map(QueryError::Shutdown);
    if let Some(e) = &shutdown {
        tracing::warn!(error = %e, "controller session did not close cleanly");
    }

    let result = exchanged.and_then(classify);
    match &result {
        Ok(JobsUpdate::Updated(table)) => tracing::debug!(
            last_update = table.last_update,
            records = table.record_count(),
            "job table updated"
        ),
        Ok(JobsUpdate::NoChange) => tracing::debug!(last_update, "job table unchanged"),
        Err(e) => tracing::debug!(error = %e, "job query failed"),
    }

    QueryOutcome { result, shutdown }
}

fn exchange<T: Transport>(
    session: &mut SessionGuard<'_, T>,
    last_update: u64,
) -> Result<Response, QueryError> {
    session
        .send(&Request::JobInfo { last_update })
        .map_err(QueryError::Send)?;
    session.receive().map_err(QueryError::Receive)
}

/// Map a controller reply to a query result.
pub fn classify(response: Response) -> Result<JobsUpdate, QueryError> {
    match response {
        Response::JobInfo(table) => Ok(JobsUpdate::Updated(table)),
        Response::ReturnCode { code: 0 } => Ok(JobsUpdate::NoChange),
        Response::ReturnCode { code } => Err(QueryError::Remote { code }),
        other => Err(QueryError::UnexpectedResponse { kind: other.kind() }),
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
