// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Controller client for CLI commands

use std::path::PathBuf;
use std::time::Duration;

use ji_client::{
    query_jobs, ControllerAddr, JobsUpdate, QueryError, SocketTransport, TransportError,
};
use thiserror::Error;

use crate::env;

/// Default controller socket name inside the state directory
const CONTROLLER_SOCKET: &str = "controller.sock";

/// Default per-operation timeout for controller requests
const DEFAULT_TIMEOUT_IPC: Duration = Duration::from_secs(5);

/// Timeout for controller requests (connect, send, receive)
pub fn timeout_ipc() -> Duration {
    env::timeout_ipc_ms().unwrap_or(DEFAULT_TIMEOUT_IPC)
}

/// Client errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Address(#[from] TransportError),

    #[error("Could not determine state directory")]
    NoStateDir,

    #[error("query task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ClientError {
    /// Whether the controller could not be reached at all
    pub fn is_connection(&self) -> bool {
        matches!(self, ClientError::Query(QueryError::Connection(_)))
    }
}

/// Resolve the controller address: `--controller` > JI_CONTROLLER > state dir socket
pub fn controller_addr(flag: Option<&str>) -> Result<ControllerAddr, ClientError> {
    match flag.map(String::from).or_else(env::controller) {
        Some(addr) => Ok(addr.parse()?),
        None => Ok(ControllerAddr::Unix(env::state_dir()?.join(CONTROLLER_SOCKET))),
    }
}

/// Controller client
#[derive(Debug, Clone)]
pub struct ControllerClient {
    transport: SocketTransport,
}

impl ControllerClient {
    pub fn new(addr: ControllerAddr) -> Self {
        Self {
            transport: SocketTransport::new(addr).with_timeout(timeout_ipc()),
        }
    }

    /// Build a client from the `--controller` flag and environment
    pub fn from_flag(flag: Option<&str>) -> Result<Self, ClientError> {
        Ok(Self::new(controller_addr(flag)?))
    }

    pub fn addr(&self) -> &ControllerAddr {
        self.transport.addr()
    }

    /// Fetch the job table if it changed after `last_update`.
    ///
    /// The query itself is blocking and runs on the blocking thread pool.
    pub async fn jobs(&self, last_update: u64) -> Result<JobsUpdate, ClientError> {
        let transport = self.transport.clone();
        let outcome = tokio::task::spawn_blocking(move || query_jobs(&transport, last_update))
            .await?;

        match outcome.into_result() {
            Ok(update) => Ok(update),
            Err(e) => {
                let err = ClientError::Query(e);
                if err.is_connection() {
                    log_connection_error(self.addr(), &err);
                }
                Err(err)
            }
        }
    }
}

/// Write a diagnostic message to `~/.local/state/ji/cli.log`.
fn write_cli_log(message: String) {
    use std::io::Write;
    use std::time::SystemTime;

    let log_path = env::state_dir()
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
        .join("cli.log");

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    if let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        let timestamp = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let pid = std::process::id();
        let state_dir = env::state_dir_raw().unwrap_or_else(|| "(not set)".to_string());

        let _ = writeln!(
            file,
            "[ts={}] pid={} JI_STATE_DIR={} {}",
            timestamp, pid, state_dir, message
        );
    }
}

/// Log a connection error for debugging.
///
/// Appends to `cli.log` in the state directory, for runs where stderr is
/// not visible (cron jobs, batch wrappers).
pub fn log_connection_error(addr: &ControllerAddr, error: &ClientError) {
    write_cli_log(format!("controller={} error={}", addr, error));
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
