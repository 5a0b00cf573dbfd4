// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use std::path::PathBuf;
use std::time::Duration;

use crate::client::ClientError;

// --- Duration helper (private) ---

fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

// --- State directory ---

/// Resolve state directory: JI_STATE_DIR > XDG_STATE_HOME/ji > ~/.local/state/ji
pub fn state_dir() -> Result<PathBuf, ClientError> {
    if let Ok(dir) = std::env::var("JI_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("ji"));
    }
    let home = std::env::var("HOME").map_err(|_| ClientError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/ji"))
}

/// Read JI_STATE_DIR raw (for diagnostic logging)
pub fn state_dir_raw() -> Option<String> {
    std::env::var("JI_STATE_DIR").ok()
}

// --- Controller ---

pub fn controller() -> Option<String> {
    std::env::var("JI_CONTROLLER").ok().filter(|s| !s.is_empty())
}

// --- Timeouts ---

pub fn timeout_ipc_ms() -> Option<Duration> {
    parse_duration_ms("JI_TIMEOUT_IPC_MS")
}
