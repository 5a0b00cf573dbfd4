// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Controller protocol for job state queries.
//!
//! Wire format: 4-byte length prefix (big-endian) + JSON payload

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod request;
mod response;
mod wire;

pub use request::Request;
pub use response::Response;
pub use wire::{
    decode, encode, read_message, read_response, write_message, write_request, ProtocolError,
    DEFAULT_TIMEOUT, MAX_MESSAGE_SIZE,
};
