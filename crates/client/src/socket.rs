// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Socket transport (Unix domain or TCP).
//!
//! Every blocking read and write on a session is bounded by the transport's
//! timeout; connecting over TCP is bounded by it as well.

use std::fmt;
use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use ji_wire::{read_response, write_request, Request, Response, DEFAULT_TIMEOUT};

use crate::transport::{Transport, TransportError};

/// Where the controller listens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerAddr {
    Unix(PathBuf),
    Tcp(String),
}

/// Accepts `unix:<path>`, `tcp:<host:port>`, a bare path or a bare `host:port`.
impl FromStr for ControllerAddr {
    type Err = TransportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(path) = s.strip_prefix("unix:") {
            if path.is_empty() {
                return Err(TransportError::InvalidAddress(s.to_string()));
            }
            return Ok(ControllerAddr::Unix(PathBuf::from(path)));
        }
        if let Some(addr) = s.strip_prefix("tcp:") {
            return parse_host_port(addr).ok_or_else(|| TransportError::InvalidAddress(s.to_string()));
        }
        if s.contains('/') {
            return Ok(ControllerAddr::Unix(PathBuf::from(s)));
        }
        parse_host_port(s).ok_or_else(|| TransportError::InvalidAddress(s.to_string()))
    }
}

fn parse_host_port(s: &str) -> Option<ControllerAddr> {
    let (host, port) = s.rsplit_once(':')?;
    if host.is_empty() || port.parse::<u16>().is_err() {
        return None;
    }
    Some(ControllerAddr::Tcp(s.to_string()))
}

impl fmt::Display for ControllerAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerAddr::Unix(path) => write!(f, "unix:{}", path.display()),
            ControllerAddr::Tcp(addr) => write!(f, "tcp:{}", addr),
        }
    }
}

/// Connected controller socket
#[derive(Debug)]
pub enum SocketSession {
    Unix(UnixStream),
    Tcp(TcpStream),
}

impl Read for SocketSession {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            SocketSession::Unix(s) => s.read(buf),
            SocketSession::Tcp(s) => s.read(buf),
        }
    }
}

impl Write for SocketSession {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            SocketSession::Unix(s) => s.write(buf),
            SocketSession::Tcp(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            SocketSession::Unix(s) => s.flush(),
            SocketSession::Tcp(s) => s.flush(),
        }
    }
}

/// Blocking socket transport to the controller
#[derive(Debug, Clone)]
pub struct SocketTransport {
    addr: ControllerAddr,
    timeout: Duration,
}

impl SocketTransport {
    pub fn new(addr: ControllerAddr) -> Self {
        Self {
            addr,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn addr(&self) -> &ControllerAddr {
        &self.addr
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn connect_tcp(&self, addr: &str) -> io::Result<TcpStream> {
        let mut last_err = None;
        for sock_addr in addr.to_socket_addrs()? {
            match TcpStream::connect_timeout(&sock_addr, self.timeout) {
                Ok(stream) => return Ok(stream),
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no address for {}", addr))
        }))
    }
}

impl Transport for SocketTransport {
    type Session = SocketSession;

    fn open(&self) -> Result<SocketSession, TransportError> {
        let session = match &self.addr {
            ControllerAddr::Unix(path) => {
                let stream = UnixStream::connect(path)?;
                stream.set_read_timeout(Some(self.timeout))?;
                stream.set_write_timeout(Some(self.timeout))?;
                SocketSession::Unix(stream)
            }
            ControllerAddr::Tcp(addr) => {
                let stream = self.connect_tcp(addr)?;
                stream.set_read_timeout(Some(self.timeout))?;
                stream.set_write_timeout(Some(self.timeout))?;
                SocketSession::Tcp(stream)
            }
        };
        tracing::debug!(addr = %self.addr, "connected to controller");
        Ok(session)
    }

    fn send(&self, session: &mut SocketSession, request: &Request) -> Result<(), TransportError> {
        write_request(session, request)?;
        Ok(())
    }

    fn receive(&self, session: &mut SocketSession) -> Result<Response, TransportError> {
        Ok(read_response(session)?)
    }

    fn close(&self, session: SocketSession) -> Result<(), TransportError> {
        let result = match &session {
            SocketSession::Unix(s) => s.shutdown(Shutdown::Both),
            SocketSession::Tcp(s) => s.shutdown(Shutdown::Both),
        };
        match result {
            // Peer hung up first
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            other => Ok(other?),
        }
    }
}

#[cfg(test)]
#[path = "socket_tests.rs"]
mod tests;
