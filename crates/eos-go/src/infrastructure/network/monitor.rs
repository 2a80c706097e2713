//! Diagnostic OSC listener.
//!
//! `eos-go monitor` binds a UDP socket and logs every OSC message it
//! receives until Ctrl-C.  Running it on a laptop and pointing the remote at
//! the laptop's address is the quickest way to check a GO press leaves the
//! machine, before a real console is on the network.
//!
//! The monitor runs on the Tokio runtime: `recv_from` is awaited together
//! with the shutdown signal, so the loop exits promptly without a read
//! timeout.

use std::future::Future;
use std::io;
use std::net::SocketAddr;

use eos_core::protocol::{decode_packet, flatten_messages, ProtocolError};
use rosc::{OscMessage, OscType};
use thiserror::Error;
use tokio::net::UdpSocket;
use tracing::{info, warn};

/// Largest datagram the monitor accepts.
const MAX_DATAGRAM: usize = 65_536;

/// Error type for monitor operations.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The UDP socket could not be bound.
    #[error("failed to bind OSC monitor on {addr}: {source}")]
    BindFailed {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    /// An I/O error occurred while receiving a datagram.
    #[error("recv error: {0}")]
    Recv(#[source] io::Error),
}

/// What arrived in one datagram.
#[derive(Debug, Clone, PartialEq)]
pub enum Received {
    /// A valid OSC packet; bundles are flattened into their messages.
    Messages {
        source: SocketAddr,
        messages: Vec<OscMessage>,
    },
    /// Bytes that are not OSC.
    Malformed {
        source: SocketAddr,
        error: ProtocolError,
    },
}

/// Renders a message as `path arg, arg, ...`.
pub fn describe(msg: &OscMessage) -> String {
    if msg.args.is_empty() {
        return msg.addr.clone();
    }
    let args: Vec<String> = msg.args.iter().map(describe_arg).collect();
    format!("{} {}", msg.addr, args.join(", "))
}

fn describe_arg(arg: &OscType) -> String {
    match arg {
        OscType::Int(v) => v.to_string(),
        OscType::Float(v) => v.to_string(),
        OscType::String(v) => format!("{v:?}"),
        OscType::Bool(v) => v.to_string(),
        other => format!("{other:?}"),
    }
}

/// A bound OSC listener.
pub struct OscMonitor {
    socket: UdpSocket,
    buf: Vec<u8>,
}

impl OscMonitor {
    /// Binds the monitor socket.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::BindFailed`] if the address is unavailable.
    pub async fn bind(addr: SocketAddr) -> Result<Self, MonitorError> {
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|source| MonitorError::BindFailed { addr, source })?;
        Ok(Self {
            socket,
            buf: vec![0u8; MAX_DATAGRAM],
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Waits for the next datagram and decodes it.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Recv`] if the socket reports an error.
    pub async fn recv(&mut self) -> Result<Received, MonitorError> {
        let (len, source) = self
            .socket
            .recv_from(&mut self.buf)
            .await
            .map_err(MonitorError::Recv)?;

        Ok(match decode_packet(&self.buf[..len]) {
            Ok(packet) => Received::Messages {
                source,
                messages: flatten_messages(packet),
            },
            Err(error) => Received::Malformed { source, error },
        })
    }

    /// Logs incoming messages until `shutdown` completes.
    ///
    /// Returns the number of OSC messages seen.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Recv`] if the socket fails.
    pub async fn run<F>(mut self, shutdown: F) -> Result<u64, MonitorError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut count = 0u64;

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                received = self.recv() => match received? {
                    Received::Messages { source, messages } => {
                        for msg in &messages {
                            count += 1;
                            info!("{source}: {}", describe(msg));
                        }
                    }
                    Received::Malformed { source, error } => {
                        warn!("ignoring datagram from {source}: {error}");
                    }
                },
            }
        }

        info!("OSC monitor stopped after {count} messages");
        Ok(count)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
