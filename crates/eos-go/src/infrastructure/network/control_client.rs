//! UDP control client for one console endpoint.
//!
//! A [`ControlClient`] pairs a validated [`EndpointConfig`] with an open
//! datagram transport and the already-encoded GO packet.  Building one does
//! not put anything on the wire: UDP is connectionless, so the only thing
//! that can fail at construction is creating the local socket.
//!
//! # Fire-and-forget (for beginners)
//!
//! The console never acknowledges OSC messages.  `send_go_command` hands one
//! datagram to the kernel and returns; there is no retry and no waiting.  The
//! socket is put in non-blocking mode, so a full send buffer surfaces as a
//! [`SendError`] instead of stalling the caller.
//!
//! # Testability
//!
//! The socket sits behind the [`DatagramTransport`] trait and sockets are
//! created through a [`TransportFactory`], so tests can swap in the
//! recording transport from [`super::mock`].

use std::fmt;
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};

use eos_core::{encode_go_command, EndpointConfig, ProtocolError, GO_KEY_PATH};
use thiserror::Error;
use tracing::debug;

/// Error type for building a [`ControlClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The local UDP socket could not be created.
    #[error("failed to open UDP socket for {endpoint}: {source}")]
    Bind {
        endpoint: EndpointConfig,
        #[source]
        source: io::Error,
    },

    /// The GO packet could not be encoded.
    #[error(transparent)]
    Encode(#[from] ProtocolError),
}

/// Error type for sending the GO command.
#[derive(Debug, Error)]
pub enum SendError {
    /// The datagram could not be handed to the network stack.
    #[error("failed to send GO to {target}: {source}")]
    SendFailed {
        target: SocketAddr,
        #[source]
        source: io::Error,
    },
}

/// Something that can push one datagram towards a destination.
#[cfg_attr(test, mockall::automock)]
pub trait DatagramTransport: Send + Sync {
    /// Sends `datagram` to `target`, returning the number of bytes written.
    fn send_to(&self, datagram: &[u8], target: SocketAddr) -> io::Result<usize>;
}

/// Opens a transport suitable for reaching `endpoint`.
pub trait TransportFactory: Send + Sync {
    fn open(&self, endpoint: &EndpointConfig) -> io::Result<Box<dyn DatagramTransport>>;
}

/// Non-blocking UDP socket on an ephemeral local port.
#[derive(Debug)]
pub struct UdpTransport {
    socket: UdpSocket,
}

impl UdpTransport {
    /// Binds a socket of the same address family as `target`.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the socket cannot be bound or switched to
    /// non-blocking mode.
    pub fn bind_for(target: SocketAddr) -> io::Result<Self> {
        let local: SocketAddr = match target {
            SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
            SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
        };
        let socket = UdpSocket::bind(local)?;
        socket.set_nonblocking(true)?;
        Ok(Self { socket })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}

impl DatagramTransport for UdpTransport {
    fn send_to(&self, datagram: &[u8], target: SocketAddr) -> io::Result<usize> {
        self.socket.send_to(datagram, target)
    }
}

/// Production [`TransportFactory`]: one [`UdpTransport`] per client.
#[derive(Debug, Default, Clone, Copy)]
pub struct UdpTransportFactory;

impl TransportFactory for UdpTransportFactory {
    fn open(&self, endpoint: &EndpointConfig) -> io::Result<Box<dyn DatagramTransport>> {
        Ok(Box::new(UdpTransport::bind_for(endpoint.socket_addr())?))
    }
}

/// A ready-to-use sender bound to one console endpoint.
pub struct ControlClient {
    endpoint: EndpointConfig,
    datagram: Vec<u8>,
    transport: Box<dyn DatagramTransport>,
}

impl ControlClient {
    /// Opens a transport through `factory` and prepares the GO datagram.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Bind`] if the factory cannot open a socket.
    pub fn construct(
        endpoint: EndpointConfig,
        factory: &dyn TransportFactory,
    ) -> Result<Self, ClientError> {
        let transport = factory
            .open(&endpoint)
            .map_err(|source| ClientError::Bind { endpoint, source })?;
        Self::with_transport(endpoint, transport)
    }

    /// Wraps an already-open transport.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Encode`] if the GO packet cannot be encoded.
    pub fn with_transport(
        endpoint: EndpointConfig,
        transport: Box<dyn DatagramTransport>,
    ) -> Result<Self, ClientError> {
        let datagram = encode_go_command()?;
        debug!("control client ready for {endpoint}");
        Ok(Self {
            endpoint,
            datagram,
            transport,
        })
    }

    pub fn endpoint(&self) -> EndpointConfig {
        self.endpoint
    }

    /// Sends one GO datagram to the endpoint.  Does not wait for a reply.
    ///
    /// # Errors
    ///
    /// Returns [`SendError::SendFailed`] if the transport reports an error
    /// or accepts fewer bytes than the datagram holds.
    pub fn send_go_command(&self) -> Result<(), SendError> {
        let target = self.endpoint.socket_addr();
        let written = self
            .transport
            .send_to(&self.datagram, target)
            .map_err(|source| SendError::SendFailed { target, source })?;

        if written != self.datagram.len() {
            return Err(SendError::SendFailed {
                target,
                source: io::Error::new(
                    io::ErrorKind::WriteZero,
                    format!("wrote {written} of {} bytes", self.datagram.len()),
                ),
            });
        }

        debug!("sent {GO_KEY_PATH} to {target}");
        Ok(())
    }
}

impl fmt::Debug for ControlClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlClient")
            .field("endpoint", &self.endpoint)
            .field("datagram_len", &self.datagram.len())
            .finish()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
