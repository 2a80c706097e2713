//! Recording transport for tests.
//!
//! Lets tests observe every datagram the session would have sent, and make
//! socket creation or sending fail on demand, without any real network.

use std::io;
use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use eos_core::EndpointConfig;

use super::control_client::{DatagramTransport, TransportFactory};

/// One datagram captured by a [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentDatagram {
    pub target: SocketAddr,
    pub bytes: Vec<u8>,
}

/// A [`TransportFactory`] whose transports record instead of sending.
///
/// Clones share the same log, so a test can keep one clone and hand the
/// other to the session controller.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransportFactory {
    sent: Arc<Mutex<Vec<SentDatagram>>>,
    opened: Arc<Mutex<Vec<EndpointConfig>>>,
    fail_sends: Arc<AtomicBool>,
    fail_opens: Arc<AtomicBool>,
}

impl RecordingTransportFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every datagram sent through any transport from this factory, in order.
    pub fn sent(&self) -> Vec<SentDatagram> {
        self.sent.lock().expect("lock poisoned").clone()
    }

    /// Every endpoint a transport was opened for, in order.
    pub fn opened(&self) -> Vec<EndpointConfig> {
        self.opened.lock().expect("lock poisoned").clone()
    }

    /// Makes every subsequent send fail (including on existing transports).
    pub fn set_fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent `open` fail.
    pub fn set_fail_opens(&self, fail: bool) {
        self.fail_opens.store(fail, Ordering::SeqCst);
    }
}

impl TransportFactory for RecordingTransportFactory {
    fn open(&self, endpoint: &EndpointConfig) -> io::Result<Box<dyn DatagramTransport>> {
        if self.fail_opens.load(Ordering::SeqCst) {
            return Err(io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                "socket creation disabled by test",
            ));
        }
        self.opened.lock().expect("lock poisoned").push(*endpoint);
        Ok(Box::new(RecordingTransport {
            sent: Arc::clone(&self.sent),
            fail_sends: Arc::clone(&self.fail_sends),
        }))
    }
}

/// A [`DatagramTransport`] that appends to a shared log.
#[derive(Debug)]
pub struct RecordingTransport {
    sent: Arc<Mutex<Vec<SentDatagram>>>,
    fail_sends: Arc<AtomicBool>,
}

impl DatagramTransport for RecordingTransport {
    fn send_to(&self, datagram: &[u8], target: SocketAddr) -> io::Result<usize> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::Other, "network is unreachable"));
        }
        self.sent.lock().expect("lock poisoned").push(SentDatagram {
            target,
            bytes: datagram.to_vec(),
        });
        Ok(datagram.len())
    }
}
