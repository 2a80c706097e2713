//! SessionController: owns the active control client and its configuration.
//!
//! ```text
//!            start()
//!               │   load stored record, fall back to 127.0.0.1:8000
//!               ▼
//!   ┌──────► Idle ──────── send_command() ──► current client
//!   │           │
//!   │  apply_configuration(ip, port)
//!   │           ▼
//!   └────── Applying   validate → persist → build client → swap
//! ```
//!
//! # Client swap
//!
//! The active [`ControlClient`] lives behind `RwLock<Arc<_>>`.  A send takes
//! the read lock only long enough to clone the `Arc`, then sends without
//! holding any lock.  An apply builds the replacement client completely and
//! only then takes the write lock to swap the pointer, so a concurrent send
//! sees either the old client or the new one, never a half-built one.  A
//! client is never re-targeted in place.
//!
//! Failed applies leave the previous client in force.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, PoisonError, RwLock,
};

use eos_core::{ConfigError, EndpointConfig};
use thiserror::Error;
use tracing::{info, warn};

use crate::infrastructure::network::control_client::{
    ClientError, ControlClient, SendError, TransportFactory,
};
use crate::infrastructure::storage::config::{ConfigStore, RawEndpointRecord, StoreError};

/// Error type for [`SessionController::start`].
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to create control client: {0}")]
    Connect(#[from] ClientError),
}

/// Error type for [`SessionController::apply_configuration`].
#[derive(Debug, Error)]
pub enum ApplyError {
    /// The operator input failed validation; nothing was changed.
    #[error(transparent)]
    Invalid(#[from] ConfigError),
    /// The endpoint file could not be written; the client was not replaced.
    #[error("failed to save configuration: {0}")]
    Persist(#[from] StoreError),
    /// The replacement client could not be built; the old one stays active.
    #[error(transparent)]
    Connect(#[from] ClientError),
}

/// Observable controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// A client is ready and the last accepted endpoint is in effect.
    Idle,
    /// A configuration update is in progress.
    Applying,
}

/// Picks the endpoint to use at start-up from the stored record.
///
/// Blank or invalid stored values fall back to [`EndpointConfig::default`];
/// start-up never fails because of what is on disk.
pub fn startup_endpoint(record: &RawEndpointRecord) -> EndpointConfig {
    if record.is_blank() {
        let endpoint = EndpointConfig::default();
        info!("no stored endpoint, using default {endpoint}");
        return endpoint;
    }

    match record.to_endpoint() {
        Ok(endpoint) => endpoint,
        Err(e) => {
            let endpoint = EndpointConfig::default();
            warn!("stored endpoint rejected ({e}), using default {endpoint}");
            endpoint
        }
    }
}

/// Coordinates validation, persistence and the live control client.
pub struct SessionController {
    store: Box<dyn ConfigStore>,
    factory: Box<dyn TransportFactory>,
    client: RwLock<Arc<ControlClient>>,
    /// Serialises applies so there is a single writer of `client`.
    apply_lock: Mutex<()>,
    applying: AtomicBool,
}

impl SessionController {
    /// Loads the stored endpoint and builds the initial client.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Connect`] only if no local UDP socket can be
    /// created.  A missing or corrupt config file is not an error.
    pub fn start(
        store: Box<dyn ConfigStore>,
        factory: Box<dyn TransportFactory>,
    ) -> Result<Self, SessionError> {
        let endpoint = startup_endpoint(&store.load());
        let client = ControlClient::construct(endpoint, factory.as_ref())?;
        info!("session started, GO target is {endpoint}");

        Ok(Self {
            store,
            factory,
            client: RwLock::new(Arc::new(client)),
            apply_lock: Mutex::new(()),
            applying: AtomicBool::new(false),
        })
    }

    /// Validates, persists and activates a new endpoint.
    ///
    /// Both inputs are trimmed.  The address is validated before the port.
    /// Returns the endpoint now in effect.
    ///
    /// # Errors
    ///
    /// - [`ApplyError::Invalid`] if validation fails (nothing is persisted).
    /// - [`ApplyError::Persist`] if the file cannot be written.
    /// - [`ApplyError::Connect`] if the new client cannot be built.
    ///
    /// In every error case the previous client remains active.
    pub fn apply_configuration(
        &self,
        raw_ip: &str,
        raw_port: &str,
    ) -> Result<EndpointConfig, ApplyError> {
        let _writer = self.apply_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.applying.store(true, Ordering::SeqCst);
        let result = self.apply_exclusive(raw_ip.trim(), raw_port.trim());
        self.applying.store(false, Ordering::SeqCst);
        result
    }

    fn apply_exclusive(&self, ip: &str, port: &str) -> Result<EndpointConfig, ApplyError> {
        let endpoint = EndpointConfig::parse(ip, port).map_err(|e| {
            warn!("rejected configuration: {e}");
            e
        })?;

        self.store.save(&endpoint)?;
        let client = Arc::new(ControlClient::construct(endpoint, self.factory.as_ref())?);

        let previous = {
            let mut active = self.client.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *active, client)
        };
        info!("GO target changed from {} to {endpoint}", previous.endpoint());
        Ok(endpoint)
    }

    /// Sends one GO command through the current client.
    ///
    /// Returns the endpoint of the client that sent it, which may differ
    /// from [`endpoint`](Self::endpoint) if an apply completes meanwhile.
    ///
    /// # Errors
    ///
    /// Propagates [`SendError::SendFailed`]; no retry is attempted.
    pub fn send_command(&self) -> Result<EndpointConfig, SendError> {
        let client = self.current_client();
        client.send_go_command().map_err(|e| {
            warn!("{e}");
            e
        })?;
        Ok(client.endpoint())
    }

    /// The endpoint currently receiving GO commands.
    pub fn endpoint(&self) -> EndpointConfig {
        self.current_client().endpoint()
    }

    pub fn state(&self) -> SessionState {
        if self.applying.load(Ordering::SeqCst) {
            SessionState::Applying
        } else {
            SessionState::Idle
        }
    }

    fn current_client(&self) -> Arc<ControlClient> {
        Arc::clone(&self.client.read().unwrap_or_else(PoisonError::into_inner))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
