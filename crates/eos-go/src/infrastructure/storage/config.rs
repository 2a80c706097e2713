//! JSON-based endpoint persistence.
//!
//! The active console endpoint is stored in a small JSON file, by default
//! `data.json` in the working directory:
//!
//! ```json
//! {
//!   "IP": "10.0.0.5",
//!   "PORT": 9000
//! }
//! ```
//!
//! # Leniency on load
//!
//! Loading never fails.  A missing file, an unreadable file, bytes that are
//! not JSON, or JSON of the wrong shape all produce a blank
//! [`RawEndpointRecord`], which the session controller then replaces with
//! the built-in default endpoint.  `PORT` is accepted both as a string
//! (`"9000"`) and as a number (`9000`), since both forms exist in files
//! written by earlier releases.
//!
//! The record returned by [`ConfigStore::load`] is deliberately *unvalidated*
//! text: validation belongs to the domain layer and happens on every start.

use std::path::{Path, PathBuf};

use eos_core::{ConfigError, EndpointConfig};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// File name used when no explicit path is configured.
pub const DEFAULT_CONFIG_FILE: &str = "data.json";

/// Error type for writing the endpoint file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The record could not be serialized to JSON.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Endpoint as found on disk, before validation.
///
/// Both fields are free text; an absent or unusable value is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawEndpointRecord {
    #[serde(rename = "IP", default, deserialize_with = "lenient_string")]
    pub ip: String,
    #[serde(rename = "PORT", default, deserialize_with = "lenient_string")]
    pub port: String,
}

impl RawEndpointRecord {
    /// `true` when either field is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.ip.trim().is_empty() || self.port.trim().is_empty()
    }

    /// Validates the stored text into an [`EndpointConfig`].
    ///
    /// # Errors
    ///
    /// Returns the same [`ConfigError`] operator input would produce.
    pub fn to_endpoint(&self) -> Result<EndpointConfig, ConfigError> {
        EndpointConfig::parse(&self.ip, &self.port)
    }
}

/// On-disk shape written by [`JsonConfigStore::save`].
#[derive(Serialize)]
struct StoredEndpoint {
    #[serde(rename = "IP")]
    ip: String,
    #[serde(rename = "PORT")]
    port: u16,
}

/// Accepts a JSON string or number; anything else becomes `""`.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Persistence port for the active endpoint.
#[cfg_attr(test, mockall::automock)]
pub trait ConfigStore: Send + Sync {
    /// Reads the stored record, or a blank record if there is none.
    fn load(&self) -> RawEndpointRecord;

    /// Overwrites the stored record with `endpoint`.
    fn save(&self, endpoint: &EndpointConfig) -> Result<(), StoreError>;
}

/// [`ConfigStore`] backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonConfigStore {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_FILE)
    }
}

impl ConfigStore for JsonConfigStore {
    fn load(&self) -> RawEndpointRecord {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no endpoint file at {}", self.path.display());
                return RawEndpointRecord::default();
            }
            Err(e) => {
                warn!("cannot read endpoint file {}: {e}", self.path.display());
                return RawEndpointRecord::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(record) => record,
            Err(e) => {
                warn!("ignoring malformed endpoint file {}: {e}", self.path.display());
                RawEndpointRecord::default()
            }
        }
    }

    fn save(&self, endpoint: &EndpointConfig) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let record = StoredEndpoint {
            ip: endpoint.address().to_string(),
            port: endpoint.port(),
        };
        let mut content = serde_json::to_string_pretty(&record)?;
        content.push('\n');

        std::fs::write(&self.path, content).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!("saved endpoint {endpoint} to {}", self.path.display());
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
