//! Console endpoint value type and input validation.
//!
//! The operator supplies the console address and port as free-form text.
//! Both strings are checked by pure validators before anything touches the
//! disk or the network:
//!
//! ```text
//! raw IP ──► validate_address ──┐
//!                               ├──► EndpointConfig (always valid)
//! raw port ─► validate_port ────┘
//! ```
//!
//! The address is checked first, so when both inputs are bad the address
//! error is the one reported.
//!
//! IPv6 zone suffixes (`fe80::1%eth0`, `fe80::1%3`) are not accepted.  The
//! endpoint carries no interface scope, so a console on a link-local IPv6
//! address must be configured by one of its routable addresses or by IPv4.
//!
//! # Why a dedicated type? (for beginners)
//!
//! `EndpointConfig` keeps its fields private and only exposes constructors
//! that validate.  Code that receives an `EndpointConfig` therefore never has
//! to re-check it: an invalid endpoint simply cannot be represented.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::IntErrorKind;

use thiserror::Error;

/// Address used when no usable endpoint has been stored.
pub const DEFAULT_ADDRESS: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// Port used when no usable endpoint has been stored.
pub const DEFAULT_PORT: u16 = 8000;

/// The address string is not an IPv4 or IPv6 literal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid IP address {0:?}")]
    InvalidAddress(String),
}

/// The port string is not a usable UDP port.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PortError {
    /// The input is not a base-10 integer.
    #[error("port must be a valid number, got {0:?}")]
    PortNotNumeric(String),
    /// The input is an integer outside `1..=65535`.
    #[error("port must be between 1 and 65535, got {0}")]
    PortOutOfRange(String),
}

/// Any reason a raw endpoint was rejected.
///
/// This is the error returned to the caller when applying a new
/// configuration; its `Display` text is meant to be shown to the operator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid IP address {0:?}")]
    InvalidAddress(String),
    #[error("port must be a valid number, got {0:?}")]
    PortNotNumeric(String),
    #[error("port must be between 1 and 65535, got {0}")]
    PortOutOfRange(String),
}

impl From<AddressError> for ConfigError {
    fn from(e: AddressError) -> Self {
        match e {
            AddressError::InvalidAddress(raw) => ConfigError::InvalidAddress(raw),
        }
    }
}

impl From<PortError> for ConfigError {
    fn from(e: PortError) -> Self {
        match e {
            PortError::PortNotNumeric(raw) => ConfigError::PortNotNumeric(raw),
            PortError::PortOutOfRange(raw) => ConfigError::PortOutOfRange(raw),
        }
    }
}

/// Checks that `raw` is an IPv4 or IPv6 address literal.
///
/// Surrounding whitespace is ignored.  Host names and IPv6 zone suffixes
/// are rejected: the console is addressed by a plain IP literal only.
///
/// # Errors
///
/// Returns [`AddressError::InvalidAddress`] for anything that does not parse
/// as an IP address, including the empty string.
///
/// # Examples
///
/// ```rust
/// use eos_core::validate_address;
///
/// assert!(validate_address("10.0.0.5").is_ok());
/// assert!(validate_address("::1").is_ok());
/// assert!(validate_address("999.1.1.1").is_err());
/// ```
pub fn validate_address(raw: &str) -> Result<IpAddr, AddressError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<IpAddr>()
        .map_err(|_| AddressError::InvalidAddress(trimmed.to_string()))
}

/// Parses `raw` as a base-10 port number in `1..=65535`.
///
/// Surrounding whitespace and a leading sign are accepted, so `" +8000 "` is
/// port 8000 and `"-1"` is out of range rather than non-numeric.
///
/// # Errors
///
/// - [`PortError::PortNotNumeric`] if `raw` is not an integer.
/// - [`PortError::PortOutOfRange`] if it is an integer outside the port range,
///   including integers too large to fit in any machine word.
pub fn validate_port(raw: &str) -> Result<u16, PortError> {
    let trimmed = raw.trim();
    let value = match trimmed.parse::<i64>() {
        Ok(v) => v,
        Err(e) => {
            return Err(match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                    PortError::PortOutOfRange(trimmed.to_string())
                }
                _ => PortError::PortNotNumeric(trimmed.to_string()),
            })
        }
    };

    match u16::try_from(value) {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(PortError::PortOutOfRange(value.to_string())),
    }
}

/// A validated console endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EndpointConfig {
    address: IpAddr,
    port: u16,
}

impl EndpointConfig {
    /// Builds an endpoint from an already-parsed address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PortOutOfRange`] for port 0.
    pub fn new(address: IpAddr, port: u16) -> Result<Self, ConfigError> {
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port.to_string()));
        }
        Ok(Self { address, port })
    }

    /// Validates raw operator input.
    ///
    /// The address is validated before the port, so `("bad-ip", "70000")`
    /// reports [`ConfigError::InvalidAddress`].
    ///
    /// # Errors
    ///
    /// Returns the first validation failure as a [`ConfigError`].
    pub fn parse(raw_address: &str, raw_port: &str) -> Result<Self, ConfigError> {
        let address = validate_address(raw_address)?;
        let port = validate_port(raw_port)?;
        Ok(Self { address, port })
    }

    pub fn address(&self) -> IpAddr {
        self.address
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// The UDP destination for control datagrams.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

impl Default for EndpointConfig {
    /// `127.0.0.1:8000`, the fallback when nothing usable is stored.
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            port: DEFAULT_PORT,
        }
    }
}

impl fmt::Display for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // SocketAddr brackets IPv6 addresses.
        write!(f, "{}", self.socket_addr())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
