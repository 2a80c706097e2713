//! # eos-core
//!
//! Shared library for the EOS GO remote: endpoint validation and the OSC wire
//! format used to press the GO key on an ETC Eos family lighting console.
//!
//! This crate has no dependencies on sockets, files, or UI frameworks, so
//! everything in it is pure and can be unit-tested without a network.
//!
//! # Architecture overview (for beginners)
//!
//! The console listens for OSC (Open Sound Control) messages on a UDP port.
//! An operator types the console's IP address and port, and every press of
//! GO sends one small datagram to that endpoint.  This crate defines:
//!
//! - **`domain`** – The [`EndpointConfig`] value type and the validators that
//!   turn raw user input into one.  An `EndpointConfig` can only be built from
//!   input that passed validation.
//!
//! - **`protocol`** – How the GO command is laid out on the wire.

pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `eos_core::EndpointConfig` instead of `eos_core::domain::endpoint::EndpointConfig`.
pub use domain::endpoint::{
    validate_address, validate_port, AddressError, ConfigError, EndpointConfig, PortError,
    DEFAULT_ADDRESS, DEFAULT_PORT,
};
pub use protocol::osc::{decode_packet, encode_go_command, ProtocolError, GO_KEY_PATH};
