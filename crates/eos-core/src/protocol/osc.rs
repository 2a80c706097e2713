//! OSC encoding for the console GO key.
//!
//! Wire format of the GO datagram (OSC 1.0, one message, no arguments):
//! ```text
//! "/eos/key/go_0" NUL×3   -- address pattern, NUL-padded to 4 bytes
//! ","            NUL×3   -- empty type-tag string, NUL-padded to 4 bytes
//! ```
//! Total: 20 bytes.  There is no header, no length prefix and no reply; one
//! UDP datagram carries exactly one packet.
//!
//! The encoding itself is delegated to the `rosc` crate.  This module only
//! pins down *which* message is sent and maps `rosc` errors into
//! [`ProtocolError`].

use rosc::{decoder, encoder, OscMessage, OscPacket};
use thiserror::Error;

/// OSC address of the console's GO key on the main playback.
pub const GO_KEY_PATH: &str = "/eos/key/go_0";

/// Errors that can occur while encoding or decoding OSC packets.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProtocolError {
    /// `rosc` refused to encode the packet.
    #[error("failed to encode OSC packet: {0}")]
    Encode(String),

    /// The bytes are not a well-formed OSC packet.
    #[error("failed to decode OSC packet: {0}")]
    Decode(String),
}

/// Builds the GO key message: address [`GO_KEY_PATH`], no arguments.
pub fn go_message() -> OscMessage {
    OscMessage {
        addr: GO_KEY_PATH.to_string(),
        args: Vec::new(),
    }
}

/// Encodes the GO key message into a single datagram payload.
///
/// # Errors
///
/// Returns [`ProtocolError::Encode`] if `rosc` rejects the packet.  The GO
/// message is fixed and valid, so this does not happen in practice.
///
/// # Examples
///
/// ```rust
/// use eos_core::protocol::{decode_packet, encode_go_command, GO_KEY_PATH};
/// use rosc::OscPacket;
///
/// let bytes = encode_go_command().unwrap();
/// assert_eq!(bytes.len(), 20);
/// match decode_packet(&bytes).unwrap() {
///     OscPacket::Message(msg) => {
///         assert_eq!(msg.addr, GO_KEY_PATH);
///         assert!(msg.args.is_empty());
///     }
///     OscPacket::Bundle(_) => unreachable!(),
/// }
/// ```
pub fn encode_go_command() -> Result<Vec<u8>, ProtocolError> {
    encoder::encode(&OscPacket::Message(go_message()))
        .map_err(|e| ProtocolError::Encode(format!("{e:?}")))
}

/// Decodes one OSC packet from a received datagram.
///
/// # Errors
///
/// Returns [`ProtocolError::Decode`] if `bytes` is not a valid OSC packet.
pub fn decode_packet(bytes: &[u8]) -> Result<OscPacket, ProtocolError> {
    decoder::decode_udp(bytes)
        .map(|(_, packet)| packet)
        .map_err(|e| ProtocolError::Decode(format!("{e:?}")))
}

/// Returns every message contained in `packet`, descending into bundles.
pub fn flatten_messages(packet: OscPacket) -> Vec<OscMessage> {
    match packet {
        OscPacket::Message(msg) => vec![msg],
        OscPacket::Bundle(bundle) => bundle
            .content
            .into_iter()
            .flat_map(flatten_messages)
            .collect(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
