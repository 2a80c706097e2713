//! Protocol module containing the OSC encoding of console commands.

pub mod osc;

pub use osc::{
    decode_packet, encode_go_command, flatten_messages, go_message, ProtocolError, GO_KEY_PATH,
};
