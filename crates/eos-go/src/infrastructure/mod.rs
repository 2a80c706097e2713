//! Infrastructure layer for the GO remote.
//!
//! Contains OS-facing adapters: the UDP control client, the JSON config
//! file, the OSC monitor, and the caller-facing bridge used by the CLI.
//!
//! **Dependency rule**: only `application::session` reaches into this layer,
//! and only through the `ConfigStore` and `TransportFactory` traits.

pub mod network;
pub mod storage;
pub mod ui_bridge;
