//! Network infrastructure for the GO remote.
//!
//! # Sub-modules
//!
//! - **`control_client`** – Owns the UDP socket bound for one console
//!   endpoint and sends the pre-encoded GO datagram.  A new client is built
//!   every time the endpoint changes; clients are never re-targeted.
//!
//! - **`mock`** – A recording transport used by tests to observe exactly
//!   which datagrams would have left the machine, without touching the
//!   network.
//!
//! - **`monitor`** – A diagnostic OSC listener.  Point the remote at the
//!   monitor's address to confirm GO presses arrive before wiring up a real
//!   console.

pub mod control_client;
pub mod mock;
pub mod monitor;
