//! Domain layer: pure value types with no I/O.
//!
//! # Sub-modules
//!
//! - **`endpoint`** – The console endpoint (`address:port`) and the
//!   validation rules that every user-supplied endpoint must pass before it
//!   is persisted or used to build a network client.

pub mod endpoint;
