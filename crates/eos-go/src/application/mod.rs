//! Application layer use cases for the GO remote.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure rules, here `eos_core`) and the infrastructure (files, sockets).
//! It orchestrates domain objects to fulfil a user goal and reaches the
//! outside world only through traits, so tests can substitute in-memory
//! implementations.
//!
//! # Sub-modules
//!
//! - **`session`** – The session controller: loads the stored endpoint at
//!   start-up, applies operator edits (validate, persist, rebuild the
//!   client), and forwards GO presses to the current client.
pub mod session;
