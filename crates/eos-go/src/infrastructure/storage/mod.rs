//! Storage infrastructure: endpoint persistence.
//!
//! The `config` sub-module handles:
//!
//! - Reading the JSON endpoint record from a fixed path.
//! - Writing the record back when the operator applies a new endpoint.
//! - Falling back to a blank record when the file is missing or corrupt, so
//!   a damaged file can never stop the remote from starting.

pub mod config;
