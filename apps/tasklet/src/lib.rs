//! # tasklet
//!
//! Library surface of the Tasklet binary: the HTTP API and the CLI.
//!
//! Exposed as a library so integration tests can build the router without
//! starting a real server.

pub mod api;
pub mod cli;
