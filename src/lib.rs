//! Minnow - a small concurrent HTTP/1.1 server built straight on TCP.
//!
//! Core library for the protocol layer, routing, and the accept loop.

pub mod config;
pub mod handler;
pub mod http;
pub mod server;
