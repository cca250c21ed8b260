//! Cachet - single-resource HTTP/1.1 server
//!
//! Core library: request grammar, classification, responses and the
//! per-connection handler, plus the listener and simulated resource clock.

pub mod config;
pub mod http;
pub mod server;
