//! Local static-file HTTP server for the soundboard web app.
//!
//! Binds a TCP listener, serves files from a configured root directory with
//! permissive CORS headers on every response, opens the default browser at
//! the local URL on startup, and shuts down cleanly on operator interrupt.

pub mod browser;
pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
