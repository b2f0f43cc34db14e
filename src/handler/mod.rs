//! Request handling module
//!
//! Dispatches incoming requests to static file serving.

pub mod listing;
pub mod router;
pub mod static_files;

pub use router::handle_request;
