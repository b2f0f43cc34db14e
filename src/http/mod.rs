//! HTTP building blocks
//!
//! Response builders, MIME type detection, CORS headers, and conditional
//! request handling, decoupled from routing and filesystem logic.

pub mod conditional;
pub mod cors;
pub mod mime;
pub mod response;

pub use response::{
    build_404_response, build_405_response, build_options_response, build_redirect_response,
};
