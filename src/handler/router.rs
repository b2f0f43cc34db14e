//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, request
//! context extraction, dispatch to the static file handler, and CORS header
//! injection on the way out.

use crate::config::ServerState;
use crate::handler::static_files;
use crate::http::{self, cors};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_modified_since: Option<String>,
}

/// Main entry point for HTTP request handling
///
/// Generic over the body type so tests can drive it with synthetic requests;
/// the server instantiates it with `hyper::body::Incoming`.
pub async fn handle_request<B>(
    req: &Request<B>,
    state: Arc<ServerState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method();
    let path = req.uri().path();
    let is_head = *method == Method::HEAD;

    let mut response = match method {
        // POST carries no special semantics here; the CORS header set
        // advertises it, so it gets plain file-serving treatment.
        &Method::GET | &Method::HEAD | &Method::POST => {
            let ctx = RequestContext {
                path,
                is_head,
                if_modified_since: req
                    .headers()
                    .get("if-modified-since")
                    .and_then(|v| v.to_str().ok())
                    .map(ToString::to_string),
            };
            static_files::serve(&ctx, &state).await
        }
        &Method::OPTIONS => http::build_options_response(),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            http::build_405_response()
        }
    };

    // Every response carries the CORS headers, regardless of status.
    cors::apply(&mut response);

    if state.access_log {
        logger::log_access(method, path, response.status().as_u16());
    }

    Ok(response)
}
