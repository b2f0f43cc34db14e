// Connection handling module
// One spawned task per accepted connection, serving HTTP/1.1 with hyper.

use crate::config::ServerState;
use crate::handler;
use crate::logger;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::sync::Arc;

/// Serve a single connection in a spawned task.
///
/// No read or write timeouts are applied; a stalled client may hold its
/// task open indefinitely, which is acceptable for a local tool.
pub fn handle_connection(stream: tokio::net::TcpStream, state: Arc<ServerState>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new().serve_connection(
            io,
            service_fn(move |req| {
                let state = Arc::clone(&state);
                async move { handler::handle_request(&req, state).await }
            }),
        );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
