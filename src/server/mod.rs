//! Server module
//!
//! TCP listener setup, the accept loop, per-connection handling, and
//! interrupt-driven shutdown.

pub mod connection;
pub mod listener;
pub mod shutdown;

use crate::config::ServerState;
use crate::logger;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// A bound static-file server instance.
///
/// Holds its own listener and state, so several independent instances can
/// coexist in one process. Dropping the server releases the port.
#[derive(Debug)]
pub struct Server {
    listener: TcpListener,
    state: Arc<ServerState>,
}

impl Server {
    /// Bind a listener on `addr`. A port that is already taken or not
    /// permitted surfaces here as an `Err`; the caller treats it as fatal.
    pub fn bind(addr: SocketAddr, state: Arc<ServerState>) -> std::io::Result<Self> {
        let listener = listener::create_listener(addr)?;
        Ok(Self { listener, state })
    }

    /// The address the listener actually bound, useful when port 0 was
    /// requested.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept and serve connections until the shutdown signal fires.
    ///
    /// The signal is observed between accepts; in-flight requests are
    /// abandoned when the process exits. Returning drops the listener and
    /// releases the bound port.
    pub async fn run(self, shutdown: Arc<shutdown::ShutdownSignal>) -> std::io::Result<()> {
        loop {
            tokio::select! {
                accept_result = self.listener.accept() => {
                    match accept_result {
                        Ok((stream, peer_addr)) => {
                            if self.state.access_log {
                                logger::log_connection_accepted(&peer_addr);
                            }
                            connection::handle_connection(stream, Arc::clone(&self.state));
                        }
                        Err(e) => {
                            logger::log_error(&format!("Failed to accept connection: {e}"));
                        }
                    }
                }

                () = shutdown.wait() => {
                    logger::log_shutdown();
                    break;
                }
            }
        }
        Ok(())
    }
}
