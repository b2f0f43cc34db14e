//! Logger module
//!
//! Operator-facing status lines for the soundboard server: startup banner,
//! access log lines, warnings and errors. Plain stdout/stderr, no log files.

use std::net::SocketAddr;
use std::path::Path;

pub fn log_server_start(addr: &SocketAddr, root: &Path) {
    println!("======================================");
    println!("Soundboard server started");
    println!("Serving:  {}", root.display());
    println!("Local:    http://localhost:{}", addr.port());
    println!("Network:  http://<your-ip>:{}", addr.port());
    println!("Stop:     Ctrl+C");
    println!("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_access(method: &hyper::Method, path: &str, status: u16) {
    println!("[Request] {method} {path} - {status}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

pub fn log_bind_failed(addr: &SocketAddr, err: &std::io::Error) {
    eprintln!("[ERROR] Failed to bind {addr}: {err}");
    eprintln!("        Is another server already running on port {}?", addr.port());
}

pub fn log_browser_opening(url: &str) {
    println!("[Browser] Opening {url}");
}

pub fn log_browser_launch_failed(err: &std::io::Error) {
    eprintln!("[WARN] Could not open browser: {err}");
    eprintln!("       Navigate to the URL above manually.");
}

pub fn log_shutdown() {
    println!("\nServer stopped");
}
