//! End-to-end tests against a bound server instance.
//!
//! Each test spins up its own server on an ephemeral port with its own root
//! directory and talks plain HTTP/1.1 over a raw TCP stream.

use soundboard_server::config::ServerState;
use soundboard_server::server::shutdown::ShutdownSignal;
use soundboard_server::server::Server;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

struct TestServer {
    addr: SocketAddr,
    shutdown: Arc<ShutdownSignal>,
    handle: tokio::task::JoinHandle<std::io::Result<()>>,
}

impl TestServer {
    fn spawn(root: PathBuf) -> Self {
        let state = Arc::new(ServerState {
            root,
            index_files: vec!["index.html".to_string(), "index.htm".to_string()],
            access_log: false,
        });

        let server = Server::bind("127.0.0.1:0".parse().unwrap(), state).unwrap();
        let addr = server.local_addr().unwrap();
        let shutdown = Arc::new(ShutdownSignal::new());
        let handle = tokio::spawn(server.run(Arc::clone(&shutdown)));

        Self {
            addr,
            shutdown,
            handle,
        }
    }

    async fn request(&self, method: &str, path: &str, extra_headers: &[(&str, &str)]) -> Response {
        let mut stream = TcpStream::connect(self.addr).await.unwrap();

        let mut req = format!("{method} {path} HTTP/1.1\r\nHost: localhost\r\n");
        for (name, value) in extra_headers {
            req.push_str(&format!("{name}: {value}\r\n"));
        }
        req.push_str("Connection: close\r\n\r\n");

        stream.write_all(req.as_bytes()).await.unwrap();

        let mut raw = Vec::new();
        stream.read_to_end(&mut raw).await.unwrap();
        parse_response(&raw)
    }
}

struct Response {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl Response {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn assert_cors_headers(&self) {
        assert_eq!(self.header("Access-Control-Allow-Origin"), Some("*"));
        assert_eq!(
            self.header("Access-Control-Allow-Methods"),
            Some("GET, POST, OPTIONS")
        );
        assert_eq!(
            self.header("Access-Control-Allow-Headers"),
            Some("Content-Type")
        );
    }
}

fn parse_response(raw: &[u8]) -> Response {
    let split = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("no header/body separator in response");
    let head = std::str::from_utf8(&raw[..split]).expect("non-UTF-8 response head");
    let body = raw[split + 4..].to_vec();

    let mut lines = head.split("\r\n");
    let status_line = lines.next().expect("empty response");
    let status = status_line
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .expect("malformed status line");

    let headers = lines
        .filter_map(|line| {
            let (name, value) = line.split_once(':')?;
            Some((name.trim().to_string(), value.trim().to_string()))
        })
        .collect();

    Response {
        status,
        headers,
        body,
    }
}

fn make_root(test_name: &str) -> PathBuf {
    let root = std::env::temp_dir().join(format!("sb-serve-{}-{test_name}", std::process::id()));
    if root.exists() {
        std::fs::remove_dir_all(&root).unwrap();
    }
    std::fs::create_dir_all(&root).unwrap();
    root.canonicalize().unwrap()
}

#[tokio::test]
async fn get_existing_file_returns_exact_contents() {
    let root = make_root("existing");
    std::fs::write(root.join("index.html"), "<h1>Hi</h1>").unwrap();
    let server = TestServer::spawn(root);

    let resp = server.request("GET", "/index.html", &[]).await;

    assert_eq!(resp.status, 200);
    assert!(resp.header("Content-Type").unwrap().starts_with("text/html"));
    assert_eq!(resp.body, b"<h1>Hi</h1>");
    resp.assert_cors_headers();
}

#[tokio::test]
async fn get_binary_file_is_byte_identical() {
    let root = make_root("binary");
    let clip: Vec<u8> = (0..=255).collect();
    std::fs::write(root.join("horn.mp3"), &clip).unwrap();
    let server = TestServer::spawn(root);

    let resp = server.request("GET", "/horn.mp3", &[]).await;

    assert_eq!(resp.status, 200);
    assert_eq!(resp.header("Content-Type"), Some("audio/mpeg"));
    assert_eq!(resp.body, clip);
}

#[tokio::test]
async fn missing_file_returns_404_with_cors() {
    let root = make_root("missing");
    let server = TestServer::spawn(root);

    let resp = server.request("GET", "/missing.txt", &[]).await;

    assert_eq!(resp.status, 404);
    resp.assert_cors_headers();
}

#[tokio::test]
async fn root_serves_index_file() {
    let root = make_root("index");
    std::fs::write(root.join("index.html"), "<h1>Hi</h1>").unwrap();
    let server = TestServer::spawn(root);

    let resp = server.request("GET", "/", &[]).await;

    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, b"<h1>Hi</h1>");
}

#[tokio::test]
async fn directory_without_index_gets_listing() {
    let root = make_root("listing");
    std::fs::create_dir(root.join("sounds")).unwrap();
    std::fs::write(root.join("sounds").join("whistle.wav"), b"RIFF").unwrap();
    let server = TestServer::spawn(root);

    let resp = server.request("GET", "/sounds/", &[]).await;

    assert_eq!(resp.status, 200);
    assert!(resp.header("Content-Type").unwrap().starts_with("text/html"));
    let body = String::from_utf8(resp.body.clone()).unwrap();
    assert!(body.contains("whistle.wav"));
    resp.assert_cors_headers();
}

#[tokio::test]
async fn directory_without_trailing_slash_redirects() {
    let root = make_root("redirect");
    std::fs::create_dir(root.join("sounds")).unwrap();
    let server = TestServer::spawn(root);

    let resp = server.request("GET", "/sounds", &[]).await;

    assert_eq!(resp.status, 301);
    assert_eq!(resp.header("Location"), Some("/sounds/"));
    resp.assert_cors_headers();
}

#[tokio::test]
async fn head_returns_headers_without_body() {
    let root = make_root("head");
    std::fs::write(root.join("index.html"), "<h1>Hi</h1>").unwrap();
    let server = TestServer::spawn(root);

    let resp = server.request("HEAD", "/index.html", &[]).await;

    assert_eq!(resp.status, 200);
    assert_eq!(resp.header("Content-Length"), Some("11"));
    assert!(resp.body.is_empty());
}

#[tokio::test]
async fn options_preflight_returns_204_with_cors() {
    let root = make_root("options");
    let server = TestServer::spawn(root);

    let resp = server.request("OPTIONS", "/index.html", &[]).await;

    assert_eq!(resp.status, 204);
    resp.assert_cors_headers();
}

#[tokio::test]
async fn conditional_get_returns_304_with_cors() {
    let root = make_root("conditional");
    std::fs::write(root.join("index.html"), "<h1>Hi</h1>").unwrap();
    let server = TestServer::spawn(root);

    let first = server.request("GET", "/index.html", &[]).await;
    let last_modified = first.header("Last-Modified").unwrap().to_string();

    let second = server
        .request(
            "GET",
            "/index.html",
            &[("If-Modified-Since", &last_modified)],
        )
        .await;

    assert_eq!(second.status, 304);
    assert!(second.body.is_empty());
    second.assert_cors_headers();
}

#[tokio::test]
async fn path_traversal_is_rejected() {
    let root = make_root("traversal");
    std::fs::write(root.join("index.html"), "<h1>Hi</h1>").unwrap();
    let server = TestServer::spawn(root);

    let resp = server.request("GET", "/../secrets.txt", &[]).await;
    assert_eq!(resp.status, 404);

    let resp = server.request("GET", "/%2e%2e/%2e%2e/etc/passwd", &[]).await;
    assert_eq!(resp.status, 404);
}

#[tokio::test]
async fn second_bind_on_same_port_fails_without_crashing_first() {
    let root = make_root("doublebind");
    std::fs::write(root.join("index.html"), "<h1>Hi</h1>").unwrap();
    let server = TestServer::spawn(root.clone());

    let state = Arc::new(ServerState {
        root,
        index_files: vec!["index.html".to_string()],
        access_log: false,
    });
    let err = Server::bind(server.addr, state).expect_err("second bind should fail");
    assert_eq!(err.kind(), std::io::ErrorKind::AddrInUse);

    // First instance keeps serving.
    let resp = server.request("GET", "/index.html", &[]).await;
    assert_eq!(resp.status, 200);
}

#[tokio::test]
async fn shutdown_stops_accepting_and_run_returns() {
    let root = make_root("shutdown");
    let server = TestServer::spawn(root);
    let addr = server.addr;

    server.shutdown.trigger();

    let result = tokio::time::timeout(Duration::from_secs(2), server.handle)
        .await
        .expect("server did not stop after shutdown")
        .unwrap();
    assert!(result.is_ok());

    // Listener is gone; new connections are refused.
    assert!(TcpStream::connect(addr).await.is_err());
}
