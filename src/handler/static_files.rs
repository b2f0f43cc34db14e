//! Static file serving module
//!
//! Maps request paths onto the serving root, with percent-decoding, path
//! traversal rejection, index file lookup, conditional GET, and directory
//! listings for directories without an index file.

use crate::config::ServerState;
use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::{self, conditional, mime, response};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Serve the resource named by the request path.
pub async fn serve(ctx: &RequestContext<'_>, state: &ServerState) -> Response<Full<Bytes>> {
    let Some(file_path) = resolve_path(&state.root, ctx.path) else {
        return http::build_404_response();
    };

    if file_path.is_dir() {
        // Relative links in the listing only resolve with a trailing slash.
        if !ctx.path.ends_with('/') {
            return http::build_redirect_response(&format!("{}/", ctx.path));
        }

        for index_file in &state.index_files {
            let index_path = file_path.join(index_file);
            if index_path.is_file() {
                return serve_file(ctx, &index_path).await;
            }
        }

        return serve_listing(ctx, &file_path).await;
    }

    serve_file(ctx, &file_path).await
}

/// Resolve a request path to a canonical filesystem path under `root`.
///
/// Returns `None` for nonexistent resources and for any path that escapes
/// the root after symlink resolution.
fn resolve_path(root: &Path, request_path: &str) -> Option<PathBuf> {
    let decoded = percent_decode(request_path);
    if decoded.contains('\0') {
        return None;
    }

    let relative = decoded.trim_start_matches('/');
    let joined = root.join(relative);

    // Nonexistent paths fail canonicalize, which doubles as the 404 check.
    let canonical = joined.canonicalize().ok()?;
    if !canonical.starts_with(root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            request_path,
            canonical.display()
        ));
        return None;
    }

    Some(canonical)
}

/// Decode percent-escapes in a request path. Invalid escapes pass through
/// untouched; non-UTF-8 byte sequences are replaced.
fn percent_decode(path: &str) -> String {
    let src = path.as_bytes();
    let mut bytes = Vec::with_capacity(src.len());
    let mut i = 0;
    while i < src.len() {
        if src[i] == b'%' && i + 2 < src.len() {
            let hex = std::str::from_utf8(&src[i + 1..i + 3]).ok();
            if let Some(byte) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                bytes.push(byte);
                i += 3;
                continue;
            }
        }
        bytes.push(src[i]);
        i += 1;
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

async fn serve_file(ctx: &RequestContext<'_>, file_path: &Path) -> Response<Full<Bytes>> {
    let metadata = match fs::metadata(file_path).await {
        Ok(m) => m,
        Err(_) => return http::build_404_response(),
    };

    let last_modified = metadata.modified().ok().map(conditional::format_http_date);

    if let (Some(date), Ok(mtime)) = (&last_modified, metadata.modified()) {
        if conditional::check_not_modified(ctx.if_modified_since.as_deref(), mtime) {
            return response::build_304_response(date);
        }
    }

    let content = match fs::read(file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_path.display(),
                e
            ));
            return http::build_404_response();
        }
    };

    let content_type = mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));

    response::build_file_response(
        Bytes::from(content),
        content_type,
        last_modified.as_deref(),
        ctx.is_head,
    )
}

async fn serve_listing(ctx: &RequestContext<'_>, dir: &Path) -> Response<Full<Bytes>> {
    match listing::render(dir, ctx.path).await {
        Ok(html) => response::build_html_response(html, ctx.is_head),
        Err(e) => {
            logger::log_error(&format!(
                "Failed to list directory '{}': {}",
                dir.display(),
                e
            ));
            http::build_404_response()
        }
    }
}
