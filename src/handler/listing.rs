//! Directory listing module
//!
//! Generates the HTML index page for directories that have no index file,
//! with entries sorted by name and subdirectories marked by a trailing slash.

use std::path::Path;
use tokio::fs;

/// Render an HTML listing of `dir`, titled with the request path.
pub async fn render(dir: &Path, request_path: &str) -> std::io::Result<String> {
    let mut entries = Vec::new();
    let mut read_dir = fs::read_dir(dir).await?;

    while let Some(entry) = read_dir.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = entry
            .file_type()
            .await
            .map(|t| t.is_dir())
            .unwrap_or(false);
        entries.push((name, is_dir));
    }

    entries.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(render_entries(request_path, &entries))
}

fn render_entries(request_path: &str, entries: &[(String, bool)]) -> String {
    let title = format!("Directory listing for {}", html_escape(request_path));

    let mut html = String::with_capacity(512 + entries.len() * 64);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{title}</title>\n</head>\n<body>\n"));
    html.push_str(&format!("<h1>{title}</h1>\n<hr>\n<ul>\n"));

    for (name, is_dir) in entries {
        let display = if *is_dir {
            format!("{name}/")
        } else {
            name.clone()
        };
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            encode_href(&display),
            html_escape(&display)
        ));
    }

    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

/// Escape text for embedding in HTML.
fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Percent-encode a relative href, leaving unreserved characters and the
/// path separator intact.
fn encode_href(name: &str) -> String {
    let mut encoded = String::with_capacity(name.len());
    for byte in name.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                encoded.push(byte as char);
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
        assert_eq!(html_escape("plain.mp3"), "plain.mp3");
    }

    #[test]
    fn test_encode_href() {
        assert_eq!(encode_href("kick drum.mp3"), "kick%20drum.mp3");
        assert_eq!(encode_href("sounds/"), "sounds/");
        assert_eq!(encode_href("100%.wav"), "100%25.wav");
    }

    #[test]
    fn test_render_entries_sorted_markup() {
        let entries = vec![
            ("clips".to_string(), true),
            ("whistle.mp3".to_string(), false),
        ];
        let html = render_entries("/sounds/", &entries);

        assert!(html.contains("<title>Directory listing for /sounds/</title>"));
        assert!(html.contains("<a href=\"clips/\">clips/</a>"));
        assert!(html.contains("<a href=\"whistle.mp3\">whistle.mp3</a>"));
    }

    #[tokio::test]
    async fn test_render_reads_directory() {
        let dir = std::env::temp_dir().join(format!("sb-listing-test-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("sub")).unwrap();
        std::fs::write(dir.join("horn.wav"), b"RIFF").unwrap();

        let html = render(&dir, "/").await.unwrap();
        assert!(html.contains("horn.wav"));
        assert!(html.contains("sub/"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
