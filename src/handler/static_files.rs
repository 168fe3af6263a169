//! Static file serving module
//!
//! Resolves request paths against the serving root and builds the file,
//! listing, redirect or not-found response. Resolution mirrors classic
//! static-server semantics: percent-decoded paths, trailing-slash redirects
//! for directories, index file lookup, and a generated listing otherwise.

use crate::handler::RequestContext;
use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Index files probed when a directory is requested, in preference order.
const INDEX_FILES: &[&str] = &["index.html", "index.htm"];

/// Outcome of mapping a request path onto the filesystem
#[derive(Debug)]
pub enum Resolution {
    /// An existing regular file to stream back
    File(PathBuf),
    /// An existing directory without an index file; generate a listing
    Listing(PathBuf),
    /// Directory requested without a trailing slash; redirect to this target
    Redirect(String),
    NotFound,
}

/// Serve a GET/HEAD request from `root`
pub async fn serve(ctx: &RequestContext<'_>, root: &Path) -> Response<Full<Bytes>> {
    match resolve(root, ctx.path).await {
        Resolution::File(path) => match fs::read(&path).await {
            Ok(content) => {
                let content_type =
                    mime::get_content_type(path.extension().and_then(|e| e.to_str()));
                http::build_file_response(content, content_type, ctx.is_head)
            }
            Err(e) => {
                logger::log_error(&format!("Failed to read file '{}': {e}", path.display()));
                http::build_404_response()
            }
        },
        Resolution::Listing(dir) => match render_listing(&dir, &percent_decode(ctx.path)).await {
            Ok(html) => http::build_html_response(html, ctx.is_head),
            Err(e) => {
                logger::log_error(&format!("Failed to list directory '{}': {e}", dir.display()));
                http::build_404_response()
            }
        },
        Resolution::Redirect(target) => http::build_redirect_response(&target),
        Resolution::NotFound => http::build_404_response(),
    }
}

/// Map a raw request path onto the filesystem under `root`.
///
/// `root` must already be canonicalized; resolved paths are canonicalized and
/// checked against it so encoded traversal sequences cannot escape the root.
pub async fn resolve(root: &Path, request_path: &str) -> Resolution {
    let decoded = percent_decode(request_path);
    let relative = decoded.trim_start_matches('/');
    let joined = root.join(relative);

    // Missing files fall out here; canonicalize fails on non-existent paths
    let Ok(canonical) = fs::canonicalize(&joined).await else {
        return Resolution::NotFound;
    };
    if !canonical.starts_with(root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            request_path,
            canonical.display()
        ));
        return Resolution::NotFound;
    }

    let Ok(metadata) = fs::metadata(&canonical).await else {
        return Resolution::NotFound;
    };
    if metadata.is_dir() {
        if !decoded.ends_with('/') {
            return Resolution::Redirect(format!("{request_path}/"));
        }
        for index in INDEX_FILES {
            let candidate = canonical.join(index);
            if fs::metadata(&candidate).await.is_ok_and(|m| m.is_file()) {
                return Resolution::File(candidate);
            }
        }
        return Resolution::Listing(canonical);
    }

    Resolution::File(canonical)
}

/// Generate an HTML listing for a directory without an index file
pub async fn render_listing(dir: &Path, display_path: &str) -> std::io::Result<String> {
    let mut entries = Vec::new();
    let mut read_dir = fs::read_dir(dir).await?;
    while let Some(entry) = read_dir.next_entry().await? {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await?.is_dir() {
            name.push('/');
        }
        entries.push(name);
    }
    entries.sort();

    let title = format!("Directory listing for {}", html_escape(display_path));
    let mut html = String::new();
    let _ = writeln!(html, "<!DOCTYPE HTML>");
    let _ = writeln!(html, "<html>");
    let _ = writeln!(html, "<head><meta charset=\"utf-8\"><title>{title}</title></head>");
    let _ = writeln!(html, "<body>");
    let _ = writeln!(html, "<h1>{title}</h1>");
    let _ = writeln!(html, "<hr>");
    let _ = writeln!(html, "<ul>");
    for name in &entries {
        let _ = writeln!(
            html,
            "<li><a href=\"{}\">{}</a></li>",
            percent_encode(name),
            html_escape(name)
        );
    }
    let _ = writeln!(html, "</ul>");
    let _ = writeln!(html, "<hr>");
    let _ = writeln!(html, "</body>");
    let _ = writeln!(html, "</html>");
    Ok(html)
}

/// Decode %XX escapes in a request path.
///
/// Malformed escapes pass through literally; invalid UTF-8 is replaced.
pub fn percent_decode(path: &str) -> String {
    let bytes = path.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hi = hex_value(bytes[i + 1]);
            let lo = hex_value(bytes[i + 2]);
            if let (Some(hi), Some(lo)) = (hi, lo) {
                out.push(hi * 16 + lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Percent-encode a listing entry name for use in an href
fn percent_encode(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for &b in name.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                out.push(b as char);
            }
            _ => {
                let _ = write!(out, "%{b:02X}");
            }
        }
    }
    out
}

/// Escape a name for inclusion in listing HTML
fn html_escape(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
