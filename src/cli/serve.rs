//! Development server for previewing the generated site.
//!
//! Static file server over the output directory. No rebuild-on-change; the
//! site is built once before the server starts.

use crate::{config::SiteConfig, log, utils::mime};
use anyhow::{Context, Result};
use percent_encoding::percent_decode_str;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

/// Set by the Ctrl-C handler; the request loop exits when it flips.
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Serve the output directory until interrupted.
pub fn serve(config: &SiteConfig) -> Result<()> {
    let addr = format!("{}:{}", config.serve.interface, config.serve.port);
    let server = Server::http(&addr)
        .map_err(|e| anyhow::anyhow!("Failed to bind {addr}: {e}"))?;
    let server = Arc::new(server);

    {
        let server = Arc::clone(&server);
        ctrlc::set_handler(move || {
            SHUTDOWN.store(true, Ordering::SeqCst);
            server.unblock();
        })
        .context("Failed to install Ctrl-C handler")?;
    }

    log!("serve"; "http://{addr}");

    for request in server.incoming_requests() {
        if SHUTDOWN.load(Ordering::SeqCst) {
            break;
        }
        if let Err(e) = handle_request(request, config) {
            log!("serve"; "request error: {e}");
        }
    }

    log!("serve"; "shutting down");
    Ok(())
}

/// Handle a single HTTP request.
fn handle_request(request: Request, config: &SiteConfig) -> Result<()> {
    match resolve_path(request.url(), &config.build.output) {
        Some(path) => respond_file(request, &path),
        None => respond_not_found(request, config),
    }
}

/// Resolve URL to filesystem path, handling index.html for directories
fn resolve_path(url: &str, serve_root: &Path) -> Option<PathBuf> {
    let clean = normalize_url(url);

    // Reject paths with suspicious patterns early
    if clean.contains("..") {
        return None;
    }

    let local = serve_root.join(&clean);

    // Canonicalize to resolve symlinks and verify path is under serve_root
    // This prevents traversal via symlinks or encoded sequences
    let canonical = local.canonicalize().ok()?;
    let root_canonical = serve_root.canonicalize().ok()?;

    if !canonical.starts_with(&root_canonical) {
        // Path escapes serve_root - reject
        return None;
    }

    if canonical.is_file() {
        return Some(canonical);
    }

    if canonical.is_dir() {
        let index = canonical.join("index.html");
        if index.is_file() {
            return Some(index);
        }
    }

    None
}

/// Normalize URL: decode, strip query string, trim slashes
fn normalize_url(url: &str) -> String {
    let decoded = percent_decode_str(url)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();

    let path = decoded.split('?').next().unwrap_or(&decoded);
    path.trim_matches('/').to_string()
}

/// Respond with a static file.
fn respond_file(request: Request, path: &Path) -> Result<()> {
    let content_type = mime::from_path(path);

    if is_head_request(&request) {
        return send_head(request, 200, content_type);
    }

    let body = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    send_body(request, 200, content_type, body)
}

/// Respond with 404 page (custom or default).
fn respond_not_found(request: Request, config: &SiteConfig) -> Result<()> {
    use crate::utils::mime::types::{HTML, PLAIN};

    let custom_404 = config.build.output.join("404.html");
    let has_custom = custom_404.is_file();

    if is_head_request(&request) {
        let mime = if has_custom { HTML } else { PLAIN };
        return send_head(request, 404, mime);
    }

    if has_custom
        && let Ok(body) = fs::read(&custom_404)
    {
        return send_body(request, 404, HTML, body);
    }

    send_body(request, 404, PLAIN, b"404 Not Found".to_vec())
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_head(request: Request, status: u16, content_type: &'static str) -> Result<()> {
    let response =
        Response::empty(StatusCode(status)).with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &'static str) -> Header {
    Header::from_bytes(key, value).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("/raster/"), "raster");
        assert_eq!(normalize_url("/a/b?x=1"), "a/b");
        assert_eq!(normalize_url("/%E5%9C%B0%E5%9B%B3"), "地図");
        assert_eq!(normalize_url("/"), "");
    }

    #[test]
    fn test_resolve_path_directory_index() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("raster")).unwrap();
        fs::write(dir.path().join("raster/index.html"), "hi").unwrap();

        let resolved = resolve_path("/raster/", dir.path()).unwrap();
        assert!(resolved.ends_with("raster/index.html"));
    }

    #[test]
    fn test_resolve_path_rejects_traversal() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), "hi").unwrap();

        assert!(resolve_path("/../etc/passwd", dir.path()).is_none());
        assert!(resolve_path("/%2e%2e/secret", dir.path()).is_none());
    }

    #[test]
    fn test_resolve_path_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(resolve_path("/nothing-here", dir.path()).is_none());
    }
}
