//! Request handling module
//!
//! Entry point for HTTP request processing: method gating, static file
//! dispatch, uniform header injection and access logging.

pub mod static_files;

use crate::http::{self, cors};
use crate::logger;
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
}

/// Main entry point for HTTP request handling.
///
/// Generic over the body type: the server never reads request bodies, and the
/// relaxed bound lets tests drive the handler with `Request<()>`.
pub async fn handle_request<B>(
    req: Request<B>,
    root: Arc<PathBuf>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let is_head = method == Method::HEAD;

    let mut response = match &method {
        &Method::GET | &Method::HEAD => {
            let ctx = RequestContext {
                path: &path,
                is_head,
            };
            static_files::serve(&ctx, &root).await
        }
        &Method::OPTIONS => http::build_options_response(),
        _ => {
            logger::log_warning(&format!("Unsupported method: {method}"));
            http::build_501_response()
        }
    };

    // Every response carries the fixed header set, whatever the outcome
    cors::apply_headers(&mut response);

    let body_bytes = response.body().size_hint().exact().unwrap_or(0);
    logger::log_access(&method, &path, response.status(), body_bytes);

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::header::{
        ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL,
    };
    use hyper::StatusCode;

    fn request(method: Method, path: &str) -> Request<()> {
        Request::builder().method(method).uri(path).body(()).unwrap()
    }

    fn fixture_root() -> (tempfile::TempDir, Arc<PathBuf>) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), b"<html>hi</html>").unwrap();
        std::fs::write(dir.path().join("game.wasm"), b"\0asm").unwrap();
        let root = Arc::new(dir.path().canonicalize().unwrap());
        (dir, root)
    }

    fn assert_fixed_headers<B>(resp: &Response<B>) {
        assert_eq!(resp.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(resp.headers()[ACCESS_CONTROL_ALLOW_METHODS], "GET");
        assert_eq!(
            resp.headers()[CACHE_CONTROL],
            "no-store, no-cache, must-revalidate"
        );
    }

    #[tokio::test]
    async fn test_get_existing_file_returns_exact_bytes() {
        let (_dir, root) = fixture_root();
        let resp = handle_request(request(Method::GET, "/game.wasm"), root)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "application/wasm");
        assert_fixed_headers(&resp);

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"\0asm");
    }

    #[tokio::test]
    async fn test_get_missing_path_is_404_with_headers() {
        let (_dir, root) = fixture_root();
        let resp = handle_request(request(Method::GET, "/missing.js"), root)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_fixed_headers(&resp);
    }

    #[tokio::test]
    async fn test_head_has_empty_body_and_content_length() {
        let (_dir, root) = fixture_root();
        let resp = handle_request(request(Method::HEAD, "/game.wasm"), root)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-length"], "4");

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_options_returns_200_empty_with_headers() {
        let (_dir, root) = fixture_root();
        let resp = handle_request(request(Method::OPTIONS, "/anything/at/all"), root)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_fixed_headers(&resp);

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_method_is_501_with_headers() {
        let (_dir, root) = fixture_root();
        let resp = handle_request(request(Method::POST, "/index.html"), root)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);
        assert_fixed_headers(&resp);
    }

    #[tokio::test]
    async fn test_root_serves_index_file() {
        let (_dir, root) = fixture_root();
        let resp = handle_request(request(Method::GET, "/"), root).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "text/html; charset=utf-8");

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"<html>hi</html>");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unreadable_file_is_404_with_headers() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, root) = fixture_root();
        let path = root.join("secret.txt");
        std::fs::write(&path, b"hidden").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o000)).unwrap();
        if std::fs::read(&path).is_ok() {
            // Privileged processes bypass file modes; no error branch to hit
            return;
        }

        let resp = handle_request(request(Method::GET, "/secret.txt"), root)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_fixed_headers(&resp);
    }

    #[tokio::test]
    async fn test_directory_redirect_keeps_headers() {
        let (_dir, root) = fixture_root();
        std::fs::create_dir(root.join("build")).unwrap();
        let resp = handle_request(request(Method::GET, "/build"), root)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()["location"], "/build/");
        assert_fixed_headers(&resp);
    }
}
