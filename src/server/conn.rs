// Connection handling module
// Serves a single accepted TCP connection on a spawned task.

use crate::handler;
use crate::logger;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::path::PathBuf;
use std::sync::Arc;

/// Handle a single connection in a spawned task.
///
/// Wraps the stream in `TokioIo`, drives an HTTP/1.1 connection with
/// keep-alive, and dispatches every request to the static file handler.
pub fn handle_connection(stream: tokio::net::TcpStream, root: Arc<PathBuf>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new().keep_alive(true).serve_connection(
            io,
            service_fn(move |req| {
                let root = Arc::clone(&root);
                handler::handle_request(req, root)
            }),
        );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
