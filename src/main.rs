//! corserve - local static file server with permissive CORS headers.
//!
//! Serves the current working directory on a fixed local port, injecting a
//! wildcard CORS origin and disabling client caching on every response. Meant
//! for loading a freshly rebuilt browser/WebGL app during development.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

mod handler;
mod http;
mod logger;
mod server;

// Host and port are source-level constants; there is no CLI or config surface.
const HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
const PORT: u16 = 8000;

fn main() {
    if let Err(e) = run() {
        logger::log_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(serve())
}

async fn serve() -> Result<(), Box<dyn std::error::Error>> {
    // Canonicalized once; the traversal check in resolution relies on it
    let root = std::env::current_dir()?.canonicalize()?;

    let addr = SocketAddr::new(HOST, PORT);
    let listener = server::bind_listener(addr)?;

    let signals = Arc::new(server::signal::SignalHandler::new());
    server::signal::start_signal_handler(Arc::clone(&signals));

    logger::log_server_start(&format!("http://localhost:{PORT}"), &root);

    server::run(listener, Arc::new(root), signals).await?;
    Ok(())
}
