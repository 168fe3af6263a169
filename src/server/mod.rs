//! Server module
//!
//! Listener construction, the accept loop and per-connection serving.

pub mod conn;
pub mod listener;
pub mod signal;

pub use listener::bind_listener;

use crate::logger;
use signal::SignalHandler;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Accept connections until a shutdown signal arrives.
///
/// Returning drops the listener, which releases the port; in-flight
/// connections finish on their own tasks.
pub async fn run(
    listener: TcpListener,
    root: Arc<PathBuf>,
    signals: Arc<SignalHandler>,
) -> std::io::Result<()> {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, _peer_addr)) => {
                        conn::handle_connection(stream, Arc::clone(&root));
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = signals.shutdown.notified() => {
                logger::log_server_stopped();
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_shutdown_before_loop_awaits_still_stops() {
        let listener = bind_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let root = Arc::new(std::env::temp_dir());
        let signals = Arc::new(SignalHandler::new());

        // Signal delivered before run() is awaiting must not be lost
        signals.shutdown.notify_one();

        let result =
            tokio::time::timeout(Duration::from_millis(500), run(listener, root, signals)).await;
        assert!(result.is_ok(), "accept loop did not observe the early shutdown");
    }
}
