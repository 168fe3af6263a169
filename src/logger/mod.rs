//! Logger module
//!
//! Stdout/stderr logging for the server: lifecycle messages, a per-request
//! access line with a local timestamp, and error/warning reporting.

use chrono::Local;
use hyper::{Method, StatusCode};
use std::path::Path;

/// Write to info/access log
fn write_info(message: &str) {
    println!("{message}");
}

/// Write to error log
fn write_error(message: &str) {
    eprintln!("{message}");
}

pub fn log_server_start(url: &str, root: &Path) {
    write_info(&format!("Starting server at {url}"));
    write_info(&format!("Serving directory: {}", root.display()));
    write_info("Press Ctrl+C to stop the server");
}

pub fn log_server_stopped() {
    write_info("\nServer stopped.");
}

/// Log one access line per handled request, common-log flavored
pub fn log_access(method: &Method, path: &str, status: StatusCode, body_bytes: u64) {
    write_info(&format!(
        "[{}] \"{} {}\" {} {}",
        Local::now().format("%d/%b/%Y:%H:%M:%S %z"),
        method,
        path,
        status.as_u16(),
        body_bytes
    ));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}
