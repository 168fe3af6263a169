//! HTTP protocol layer module
//!
//! Protocol-level helpers decoupled from the file-serving logic: MIME type
//! lookup, response builders and the uniform cross-origin header hook.

pub mod cors;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_404_response, build_501_response, build_file_response, build_html_response,
    build_options_response, build_redirect_response,
};
