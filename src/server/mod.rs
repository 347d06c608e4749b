//! Roomgate server implementation
//!
//! Serves the token issuance endpoint over HTTP.

mod http;

pub use http::{create_router, run_http_server, AppState, TokenParams};
