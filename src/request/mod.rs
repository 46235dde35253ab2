// Request module.
// HTTP client for the mini-program backend with token headers and timestamped payloads.

pub mod client;
pub mod helpers;
pub mod types;

pub use client::ApiClient;
pub use helpers::{TOKEN_KEY, query_pairs, request_headers, request_payload};
pub use types::{
    BackendResult, ContentType, RequestConfig, RequestMethod, RequestParam, ResultCode,
};
