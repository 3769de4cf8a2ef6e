use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};

use crate::config::ApiConfig;
use crate::error::AppResult;

/// Builds the HTTP client shared by all calls to the tasks backend
///
/// # Features
/// - **JSON by default**: `Content-Type` and `Accept` are `application/json`
/// - **Timeouts**: whole-request and connect timeouts from [`ApiConfig`]
/// - **Compression**: gzip, deflate, brotli and zstd responses
/// - **Connection pooling**: idle connections are kept for 90s
pub fn build_http_client(config: &ApiConfig, user_agent: &str) -> AppResult<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let client = reqwest::Client::builder()
        // Timeouts
        .timeout(Duration::from_millis(config.request_timeout_ms))
        .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
        // Connection pooling
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        // Compression
        .gzip(true)
        .deflate(true)
        .brotli(true)
        .zstd(true)
        .default_headers(headers)
        .user_agent(user_agent)
        .build()?;

    Ok(client)
}

/// `task-planner/<version>`
pub fn default_user_agent() -> String {
    format!("task-planner/{}", crate::pkg_version())
}
