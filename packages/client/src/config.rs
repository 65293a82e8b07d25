//! Client configuration.

pub const DEFAULT_URL: &str = "ws://127.0.0.1:5000/ws";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Display identity announced on join
    pub username: String,
    /// WebSocket endpoint
    pub url: String,
    /// Base URL of the HTTP API
    pub api_url: String,
    /// Messages fetched per history page
    pub page_size: usize,
}

/// Parse `--page-size`, rejecting 0 since an empty page never advances history.
pub fn parse_page_size(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("page size must be at least 1".to_string()),
        Ok(size) => Ok(size),
        Err(e) => Err(e.to_string()),
    }
}
