//! Fetching message history from the HTTP API.

use hiroba_server::infrastructure::dto::http::MessagesPageDto;

use crate::error::ClientError;

/// HTTP client for `GET /api/messages`
#[derive(Debug, Clone)]
pub struct HistoryClient {
    http: reqwest::Client,
    api_url: String,
}

impl HistoryClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
        }
    }

    pub fn messages_url(&self, offset: usize, limit: usize) -> String {
        format!(
            "{}/api/messages?offset={}&limit={}",
            self.api_url.trim_end_matches('/'),
            offset,
            limit
        )
    }

    /// Fetch one page, counted backward from the newest message.
    pub async fn fetch_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<MessagesPageDto, ClientError> {
        let url = self.messages_url(offset, limit);
        tracing::debug!("Fetching history from {}", url);

        self.http
            .get(&url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| ClientError::HistoryFetch(e.to_string()))?
            .json::<MessagesPageDto>()
            .await
            .map_err(|e| ClientError::HistoryFetch(e.to_string()))
    }
}
