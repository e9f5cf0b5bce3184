//! Client for the remote analytics chat endpoint.
//!
//! The endpoint is opaque: one `POST` with `{ query, chatHistory }` returning
//! `{ answer, functionCalled?, isOffTopic?, suggestions?, dashboardData? }`.
//! No authentication, retry, or pagination.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use salesdash_core::types::{ChatRequest, ChatResponse, Message};

use crate::error::ChatError;

/// Port over the remote analytics API.
#[async_trait]
pub trait AnalyticsClient: Send + Sync {
    /// Send a query together with the prior transcript.
    async fn query(&self, query: &str, history: &[Message]) -> Result<ChatResponse, ChatError>;
}

/// `reqwest`-backed client for the configured chat endpoint.
#[derive(Clone)]
pub struct HttpAnalyticsClient {
    client: Client,
    endpoint: String,
}

impl HttpAnalyticsClient {
    /// Create a client for `endpoint` with a per-request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ChatError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChatError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AnalyticsClient for HttpAnalyticsClient {
    async fn query(&self, query: &str, history: &[Message]) -> Result<ChatResponse, ChatError> {
        let body = ChatRequest {
            query: query.to_string(),
            chat_history: history.to_vec(),
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            history_len = history.len(),
            "Sending analytics query"
        );

        let response = self.client.post(&self.endpoint).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Analytics API returned an error status");
            return Err(ChatError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        serde_json::from_str::<ChatResponse>(&text)
            .map_err(|e| ChatError::MalformedResponse(e.to_string()))
    }
}
