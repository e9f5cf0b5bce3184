//! Error types for the chat session.

use salesdash_core::error::SalesdashError;

/// Errors from the chat session and its API client.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("a query is already in progress")]
    Busy,
    #[error("network error: {0}")]
    Network(String),
    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("no suggestion at position {0}")]
    NoSuchSuggestion(usize),
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ChatError::MalformedResponse(err.to_string())
        } else {
            ChatError::Network(err.to_string())
        }
    }
}

impl From<ChatError> for SalesdashError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Network(_) | ChatError::Status { .. } | ChatError::MalformedResponse(_) => {
                SalesdashError::Api(err.to_string())
            }
            other => SalesdashError::Chat(other.to_string()),
        }
    }
}
