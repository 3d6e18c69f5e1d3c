//! Error handling for the bookshelf HTTP layer

use serde::Deserialize;
use thiserror::Error;

/// Error body shapes a backend may answer with.
///
/// Both the flat `{"message": ".."}` form and the `{"error": {"message": ..}}`
/// envelope are accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Flat { message: String },
    Envelope { error: ErrorDetail },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Object { message: String },
    Text(String),
}

/// Pull the human readable `message` out of an error response body.
///
/// Returns `None` for bodies that are not JSON, carry no message, or carry an
/// empty one.
pub fn extract_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    let message = match parsed {
        ErrorBody::Flat { message } => message,
        ErrorBody::Envelope {
            error: ErrorDetail::Object { message },
        } => message,
        ErrorBody::Envelope {
            error: ErrorDetail::Text(message),
        } => message,
    };

    let message = message.trim();
    if message.is_empty() {
        None
    } else {
        Some(message.to_string())
    }
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

/// Failures talking to the book backend
#[derive(Error, Debug)]
pub enum ClientError {
    /// The server answered with a non-2xx status.
    #[error("server responded with {status}{}", message_suffix(.message))]
    Api { status: u16, message: Option<String> },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl ClientError {
    /// Create an API error from a status code and raw response body
    pub fn api(status: u16, body: &str) -> Self {
        Self::Api {
            status,
            message: extract_message(body),
        }
    }

    /// The message the server put in its error body, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// HTTP status for API errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
