//! Error Types

use thiserror::Error;

/// The one error kind surfaced by the API layer.
///
/// Input problems (blank titles, unknown ids) never reach this type; they
/// are guarded away before a request is built.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("request failed with status {status}: {}", message.as_deref().unwrap_or("no message"))]
    Http { status: u16, message: Option<String> },

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Server-supplied message, if any, for user-facing alerts.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Http { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}
