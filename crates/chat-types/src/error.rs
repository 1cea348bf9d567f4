use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("{0}")]
    Validation(String),

    #[error("Not connected to the chat server")]
    TransportClosed,

    #[error("Still waiting for the previous reply")]
    Busy,

    #[error("Session has ended")]
    SessionEnded,

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JS interop error: {0}")]
    JsInterop(String),
}

impl ChatError {
    /// Text shown to the user for failures surfaced in the log.
    /// Network failures are shown by their detail only.
    pub fn user_detail(&self) -> String {
        match self {
            ChatError::Network(detail) => detail.clone(),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(e: serde_json::Error) -> Self {
        ChatError::Serialization(e.to_string())
    }
}
