use serde::{Deserialize, Serialize};

use crate::{ChatError, Result};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_WS_URL: &str = "ws://localhost:8000/ws";
pub const DEFAULT_API_PREFIX: &str = "/api/v1";

/// Top-level client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub ws_url: String,
    /// Path prefix in front of `/chat` and `/feedback`, e.g. `/api/v1` or empty
    pub api_prefix: String,
    pub transport: TransportKind,
    pub reconnect: ReconnectPolicy,
    pub welcome_message: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            ws_url: DEFAULT_WS_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            transport: TransportKind::Socket,
            reconnect: ReconnectPolicy::default(),
            welcome_message: Some(DEFAULT_WELCOME.to_string()),
        }
    }
}

impl ClientConfig {
    pub fn chat_url(&self) -> String {
        self.endpoint("/chat")
    }

    pub fn feedback_url(&self) -> String {
        self.endpoint("/feedback")
    }

    fn endpoint(&self, path: &str) -> String {
        let base = self.api_base_url.trim_end_matches('/');
        let prefix = self.api_prefix.trim_end_matches('/');
        if prefix.is_empty() || prefix.starts_with('/') {
            format!("{}{}{}", base, prefix, path)
        } else {
            format!("{}/{}{}", base, prefix, path)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            return Err(ChatError::Config(format!(
                "api_base_url must be http(s): {}",
                self.api_base_url
            )));
        }
        if self.transport == TransportKind::Socket
            && !self.ws_url.starts_with("ws://")
            && !self.ws_url.starts_with("wss://")
        {
            return Err(ChatError::Config(format!(
                "ws_url must be ws(s): {}",
                self.ws_url
            )));
        }
        Ok(())
    }
}

/// Which path carries chat messages. Feedback always goes over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportKind {
    /// One `POST /chat` per message
    HttpPolling,
    /// Long-lived WebSocket
    Socket,
}

impl TransportKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" | "httppolling" | "http_polling" => Some(TransportKind::HttpPolling),
            "ws" | "socket" | "websocket" => Some(TransportKind::Socket),
            _ => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TransportKind::HttpPolling => "HTTP",
            TransportKind::Socket => "WebSocket",
        }
    }
}

/// Exponential backoff after the socket closes.
/// `max_attempts == 0` disables reconnecting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconnectPolicy {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 0,
            initial_delay_ms: 500,
            max_delay_ms: 30_000,
        }
    }
}

impl ReconnectPolicy {
    pub fn enabled(&self) -> bool {
        self.max_attempts > 0
    }

    /// Delay before the given attempt (0-based), or None once exhausted
    pub fn delay_for(&self, attempt: u32) -> Option<u64> {
        if attempt >= self.max_attempts {
            return None;
        }
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        Some(self.initial_delay_ms.saturating_mul(factor).min(self.max_delay_ms))
    }
}

const DEFAULT_WELCOME: &str = "Hello! How can I assist you today?";
