//! JSON bodies exchanged with the chat backend.
//!
//! The HTTP and socket endpoints answer with differently named fields.
//! Both are normalised into [`ReplyPayload`] before they reach the reducer.

use serde::{Deserialize, Serialize};

use crate::{ChatError, Result};

// ─── HTTP ────────────────────────────────────────────────────

/// `POST …/chat` request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: Option<String>,
}

/// `POST …/chat` success body
#[derive(Debug, Clone, Deserialize)]
pub struct HttpChatResponse {
    pub response_message: String,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub debug_intent: Option<String>,
    #[serde(default)]
    pub escalated: bool,
    #[serde(default)]
    pub escalation_ticket_id: Option<TicketId>,
}

/// `POST …/feedback` request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub session_id: String,
    pub rating: u8,
    pub comment: String,
}

/// Body of any non-2xx answer
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

// ─── WebSocket ───────────────────────────────────────────────

/// Frame sent over the socket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocketOutbound {
    pub text: String,
    pub session_id: Option<String>,
}

/// Frame received over the socket. Extra fields (e.g. `conversation_id`)
/// are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SocketInbound {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub requires_human_escalation: bool,
    #[serde(default)]
    pub escalation_ticket_id: Option<TicketId>,
}

/// Backends send ticket ids either as strings or as database integers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TicketId {
    Text(String),
    Number(i64),
}

impl TicketId {
    pub fn into_string(self) -> String {
        match self {
            TicketId::Text(s) => s,
            TicketId::Number(n) => n.to_string(),
        }
    }
}

// ─── Normalised reply ────────────────────────────────────────

/// A successful bot answer, independent of the transport it came over
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotReply {
    pub text: String,
    pub session_id: Option<String>,
    pub intent: Option<String>,
    pub escalated: bool,
    pub escalation_ticket_id: Option<String>,
}

impl BotReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            session_id: None,
            intent: None,
            escalated: false,
            escalation_ticket_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplyPayload {
    Reply(BotReply),
    /// The backend reported a failure inside an otherwise valid frame
    Error(String),
}

impl From<HttpChatResponse> for BotReply {
    fn from(r: HttpChatResponse) -> Self {
        Self {
            text: r.response_message,
            session_id: r.session_id,
            intent: r.debug_intent,
            escalated: r.escalated,
            escalation_ticket_id: r.escalation_ticket_id.map(TicketId::into_string),
        }
    }
}

impl SocketInbound {
    pub fn into_payload(self) -> Result<ReplyPayload> {
        if let Some(error) = self.error {
            return Ok(ReplyPayload::Error(error));
        }
        let text = self
            .response
            .ok_or_else(|| ChatError::Protocol("missing `response` field".to_string()))?;
        Ok(ReplyPayload::Reply(BotReply {
            text,
            session_id: None,
            intent: self.intent,
            escalated: self.requires_human_escalation,
            escalation_ticket_id: self.escalation_ticket_id.map(TicketId::into_string),
        }))
    }
}

/// Parse one inbound socket text frame
pub fn decode_socket_frame(raw: &str) -> Result<ReplyPayload> {
    let frame: SocketInbound = serde_json::from_str(raw)
        .map_err(|e| ChatError::Protocol(format!("invalid frame: {}", e)))?;
    frame.into_payload()
}

/// Extract the `detail` message from an error body, falling back to the status
pub fn error_detail(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorDetail>(body) {
        Ok(e) if !e.detail.is_empty() => e.detail,
        _ => format!("HTTP error! status: {}", status),
    }
}
