use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a message in the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// Client-generated message identifier, unique per session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    pub fn random() -> Self {
        MessageId(format!("msg-{}", uuid::Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity and creation time handed to every new message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub id: MessageId,
    pub at: DateTime<Utc>,
}

impl Stamp {
    pub fn now() -> Self {
        Self {
            id: MessageId::random(),
            at: Utc::now(),
        }
    }
}

/// A single entry in the conversation log. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub is_error: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub is_escalated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub escalation_ticket_id: Option<String>,
}

impl Message {
    pub fn user(stamp: Stamp, text: impl Into<String>) -> Self {
        Self::plain(stamp, Sender::User, text.into())
    }

    pub fn bot(stamp: Stamp, text: impl Into<String>) -> Self {
        Self::plain(stamp, Sender::Bot, text.into())
    }

    /// Bot-styled message describing a failure
    pub fn error(stamp: Stamp, text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::plain(stamp, Sender::Bot, text.into())
        }
    }

    fn plain(stamp: Stamp, sender: Sender, text: String) -> Self {
        Self {
            id: stamp.id,
            text,
            sender,
            timestamp: stamp.at,
            intent: None,
            is_error: false,
            is_escalated: None,
            escalation_ticket_id: None,
        }
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }

    pub fn escalated(&self) -> bool {
        self.is_escalated.unwrap_or(false)
    }
}
