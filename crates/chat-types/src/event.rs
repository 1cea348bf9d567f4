use serde::{Deserialize, Serialize};

use crate::error::ChatError;
use crate::wire::ReplyPayload;

/// Everything that can change the chat state.
/// UI intents, socket callbacks and HTTP completions all arrive as one of these
/// and are applied one at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ChatEvent {
    /// The input box content changed
    DraftChanged { text: String },

    /// User pressed send
    UserSubmit { text: String },

    /// A reply from the backend (HTTP response or socket frame)
    BotReply(ReplyPayload),

    /// Socket handshake completed
    TransportOpened,

    /// Socket closed by either side
    TransportClosed { code: u16, reason: String },

    /// Network or protocol failure reported by a transport
    TransportError(ChatError),

    /// Backoff elapsed; try to open the socket again
    ReconnectDue { attempt: u32 },

    /// A star was clicked
    SelectRating { rating: u8 },

    /// The feedback comment changed
    EditComment { text: String },

    /// Feedback submit button pressed
    SubmitFeedback,

    /// The feedback POST finished
    FeedbackResult { outcome: Result<(), String> },

    /// The blocking prompt was acknowledged
    DismissPrompt,

    /// The widget is going away; nothing after this is applied
    Teardown,
}

impl ChatEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ChatEvent::DraftChanged { .. } => "DraftChanged",
            ChatEvent::UserSubmit { .. } => "UserSubmit",
            ChatEvent::BotReply(_) => "BotReply",
            ChatEvent::TransportOpened => "TransportOpened",
            ChatEvent::TransportClosed { .. } => "TransportClosed",
            ChatEvent::TransportError(_) => "TransportError",
            ChatEvent::ReconnectDue { .. } => "ReconnectDue",
            ChatEvent::SelectRating { .. } => "SelectRating",
            ChatEvent::EditComment { .. } => "EditComment",
            ChatEvent::SubmitFeedback => "SubmitFeedback",
            ChatEvent::FeedbackResult { .. } => "FeedbackResult",
            ChatEvent::DismissPrompt => "DismissPrompt",
            ChatEvent::Teardown => "Teardown",
        }
    }
}
