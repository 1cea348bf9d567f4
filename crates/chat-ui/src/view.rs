//! Display projection of the session: what each bubble and status line says.
//! Kept free of egui so it can be tested directly.

use chrono::{DateTime, Local, Utc};

use chat_core::state::ChatState;
use chat_types::message::{Message, Sender};

pub const TYPING: &str = "Bot is typing...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bubble {
    User,
    Bot,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageView {
    pub bubble: Bubble,
    pub label: &'static str,
    pub text: String,
    /// HH:MM, local time
    pub time: String,
    pub intent: Option<String>,
    pub escalation: Option<String>,
}

pub fn message_view(message: &Message) -> MessageView {
    let (bubble, label) = match (message.sender, message.is_error) {
        (Sender::User, _) => (Bubble::User, "You"),
        (Sender::Bot, true) => (Bubble::Error, "Error"),
        (Sender::Bot, false) => (Bubble::Bot, "Bot"),
    };

    let escalation = message.escalated().then(|| {
        format!(
            "Escalated! Ticket: {}",
            message.escalation_ticket_id.as_deref().unwrap_or("N/A")
        )
    });

    MessageView {
        bubble,
        label,
        text: message.text.clone(),
        time: clock(message.timestamp),
        intent: match bubble {
            Bubble::Bot => message.intent.as_ref().map(|i| format!("Intent: {}", i)),
            _ => None,
        },
        escalation,
    }
}

pub fn clock(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M").to_string()
}

/// Status line in the header
pub fn status_text(state: &ChatState) -> String {
    if state.ended {
        "Session ended".to_string()
    } else if state.loading {
        TYPING.to_string()
    } else {
        state.session.connection_state.label().to_string()
    }
}

pub fn session_label(state: &ChatState) -> String {
    match &state.session.session_id {
        Some(id) => format!("Session: {}", id),
        None => "New session".to_string(),
    }
}

/// Filled flags for the five rating stars
pub fn stars(rating: u8) -> [bool; 5] {
    let mut filled = [false; 5];
    for (i, star) in filled.iter_mut().enumerate() {
        *star = (i as u8) < rating;
    }
    filled
}
