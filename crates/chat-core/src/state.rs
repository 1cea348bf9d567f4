//! Session state: the single value the reducer transforms.

use chat_types::{
    config::TransportKind,
    feedback::FeedbackStage,
    message::{Message, Stamp},
    session::{ConnectionState, Session},
};

use crate::feedback::FeedbackFlow;

#[derive(Debug, Clone, PartialEq)]
pub struct ChatState {
    pub transport: TransportKind,
    pub session: Session,
    /// Append-only conversation log
    pub messages: Vec<Message>,
    /// Pending input text
    pub draft: String,
    /// Waiting for a bot reply or a feedback confirmation
    pub loading: bool,
    /// Banner text for the most recent failure
    pub last_error: Option<String>,
    pub feedback: FeedbackFlow,
    /// Blocking prompt the user has to acknowledge
    pub notice: Option<String>,
    /// Reconnects scheduled since the socket was last open
    pub reconnect_attempt: u32,
    /// Set by teardown; every later event is ignored
    pub ended: bool,
}

impl ChatState {
    pub fn new(transport: TransportKind) -> Self {
        let connection_state = match transport {
            TransportKind::HttpPolling => ConnectionState::Open,
            TransportKind::Socket => ConnectionState::Connecting,
        };
        Self {
            transport,
            session: Session::new(connection_state),
            messages: Vec::new(),
            draft: String::new(),
            loading: false,
            last_error: None,
            feedback: FeedbackFlow::Hidden,
            notice: None,
            reconnect_attempt: 0,
            ended: false,
        }
    }

    /// Start the log with a greeting from the bot
    pub fn with_welcome(mut self, stamp: Stamp, text: impl Into<String>) -> Self {
        self.messages.push(Message::bot(stamp, text));
        self
    }

    pub fn feedback_stage(&self) -> FeedbackStage {
        self.feedback.stage()
    }

    /// Whether the send control should be enabled for the stored draft
    pub fn can_send(&self) -> bool {
        self.accepts(&self.draft)
    }

    /// Whether `text` would be accepted by a submit right now
    pub fn accepts(&self, text: &str) -> bool {
        !self.ended
            && !self.loading
            && !text.trim().is_empty()
            && (self.transport == TransportKind::HttpPolling || self.session.is_open())
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}
