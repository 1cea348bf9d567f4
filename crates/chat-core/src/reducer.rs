//! Message reducer: `(state, event) → state'` plus the I/O to perform.
//!
//! The reducer never touches the network. It describes the work as
//! [`Effect`]s and the client runs them. A rejected event returns an error
//! and the caller keeps the previous state; [`surface_rejection`] decides
//! whether the rejection is worth showing to the user.

use chat_types::{
    ChatError, Result,
    config::{ReconnectPolicy, TransportKind},
    event::ChatEvent,
    feedback::FeedbackPrompt,
    message::Message,
    session::ConnectionState,
    wire::{BotReply, FeedbackRequest, ReplyPayload},
};

use crate::feedback::FeedbackFlow;
use crate::ports::Stamper;
use crate::state::ChatState;

/// Socket replies never carry a session id, so feedback sent in socket mode
/// is attributed to this token until the backend assigns one.
pub const SOCKET_FALLBACK_SESSION: &str = "ws_session";
pub const FEEDBACK_THANKS: &str = "Thanks for your feedback!";
pub const GOODBYE_INTENT: &str = "goodbye";
pub const NOT_CONNECTED: &str = "WebSocket is not connected. Please wait or refresh.";

/// Work requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send a user message over the configured transport
    Transmit { text: String, session_id: Option<String> },
    /// POST a feedback form
    PostFeedback(FeedbackRequest),
    OpenSocket,
    CloseSocket,
    /// Emit `ReconnectDue { attempt }` after `delay_ms`
    ScheduleReconnect { attempt: u32, delay_ms: u64 },
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub state: ChatState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn new(state: ChatState) -> Self {
        Self { state, effects: Vec::new() }
    }

    fn with(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

pub struct Reducer {
    reconnect: ReconnectPolicy,
}

impl Reducer {
    pub fn new(reconnect: ReconnectPolicy) -> Self {
        Self { reconnect }
    }

    pub fn reduce(
        &self,
        state: &ChatState,
        event: &ChatEvent,
        stamper: &mut dyn Stamper,
    ) -> Result<Transition> {
        if state.ended {
            return Err(ChatError::SessionEnded);
        }

        match event {
            ChatEvent::DraftChanged { text } => {
                let mut next = state.clone();
                next.draft = text.clone();
                Ok(Transition::new(next))
            }
            ChatEvent::UserSubmit { text } => on_user_submit(state, text, stamper),
            ChatEvent::BotReply(payload) => Ok(on_bot_reply(state, payload, stamper)),
            ChatEvent::TransportOpened => {
                let mut next = state.clone();
                next.session.connection_state = ConnectionState::Open;
                next.reconnect_attempt = 0;
                if next.last_error.as_deref() == Some(NOT_CONNECTED) {
                    next.last_error = None;
                }
                log::info!("Chat transport open");
                Ok(Transition::new(next))
            }
            ChatEvent::TransportClosed { code, reason } => {
                Ok(self.on_transport_closed(state, *code, reason))
            }
            ChatEvent::TransportError(error) => Ok(on_transport_error(state, error, stamper)),
            ChatEvent::ReconnectDue { attempt } => {
                if state.session.is_open() || state.transport != TransportKind::Socket {
                    return Ok(Transition::new(state.clone()));
                }
                log::info!("Reconnecting (attempt {})", attempt + 1);
                let mut next = state.clone();
                next.session.connection_state = ConnectionState::Connecting;
                Ok(Transition::new(next).with(Effect::OpenSocket))
            }
            ChatEvent::SelectRating { rating } => {
                let mut next = state.clone();
                next.feedback = state.feedback.select_rating(*rating)?;
                Ok(Transition::new(next))
            }
            ChatEvent::EditComment { text } => {
                let mut next = state.clone();
                next.feedback = state.feedback.edit_comment(text)?;
                Ok(Transition::new(next))
            }
            ChatEvent::SubmitFeedback => on_submit_feedback(state),
            ChatEvent::FeedbackResult { outcome } => {
                Ok(on_feedback_result(state, outcome, stamper))
            }
            ChatEvent::DismissPrompt => {
                let mut next = state.clone();
                next.notice = None;
                Ok(Transition::new(next))
            }
            ChatEvent::Teardown => {
                let mut next = state.clone();
                next.ended = true;
                next.loading = false;
                next.session.connection_state = ConnectionState::Closed;
                let t = Transition::new(next);
                Ok(match state.transport {
                    TransportKind::Socket => t.with(Effect::CloseSocket),
                    TransportKind::HttpPolling => t,
                })
            }
        }
    }

    fn on_transport_closed(&self, state: &ChatState, code: u16, reason: &str) -> Transition {
        log::info!("Chat transport closed (code {}): {}", code, reason);
        let mut next = state.clone();
        next.session.connection_state = ConnectionState::Closed;
        // No reply can arrive on a closed socket
        next.loading = false;

        match self.reconnect.delay_for(state.reconnect_attempt) {
            Some(delay_ms) if state.transport == TransportKind::Socket => {
                let attempt = state.reconnect_attempt;
                next.reconnect_attempt += 1;
                Transition::new(next).with(Effect::ScheduleReconnect { attempt, delay_ms })
            }
            _ => Transition::new(next),
        }
    }
}

fn on_user_submit(state: &ChatState, text: &str, stamper: &mut dyn Stamper) -> Result<Transition> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ChatError::Validation("Message is empty".to_string()));
    }
    if state.loading {
        return Err(ChatError::Busy);
    }
    if state.transport == TransportKind::Socket && !state.session.is_open() {
        return Err(ChatError::TransportClosed);
    }

    let mut next = state.clone();
    next.messages.push(Message::user(stamper.stamp(), text));
    next.draft.clear();
    next.loading = true;
    next.last_error = None;
    next.feedback = FeedbackFlow::Hidden;

    let session_id = next.session.session_id.clone();
    Ok(Transition::new(next).with(Effect::Transmit {
        text: text.to_string(),
        session_id,
    }))
}

fn on_bot_reply(state: &ChatState, payload: &ReplyPayload, stamper: &mut dyn Stamper) -> Transition {
    let mut next = state.clone();
    next.loading = false;

    let reply = match payload {
        ReplyPayload::Error(error) => {
            log::warn!("Backend reported an error: {}", error);
            next.last_error = Some(error.clone());
            next.messages.push(Message::error(
                stamper.stamp(),
                format!("Error: {}. Please try again.", error),
            ));
            return Transition::new(next);
        }
        ReplyPayload::Reply(reply) => reply,
    };

    if let Some(id) = &reply.session_id {
        if next.session.adopt(id) {
            log::info!("Session id assigned: {}", id);
        } else if next.session.conflicting_id.as_deref() == Some(id.as_str()) {
            log::warn!(
                "Backend sent session id {} but this session is {}; keeping the first",
                id,
                next.session.session_id.as_deref().unwrap_or_default()
            );
        }
    }

    let message = bot_message(stamper, reply);
    next.feedback = if qualifies_for_feedback(reply) {
        FeedbackFlow::open_for(message.id.clone())
    } else {
        FeedbackFlow::Hidden
    };
    next.messages.push(message);
    Transition::new(next)
}

fn bot_message(stamper: &mut dyn Stamper, reply: &BotReply) -> Message {
    Message {
        intent: reply.intent.clone(),
        is_escalated: Some(reply.escalated),
        escalation_ticket_id: reply.escalation_ticket_id.clone(),
        ..Message::bot(stamper.stamp(), reply.text.clone())
    }
}

fn qualifies_for_feedback(reply: &BotReply) -> bool {
    reply.intent.as_deref() != Some(GOODBYE_INTENT) && !reply.escalated
}

fn on_transport_error(state: &ChatState, error: &ChatError, stamper: &mut dyn Stamper) -> Transition {
    log::error!("Chat transport error: {}", error);
    let detail = error.user_detail();
    let mut next = state.clone();
    next.loading = false;
    next.last_error = Some(detail.clone());
    if state.transport == TransportKind::Socket && matches!(error, ChatError::Network(_)) {
        next.session.connection_state = ConnectionState::Errored;
    }
    next.messages.push(Message::error(
        stamper.stamp(),
        format!("Error: {}. Please try again.", detail),
    ));
    Transition::new(next)
}

fn on_submit_feedback(state: &ChatState) -> Result<Transition> {
    let (flow, prompt) = state.feedback.begin_submit()?;
    if state.loading {
        return Err(ChatError::Busy);
    }
    let session_id = feedback_session(state)?;

    let mut next = state.clone();
    next.feedback = flow;
    next.loading = true;
    Ok(Transition::new(next).with(Effect::PostFeedback(feedback_request(session_id, &prompt))))
}

fn feedback_session(state: &ChatState) -> Result<String> {
    match (&state.session.session_id, state.transport) {
        (Some(id), _) => Ok(id.clone()),
        (None, TransportKind::Socket) => Ok(SOCKET_FALLBACK_SESSION.to_string()),
        (None, TransportKind::HttpPolling) => Err(ChatError::Validation(
            "No session to attach feedback to yet".to_string(),
        )),
    }
}

fn feedback_request(session_id: String, prompt: &FeedbackPrompt) -> FeedbackRequest {
    FeedbackRequest {
        session_id,
        rating: prompt.rating,
        comment: prompt.comment.clone(),
    }
}

fn on_feedback_result(
    state: &ChatState,
    outcome: &std::result::Result<(), String>,
    stamper: &mut dyn Stamper,
) -> Transition {
    let mut next = state.clone();
    next.loading = false;
    next.feedback = state.feedback.finish();
    match outcome {
        Ok(()) => {
            log::info!("Feedback submitted");
            next.messages.push(Message::bot(stamper.stamp(), FEEDBACK_THANKS));
        }
        Err(detail) => {
            log::error!("Feedback submission failed: {}", detail);
            next.last_error = Some(format!("Feedback error: {}", detail));
            next.messages.push(Message::error(
                stamper.stamp(),
                format!("Sorry, couldn't submit feedback: {}", detail),
            ));
        }
    }
    Transition::new(next)
}

/// State to show after a rejected event, or None when the rejection is silent.
pub fn surface_rejection(state: &ChatState, event: &ChatEvent, error: &ChatError) -> Option<ChatState> {
    match (event, error) {
        (ChatEvent::SubmitFeedback, ChatError::Validation(reason)) => {
            let mut next = state.clone();
            next.notice = Some(reason.clone());
            Some(next)
        }
        (ChatEvent::UserSubmit { .. }, ChatError::TransportClosed) => {
            let mut next = state.clone();
            next.last_error = Some(NOT_CONNECTED.to_string());
            Some(next)
        }
        _ => None,
    }
}
