//! WASM-target tests for chat-core.
//!
//! Runs EventBus, feedback flow, and reducer tests under
//! wasm32-unknown-unknown via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use chat_core::event_bus::EventBus;
use chat_core::feedback::FeedbackFlow;
use chat_core::ports::{Stamper, SystemStamper};
use chat_core::reducer::{Effect, Reducer};
use chat_core::state::ChatState;
use chat_types::config::{ReconnectPolicy, TransportKind};
use chat_types::event::ChatEvent;
use chat_types::feedback::FeedbackStage;
use chat_types::message::MessageId;
use chat_types::session::ConnectionState;
use chat_types::wire::{BotReply, ReplyPayload};
use chat_types::ChatError;

fn open_socket() -> ChatState {
    let mut state = ChatState::new(TransportKind::Socket);
    state.session.connection_state = ConnectionState::Open;
    state
}

fn greeting() -> ChatEvent {
    ChatEvent::BotReply(ReplyPayload::Reply(BotReply {
        text: "Hi!".to_string(),
        session_id: Some("s1".to_string()),
        intent: Some("greeting".to_string()),
        escalated: false,
        escalation_ticket_id: None,
    }))
}

// ─── EventBus Tests ──────────────────────────────────────

#[wasm_bindgen_test]
fn event_bus_emit_and_drain() {
    let bus = EventBus::new();
    bus.emit(ChatEvent::TransportOpened);
    bus.emit(ChatEvent::DismissPrompt);
    assert!(bus.has_pending());
    assert_eq!(bus.drain().len(), 2);
    assert!(!bus.has_pending());
}

// ─── Stamper Tests ───────────────────────────────────────

#[wasm_bindgen_test]
fn system_stamper_ids_are_unique() {
    let mut stamper = SystemStamper;
    let a = stamper.stamp();
    let b = stamper.stamp();
    assert_ne!(a.id, b.id);
}

// ─── Feedback Flow Tests ─────────────────────────────────

#[wasm_bindgen_test]
fn feedback_flow_walks_every_stage() {
    let flow = FeedbackFlow::open_for(MessageId("m1".to_string()));
    assert_eq!(flow.stage(), FeedbackStage::RatingUnselected);
    assert!(flow.begin_submit().is_err());

    let flow = flow.select_rating(5).unwrap();
    assert_eq!(flow.stage(), FeedbackStage::RatingSelected);

    let (flow, prompt) = flow.begin_submit().unwrap();
    assert_eq!(prompt.rating, 5);
    assert_eq!(flow.stage(), FeedbackStage::Submitting);
    assert_eq!(flow.finish(), FeedbackFlow::Hidden);
}

// ─── Reducer Tests ───────────────────────────────────────

#[wasm_bindgen_test]
fn reducer_hello_round_trip() {
    let reducer = Reducer::new(ReconnectPolicy::default());
    let mut stamper = SystemStamper;

    let sent = reducer
        .reduce(&open_socket(), &ChatEvent::UserSubmit { text: "Hello".to_string() }, &mut stamper)
        .unwrap();
    assert!(sent.state.loading);
    assert!(matches!(sent.effects[0], Effect::Transmit { .. }));

    let replied = reducer.reduce(&sent.state, &greeting(), &mut stamper).unwrap();
    assert_eq!(replied.state.messages.len(), 2);
    assert_eq!(replied.state.session.session_id.as_deref(), Some("s1"));
    assert_eq!(replied.state.feedback_stage(), FeedbackStage::RatingUnselected);
}

#[wasm_bindgen_test]
fn reducer_rejects_after_teardown() {
    let reducer = Reducer::new(ReconnectPolicy::default());
    let mut stamper = SystemStamper;
    let ended = reducer
        .reduce(&open_socket(), &ChatEvent::Teardown, &mut stamper)
        .unwrap();
    let err = reducer.reduce(&ended.state, &greeting(), &mut stamper).unwrap_err();
    assert_eq!(err, ChatError::SessionEnded);
}
