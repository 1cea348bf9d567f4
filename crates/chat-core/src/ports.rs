//! Port traits: the boundary between the chat core and the browser.
//!
//! These traits are defined here in `chat-core` (pure Rust).
//! Implementations live in `chat-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use chat_types::{
    Result,
    message::Stamp,
    wire::{BotReply, ChatRequest, FeedbackRequest, SocketOutbound},
};

use crate::event_bus::EventBus;

// ─── HTTP Port ───────────────────────────────────────────────

#[async_trait(?Send)]
pub trait ChatHttpPort {
    /// `POST …/chat`: one request, one reply
    async fn post_chat(&self, req: ChatRequest) -> Result<BotReply>;

    /// `POST …/feedback`: returns the backend's confirmation body
    async fn post_feedback(&self, req: FeedbackRequest) -> Result<serde_json::Value>;
}

// ─── Socket Port ─────────────────────────────────────────────

/// A long-lived socket. Lifecycle and inbound frames are reported as
/// `ChatEvent`s on the bus handed to `connect`.
pub trait SocketPort {
    /// Open (or reopen) the connection
    fn connect(&self, bus: EventBus) -> Result<()>;

    /// Queue one outbound frame; fails when the socket is not open
    fn send(&self, frame: &SocketOutbound) -> Result<()>;

    /// Close the connection and stop reporting events
    fn close(&self);
}

// ─── Runtime Ports ───────────────────────────────────────────

/// Runs detached futures on the single UI thread
pub trait Spawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);

    /// A future that resolves after `ms` milliseconds
    fn sleep(&self, ms: u64) -> LocalBoxFuture<'static, ()>;
}

/// Source of message ids and timestamps
pub trait Stamper {
    fn stamp(&mut self) -> Stamp;
}

/// Random ids, wall-clock timestamps
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemStamper;

impl Stamper for SystemStamper {
    fn stamp(&mut self) -> Stamp {
        Stamp::now()
    }
}
