//! Chat client: owns the state and drives the reducer.
//!
//! Event loop:
//! 1. Pop the next event from the bus
//! 2. Reduce it into a new state (or a rejection)
//! 3. Run the resulting effects; async ones are spawned and report back
//!    through the bus
//! 4. Repeat until the bus is empty
//!
//! After `Teardown` every event is dropped, so late HTTP responses and
//! socket callbacks are harmless.

use std::rc::Rc;

use chat_types::{
    ChatError, Result,
    config::ClientConfig,
    event::ChatEvent,
    wire::{ChatRequest, ReplyPayload, SocketOutbound},
};

use crate::event_bus::EventBus;
use crate::ports::{Spawner, Stamper};
use crate::reducer::{Effect, Reducer, surface_rejection};
use crate::state::ChatState;
use crate::transport::Transport;

pub struct ChatClient {
    state: ChatState,
    reducer: Reducer,
    transport: Transport,
    bus: EventBus,
    spawner: Rc<dyn Spawner>,
    stamper: Box<dyn Stamper>,
}

impl ChatClient {
    pub fn new(
        config: &ClientConfig,
        transport: Transport,
        bus: EventBus,
        spawner: Rc<dyn Spawner>,
        mut stamper: Box<dyn Stamper>,
    ) -> Self {
        let mut state = ChatState::new(transport.kind());
        if let Some(welcome) = &config.welcome_message {
            state = state.with_welcome(stamper.stamp(), welcome.clone());
        }

        Self {
            state,
            reducer: Reducer::new(config.reconnect.clone()),
            transport,
            bus,
            spawner,
            stamper,
        }
    }

    pub fn state(&self) -> &ChatState {
        &self.state
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Open the socket when the socket transport is in use.
    pub fn start(&mut self) {
        if self.transport.socket().is_some() {
            self.run_effect(Effect::OpenSocket);
        }
    }

    /// Apply every queued event. Returns how many were accepted.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.bus.pop() {
            match self.dispatch(event) {
                Ok(()) => applied += 1,
                Err(ChatError::SessionEnded) => {}
                Err(e) => log::debug!("Event rejected: {}", e),
            }
        }
        applied
    }

    /// Apply one event right away.
    pub fn dispatch(&mut self, event: ChatEvent) -> Result<()> {
        match self.reducer.reduce(&self.state, &event, self.stamper.as_mut()) {
            Ok(transition) => {
                self.state = transition.state;
                for effect in transition.effects {
                    self.run_effect(effect);
                }
                Ok(())
            }
            Err(e) => {
                if let Some(next) = surface_rejection(&self.state, &event, &e) {
                    self.state = next;
                }
                Err(e)
            }
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Transmit { text, session_id } => self.transmit(text, session_id),
            Effect::PostFeedback(req) => {
                let http = self.transport.http();
                let bus = self.bus.clone();
                self.spawner.spawn(Box::pin(async move {
                    let outcome = match http.post_feedback(req).await {
                        Ok(confirmation) => {
                            log::debug!("Feedback confirmation: {}", confirmation);
                            Ok(())
                        }
                        Err(e) => Err(e.user_detail()),
                    };
                    bus.emit(ChatEvent::FeedbackResult { outcome });
                }));
            }
            Effect::OpenSocket => {
                if let Some(socket) = self.transport.socket() {
                    if let Err(e) = socket.connect(self.bus.clone()) {
                        self.bus.emit(ChatEvent::TransportError(e));
                    }
                }
            }
            Effect::CloseSocket => {
                if let Some(socket) = self.transport.socket() {
                    socket.close();
                }
            }
            Effect::ScheduleReconnect { attempt, delay_ms } => {
                log::info!("Reconnect scheduled in {}ms", delay_ms);
                let sleep = self.spawner.sleep(delay_ms);
                let bus = self.bus.clone();
                self.spawner.spawn(Box::pin(async move {
                    sleep.await;
                    bus.emit(ChatEvent::ReconnectDue { attempt });
                }));
            }
        }
    }

    fn transmit(&mut self, text: String, session_id: Option<String>) {
        match &self.transport {
            Transport::HttpPolling { http } => {
                let http = http.clone();
                let bus = self.bus.clone();
                let req = ChatRequest { message: text, session_id };
                self.spawner.spawn(Box::pin(async move {
                    match http.post_chat(req).await {
                        Ok(reply) => bus.emit(ChatEvent::BotReply(ReplyPayload::Reply(reply))),
                        Err(e) => bus.emit(ChatEvent::TransportError(e)),
                    }
                }));
            }
            Transport::Socket { socket, .. } => {
                let frame = SocketOutbound { text, session_id };
                if let Err(e) = socket.send(&frame) {
                    self.bus.emit(ChatEvent::TransportError(e));
                }
            }
        }
    }
}
