//! WebSocket adapter: a long-lived connection to the chat backend.
//!
//! Lifecycle and inbound frames are turned into `ChatEvent`s and pushed on
//! the bus given to `connect`. The JS callbacks are owned by the adapter and
//! detached before the socket is dropped, so a closed or replaced socket
//! never reports into the bus again.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

use chat_core::event_bus::EventBus;
use chat_core::ports::SocketPort;
use chat_types::{
    ChatError, Result,
    event::ChatEvent,
    wire::{SocketOutbound, decode_socket_frame},
};

pub struct WebSocketAdapter {
    url: String,
    conn: RefCell<Option<Connection>>,
}

/// An open socket plus the handlers attached to it
struct Connection {
    ws: WebSocket,
    _onopen: Closure<dyn FnMut(Event)>,
    _onmessage: Closure<dyn FnMut(MessageEvent)>,
    _onclose: Closure<dyn FnMut(CloseEvent)>,
    _onerror: Closure<dyn FnMut(Event)>,
}

impl Connection {
    fn shut(self) {
        self.ws.set_onopen(None);
        self.ws.set_onmessage(None);
        self.ws.set_onclose(None);
        self.ws.set_onerror(None);
        if let Err(e) = self.ws.close() {
            log::warn!("WebSocket close failed: {:?}", e);
        }
    }
}

impl WebSocketAdapter {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            conn: RefCell::new(None),
        }
    }
}

impl SocketPort for WebSocketAdapter {
    fn connect(&self, bus: EventBus) -> Result<()> {
        if let Some(old) = self.conn.borrow_mut().take() {
            old.shut();
        }

        log::info!("Connecting to {}", self.url);
        let ws = WebSocket::new(&self.url)
            .map_err(|e| ChatError::Network(format!("Failed to open WebSocket: {:?}", e)))?;

        let open_bus = bus.clone();
        let onopen = Closure::wrap(Box::new(move |_: Event| {
            open_bus.emit(ChatEvent::TransportOpened);
        }) as Box<dyn FnMut(Event)>);

        let message_bus = bus.clone();
        let onmessage = Closure::wrap(Box::new(move |event: MessageEvent| {
            let event = match event.data().as_string() {
                Some(text) => match decode_socket_frame(&text) {
                    Ok(payload) => ChatEvent::BotReply(payload),
                    Err(e) => {
                        log::warn!("Dropping malformed frame: {}", text);
                        ChatEvent::TransportError(e)
                    }
                },
                None => ChatEvent::TransportError(ChatError::Protocol(
                    "binary frames are not supported".to_string(),
                )),
            };
            message_bus.emit(event);
        }) as Box<dyn FnMut(MessageEvent)>);

        let close_bus = bus.clone();
        let onclose = Closure::wrap(Box::new(move |event: CloseEvent| {
            close_bus.emit(ChatEvent::TransportClosed {
                code: event.code(),
                reason: event.reason(),
            });
        }) as Box<dyn FnMut(CloseEvent)>);

        let onerror = Closure::wrap(Box::new(move |_: Event| {
            bus.emit(ChatEvent::TransportError(ChatError::Network(
                "WebSocket error".to_string(),
            )));
        }) as Box<dyn FnMut(Event)>);

        ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));
        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));
        ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));

        *self.conn.borrow_mut() = Some(Connection {
            ws,
            _onopen: onopen,
            _onmessage: onmessage,
            _onclose: onclose,
            _onerror: onerror,
        });
        Ok(())
    }

    fn send(&self, frame: &SocketOutbound) -> Result<()> {
        let conn = self.conn.borrow();
        let ws = match conn.as_ref() {
            Some(c) if c.ws.ready_state() == WebSocket::OPEN => &c.ws,
            _ => return Err(ChatError::TransportClosed),
        };
        let json = serde_json::to_string(frame)?;
        ws.send_with_str(&json)
            .map_err(|e| ChatError::Network(format!("WebSocket send failed: {:?}", e)))
    }

    fn close(&self) {
        if let Some(conn) = self.conn.borrow_mut().take() {
            log::info!("Closing WebSocket");
            conn.shut();
        }
    }
}

impl Drop for WebSocketAdapter {
    fn drop(&mut self) {
        self.close();
    }
}
