//! Page lifecycle: end the session when the page is really going away.
//!
//! A `pagehide` with `persisted` set means the page went into the
//! back/forward cache and may be shown again, so the session is kept. A
//! socket the browser closes meanwhile reports `TransportClosed` and goes
//! through the normal reconnect path once the page is restored.

use wasm_bindgen::prelude::*;
use web_sys::{Event, PageTransitionEvent, Window};

use chat_types::{ChatError, Result, event::ChatEvent};

/// Event to dispatch for a `pagehide`, if any
pub fn on_page_hide(persisted: bool) -> Option<ChatEvent> {
    if persisted {
        None
    } else {
        Some(ChatEvent::Teardown)
    }
}

/// A `pagehide` listener on the window; removed again on drop
pub struct PageLifecycle {
    window: Window,
    onpagehide: Closure<dyn FnMut(Event)>,
}

impl PageLifecycle {
    pub fn install(mut handler: impl FnMut(ChatEvent) + 'static) -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| ChatError::JsInterop("no window".to_string()))?;

        let onpagehide = Closure::wrap(Box::new(move |event: Event| {
            let persisted = event
                .dyn_ref::<PageTransitionEvent>()
                .map(PageTransitionEvent::persisted)
                .unwrap_or(false);
            match on_page_hide(persisted) {
                Some(chat_event) => handler(chat_event),
                None => log::info!("Page cached; keeping the session"),
            }
        }) as Box<dyn FnMut(Event)>);

        window
            .add_event_listener_with_callback("pagehide", onpagehide.as_ref().unchecked_ref())
            .map_err(|e| ChatError::JsInterop(format!("pagehide listener: {:?}", e)))?;

        Ok(Self { window, onpagehide })
    }
}

impl Drop for PageLifecycle {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("pagehide", self.onpagehide.as_ref().unchecked_ref());
    }
}
