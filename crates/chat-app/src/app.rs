//! Main egui application: owns the chat client and composes the panels.

use std::cell::RefCell;
use std::rc::Rc;

use egui::{self, CentralPanel};

use chat_core::client::ChatClient;
use chat_core::event_bus::EventBus;
use chat_core::ports::SystemStamper;
use chat_core::transport::Transport;
use chat_platform::{HttpChatAdapter, PageLifecycle, WasmSpawner, WebSocketAdapter};
use chat_types::config::{ClientConfig, TransportKind};
use chat_types::event::ChatEvent;
use chat_ui::panels::{chat, feedback};
use chat_ui::state::UiState;
use chat_ui::theme;

/// The main application state
pub struct SupportChatApp {
    ui_state: UiState,
    client: Rc<RefCell<ChatClient>>,
    first_frame: bool,
    _lifecycle: Option<PageLifecycle>,
}

impl SupportChatApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = chat_platform::load_config().unwrap_or_else(|e| {
            log::error!("Invalid configuration, using defaults: {}", e);
            ClientConfig::default()
        });

        // Socket frames and finished requests land outside egui's input
        // loop; each one schedules a frame.
        let ctx = cc.egui_ctx.clone();
        let bus = EventBus::with_waker(move || ctx.request_repaint());

        let transport = build_transport(&config);
        let mut client = ChatClient::new(
            &config,
            transport,
            bus,
            Rc::new(WasmSpawner),
            Box::new(SystemStamper),
        );
        client.start();

        let client = Rc::new(RefCell::new(client));
        let lifecycle = install_teardown(client.clone());

        Self {
            ui_state: UiState::new(),
            client,
            first_frame: true,
            _lifecycle: lifecycle,
        }
    }

    fn pump(&self) -> usize {
        match self.client.try_borrow_mut() {
            Ok(mut client) => client.pump(),
            Err(_) => 0,
        }
    }
}

fn build_transport(config: &ClientConfig) -> Transport {
    let http = Rc::new(HttpChatAdapter::new(config));
    match config.transport {
        TransportKind::HttpPolling => Transport::HttpPolling { http },
        TransportKind::Socket => Transport::Socket {
            http,
            socket: Rc::new(WebSocketAdapter::new(config.ws_url.clone())),
        },
    }
}

/// Close the session when the page goes away for good
fn install_teardown(client: Rc<RefCell<ChatClient>>) -> Option<PageLifecycle> {
    let handler = move |event: ChatEvent| {
        if let Ok(mut client) = client.try_borrow_mut() {
            if let Err(e) = client.dispatch(event) {
                log::debug!("Teardown skipped: {}", e);
            }
        }
    };
    match PageLifecycle::install(handler) {
        Ok(lifecycle) => Some(lifecycle),
        Err(e) => {
            log::warn!("Could not install pagehide handler: {}", e);
            None
        }
    }
}

impl eframe::App for SupportChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        // Apply events from the transports
        if self.pump() > 0 {
            ctx.request_repaint();
        }

        let events = {
            let client = match self.client.try_borrow() {
                Ok(c) => c,
                Err(_) => return,
            };
            let state = client.state();
            self.ui_state.sync(state);

            CentralPanel::default().show(ctx, |ui| {
                chat::chat_panel(ui, state, &mut self.ui_state);
            });
            feedback::notice_window(ctx, state, &mut self.ui_state);

            self.ui_state.take_events()
        };

        if events.is_empty() {
            return;
        }
        if let Ok(mut client) = self.client.try_borrow_mut() {
            for event in events {
                let name = event.name();
                if let Err(e) = client.dispatch(event) {
                    log::debug!("{} rejected: {}", name, e);
                }
            }
            client.pump();
        }
        ctx.request_repaint();
    }
}
