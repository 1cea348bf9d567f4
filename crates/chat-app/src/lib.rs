//! Support Chat - WASM entry point.
//!
//! This crate is the composition root (DI wiring layer).
//! It picks the transport from configuration, assembles the platform
//! adapters, and hands the chat client to the egui UI.

mod app;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

const CANVAS_ID: &str = "chat_canvas";

/// WASM entry point: called from index.html
#[wasm_bindgen(start)]
pub async fn main() {
    // Initialize logging
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Support chat starting...");

    let canvas = match find_canvas(CANVAS_ID) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Cannot start: {}", e);
            return;
        }
    };

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async move {
        let started = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(app::SupportChatApp::new(cc)))),
            )
            .await;
        if let Err(e) = started {
            log::error!("Failed to start eframe: {:?}", e);
        }
    });
}

fn find_canvas(id: &str) -> Result<web_sys::HtmlCanvasElement, String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "no document".to_string())?;
    document
        .get_element_by_id(id)
        .ok_or_else(|| format!("no canvas element with id '{}'", id))?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| format!("element '{}' is not a canvas", id))
}
