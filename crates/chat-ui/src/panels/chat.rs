//! Chat panel: header, conversation log, error banner, and input field.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};

use chat_core::state::ChatState;
use chat_types::event::ChatEvent;

use crate::panels::feedback::feedback_panel;
use crate::state::UiState;
use crate::theme::*;
use crate::view::{self, Bubble, MessageView};

/// Render the chat panel. Widget interactions are queued on `state`.
pub fn chat_panel(ui: &mut egui::Ui, chat: &ChatState, state: &mut UiState) {
    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                header(ui, chat);
                ui.separator();

                if let Some(error) = &chat.last_error {
                    error_banner(ui, error);
                }

                // Messages area
                let available_height = ui.available_height() - 60.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for message in &chat.messages {
                            render_message(ui, &view::message_view(message));
                            ui.add_space(4.0);
                        }

                        if chat.loading && !chat.feedback_stage().is_visible() {
                            ui.label(RichText::new(view::TYPING).color(TEXT_SECONDARY).italics());
                        }

                        feedback_panel(ui, chat, state);
                    });

                ui.add_space(8.0);
                input_row(ui, chat, state);
            });
        });
}

fn header(ui: &mut egui::Ui, chat: &ChatState) {
    ui.horizontal(|ui| {
        ui.heading(RichText::new("Support Chat").color(TEXT_PRIMARY).strong());
        ui.label(
            RichText::new(view::session_label(chat))
                .color(TEXT_SECONDARY)
                .small(),
        );
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            let status_color = if chat.session.is_open() && !chat.ended {
                if chat.loading { WARNING } else { SUCCESS }
            } else {
                ERROR
            };
            ui.label(
                RichText::new(view::status_text(chat))
                    .color(status_color)
                    .small(),
            );
        });
    });
}

fn error_banner(ui: &mut egui::Ui, error: &str) {
    egui::Frame::default()
        .fill(ERROR_BG)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(6.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(error).color(ERROR));
        });
    ui.add_space(4.0);
}

fn input_row(ui: &mut egui::Ui, chat: &ChatState, state: &mut UiState) {
    ui.horizontal(|ui| {
        let input = egui::TextEdit::singleline(&mut state.input_text)
            .hint_text("Type your message...")
            .desired_width(ui.available_width() - 70.0)
            .font(egui::FontId::proportional(14.0));

        let response = ui.add_enabled(!chat.ended, input);
        if response.changed() {
            let text = state.input_text.clone();
            state.emit(ChatEvent::DraftChanged { text });
        }

        let send_enabled = state.can_send(chat);
        let send_btn = ui.add_enabled(
            send_enabled,
            egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                .corner_radius(PANEL_ROUNDING)
                .min_size(Vec2::new(60.0, 0.0)),
        );

        // Submit on Enter or button click
        if (response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) && send_enabled)
            || send_btn.clicked()
        {
            state.submit_input();
            response.request_focus();
        }
    });
}

fn render_message(ui: &mut egui::Ui, view: &MessageView) {
    let (label_color, bg) = match view.bubble {
        Bubble::User => (ACCENT, BG_SURFACE),
        Bubble::Bot => (SUCCESS, BG_SECONDARY),
        Bubble::Error => (ERROR, ERROR_BG),
    };
    let layout = match view.bubble {
        Bubble::User => Layout::top_down(Align::Max),
        _ => Layout::top_down(Align::Min),
    };

    ui.with_layout(layout, |ui| {
        egui::Frame::default()
            .fill(bg)
            .corner_radius(PANEL_ROUNDING)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(view.label).color(label_color).strong().small());
                    ui.label(RichText::new(&view.time).color(TEXT_SECONDARY).small());
                });
                ui.label(RichText::new(&view.text).color(TEXT_PRIMARY));
                if let Some(intent) = &view.intent {
                    ui.label(RichText::new(intent).color(TEXT_SECONDARY).small().italics());
                }
                if let Some(escalation) = &view.escalation {
                    ui.label(RichText::new(escalation).color(WARNING).small().strong());
                }
            });
    });
}
