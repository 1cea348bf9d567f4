//! Feedback form shown under the latest qualifying bot reply, and the
//! blocking notice window for rejected submissions.

use egui::{self, Align2, RichText, Vec2};

use chat_core::state::ChatState;
use chat_types::event::ChatEvent;
use chat_types::feedback::{FeedbackStage, MAX_RATING, MIN_RATING};

use crate::state::UiState;
use crate::theme::*;
use crate::view;

pub fn feedback_panel(ui: &mut egui::Ui, chat: &ChatState, state: &mut UiState) {
    let stage = chat.feedback_stage();
    let prompt = match chat.feedback.prompt() {
        Some(p) if stage.is_visible() => p,
        _ => return,
    };
    let submitting = stage == FeedbackStage::Submitting;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.label(RichText::new("Rate this response:").color(TEXT_SECONDARY).small());

            ui.horizontal(|ui| {
                for (rating, filled) in (MIN_RATING..=MAX_RATING).zip(view::stars(prompt.rating)) {
                    let color = if filled { STAR_ON } else { STAR_OFF };
                    let star = egui::Button::new(RichText::new("★").color(color).size(20.0))
                        .frame(false);
                    if ui.add_enabled(!submitting, star).clicked() {
                        state.emit(ChatEvent::SelectRating { rating });
                    }
                }
            });

            if stage == FeedbackStage::RatingUnselected {
                ui.add_space(2.0);
            } else {
                let comment = egui::TextEdit::multiline(&mut state.comment_text)
                    .hint_text("Optional comments...")
                    .desired_rows(2)
                    .desired_width(f32::INFINITY);
                if ui.add_enabled(!submitting, comment).changed() {
                    let text = state.comment_text.clone();
                    state.emit(ChatEvent::EditComment { text });
                }
            }

            let label = if submitting { "Submitting..." } else { "Submit Feedback" };
            let submit = ui.add_enabled(
                !submitting && !chat.loading,
                egui::Button::new(RichText::new(label).color(TEXT_PRIMARY))
                    .fill(ACCENT)
                    .corner_radius(PANEL_ROUNDING),
            );
            if submit.clicked() {
                state.emit(ChatEvent::SubmitFeedback);
            }
        });
}

/// Modal notice that has to be acknowledged before continuing
pub fn notice_window(ctx: &egui::Context, chat: &ChatState, state: &mut UiState) {
    let Some(notice) = &chat.notice else {
        return;
    };

    egui::Window::new("Notice")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label(RichText::new(notice).color(TEXT_PRIMARY));
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                state.emit(ChatEvent::DismissPrompt);
            }
        });
}
