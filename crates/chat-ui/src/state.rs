//! UI-level state that drives rendering.
//!
//! The chat session itself lives in `ChatState`. This only holds the widget
//! buffers egui needs `&mut` access to, plus the events produced while
//! drawing one frame.

use chat_core::state::ChatState;
use chat_types::event::ChatEvent;
use chat_types::message::MessageId;

/// State visible to UI panels
#[derive(Debug, Default)]
pub struct UiState {
    /// Input field content
    pub input_text: String,
    /// Feedback comment field content
    pub comment_text: String,
    /// Message the comment buffer belongs to
    comment_target: Option<MessageId>,
    /// Events raised by widgets this frame
    events: Vec<ChatEvent>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the session's draft and comment into the widget buffers.
    /// Called once per frame before drawing.
    pub fn sync(&mut self, chat: &ChatState) {
        if self.input_text != chat.draft {
            self.input_text = chat.draft.clone();
        }

        match chat.feedback.prompt() {
            Some(prompt) => {
                if self.comment_target.as_ref() != Some(&prompt.target_message_id)
                    || self.comment_text != prompt.comment
                {
                    self.comment_target = Some(prompt.target_message_id.clone());
                    self.comment_text = prompt.comment.clone();
                }
            }
            None => {
                self.comment_target = None;
                self.comment_text.clear();
            }
        }
    }

    pub fn emit(&mut self, event: ChatEvent) {
        self.events.push(event);
    }

    /// Hand the frame's events to the caller
    pub fn take_events(&mut self) -> Vec<ChatEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether the send button is enabled for the current input
    pub fn can_send(&self, chat: &ChatState) -> bool {
        chat.accepts(&self.input_text)
    }

    /// Submit the input field
    pub fn submit_input(&mut self) {
        let text = self.input_text.clone();
        self.emit(ChatEvent::UserSubmit { text });
    }
}
