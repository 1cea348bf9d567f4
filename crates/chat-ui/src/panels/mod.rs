pub mod chat;
pub mod feedback;

pub use chat::chat_panel;
pub use feedback::{feedback_panel, notice_window};
