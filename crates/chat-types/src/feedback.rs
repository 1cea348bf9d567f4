use serde::{Deserialize, Serialize};

use crate::message::MessageId;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Rating form attached to the most recent qualifying bot reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackPrompt {
    pub target_message_id: MessageId,
    /// 0 means no star picked yet
    pub rating: u8,
    pub comment: String,
}

impl FeedbackPrompt {
    pub fn new(target_message_id: MessageId) -> Self {
        Self {
            target_message_id,
            rating: 0,
            comment: String::new(),
        }
    }

    pub fn has_rating(&self) -> bool {
        (MIN_RATING..=MAX_RATING).contains(&self.rating)
    }
}

/// Observable position in the feedback flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackStage {
    Hidden,
    RatingUnselected,
    RatingSelected,
    Submitting,
}

impl FeedbackStage {
    pub fn is_visible(&self) -> bool {
        !matches!(self, FeedbackStage::Hidden)
    }
}

pub fn is_valid_rating(n: u8) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&n)
}
