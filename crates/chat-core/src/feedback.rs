//! Feedback sub-flow.
//!
//! `Hidden → Open(rating 0) → Open(rating n) → Submitting → Hidden`.
//! Each transition returns the next flow value and leaves `self` untouched.

use chat_types::{
    ChatError, Result,
    feedback::{FeedbackPrompt, FeedbackStage, is_valid_rating},
    message::MessageId,
};

pub const RATING_REQUIRED: &str = "Please select a rating to submit feedback.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeedbackFlow {
    #[default]
    Hidden,
    Open(FeedbackPrompt),
    Submitting(FeedbackPrompt),
}

impl FeedbackFlow {
    /// Fresh prompt for a new qualifying bot reply; replaces any previous one.
    pub fn open_for(target: MessageId) -> Self {
        FeedbackFlow::Open(FeedbackPrompt::new(target))
    }

    pub fn stage(&self) -> FeedbackStage {
        match self {
            FeedbackFlow::Hidden => FeedbackStage::Hidden,
            FeedbackFlow::Open(p) if p.has_rating() => FeedbackStage::RatingSelected,
            FeedbackFlow::Open(_) => FeedbackStage::RatingUnselected,
            FeedbackFlow::Submitting(_) => FeedbackStage::Submitting,
        }
    }

    pub fn prompt(&self) -> Option<&FeedbackPrompt> {
        match self {
            FeedbackFlow::Hidden => None,
            FeedbackFlow::Open(p) | FeedbackFlow::Submitting(p) => Some(p),
        }
    }

    pub fn select_rating(&self, rating: u8) -> Result<Self> {
        let prompt = self.open_prompt()?;
        if !is_valid_rating(rating) {
            return Err(ChatError::Validation(format!(
                "Rating must be between 1 and 5, got {}",
                rating
            )));
        }
        Ok(FeedbackFlow::Open(FeedbackPrompt {
            rating,
            ..prompt.clone()
        }))
    }

    pub fn edit_comment(&self, text: &str) -> Result<Self> {
        let prompt = self.open_prompt()?;
        if !prompt.has_rating() {
            return Err(ChatError::Validation(
                "Pick a rating before adding a comment".to_string(),
            ));
        }
        Ok(FeedbackFlow::Open(FeedbackPrompt {
            comment: text.to_string(),
            ..prompt.clone()
        }))
    }

    /// Enter `Submitting`, handing back the prompt to send.
    pub fn begin_submit(&self) -> Result<(Self, FeedbackPrompt)> {
        let prompt = self.open_prompt()?;
        if !prompt.has_rating() {
            return Err(ChatError::Validation(RATING_REQUIRED.to_string()));
        }
        Ok((FeedbackFlow::Submitting(prompt.clone()), prompt.clone()))
    }

    /// Success and failure clean up the same way. A prompt opened while the
    /// request was in flight is left alone.
    pub fn finish(&self) -> Self {
        match self {
            FeedbackFlow::Submitting(_) => FeedbackFlow::Hidden,
            other => other.clone(),
        }
    }

    fn open_prompt(&self) -> Result<&FeedbackPrompt> {
        match self {
            FeedbackFlow::Open(p) => Ok(p),
            FeedbackFlow::Submitting(_) => Err(ChatError::Busy),
            FeedbackFlow::Hidden => Err(ChatError::Validation(
                "No feedback prompt is active".to_string(),
            )),
        }
    }
}
