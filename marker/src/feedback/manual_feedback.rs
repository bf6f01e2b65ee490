//! Manual feedback strategy: a teacher-written comment is returned as-is.
//!
//! A perfect tally still gets the standard praise. A blank comment falls back to
//! [`AutoFeedback`] so the student never receives an empty line.

use super::PERFECT_MESSAGE;
use super::auto_feedback::AutoFeedback;
use crate::traits::feedback::Feedback;
use crate::types::Tally;

#[derive(Debug, Clone, Default)]
pub struct ManualFeedback {
    pub message: String,
}

impl ManualFeedback {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Feedback for ManualFeedback {
    fn assemble_feedback(&self, tally: &Tally) -> String {
        if tally.is_perfect() {
            return PERFECT_MESSAGE.to_string();
        }
        let message = self.message.trim();
        if message.is_empty() {
            AutoFeedback::default().assemble_feedback(tally)
        } else {
            message.to_string()
        }
    }
}
