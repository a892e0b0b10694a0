//! Learner-facing feedback for scored attempts and recognizer failures.

use std::fmt;

use serde::Serialize;

use crate::error::RecognitionError;
use crate::scoring::FeedbackTier;

/// A short message with an emoji, shown after each attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub emoji: &'static str,
    pub message: &'static str,
}

impl Feedback {
    pub fn for_tier(tier: FeedbackTier) -> Self {
        let (emoji, message) = match tier {
            FeedbackTier::Perfect => ("\u{1F3C6}", "Perfect! Outstanding pronunciation!"),
            FeedbackTier::Excellent => ("\u{1F389}", "Excellent! Very accurate!"),
            FeedbackTier::Good => ("\u{1F44D}", "Good! A little more practice and you've got it."),
            FeedbackTier::Fair => ("\u{1F4D6}", "Nice try. Give it another go."),
            FeedbackTier::NeedsPractice => ("\u{1F4AA}", "Keep going! Try once more."),
        };
        Self { emoji, message }
    }

    /// Message for an attempt that never produced a transcript.
    pub fn for_recognition_error(error: &RecognitionError) -> Self {
        let message = if error.is_permission() {
            "Microphone access was not granted. Allow it in your browser settings."
        } else {
            "Something went wrong. Please try again."
        };
        Self {
            emoji: "\u{26A0}\u{FE0F}",
            message,
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.emoji, self.message)
    }
}

/// Coarse colour band for a score meter. Cut-offs differ from
/// [`FeedbackTier`]'s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreBand {
    /// 90 and above.
    High,
    /// 70–89.
    Medium,
    /// 50–69.
    Low,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => Self::High,
            70..=89 => Self::Medium,
            50..=69 => Self::Low,
            _ => Self::Poor,
        }
    }
}
