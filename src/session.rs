//! Speaking-practice session over a lesson's vocabulary list.
//!
//! Holds the state a UI would otherwise keep inline: which word is current,
//! the last attempt and its feedback. Scoring is delegated to a [`Scorer`];
//! timing is left to the caller via [`Attempt::advance_after`].

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::RecognitionError;
use crate::feedback::Feedback;
use crate::language::{Language, detect_language};
use crate::scoring::{ComparisonInput, ScoreResult, Scorer};

/// One word or phrase to practise, as returned by the lesson API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    pub id: String,
    pub word: String,
    #[serde(default)]
    pub translated: String,
}

/// Session behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Move to the next item after a strong attempt.
    pub auto_advance: bool,
    /// Pause the caller should hold the result on screen before moving on.
    pub auto_advance_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auto_advance: true,
            auto_advance_delay: Duration::from_millis(650),
        }
    }
}

/// A scored attempt at the current item.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    pub transcript: String,
    pub result: ScoreResult,
    pub feedback: Feedback,
    /// Set when the session already advanced; the caller should wait this
    /// long before showing the next item.
    pub advance_after: Option<Duration>,
}

/// Outcome of the latest attempt at the current item.
#[derive(Debug, Clone, PartialEq)]
pub enum LastAttempt {
    Scored(Attempt),
    Failed(RecognitionError),
}

/// Walks a vocabulary list one item at a time.
#[derive(Debug, Clone)]
pub struct PracticeSession {
    items: Vec<VocabularyItem>,
    index: usize,
    scorer: Scorer,
    config: SessionConfig,
    last: Option<LastAttempt>,
}

impl PracticeSession {
    pub fn new(items: Vec<VocabularyItem>, scorer: Scorer, config: SessionConfig) -> Self {
        info!(items = items.len(), auto_advance = config.auto_advance, "practice session started");
        Self {
            items,
            index: 0,
            scorer,
            config,
            last: None,
        }
    }

    pub fn current(&self) -> Option<&VocabularyItem> {
        self.items.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.items.len()
    }

    /// Language of the current word; English when the list is empty.
    pub fn language(&self) -> Language {
        self.current()
            .map_or(Language::English, |item| detect_language(&item.word))
    }

    /// Position through the list as a rounded percentage, counting the
    /// current item as reached.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn progress(&self) -> u8 {
        if self.items.is_empty() {
            return 0;
        }
        ((self.index + 1) as f64 / self.items.len() as f64 * 100.0).round() as u8
    }

    pub fn last_attempt(&self) -> Option<&LastAttempt> {
        self.last.as_ref()
    }

    /// Score a transcript against the current item.
    ///
    /// Returns `None` when there is nothing to practise. On a strong result
    /// with auto-advance enabled the session moves on immediately; the
    /// returned attempt says how long to linger first.
    pub fn submit(&mut self, transcript: &str, confidence: Option<f64>) -> Option<Attempt> {
        let item = self.current()?;
        let input = ComparisonInput {
            spoken: transcript.to_owned(),
            target: item.word.clone(),
            recognizer_confidence: confidence,
        };
        let result = self.scorer.score(&input);

        let advance = self.config.auto_advance && result.should_auto_advance && !self.is_last();
        let attempt = Attempt {
            transcript: input.spoken,
            result,
            feedback: Feedback::for_tier(result.feedback_tier),
            advance_after: advance.then_some(self.config.auto_advance_delay),
        };

        debug!(
            index = self.index,
            similarity = result.similarity,
            advance,
            "attempt recorded"
        );

        if advance {
            self.next();
        } else {
            self.last = Some(LastAttempt::Scored(attempt.clone()));
        }
        Some(attempt)
    }

    /// Record a recognizer failure and return the message to show.
    pub fn fail(&mut self, error: RecognitionError) -> Feedback {
        warn!(index = self.index, error = %error, "recognition failed");
        let feedback = Feedback::for_recognition_error(&error);
        self.last = Some(LastAttempt::Failed(error));
        feedback
    }

    /// Move to the next item. Returns `false` on the last item.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.index += 1;
        self.last = None;
        debug!(index = self.index, "advanced");
        true
    }

    /// Move to the previous item. Returns `false` on the first item.
    pub fn previous(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.last = None;
        debug!(index = self.index, "went back");
        true
    }

    /// Clear the last attempt without moving.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
