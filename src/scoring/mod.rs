//! Pronunciation scoring core.
//!
//! Compares a recognized utterance with the expected word or phrase and
//! turns the result into a 0–100 score, a feedback tier and an auto-advance
//! decision. Everything here is pure: the same [`ComparisonInput`] always
//! yields the same [`ScoreResult`], and no call can fail.
//!
//! # Pipeline
//!
//! ```text
//! spoken ─┐                         ┌─ empty?  → 0
//!         ├─ normalize ─────────────┼─ equal?  → 100
//! target ─┘                         └─ levenshtein → % ─ blend(confidence)
//!                                                         │
//!                          ScoreResult { tier, auto-advance } ◄┘
//! ```

pub mod config;
pub mod diff;
pub mod levenshtein;
pub mod normalize;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use config::{ScoringConfig, TierThresholds};
pub use normalize::normalize;

/// One recognition attempt to score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonInput {
    /// Best transcript from the recognizer. Empty means nothing understood.
    pub spoken: String,
    /// The word or phrase the learner was asked to say.
    pub target: String,
    /// Recognizer confidence in `[0, 1]`, when the recognizer reports one.
    #[serde(default)]
    pub recognizer_confidence: Option<f64>,
}

impl ComparisonInput {
    pub fn new(spoken: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            spoken: spoken.into(),
            target: target.into(),
            recognizer_confidence: None,
        }
    }

    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.recognizer_confidence = Some(confidence);
        self
    }
}

/// Qualitative feedback tier, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeedbackTier {
    NeedsPractice,
    Fair,
    Good,
    Excellent,
    Perfect,
}

impl FeedbackTier {
    /// Highest tier whose lower bound `score` reaches.
    pub fn from_score(score: u8, thresholds: &TierThresholds) -> Self {
        if score >= thresholds.perfect {
            Self::Perfect
        } else if score >= thresholds.excellent {
            Self::Excellent
        } else if score >= thresholds.good {
            Self::Good
        } else if score >= thresholds.fair {
            Self::Fair
        } else {
            Self::NeedsPractice
        }
    }
}

/// Outcome of scoring one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    /// Final 0–100 score, after blending in recognizer confidence.
    pub similarity: u8,
    /// 0–100 text similarity before blending.
    pub text_similarity: u8,
    pub feedback_tier: FeedbackTier,
    pub should_auto_advance: bool,
}

/// Scores attempts against a fixed [`ScoringConfig`].
///
/// Holds no mutable state; share it freely across threads.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    config: ScoringConfig,
}

impl Scorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score one attempt.
    ///
    /// Empty input on either side (after normalization) scores 0 and equal
    /// input scores 100; neither is blended with the recognizer confidence.
    /// Otherwise the edit-distance percentage is rounded, then blended.
    pub fn score(&self, input: &ComparisonInput) -> ScoreResult {
        let spoken = normalize(&input.spoken);
        let target = normalize(&input.target);

        let (text_similarity, blended) = if spoken.is_empty() || target.is_empty() {
            (0, 0)
        } else if spoken == target {
            (100, 100)
        } else {
            let raw = levenshtein::similarity_percent(&spoken, &target);
            (raw, self.blend(raw, input.recognizer_confidence))
        };

        let feedback_tier = FeedbackTier::from_score(blended, &self.config.tier_thresholds);
        let should_auto_advance = blended >= self.config.auto_advance_threshold;

        debug!(
            spoken = %spoken,
            target = %target,
            text_similarity,
            similarity = blended,
            tier = ?feedback_tier,
            should_auto_advance,
            "scored attempt"
        );

        ScoreResult {
            similarity: blended,
            text_similarity,
            feedback_tier,
            should_auto_advance,
        }
    }

    /// Blend the text score with recognizer confidence, if usable.
    ///
    /// Confidence outside `[0, 1]` is clamped; NaN counts as absent.
    fn blend(&self, text_similarity: u8, confidence: Option<f64>) -> u8 {
        match confidence.filter(|c| !c.is_nan()) {
            Some(c) => to_percent(
                f64::from(text_similarity) * self.config.blend_weight_text
                    + c.clamp(0.0, 1.0) * 100.0 * self.config.blend_weight_confidence,
            ),
            None => text_similarity,
        }
    }
}

/// Score with the default configuration.
pub fn score(input: &ComparisonInput) -> ScoreResult {
    Scorer::default().score(input)
}

/// Slack for products like `94 * 0.85 + 64 * 0.15` that land on
/// 89.49999999999999 instead of an exact half.
const HALF_TOLERANCE: f64 = 1e-9;

/// Round half up and clamp into `0..=100`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_percent(value: f64) -> u8 {
    (value + 0.5 + HALF_TOLERANCE).floor().clamp(0.0, 100.0) as u8
}
