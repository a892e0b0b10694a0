//! `speak-score` — pronunciation scoring for speaking practice.
//!
//! Compares what a speech recognizer heard with the word or phrase a learner
//! was asked to say. The comparison is a pure function: normalize both
//! sides, take the Levenshtein distance, turn it into a 0–100 similarity,
//! optionally blend in the recognizer's own confidence, then map the score
//! to a feedback tier and an auto-advance decision.
//!
//! # Modules
//!
//! - [`scoring`] — normalizer, edit distance, scorer, config, character diff
//! - [`feedback`] — learner-facing messages and score meter bands
//! - [`language`] — script-based language detection and voice selection
//! - [`session`] — practice session over a vocabulary list
//! - [`server`] / [`tools`] — MCP (JSON-RPC 2.0 over stdio) adapter
//!
//! # Example
//!
//! ```
//! use speak_score::{ComparisonInput, FeedbackTier, score};
//!
//! let result = score(&ComparisonInput::new("beutiful", "beautiful").with_confidence(0.8));
//! assert_eq!(result.similarity, 88);
//! assert_eq!(result.feedback_tier, FeedbackTier::Good);
//! assert!(!result.should_auto_advance);
//! ```

pub mod error;
pub mod feedback;
pub mod language;
pub mod scoring;
pub mod server;
pub mod session;
pub mod tools;

pub use error::{RecognitionError, ScoreError, SpeakResult};
pub use scoring::levenshtein::distance as edit_distance;
pub use scoring::{ComparisonInput, FeedbackTier, ScoreResult, Scorer, ScoringConfig, normalize, score};
pub use server::run_mcp_server;
