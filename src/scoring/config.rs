//! Scoring configuration.
//!
//! The blend weights and thresholds are tuning knobs, not derived values.
//! Defaults reproduce the speaking exercise's behaviour: text similarity
//! carries 85% of the blended score, recognizer confidence 15%, and anything
//! at 90 or above auto-advances.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ScoreError, SpeakResult};

/// Allowed drift when checking that the blend weights sum to one.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Lower bounds (inclusive) on the blended score for each feedback tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierThresholds {
    pub perfect: u8,
    pub excellent: u8,
    pub good: u8,
    pub fair: u8,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            perfect: 95,
            excellent: 90,
            good: 75,
            fair: 55,
        }
    }
}

/// Configuration for [`Scorer`](crate::scoring::Scorer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringConfig {
    /// Weight of the text-similarity percentage in the blend.
    pub blend_weight_text: f64,
    /// Weight of the recognizer confidence (scaled to 0–100) in the blend.
    pub blend_weight_confidence: f64,
    /// Blended score at or above which the exercise moves on by itself.
    pub auto_advance_threshold: u8,
    pub tier_thresholds: TierThresholds,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            blend_weight_text: 0.85,
            blend_weight_confidence: 0.15,
            auto_advance_threshold: 90,
            tier_thresholds: TierThresholds::default(),
        }
    }
}

impl ScoringConfig {
    /// Parse a JSON config and validate it. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::Json`] on malformed JSON and
    /// [`ScoreError::InvalidConfig`] if validation fails.
    pub fn from_json_str(json: &str) -> SpeakResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::ConfigRead`] if the file cannot be read, plus
    /// everything [`ScoringConfig::from_json_str`] can return.
    pub fn load(path: &Path) -> SpeakResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ScoreError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Check weights and thresholds for consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> SpeakResult<()> {
        check_weight("blendWeightText", self.blend_weight_text)?;
        check_weight("blendWeightConfidence", self.blend_weight_confidence)?;

        let sum = self.blend_weight_text + self.blend_weight_confidence;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ScoreError::InvalidConfig {
                field: "blendWeightConfidence",
                reason: format!("blend weights must sum to 1, got {sum}"),
            });
        }

        check_percent("autoAdvanceThreshold", self.auto_advance_threshold)?;

        let t = &self.tier_thresholds;
        check_percent("tierThresholds.perfect", t.perfect)?;
        let ordered = [
            ("tierThresholds.excellent", t.perfect, t.excellent),
            ("tierThresholds.good", t.excellent, t.good),
            ("tierThresholds.fair", t.good, t.fair),
        ];
        for (field, above, value) in ordered {
            if value > above {
                return Err(ScoreError::InvalidConfig {
                    field,
                    reason: format!("{value} exceeds the tier above it ({above})"),
                });
            }
        }

        Ok(())
    }
}

fn check_weight(field: &'static str, value: f64) -> SpeakResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ScoreError::InvalidConfig {
            field,
            reason: format!("must be a finite non-negative number, got {value}"),
        });
    }
    Ok(())
}

fn check_percent(field: &'static str, value: u8) -> SpeakResult<()> {
    if value > 100 {
        return Err(ScoreError::InvalidConfig {
            field,
            reason: format!("must be at most 100, got {value}"),
        });
    }
    Ok(())
}
