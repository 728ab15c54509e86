//! Configuration types for the viseme engine.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Top-level configuration for viseme timeline synthesis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Text-path timing settings.
    pub timing: TimingConfig,
    /// Segment refinement settings (filtering, anticipation, compression).
    pub refine: RefineConfig,
    /// Audio-path gap-fill settings.
    pub gap_fill: GapFillConfig,
}

/// Text-path timing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Duration in seconds of the silence frame appended after every
    /// utterance so the animation resets to neutral.
    pub trailing_silence: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            trailing_silence: 0.2,
        }
    }
}

/// Segment refinement configuration.
///
/// All three stages run after merging and each preserves the timeline
/// semantics described on [`crate::timeline::refine`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RefineConfig {
    /// Minimum duration in seconds for visually strong segments
    /// (open, wide, round, closed shapes).
    pub strong_min_duration: f64,
    /// Minimum duration in seconds for weak/neutral segments. Higher than
    /// the strong minimum: a brief neutral flash reads as jitter while a
    /// brief open mouth still reads as articulation.
    pub weak_min_duration: f64,
    /// Minimum duration in seconds for silence segments.
    pub silence_min_duration: f64,
    /// Seconds to shift every segment start earlier, clamped at zero.
    /// Mouth shapes visually precede their sound; 0.0 disables the stage.
    pub anticipation_offset: f64,
    /// Scale factor applied to every timestamp. Values below 1.0 speed the
    /// animation up to match a faster audio playback rate; 1.0 disables
    /// the stage.
    pub compression_scale: f64,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            strong_min_duration: 0.04,
            weak_min_duration: 0.08,
            silence_min_duration: 0.03,
            anticipation_offset: 0.0,
            compression_scale: 1.0,
        }
    }
}

/// Audio-path gap-fill configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GapFillConfig {
    /// Gaps between recognized phonemes shorter than this many seconds are
    /// absorbed into the following phoneme instead of becoming silence.
    pub tolerance: f64,
}

impl Default for GapFillConfig {
    fn default() -> Self {
        Self { tolerance: 0.010 }
    }
}

impl EngineConfig {
    /// Validate the configuration.
    ///
    /// Called once at engine construction so that per-request execution can
    /// never fail on configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if any threshold is outside `[0, 1]`,
    /// the compression scale is non-positive or non-finite, the anticipation
    /// offset is negative, or the gap tolerance is negative.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("refine.strong_min_duration", self.refine.strong_min_duration),
            ("refine.weak_min_duration", self.refine.weak_min_duration),
            (
                "refine.silence_min_duration",
                self.refine.silence_min_duration,
            ),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(EngineError::Config(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }

        let scale = self.refine.compression_scale;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(EngineError::Config(format!(
                "refine.compression_scale must be a positive finite number, got {scale}"
            )));
        }

        let offset = self.refine.anticipation_offset;
        if !offset.is_finite() || offset < 0.0 {
            return Err(EngineError::Config(format!(
                "refine.anticipation_offset must be non-negative, got {offset}"
            )));
        }

        let trailing = self.timing.trailing_silence;
        if !trailing.is_finite() || trailing < 0.0 {
            return Err(EngineError::Config(format!(
                "timing.trailing_silence must be non-negative, got {trailing}"
            )));
        }

        let tolerance = self.gap_fill.tolerance;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(EngineError::Config(format!(
                "gap_fill.tolerance must be non-negative, got {tolerance}"
            )));
        }

        Ok(())
    }
}
