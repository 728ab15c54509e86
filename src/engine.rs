//! The lip-sync engine facade.
//!
//! [`LipSyncEngine`] ties the stages together: duration assignment,
//! classification, merging, refinement, and gap-fill. The text path turns
//! phoneme symbol streams into per-phoneme [`Frame`]s or grouped
//! [`Segment`]s; the audio path turns recognizer intervals into grouped
//! segments aligned to the recognizer's clock.

use crate::config::EngineConfig;
use crate::error::Result;
use crate::phoneme::{self, ipa, TimedSymbol};
use crate::shape_keys::{self, ShapeKeys};
use crate::timeline::gap_fill::{self, RecognizedPhoneme};
use crate::timeline::{refine, Segment};
use crate::viseme::{AudioGroup, TextGroup};
use serde::Serialize;
use tracing::{debug, info};

/// External grapheme-to-phoneme seam.
///
/// Implementations turn text into a symbol stream of ARPABET or IPA
/// phonemes mixed with raw punctuation. Empty or whitespace-only text
/// should yield an empty sequence; the engine then emits the single
/// trailing-silence timeline.
pub trait PhonemeSource {
    /// Phoneme symbols for `text` in the given language (e.g. `"en-us"`).
    ///
    /// # Errors
    ///
    /// Implementations should map their internal failures to
    /// [`EngineError::PhonemeSource`](crate::error::EngineError::PhonemeSource).
    fn phonemes(&self, text: &str, language: &str) -> Result<Vec<String>>;
}

/// One per-phoneme animation frame on the text path.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    /// Clean ARPABET phoneme, or `"sil"`.
    pub phoneme: String,
    /// Start in seconds from the beginning of the utterance.
    pub start: f64,
    /// Duration in seconds.
    pub duration: f64,
    /// Mouth shape-key targets for this phoneme.
    pub shape_keys: ShapeKeys,
}

/// Viseme timeline synthesis engine.
///
/// Construct once with a validated [`EngineConfig`], then call per
/// utterance; all methods are `&self` and the engine holds no per-request
/// state.
pub struct LipSyncEngine {
    config: EngineConfig,
}

impl LipSyncEngine {
    /// Create an engine with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`](crate::error::EngineError::Config) if any configured threshold or
    /// scale is out of range.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        info!(
            trailing_silence = config.timing.trailing_silence,
            anticipation_offset = config.refine.anticipation_offset,
            compression_scale = config.refine.compression_scale,
            gap_tolerance = config.gap_fill.tolerance,
            "lip-sync engine ready"
        );
        Ok(Self { config })
    }

    /// The configuration the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // -- text path ----------------------------------------------------------

    /// Per-phoneme frames (with shape-key targets) for a text string.
    ///
    /// # Errors
    ///
    /// Propagates the phoneme source's [`EngineError::PhonemeSource`](crate::error::EngineError::PhonemeSource).
    pub fn frames_from_text(
        &self,
        source: &dyn PhonemeSource,
        text: &str,
        language: &str,
    ) -> Result<Vec<Frame>> {
        let symbols = source.phonemes(text, language)?;
        Ok(self.frames_from_phonemes(&symbols))
    }

    /// Grouped, refined viseme segments for a text string.
    ///
    /// # Errors
    ///
    /// Propagates the phoneme source's [`EngineError::PhonemeSource`](crate::error::EngineError::PhonemeSource).
    pub fn segments_from_text(
        &self,
        source: &dyn PhonemeSource,
        text: &str,
        language: &str,
    ) -> Result<Vec<Segment<TextGroup>>> {
        let symbols = source.phonemes(text, language)?;
        Ok(self.segments_from_phonemes(&symbols))
    }

    /// Per-phoneme frames from a raw symbol stream.
    ///
    /// An empty stream yields the single trailing-silence frame so the
    /// caller always gets a timeline that resets the mouth to neutral.
    pub fn frames_from_phonemes<S: AsRef<str>>(&self, symbols: &[S]) -> Vec<Frame> {
        let timed = self.timed_symbols(symbols);

        let mut frames = Vec::with_capacity(timed.len());
        let mut current_time = 0.0;
        for t in timed {
            let shape_keys = shape_keys::resolve(&t.symbol);
            frames.push(Frame {
                start: current_time,
                duration: t.duration,
                phoneme: t.symbol,
                shape_keys,
            });
            current_time += t.duration;
        }

        debug!(count = frames.len(), total = current_time, "text frames built");
        frames
    }

    /// Grouped, refined viseme segments from a raw symbol stream.
    ///
    /// Runs the full text pipeline: duration model, articulatory-group
    /// merge, short-segment filter, anticipation, and compression.
    pub fn segments_from_phonemes<S: AsRef<str>>(&self, symbols: &[S]) -> Vec<Segment<TextGroup>> {
        let timed = self.timed_symbols(symbols);
        let merged = crate::timeline::merge(&timed, TextGroup::classify);
        let filtered = refine::filter_short(merged, &self.config.refine);
        let shifted = refine::anticipate(filtered, self.config.refine.anticipation_offset);
        let segments = refine::compress(shifted, self.config.refine.compression_scale);

        debug!(count = segments.len(), "text segments built");
        segments
    }

    /// Total spoken duration in seconds for a symbol stream, i.e. the end
    /// of the last frame (trailing silence included).
    pub fn estimate_duration<S: AsRef<str>>(&self, symbols: &[S]) -> f64 {
        self.timed_symbols(symbols).iter().map(|t| t.duration).sum()
    }

    // -- audio path ---------------------------------------------------------

    /// Grouped viseme segments aligned to recognizer timestamps.
    ///
    /// Gaps wider than the configured tolerance become silence segments;
    /// segments are merged by visual similarity and short-filtered.
    /// Anticipation and compression do not apply here, the recognizer's
    /// clock is authoritative.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::RecognizerTiming`](crate::error::EngineError::RecognizerTiming) for non-monotonic,
    /// negative, or non-finite recognizer timestamps.
    pub fn segments_from_recognized(
        &self,
        recognized: &[RecognizedPhoneme],
    ) -> Result<Vec<Segment<AudioGroup>>> {
        let timed = gap_fill::fill_gaps(recognized, &self.config.gap_fill)?;
        let merged = crate::timeline::merge(&timed, AudioGroup::classify);
        let segments = refine::filter_short(merged, &self.config.refine);

        debug!(count = segments.len(), "audio segments built");
        Ok(segments)
    }

    // -- internals ----------------------------------------------------------

    /// Normalize a raw symbol stream and run the duration model.
    ///
    /// Punctuation passes through untouched so the duration model can turn
    /// it into pauses, and ARPABET-shaped symbols pass through so unknown
    /// ones still hit the table fallbacks downstream (neutral group,
    /// default duration, neutral shape keys). Only IPA-looking symbols are
    /// converted.
    fn timed_symbols<S: AsRef<str>>(&self, symbols: &[S]) -> Vec<TimedSymbol> {
        let normalized: Vec<String> = symbols
            .iter()
            .map(|s| {
                let s = s.as_ref();
                if phoneme::pause_duration(s).is_some() || s == phoneme::SILENCE || s == "sp" {
                    s.to_owned()
                } else if s.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
                    phoneme::strip_stress(s).to_owned()
                } else {
                    ipa::to_arpabet(s).to_owned()
                }
            })
            .collect();
        phoneme::assign_durations(&normalized, self.config.timing.trailing_silence)
    }
}
