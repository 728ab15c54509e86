//! Gap-fill stage for the audio path.
//!
//! Audio recognizers return timestamped phoneme intervals that are not
//! necessarily contiguous. This stage validates the timing, inserts
//! silence into gaps wider than a small tolerance, and produces the
//! contiguous symbol+duration sequence the merge engine expects.

use crate::config::GapFillConfig;
use crate::error::{EngineError, Result};
use crate::phoneme::{self, TimedSymbol, SILENCE};
use serde::Deserialize;
use tracing::warn;

/// One phoneme interval from the external audio recognizer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecognizedPhoneme {
    /// Phoneme label, IPA or ARPABET.
    pub phoneme: String,
    /// Interval start in seconds from the beginning of the audio.
    pub start: f64,
    /// Interval duration in seconds.
    pub duration: f64,
}

/// Reject malformed recognizer timing before any output is produced.
///
/// Silent misordering would corrupt the gap-fill accumulator, so this is
/// the one input class the engine refuses rather than repairs.
fn validate(recognized: &[RecognizedPhoneme]) -> Result<()> {
    let mut previous_start = 0.0;
    for (index, item) in recognized.iter().enumerate() {
        if !item.start.is_finite() || !item.duration.is_finite() {
            return Err(EngineError::RecognizerTiming(format!(
                "non-finite timestamp at index {index} ({})",
                item.phoneme
            )));
        }
        if item.start < 0.0 || item.duration < 0.0 {
            return Err(EngineError::RecognizerTiming(format!(
                "negative timestamp at index {index} ({}: start {}, duration {})",
                item.phoneme, item.start, item.duration
            )));
        }
        if item.start < previous_start {
            return Err(EngineError::RecognizerTiming(format!(
                "non-monotonic start at index {index} ({}: {} after {})",
                item.phoneme, item.start, previous_start
            )));
        }
        previous_start = item.start;
    }
    Ok(())
}

/// Convert recognizer intervals into a contiguous timed-symbol sequence.
///
/// Gaps wider than the configured tolerance become silence symbols; gaps
/// within tolerance are absorbed into the following phoneme so segment
/// boundaries stay aligned with the recognizer's clock. Phoneme labels
/// are normalized to clean ARPABET.
///
/// # Errors
///
/// Returns [`EngineError::RecognizerTiming`] for non-monotonic, negative,
/// or non-finite timestamps, with no partial output.
pub fn fill_gaps(
    recognized: &[RecognizedPhoneme],
    config: &GapFillConfig,
) -> Result<Vec<TimedSymbol>> {
    validate(recognized)?;

    let mut timed = Vec::with_capacity(recognized.len() * 2);
    let mut current_time = 0.0;

    for item in recognized {
        let gap = item.start - current_time;

        let duration = if gap > config.tolerance {
            timed.push(TimedSymbol {
                symbol: SILENCE.to_owned(),
                duration: gap,
            });
            current_time = item.start;
            item.duration
        } else {
            // Absorb the sub-tolerance gap (or slight overlap) so the
            // emitted end matches the recognizer's end exactly.
            (item.start + item.duration) - current_time
        };

        if duration <= 0.0 {
            warn!(
                phoneme = %item.phoneme,
                start = item.start,
                "recognized interval fully overlapped, skipping"
            );
            continue;
        }

        timed.push(TimedSymbol {
            symbol: phoneme::ipa::to_arpabet(&item.phoneme).to_owned(),
            duration,
        });
        current_time += duration;
    }

    Ok(timed)
}
