//! Segment refinement: short-segment filtering, visual anticipation, and
//! timeline compression.
//!
//! Each stage is a pure fold producing a new segment list; start/end times
//! are recomputed from zero in a single forward pass after filtering so
//! repeated in-place mutation can never accumulate floating-point drift.

use super::Segment;
use crate::config::RefineConfig;
use crate::viseme::VisualGroup;
use tracing::debug;

fn min_duration<G: VisualGroup>(group: G, config: &RefineConfig) -> f64 {
    if group.is_silence() {
        config.silence_min_duration
    } else if group.is_strong() {
        config.strong_min_duration
    } else {
        config.weak_min_duration
    }
}

/// Drop segments below their per-group minimum duration, donating each
/// dropped segment's time to the previous kept segment so the total
/// timeline length never changes. Time dropped before the first kept
/// segment is carried forward into it.
///
/// If no segment at all meets its threshold the input is returned
/// unchanged: there is nothing to donate to, and losing the whole timeline
/// would violate duration conservation.
pub fn filter_short<G: VisualGroup>(
    segments: Vec<Segment<G>>,
    config: &RefineConfig,
) -> Vec<Segment<G>> {
    if segments.is_empty() {
        return segments;
    }

    let total = segments.len();
    // (group, phonemes, duration) — timestamps are rebuilt afterwards.
    let mut kept: Vec<(G, Vec<String>, f64)> = Vec::with_capacity(total);
    let mut leading_carry = 0.0;

    for segment in segments.iter() {
        let duration = segment.duration();
        if duration >= min_duration(segment.group, config) {
            kept.push((
                segment.group,
                segment.phonemes.clone(),
                duration + std::mem::take(&mut leading_carry),
            ));
        } else if let Some(previous) = kept.last_mut() {
            previous.2 += duration;
        } else {
            leading_carry += duration;
        }
    }

    if kept.is_empty() {
        return segments;
    }
    debug!(
        kept = kept.len(),
        dropped = total - kept.len(),
        "short-segment filter"
    );

    // Recompute start/end by accumulating durations from zero.
    let mut current_time = 0.0;
    kept.into_iter()
        .map(|(group, phonemes, duration)| {
            let start = current_time;
            current_time += duration;
            Segment {
                group,
                phonemes,
                start,
                end: current_time,
            }
        })
        .collect()
}

/// Shift every segment's start earlier by a fixed offset, clamped at zero.
///
/// Mouth shapes visually precede their sound; the shift deliberately lets
/// a segment overlap the tail of its predecessor. Ends are left in place,
/// so the final timeline length is unchanged. A zero offset is the
/// identity.
pub fn anticipate<G>(segments: Vec<Segment<G>>, offset: f64) -> Vec<Segment<G>> {
    if offset <= 0.0 {
        return segments;
    }
    segments
        .into_iter()
        .map(|segment| Segment {
            start: (segment.start - offset).max(0.0),
            ..segment
        })
        .collect()
}

/// Multiply every timestamp by a constant scale factor. Values below 1.0
/// speed the animation up to match a faster audio playback rate; 1.0 is
/// the identity.
pub fn compress<G>(segments: Vec<Segment<G>>, scale: f64) -> Vec<Segment<G>> {
    if scale == 1.0 {
        return segments;
    }
    segments
        .into_iter()
        .map(|segment| Segment {
            start: segment.start * scale,
            end: segment.end * scale,
            ..segment
        })
        .collect()
}
