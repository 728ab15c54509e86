//! Timeline merge engine.
//!
//! Walks a duration-stamped phoneme sequence and merges consecutive
//! phonemes sharing a visual group into single animation segments. Merging
//! never creates or destroys time: the sum of segment durations equals the
//! sum of input durations, and segment boundaries are contiguous.

pub mod gap_fill;
pub mod refine;

use crate::phoneme::TimedSymbol;
use crate::viseme::VisualGroup;
use serde::Serialize;

/// One merged viseme segment on a continuous timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment<G> {
    /// Visual group animated over this span.
    pub group: G,
    /// The phonemes merged into this segment, in order.
    pub phonemes: Vec<String>,
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds, strictly greater than `start`.
    pub end: f64,
}

impl<G> Segment<G> {
    /// Segment duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Merge a duration-stamped symbol sequence into viseme segments.
///
/// Single left-to-right pass: the open segment is extended while the next
/// symbol classifies into the same group (silence runs merge likewise) and
/// closed otherwise. Zero-duration symbols join the open segment's member
/// list rather than opening an empty segment, keeping `end > start` true
/// for every emitted segment.
pub fn merge<G, F>(timed: &[TimedSymbol], classify: F) -> Vec<Segment<G>>
where
    G: VisualGroup,
    F: Fn(&str) -> G,
{
    let mut segments: Vec<Segment<G>> = Vec::new();
    let mut current_time = 0.0;

    for TimedSymbol { symbol, duration } in timed {
        let group = classify(symbol);

        if *duration <= 0.0 {
            if let Some(open) = segments.last_mut() {
                open.phonemes.push(symbol.clone());
            }
            continue;
        }

        match segments.last_mut() {
            Some(open) if open.group == group => {
                open.phonemes.push(symbol.clone());
                open.end += duration;
            }
            _ => {
                segments.push(Segment {
                    group,
                    phonemes: vec![symbol.clone()],
                    start: current_time,
                    end: current_time + duration,
                });
            }
        }
        current_time += duration;
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viseme::TextGroup;

    const EPSILON: f64 = 1e-9;

    fn timed(pairs: &[(&str, f64)]) -> Vec<TimedSymbol> {
        pairs
            .iter()
            .map(|&(symbol, duration)| TimedSymbol {
                symbol: symbol.to_owned(),
                duration,
            })
            .collect()
    }

    #[test]
    fn consecutive_same_group_phonemes_merge() {
        // AH and AA are both Open; L is Alveolar.
        let input = timed(&[("AH", 0.09), ("AA", 0.09), ("L", 0.08)]);
        let segments = merge(&input, TextGroup::classify);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].group, TextGroup::Open);
        assert_eq!(segments[0].phonemes, vec!["AH", "AA"]);
        assert!((segments[0].end - 0.18).abs() < EPSILON);
        assert_eq!(segments[1].group, TextGroup::Alveolar);
    }

    #[test]
    fn silence_runs_merge() {
        let input = timed(&[("sil", 0.5), ("sil", 0.2)]);
        let segments = merge(&input, TextGroup::classify);
        assert_eq!(segments.len(), 1);
        assert!((segments[0].duration() - 0.7).abs() < EPSILON);
    }

    #[test]
    fn merge_preserves_total_duration() {
        let input = timed(&[
            ("HH", 0.06),
            ("AH", 0.09),
            ("L", 0.08),
            ("OW", 0.09),
            ("sil", 0.05),
            ("W", 0.08),
            ("ER", 0.09),
            ("L", 0.08),
            ("D", 0.06),
        ]);
        let total_in: f64 = input.iter().map(|t| t.duration).sum();
        let segments = merge(&input, TextGroup::classify);
        let total_out: f64 = segments.iter().map(Segment::duration).sum();
        assert!((total_in - total_out).abs() < EPSILON);
    }

    #[test]
    fn segments_are_contiguous() {
        let input = timed(&[("K", 0.06), ("AE", 0.09), ("T", 0.06), ("sil", 0.2)]);
        let segments = merge(&input, TextGroup::classify);
        assert!((segments[0].start).abs() < EPSILON);
        for pair in segments.windows(2) {
            assert!((pair[0].end - pair[1].start).abs() < EPSILON);
        }
    }

    #[test]
    fn empty_input_yields_empty_timeline() {
        let segments: Vec<Segment<TextGroup>> = merge(&[], TextGroup::classify);
        assert!(segments.is_empty());
    }
}
