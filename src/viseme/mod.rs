//! Visual-group taxonomies for lip-sync animation.
//!
//! A viseme is the visual mouth shape corresponding to one or more
//! phonemes. Two independent closed taxonomies exist because the two input
//! paths serve different purposes and must not be conflated:
//!
//! - [`TextGroup`] — coarse articulatory classes used for segment-level
//!   animation of text-driven timelines (one group per sustained mouth
//!   shape).
//! - [`AudioGroup`] — visual-similarity classes tuned to absorb jitter in
//!   recognizer output before merging.
//!
//! Both classifiers are total: stress digits are stripped first and any
//! unrecognized symbol lands in the neutral group, never an error.

use crate::phoneme::strip_stress;
use serde::Serialize;

/// Common behavior shared by the two taxonomies, used by the merge and
/// refinement stages.
pub trait VisualGroup: Copy + PartialEq {
    /// Whether this group represents silence.
    fn is_silence(self) -> bool;

    /// Whether this group is a visually strong shape. Strong shapes keep a
    /// lower minimum duration during short-segment filtering than weak
    /// (neutral-looking) shapes.
    fn is_strong(self) -> bool;
}

/// Articulatory mouth-shape groups for the text path.
///
/// Wire names (`g1_OPEN` … `g10_BACK`, `sil`) match what the animation
/// layer keys its per-group shape tables on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextGroup {
    /// Wide open mouth (AA, AH, AO, HH).
    #[serde(rename = "g1_OPEN")]
    Open,
    /// Wide lips with open mouth (AE, EH, AY, EY, IH, IY, Y).
    #[serde(rename = "g2_WIDE")]
    Wide,
    /// Open with slight rounding (ER, R).
    #[serde(rename = "g3_R")]
    Rhotic,
    /// Rounded, protruded lips (AW, OW, OY, UH, UW, W).
    #[serde(rename = "g4_ROUND")]
    Round,
    /// Lips pressed together (B, M, P).
    #[serde(rename = "g5_CLOSED")]
    Closed,
    /// Teeth on lower lip (F, V).
    #[serde(rename = "g6_FV")]
    TeethOnLips,
    /// Teeth together, tongue forward (S, Z, SH, ZH, CH, JH).
    #[serde(rename = "g7_SIBILANT")]
    Sibilant,
    /// Tongue between teeth (TH, DH).
    #[serde(rename = "g8_DENTAL")]
    Dental,
    /// Tongue tip at the roof (T, D, L, N).
    #[serde(rename = "g9_ALVEOLAR")]
    Alveolar,
    /// Back-of-tongue consonants (K, G, NG).
    #[serde(rename = "g10_BACK")]
    Back,
    /// Default for anything unrecognized.
    #[serde(rename = "NEUTRAL")]
    Neutral,
    /// Silence or pause.
    #[serde(rename = "sil")]
    Silence,
}

impl TextGroup {
    /// Classify a phoneme symbol. Stress digits are stripped first; the
    /// function is total (unknown symbols map to [`TextGroup::Neutral`]).
    pub fn classify(symbol: &str) -> Self {
        match strip_stress(symbol) {
            "sil" | "sp" | "" => TextGroup::Silence,

            "AA" | "AH" | "AO" | "HH" => TextGroup::Open,
            "AE" | "EH" | "AY" | "EY" | "IH" | "IY" | "Y" => TextGroup::Wide,
            "ER" | "R" => TextGroup::Rhotic,
            "AW" | "OW" | "OY" | "UH" | "UW" | "W" => TextGroup::Round,
            "B" | "M" | "P" => TextGroup::Closed,
            "F" | "V" => TextGroup::TeethOnLips,
            "S" | "Z" | "SH" | "ZH" | "CH" | "JH" => TextGroup::Sibilant,
            "TH" | "DH" => TextGroup::Dental,
            "T" | "D" | "L" | "N" => TextGroup::Alveolar,
            "K" | "G" | "NG" => TextGroup::Back,

            _ => TextGroup::Neutral,
        }
    }

    /// Shape-key targets for this group, for consumers that animate merged
    /// segments directly instead of per-phoneme frames. Silence and neutral
    /// return an empty table (all controls relax to zero).
    pub fn shape_keys(self) -> &'static [(&'static str, f32)] {
        match self {
            TextGroup::Open => &[
                ("TeethTongue_Open", 0.9),
                ("Lips_Open_Wide", 0.8),
                ("Lips_Round", 0.2),
                ("Lips_Wide", 0.1),
            ],
            TextGroup::Wide => &[
                ("Lips_Wide", 0.9),
                ("Lips_Open_Wide", 0.5),
                ("Lips_Corner_Up", 0.3),
                ("TeethTongue_Open", 0.4),
            ],
            TextGroup::Rhotic => &[
                ("Lips_Round", 0.5),
                ("Lips_Protude", 0.4),
                ("Lips_Open_Wide", 0.4),
                ("TeethTongue_Open", 0.5),
            ],
            TextGroup::Round => &[
                ("Lips_Round", 0.8),
                ("Lips_Protude", 0.7),
                ("Lips_Purse_Narrow", 0.4),
                ("Lips_Open_Wide", 0.3),
                ("TeethTongue_Open", 0.2),
            ],
            TextGroup::Closed => &[
                ("Lips_Open_Wide", 0.0),
                ("Lips_Purse_Narrow", 0.2),
                ("Lips_Protude", 0.1),
                ("TeethTongue_Open", 0.0),
            ],
            TextGroup::TeethOnLips => &[
                ("Lips_FV", 1.0),
                ("TeethTongue_Bite", 0.6),
                ("Lips_Open_Wide", 0.1),
                ("TeethTongue_Open", 0.1),
            ],
            TextGroup::Sibilant => &[
                ("Lips_Open_Wide", 0.2),
                ("Lips_Wide", 0.6),
                ("TeethTongue_Open", 0.0),
                ("TeethTongue_TipUp", 0.4),
            ],
            TextGroup::Dental => &[
                ("TeethTongue_Bite", 0.9),
                ("Lips_Open_Wide", 0.2),
                ("Lips_Wide", 0.3),
                ("TeethTongue_Open", 0.2),
            ],
            TextGroup::Alveolar => &[
                ("Lips_Open_Wide", 0.3),
                ("TeethTongue_TipUp", 0.9),
                ("TeethTongue_Open", 0.3),
                ("Lips_Wide", 0.2),
            ],
            TextGroup::Back => &[
                ("Lips_Open_Wide", 0.5),
                ("TeethTongue_Open", 0.6),
                ("Lips_Round", 0.1),
            ],
            TextGroup::Neutral | TextGroup::Silence => &[],
        }
    }
}

impl VisualGroup for TextGroup {
    fn is_silence(self) -> bool {
        self == TextGroup::Silence
    }

    fn is_strong(self) -> bool {
        matches!(
            self,
            TextGroup::Open | TextGroup::Wide | TextGroup::Round | TextGroup::Closed
        )
    }
}

/// Visual-similarity groups for merging recognizer output (audio path).
///
/// Coarser than [`TextGroup`]: recognizers emit rapid short phones, and a
/// finer taxonomy would reintroduce the jitter the merge removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioGroup {
    /// Jaw-open vowels and open consonants.
    Open,
    /// Wide / smiling shapes (front vowels, sibilants).
    Wide,
    /// Rounded or protruded lips.
    Round,
    /// Lips pressed or on teeth.
    Pucker,
    /// Neutral-looking articulation (also the default).
    Neutral,
    /// Silence or pause.
    #[serde(rename = "sil")]
    Silence,
}

impl AudioGroup {
    /// Classify a phoneme symbol. Total; stress digits are stripped first
    /// and unknown symbols map to [`AudioGroup::Neutral`].
    pub fn classify(symbol: &str) -> Self {
        match strip_stress(symbol) {
            "sil" | "sp" | "" => AudioGroup::Silence,

            "AA" | "AE" | "AH" | "AO" | "AW" | "AY" | "EH" | "ER" | "EY" | "HH" | "K" | "G"
            | "NG" => AudioGroup::Open,
            "IH" | "IY" | "Y" | "S" | "Z" | "SH" | "ZH" | "CH" | "JH" => AudioGroup::Wide,
            "OW" | "OY" | "UH" | "UW" | "W" | "R" => AudioGroup::Round,
            "B" | "P" | "M" | "F" | "V" => AudioGroup::Pucker,
            "T" | "D" | "L" | "N" | "TH" | "DH" => AudioGroup::Neutral,

            _ => AudioGroup::Neutral,
        }
    }
}

impl VisualGroup for AudioGroup {
    fn is_silence(self) -> bool {
        self == AudioGroup::Silence
    }

    fn is_strong(self) -> bool {
        matches!(
            self,
            AudioGroup::Open | AudioGroup::Wide | AudioGroup::Round | AudioGroup::Pucker
        )
    }
}
