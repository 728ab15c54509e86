//! Per-phoneme shape-key resolution.
//!
//! Maps each clean ARPABET phoneme to named float controls in `[0, 1]` for
//! the lips and teeth/tongue rigs. The table decorates ungrouped text-path
//! frames; it plays no part in grouping or merging. Resolution is total:
//! silence and unmapped phonemes resolve to the neutral table.

use serde::Serialize;
use std::collections::BTreeMap;

/// Every control name the engine can emit. Animation layers zero controls
/// not present in a frame's table, so the full set is public.
pub const ALL_SHAPE_KEYS: &[&str] = &[
    "Lips_Open_Wide",
    "Lips_Wide",
    "Lips_Round",
    "Lips_Protude",
    "Lips_Purse_Narrow",
    "Lips_FV",
    "Lips_Corner_Up",
    "Lips_Neutral",
    "TeethTongue_Open",
    "TeethTongue_TipUp",
    "TeethTongue_Bite",
    "TeethTongue_Neutral",
];

/// Shape-key control values for one phoneme, split by rig.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeKeys {
    /// Lip controls.
    pub lips: BTreeMap<&'static str, f32>,
    /// Teeth and tongue controls.
    pub teeth: BTreeMap<&'static str, f32>,
}

impl ShapeKeys {
    /// Merge lips and teeth into one flat control table, for consumers
    /// that drive a single morph-target dictionary.
    pub fn flatten(&self) -> BTreeMap<&'static str, f32> {
        let mut flat = self.lips.clone();
        flat.extend(self.teeth.iter().map(|(&k, &v)| (k, v)));
        flat
    }

    /// Whether this is the neutral (silence) table.
    pub fn is_neutral(&self) -> bool {
        self.lips.get("Lips_Neutral") == Some(&1.0)
    }
}

/// (phoneme, lip controls, teeth/tongue controls)
type ShapeRow = (
    &'static str,
    &'static [(&'static str, f32)],
    &'static [(&'static str, f32)],
);

/// Relaxed pose used for silence and any unmapped phoneme.
const NEUTRAL_ROW: ShapeRow = (
    "sil",
    &[("Lips_Neutral", 1.0)],
    &[("TeethTongue_Neutral", 1.0)],
);

const PHONEME_SHAPE_KEYS: &[ShapeRow] = &[
    // Vowels
    (
        "AA",
        &[("Lips_Open_Wide", 0.8), ("Lips_Wide", 0.5)],
        &[("TeethTongue_Open", 1.0)],
    ),
    (
        "AE",
        &[("Lips_Wide", 0.7), ("Lips_Open_Wide", 0.7)],
        &[("TeethTongue_Bite", 0.3)],
    ),
    (
        "AH",
        &[("Lips_Open_Wide", 0.5), ("Lips_Round", 0.2)],
        &[("TeethTongue_Open", 0.8)],
    ),
    (
        "AO",
        &[("Lips_Round", 0.7), ("Lips_Protude", 0.6)],
        &[("TeethTongue_Open", 0.6)],
    ),
    (
        "AW",
        &[("Lips_Round", 0.8), ("Lips_Open_Wide", 0.6)],
        &[("TeethTongue_Open", 0.7)],
    ),
    (
        "AY",
        &[("Lips_Wide", 0.6), ("Lips_Corner_Up", 0.3)],
        &[("TeethTongue_Open", 0.5)],
    ),
    (
        "EH",
        &[("Lips_Wide", 0.7), ("Lips_Open_Wide", 0.6)],
        &[("TeethTongue_Bite", 0.3)],
    ),
    (
        "ER",
        &[("Lips_Round", 0.4), ("Lips_Open_Wide", 0.5)],
        &[("TeethTongue_Open", 0.9)],
    ),
    (
        "EY",
        &[("Lips_Wide", 0.8), ("Lips_Corner_Up", 0.4)],
        &[("TeethTongue_Open", 0.4)],
    ),
    (
        "IH",
        &[("Lips_Wide", 0.9), ("Lips_Corner_Up", 0.3)],
        &[("TeethTongue_Open", 0.5)],
    ),
    (
        "IY",
        &[("Lips_Wide", 1.0), ("Lips_Corner_Up", 0.5)],
        &[("TeethTongue_Open", 0.4)],
    ),
    (
        "OW",
        &[("Lips_Round", 0.9), ("Lips_Purse_Narrow", 0.6)],
        &[("TeethTongue_Open", 0.3)],
    ),
    (
        "OY",
        &[("Lips_Round", 0.7), ("Lips_Protude", 0.5), ("Lips_Wide", 0.3)],
        &[("TeethTongue_Open", 0.5)],
    ),
    (
        "UH",
        &[("Lips_Round", 0.8), ("Lips_Purse_Narrow", 0.7)],
        &[("TeethTongue_Open", 0.2)],
    ),
    (
        "UW",
        &[("Lips_Round", 1.0), ("Lips_Purse_Narrow", 0.9)],
        &[("TeethTongue_Open", 0.1)],
    ),
    // Consonants
    (
        "B",
        &[("Lips_Protude", 0.9), ("Lips_FV", 0.1)],
        &[("TeethTongue_Open", 0.0)],
    ),
    (
        "CH",
        &[("Lips_Wide", 0.5), ("Lips_Open_Wide", 0.4)],
        &[("TeethTongue_TipUp", 0.8), ("TeethTongue_Bite", 0.5)],
    ),
    (
        "D",
        &[("Lips_Wide", 0.4), ("Lips_Open_Wide", 0.3)],
        &[("TeethTongue_TipUp", 0.7), ("TeethTongue_Bite", 0.4)],
    ),
    (
        "DH",
        &[("Lips_Wide", 0.5), ("Lips_Corner_Up", 0.2)],
        &[("TeethTongue_TipUp", 1.0)],
    ),
    (
        "F",
        &[("Lips_FV", 1.0), ("Lips_Protude", 0.5)],
        &[("TeethTongue_Open", 0.3)],
    ),
    (
        "G",
        &[("Lips_Round", 0.3), ("Lips_Open_Wide", 0.6)],
        &[("TeethTongue_Open", 0.8)],
    ),
    (
        "HH",
        &[("Lips_Open_Wide", 0.3), ("Lips_Wide", 0.4)],
        &[("TeethTongue_Open", 0.7)],
    ),
    (
        "JH",
        &[("Lips_Wide", 0.5), ("Lips_Open_Wide", 0.4)],
        &[("TeethTongue_TipUp", 0.8), ("TeethTongue_Bite", 0.5)],
    ),
    (
        "K",
        &[("Lips_Round", 0.3), ("Lips_Open_Wide", 0.7)],
        &[("TeethTongue_Open", 0.9)],
    ),
    (
        "L",
        &[("Lips_Wide", 0.4), ("Lips_Open_Wide", 0.3)],
        &[("TeethTongue_TipUp", 0.6), ("TeethTongue_Bite", 0.3)],
    ),
    (
        "M",
        &[("Lips_Protude", 0.8), ("Lips_FV", 0.2)],
        &[("TeethTongue_Open", 0.0)],
    ),
    (
        "N",
        &[("Lips_Wide", 0.4), ("Lips_Open_Wide", 0.3)],
        &[("TeethTongue_TipUp", 0.7)],
    ),
    (
        "NG",
        &[("Lips_Round", 0.4), ("Lips_Open_Wide", 0.5)],
        &[("TeethTongue_Open", 0.8)],
    ),
    (
        "P",
        &[("Lips_Protude", 0.9), ("Lips_FV", 0.1)],
        &[("TeethTongue_Open", 0.0)],
    ),
    (
        "R",
        &[("Lips_Round", 0.3), ("Lips_Open_Wide", 0.5)],
        &[("TeethTongue_Open", 0.9)],
    ),
    (
        "S",
        &[("Lips_Wide", 1.0), ("Lips_Open_Wide", 0.5)],
        &[("TeethTongue_TipUp", 0.7)],
    ),
    (
        "SH",
        &[("Lips_Wide", 0.9), ("Lips_Open_Wide", 0.5)],
        &[("TeethTongue_TipUp", 0.6)],
    ),
    (
        "T",
        &[("Lips_Wide", 0.4), ("Lips_Open_Wide", 0.3)],
        &[("TeethTongue_TipUp", 0.8), ("TeethTongue_Bite", 0.5)],
    ),
    (
        "TH",
        &[("Lips_Wide", 0.5), ("Lips_Corner_Up", 0.2)],
        &[("TeethTongue_TipUp", 1.0)],
    ),
    (
        "V",
        &[("Lips_FV", 1.0), ("Lips_Protude", 0.5)],
        &[("TeethTongue_Open", 0.3)],
    ),
    (
        "W",
        &[("Lips_Round", 0.9), ("Lips_Protude", 0.7)],
        &[("TeethTongue_Open", 0.2)],
    ),
    (
        "Y",
        &[("Lips_Wide", 0.6), ("Lips_Corner_Up", 0.4)],
        &[("TeethTongue_Open", 0.5)],
    ),
    (
        "Z",
        &[("Lips_Wide", 0.9), ("Lips_Open_Wide", 0.5)],
        &[("TeethTongue_TipUp", 0.6)],
    ),
    (
        "ZH",
        &[("Lips_Wide", 0.8), ("Lips_Open_Wide", 0.5)],
        &[("TeethTongue_TipUp", 0.6)],
    ),
];

fn build(row: &ShapeRow) -> ShapeKeys {
    ShapeKeys {
        lips: row.1.iter().copied().collect(),
        teeth: row.2.iter().copied().collect(),
    }
}

/// Resolve shape keys for a phoneme. Total: stress digits are stripped,
/// and silence or anything unmapped resolves to the neutral table.
pub fn resolve(phoneme: &str) -> ShapeKeys {
    let clean = crate::phoneme::strip_stress(phoneme);
    let row = PHONEME_SHAPE_KEYS
        .iter()
        .find(|(p, _, _)| *p == clean)
        .unwrap_or(&NEUTRAL_ROW);
    build(row)
}
