//! IPA → ARPABET conversion for recognizer and G2P output.
//!
//! Audio recognizers emit IPA labels; the engine's tables are keyed by
//! ARPABET. The mapping is many-to-one and total: length and stress
//! diacritics are stripped first, and anything unmapped falls back to a
//! default phoneme rather than failing.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Default ARPABET phoneme for unmapped IPA input (schwa-like open vowel).
pub const DEFAULT_ARPABET: &str = "AH";

/// IPA symbol → ARPABET label. Multi-character entries cover diphthongs and
/// affricates; plain-letter entries cover recognizers that emit ASCII
/// approximations alongside true IPA.
static IPA_TO_ARPABET: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Vowels
        ("ɑ", "AA"),
        ("a", "AA"),
        ("æ", "AE"),
        ("ʌ", "AH"),
        ("ə", "AH"),
        ("ɔ", "AO"),
        ("aʊ", "AW"),
        ("aɪ", "AY"),
        ("ɛ", "EH"),
        ("e", "EH"),
        ("ɝ", "ER"),
        ("ɚ", "ER"),
        ("eɪ", "EY"),
        ("ɪ", "IH"),
        ("i", "IY"),
        ("oʊ", "OW"),
        ("o", "OW"),
        ("ɔɪ", "OY"),
        ("ʊ", "UH"),
        ("u", "UW"),
        // Consonants
        ("b", "B"),
        ("tʃ", "CH"),
        ("d", "D"),
        ("ð", "DH"),
        ("f", "F"),
        ("ɡ", "G"),
        ("g", "G"),
        ("h", "HH"),
        ("dʒ", "JH"),
        ("k", "K"),
        ("l", "L"),
        ("m", "M"),
        ("n", "N"),
        ("ŋ", "NG"),
        ("p", "P"),
        ("ɹ", "R"),
        ("r", "R"),
        ("s", "S"),
        ("ʃ", "SH"),
        ("t", "T"),
        ("θ", "TH"),
        ("v", "V"),
        ("w", "W"),
        ("j", "Y"),
        ("z", "Z"),
        ("ʒ", "ZH"),
    ])
});

/// Known ARPABET labels, so already-converted recognizer output passes
/// through unchanged.
const ARPABET_LABELS: &[&str] = &[
    "AA", "AE", "AH", "AO", "AW", "AY", "EH", "ER", "EY", "IH", "IY", "OW", "OY", "UH", "UW", "B",
    "CH", "D", "DH", "F", "G", "HH", "JH", "K", "L", "M", "N", "NG", "P", "R", "S", "SH", "T",
    "TH", "V", "W", "Y", "Z", "ZH",
];

/// Strip IPA length and stress diacritics (`ː`, `ˈ`, `ˌ`).
fn strip_diacritics(symbol: &str) -> String {
    symbol
        .chars()
        .filter(|c| !matches!(c, 'ː' | 'ˈ' | 'ˌ'))
        .collect()
}

/// Convert one recognizer symbol to a clean ARPABET label.
///
/// Accepts IPA (diacritics stripped before lookup) or ARPABET (passed
/// through, stress digits stripped). Unmapped symbols resolve to
/// [`DEFAULT_ARPABET`] — never an error.
pub fn to_arpabet(symbol: &str) -> &'static str {
    let stripped = super::strip_stress(symbol);
    if let Some(&label) = ARPABET_LABELS.iter().find(|&&label| label == stripped) {
        return label;
    }
    if stripped == super::SILENCE || stripped == "sp" {
        return "sil";
    }

    let cleaned = strip_diacritics(stripped);
    IPA_TO_ARPABET
        .get(cleaned.as_str())
        .copied()
        .unwrap_or(DEFAULT_ARPABET)
}

/// Segment a continuous IPA phoneme string (as produced by misaki-style
/// G2P) into ARPABET symbols, greedy longest-match first so diphthongs and
/// affricates win over their single-letter prefixes. Whitespace becomes a
/// `" "` pause symbol; diacritics and unknown characters are skipped.
pub fn segment_ipa(ipa: &str) -> Vec<String> {
    let chars: Vec<char> = ipa.chars().collect();
    let mut symbols = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            if symbols.last().map(String::as_str) != Some(" ") {
                symbols.push(" ".to_owned());
            }
            i += 1;
            continue;
        }
        if matches!(c, 'ː' | 'ˈ' | 'ˌ') {
            i += 1;
            continue;
        }

        // Two-character cluster first (aɪ, tʃ, …), then single character.
        if i + 1 < chars.len() {
            let pair: String = chars[i..i + 2].iter().collect();
            if let Some(arpabet) = IPA_TO_ARPABET.get(pair.as_str()) {
                symbols.push((*arpabet).to_owned());
                i += 2;
                continue;
            }
        }
        let single = c.to_string();
        if let Some(arpabet) = IPA_TO_ARPABET.get(single.as_str()) {
            symbols.push((*arpabet).to_owned());
        }
        i += 1;
    }

    // A trailing word separator adds nothing to the timeline.
    if symbols.last().map(String::as_str) == Some(" ") {
        symbols.pop();
    }

    symbols
}
