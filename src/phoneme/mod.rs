//! Phoneme symbol handling and the text-path duration model.
//!
//! The external grapheme-to-phoneme function yields a mixed stream of
//! ARPABET phonemes (possibly stress-marked, e.g. `AA1`) and raw
//! punctuation symbols. This module cleans the symbols, assigns every
//! phoneme a synthetic duration from a fixed table, turns punctuation and
//! whitespace into silence pauses, and appends a trailing silence so the
//! animation resets to neutral.

pub mod ipa;

/// The pseudo-phoneme used for every silence and pause frame.
pub const SILENCE: &str = "sil";

/// Fallback duration in seconds for phonemes missing from the table.
const FALLBACK_DURATION: f64 = 0.08;

/// A cleaned symbol with its assigned duration in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedSymbol {
    /// Stress-stripped ARPABET phoneme, or [`SILENCE`].
    pub symbol: String,
    /// Duration in seconds, always finite and positive.
    pub duration: f64,
}

/// Strip ARPABET stress digits (`AA1` → `AA`). Idempotent.
pub fn strip_stress(symbol: &str) -> &str {
    symbol.trim_end_matches(|c: char| c.is_ascii_digit())
}

/// Synthetic duration in seconds for a clean ARPABET phoneme.
///
/// Vowels are held longer than consonants; anything unmapped falls back to
/// [`FALLBACK_DURATION`] rather than failing.
pub fn phoneme_duration(clean: &str) -> f64 {
    match clean {
        // Vowels (monophthongs, diphthongs, and g2p reduced vowels)
        "AA" | "AE" | "AH" | "AO" | "AW" | "AY" | "EH" | "ER" | "EY" | "IH" | "IY" | "OW"
        | "OY" | "UH" | "UW" | "AX" | "AXR" | "IX" => 0.09,

        // Consonants
        "B" | "D" | "DH" | "G" | "HH" | "K" | "N" | "P" | "T" | "V" | "Y" => 0.06,
        "CH" | "F" | "JH" | "L" | "M" | "NG" | "R" | "S" | "SH" | "TH" | "W" | "Z" | "ZH" => 0.08,

        _ => FALLBACK_DURATION,
    }
}

/// Pause duration in seconds for a punctuation or whitespace symbol, or
/// `None` if the symbol is not punctuation.
pub fn pause_duration(symbol: &str) -> Option<f64> {
    let duration = match symbol {
        // Word separator (very brief)
        " " => 0.05,

        // Mid-sentence pauses
        "," => 0.45,
        ";" | ":" => 0.30,
        "-" => 0.20,
        "\u{2013}" => 0.25, // en dash
        "\u{2014}" => 0.30, // em dash

        // Trailing off
        "..." | "\u{2026}" => 0.50,

        // Sentence terminators
        "." | "?" | "!" => 1.0,

        // Grouping and quoting
        "(" | "[" => 0.15,
        ")" | "]" => 0.20,
        "\"" | "'" => 0.10,

        _ => return None,
    };
    Some(duration)
}

/// Assign durations to a raw symbol stream from the grapheme-to-phoneme
/// function (text path).
///
/// Punctuation becomes silence pauses, three consecutive `.` symbols
/// collapse into a single ellipsis pause, phonemes are stress-stripped and
/// looked up in the duration table, and a trailing silence of
/// `trailing_silence` seconds is appended (also for an empty input, so the
/// caller always receives a valid timeline).
pub fn assign_durations<S: AsRef<str>>(symbols: &[S], trailing_silence: f64) -> Vec<TimedSymbol> {
    let mut timed = Vec::with_capacity(symbols.len() + 1);

    let mut i = 0;
    while i < symbols.len() {
        let symbol = symbols[i].as_ref();

        // Ellipsis: three consecutive dots collapse into one pause.
        if symbol == "."
            && i + 2 < symbols.len()
            && symbols[i + 1].as_ref() == "."
            && symbols[i + 2].as_ref() == "."
        {
            timed.push(TimedSymbol {
                symbol: SILENCE.to_owned(),
                duration: pause_duration("...").unwrap_or(0.50),
            });
            i += 3;
            continue;
        }

        if let Some(duration) = pause_duration(symbol) {
            timed.push(TimedSymbol {
                symbol: SILENCE.to_owned(),
                duration,
            });
            i += 1;
            continue;
        }

        let clean = strip_stress(symbol);
        timed.push(TimedSymbol {
            symbol: clean.to_owned(),
            duration: phoneme_duration(clean),
        });
        i += 1;
    }

    if trailing_silence > 0.0 {
        timed.push(TimedSymbol {
            symbol: SILENCE.to_owned(),
            duration: trailing_silence,
        });
    }

    timed
}
