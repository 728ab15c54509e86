//! Misaki-backed grapheme-to-phoneme source (feature `g2p-misaki`).
//!
//! Implements [`PhonemeSource`] on top of `misaki-rs`, which emits a
//! continuous IPA string. The string is segmented into ARPABET symbols
//! with word boundaries kept as `" "` pause symbols, so the duration
//! model can insert inter-word silences.

use crate::engine::PhonemeSource;
use crate::error::{EngineError, Result};
use crate::phoneme::ipa;

/// [`PhonemeSource`] backed by `misaki-rs` English G2P.
pub struct MisakiSource {
    g2p: misaki_rs::G2P,
}

impl MisakiSource {
    /// Create a source for the given language tag.
    ///
    /// `"en-gb"` selects British English; anything else falls back to
    /// American English, matching misaki's supported set.
    pub fn new(language: &str) -> Self {
        let lang = if language.eq_ignore_ascii_case("en-gb") {
            misaki_rs::Language::EnglishGB
        } else {
            misaki_rs::Language::EnglishUS
        };
        Self {
            g2p: misaki_rs::G2P::new(lang),
        }
    }
}

impl PhonemeSource for MisakiSource {
    fn phonemes(&self, text: &str, _language: &str) -> Result<Vec<String>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let (phonemes, _tokens) = self
            .g2p
            .g2p(text)
            .map_err(|e| EngineError::PhonemeSource(format!("misaki g2p failed: {e}")))?;
        Ok(ipa::segment_ipa(&phonemes))
    }
}
