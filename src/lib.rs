//! Viseme timeline synthesis for avatar lip-sync.
//!
//! Turns either text (via an external grapheme-to-phoneme function) or
//! recognizer-timestamped phonemes into a time-ordered sequence of mouth
//! shapes an animation layer can sample.
//!
//! # Architecture
//!
//! The engine is a pure transformation pipeline, stage by stage:
//! - **Duration model**: assigns synthetic durations to phonemes and turns
//!   punctuation into pauses (text path)
//! - **Gap-fill**: makes recognizer intervals contiguous, inserting
//!   silence into gaps (audio path)
//! - **Classification**: maps phonemes into visual groups — articulatory
//!   ([`TextGroup`]) or visual-similarity ([`AudioGroup`])
//! - **Merge**: collapses consecutive same-group phonemes into segments
//! - **Refinement**: drops flicker-short segments, optionally shifts
//!   starts earlier and compresses the timeline
//!
//! All stages are deterministic and hold no per-request state; a single
//! [`LipSyncEngine`] serves concurrent callers.

pub mod config;
pub mod engine;
pub mod error;
#[cfg(feature = "g2p-misaki")]
pub mod g2p;
pub mod phoneme;
pub mod shape_keys;
pub mod timeline;
pub mod viseme;

pub use config::EngineConfig;
pub use engine::{Frame, LipSyncEngine, PhonemeSource};
pub use error::{EngineError, Result};
pub use shape_keys::{ShapeKeys, ALL_SHAPE_KEYS};
pub use timeline::gap_fill::RecognizedPhoneme;
pub use timeline::Segment;
pub use viseme::{AudioGroup, TextGroup, VisualGroup};
