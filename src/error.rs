//! Error types for the viseme engine.

/// Top-level error type for viseme timeline synthesis.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Invalid engine configuration (rejected at construction, never per request).
    #[error("config error: {0}")]
    Config(String),

    /// Malformed recognizer timing (non-monotonic or negative timestamps).
    #[error("recognizer timing error: {0}")]
    RecognizerTiming(String),

    /// The external grapheme-to-phoneme source failed.
    #[error("phoneme source error: {0}")]
    PhonemeSource(String),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, EngineError>;
