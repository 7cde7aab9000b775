//! Error types for the theory engine.

use thiserror::Error;

/// Errors raised by pitch, scale, triad and fretboard computations.
///
/// Every variant aborts only the call that produced it; nothing here is fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TheoryError {
    #[error("invalid pitch {pitch} Hz: frequency must be positive and finite")]
    InvalidPitch { pitch: f64 },
    #[error("{interval} semitones from {base} Hz leaves the representable frequency range")]
    PitchOutOfRange { base: f64, interval: i32 },
    #[error("unknown pitch class '{name}'")]
    UnknownPitchClass { name: String },
    #[error("unknown triad quality '{quality}'")]
    UnknownTriadQuality { quality: String },
    #[error("unknown scale '{name}'")]
    UnknownScale { name: String },
    #[error("unknown mode '{name}'")]
    UnknownMode { name: String },
    #[error("position (string {string}, fret {fret}) out of range ({strings} strings, {frets} frets)")]
    PositionOutOfRange {
        string: usize,
        fret: usize,
        strings: usize,
        frets: usize,
    },
    #[error("invalid fret count {frets} (at most {max})")]
    InvalidFretCount { frets: usize, max: usize },
    #[error("key {key} out of range ({keys} keys)")]
    KeyOutOfRange { key: usize, keys: usize },
}

/// Result alias for theory computations.
pub type Result<T> = std::result::Result<T, TheoryError>;
