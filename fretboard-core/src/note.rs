//! # Note Registry Module
//!
//! The canonical table of the twelve pitch classes, name to index lookups and
//! the `Note` value type shared by every other module.
//!
//! ## Note identity
//! Two notes are equal when their frequencies round to the same whole number
//! of Hz. The name is informational only, so enharmonic spellings (`C#` and
//! `Db`) of the same frequency compare equal and hash to the same bucket.
//! This key is lossy: two audibly distinct frequencies that round to the same
//! integer (e.g. 440.2 Hz and 439.6 Hz) are also treated as the same note.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TheoryError};
use crate::pitch;

/// Canonical spellings of the twelve pitch classes, ascending from C.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "Eb", "E", "F", "F#", "G", "G#", "A", "Bb", "B",
];

/// Alternate spellings accepted on lookup, paired with their pitch class index.
const ENHARMONIC_ALIASES: [(&str, usize); 5] =
    [("Db", 1), ("D#", 3), ("Gb", 6), ("Ab", 8), ("A#", 10)];

/// Static map for quick pitch class name to index lookups.
///
/// Holds both the canonical spelling and the enharmonic alias of every
/// accidental, so `"A#"` and `"Bb"` resolve to the same index.
static NOTE_MAP: Lazy<BTreeMap<&'static str, usize>> = Lazy::new(|| {
    NOTE_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| (*name, i))
        .chain(ENHARMONIC_ALIASES.iter().copied())
        .collect()
});

/// Gets the pitch class index (0-11) of a note name.
///
/// # Returns
/// * `Ok(index)` - Index into [`NOTE_NAMES`]
/// * `Err(TheoryError::UnknownPitchClass)` - If the name is not a known spelling
pub fn index_of(name: &str) -> Result<usize> {
    NOTE_MAP
        .get(name)
        .copied()
        .ok_or_else(|| TheoryError::UnknownPitchClass {
            name: name.to_string(),
        })
}

/// Gets the canonical name for any integer index, wrapping modulo 12.
///
/// Negative indices and indices above 11 are accepted, so callers can add
/// intervals to an index without normalizing first.
pub fn name_at(index: i64) -> &'static str {
    NOTE_NAMES[index.rem_euclid(NOTE_NAMES.len() as i64) as usize]
}

/// Yields `n` pitch class names ascending chromatically from `start`.
pub fn note_stream(start: &str, n: usize) -> Result<impl Iterator<Item = &'static str> + use<>> {
    let first = index_of(start)? as i64;
    Ok((first..).take(n).map(name_at))
}

/// Identity of a note for equality, hashing and lookup: its frequency
/// rounded to the nearest integer Hz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteKey(i64);

impl NoteKey {
    /// Normalizes a frequency into a lookup key.
    pub fn from_pitch(pitch: f64) -> Self {
        NoteKey(pitch.round() as i64)
    }

    /// The rounded frequency in Hz.
    pub fn hz(self) -> i64 {
        self.0
    }
}

/// Represents a single musical note with its name and frequency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    /// Pitch class name (e.g., "C", "F#", "Bb")
    pub name: String,
    /// Frequency in Hz
    pub pitch: f64,
}

impl Note {
    /// Creates a note without validating its name or frequency.
    pub fn new(name: impl Into<String>, pitch: f64) -> Self {
        Self {
            name: name.into(),
            pitch,
        }
    }

    /// Creates a note, rejecting unknown pitch class names and non-positive frequencies.
    pub fn try_new(name: impl Into<String>, pitch: f64) -> Result<Self> {
        let name = name.into();
        index_of(&name)?;
        let pitch = pitch::validate_pitch(pitch)?;
        Ok(Self { name, pitch })
    }

    /// The lookup key this note is compared and hashed by.
    pub fn key(&self) -> NoteKey {
        NoteKey::from_pitch(self.pitch)
    }

    /// Index of this note's pitch class in [`NOTE_NAMES`].
    pub fn pitch_class(&self) -> Result<usize> {
        index_of(&self.name)
    }

    /// Derives the note `interval` semitones away from this one.
    pub fn transpose(&self, interval: i32) -> Result<Note> {
        let index = self.pitch_class()? as i64 + interval as i64;
        let pitch = pitch::compute(self.pitch, interval)?;
        Ok(Note::new(name_at(index), pitch))
    }
}

impl PartialEq for Note {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Note {}

impl Hash for Note {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.0} Hz)", self.name, self.pitch)
    }
}
