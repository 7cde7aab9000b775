//! # Instrument Module
//!
//! The capability every playable instrument offers: turn a position into a
//! note, and find every position that sounds a given note. Each instrument
//! implements it independently over its own geometry; the only shared
//! machinery is the pitch math and the note registry.

use std::collections::HashMap;

use log::debug;

use crate::error::{Result, TheoryError};
use crate::note::{self, Note, NoteKey};
use crate::pitch;

/// A playable instrument.
pub trait Instrument {
    /// How a playable spot is addressed on this instrument.
    type Position: Copy;

    fn name(&self) -> &str;

    /// The note sounded at `position`.
    fn note_at(&self, position: Self::Position) -> Result<Note>;

    /// Every position sounding a note equal to `note`, in ascending order.
    ///
    /// An empty list means the note is out of the instrument's range.
    fn positions_of(&self, note: &Note) -> Result<Vec<Self::Position>>;

    /// Positions for each note in `notes`, grouped per note in input order.
    ///
    /// Aborts on the first invalid note instead of skipping it.
    fn play(&self, notes: &[Note]) -> Result<Vec<Vec<Self::Position>>> {
        notes.iter().map(|note| self.positions_of(note)).collect()
    }
}

/// Number of keys on a standard piano.
pub const PIANO_KEY_COUNT: usize = 88;
/// Lowest key of a standard piano, A0.
pub const PIANO_LOW_PITCH: f64 = 27.5;

/// A keyboard whose keys ascend chromatically from a low note.
#[derive(Debug, Clone)]
pub struct Piano {
    low_note: Note,
    keys: Vec<Note>,
    notes: HashMap<NoteKey, usize>,
}

impl Piano {
    /// Lays out `num_keys` keys, key `i` sounding `low_note` raised by `i` semitones.
    ///
    /// # Errors
    /// Fails on an invalid low note, or once a key's frequency leaves the
    /// range of `f64`.
    pub fn new(num_keys: usize, low_note: Note) -> Result<Self> {
        pitch::validate_pitch(low_note.pitch)?;
        let names = note::note_stream(&low_note.name, num_keys)?;

        let mut keys = Vec::with_capacity(num_keys.min(PIANO_KEY_COUNT));
        let mut notes = HashMap::with_capacity(num_keys.min(PIANO_KEY_COUNT));
        for (i, name) in names.enumerate() {
            let interval = i32::try_from(i).map_err(|_| TheoryError::KeyOutOfRange {
                key: i,
                keys: num_keys,
            })?;
            let key_pitch = pitch::compute(low_note.pitch, interval)?;
            let key = Note::new(name, key_pitch);
            notes.entry(key.key()).or_insert(i);
            keys.push(key);
        }

        debug!("[PIANO] Laid out {} keys from {}", keys.len(), low_note);
        Ok(Self {
            low_note,
            keys,
            notes,
        })
    }

    /// A standard 88-key piano starting at A0.
    pub fn standard() -> Result<Self> {
        Self::new(PIANO_KEY_COUNT, Note::new("A", PIANO_LOW_PITCH))
    }

    pub fn low_note(&self) -> &Note {
        &self.low_note
    }

    pub fn num_keys(&self) -> usize {
        self.keys.len()
    }

    pub fn keys(&self) -> &[Note] {
        &self.keys
    }
}

impl Instrument for Piano {
    /// Zero-based key index.
    type Position = usize;

    fn name(&self) -> &str {
        "piano"
    }

    fn note_at(&self, key: usize) -> Result<Note> {
        self.keys
            .get(key)
            .cloned()
            .ok_or(TheoryError::KeyOutOfRange {
                key,
                keys: self.keys.len(),
            })
    }

    fn positions_of(&self, note: &Note) -> Result<Vec<usize>> {
        pitch::validate_pitch(note.pitch)?;
        Ok(self.notes.get(&note.key()).copied().into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_standard_piano_range() {
        let piano = Piano::standard().unwrap();
        assert_eq!(piano.num_keys(), 88);
        let a0 = piano.note_at(0).unwrap();
        assert_eq!(a0.name, "A");
        assert_eq!(a0.key().hz(), 28);
        let c8 = piano.note_at(87).unwrap();
        assert_eq!(c8.name, "C");
        assert_eq!(c8.key().hz(), 4186);
    }

    #[test]
    fn test_play_finds_keys() {
        let piano = Piano::standard().unwrap();
        let played = piano
            .play(&[Note::new("A", 440.0), Note::new("C", 261.63), Note::new("A", 10.0)])
            .unwrap();
        assert_eq!(played, vec![vec![48], vec![39], vec![]]);
    }

    #[test]
    fn test_play_rejects_invalid_note() {
        let piano = Piano::standard().unwrap();
        assert!(piano.play(&[Note::new("A", 440.0), Note::new("A", 0.0)]).is_err());
    }

    #[test]
    fn test_key_out_of_range() {
        let piano = Piano::new(12, Note::new("C", 261.63)).unwrap();
        assert_eq!(
            piano.note_at(12).unwrap_err(),
            TheoryError::KeyOutOfRange { key: 12, keys: 12 }
        );
        assert_eq!(piano.note_at(11).unwrap().name, "B");
    }

    #[test]
    fn test_huge_key_count_fails_without_panicking() {
        assert!(matches!(
            Piano::new(usize::MAX, Note::new("A", PIANO_LOW_PITCH)),
            Err(TheoryError::PitchOutOfRange { .. })
        ));
    }

    #[test]
    fn test_piano_rejects_bad_low_note() {
        assert!(Piano::new(88, Note::new("A", -27.5)).is_err());
        assert!(Piano::new(88, Note::new("Hb", 27.5)).is_err());
    }
}
