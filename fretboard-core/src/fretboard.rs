//! # Fretboard Module
//!
//! Maps notes onto the positions of a fretted instrument and back.
//!
//! The note under every string and fret is computed once when the fretboard
//! is built, together with a reverse index from [`NoteKey`] to the positions
//! producing it. Because the index is keyed by rounded frequency, the same
//! pitch on different strings lands in one equivalence class, whatever name
//! the caller spelled it with.

use std::collections::HashMap;
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TheoryError};
use crate::instrument::Instrument;
use crate::note::{self, NOTE_NAMES, Note, NoteKey};
use crate::pitch;

/// Open strings of a guitar in standard tuning, low to high (E2 A2 D3 G3 B3 E4).
pub const STANDARD_TUNING: [(&str, f64); 6] = [
    ("E", 82.41),
    ("A", 110.00),
    ("D", 146.83),
    ("G", 196.00),
    ("B", 246.94),
    ("E", 329.63),
];

/// Default fret count of a guitar neck.
pub const DEFAULT_FRETS: usize = 24;

/// Largest fret count a fretboard accepts, eight octaves per string.
pub const MAX_FRETS: usize = 96;

/// A spot on the neck. Fret 0 is the open string; string 0 is the lowest.
///
/// Positions order by string first, then fret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub string: usize,
    pub fret: usize,
}

impl Position {
    pub fn new(string: usize, fret: usize) -> Self {
        Self { string, fret }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.string, self.fret)
    }
}

/// A fretted instrument: a tuning of open strings and a fret count.
#[derive(Debug, Clone)]
pub struct Fretboard {
    name: String,
    tuning: Vec<Note>,
    frets: usize,
    /// Pitch class index of each open string.
    open_classes: Vec<usize>,
    /// `grid[string][fret]`, frets `0..=frets`.
    grid: Vec<Vec<Note>>,
    notes: HashMap<NoteKey, Vec<Position>>,
}

impl Fretboard {
    /// Builds a fretboard from open strings ordered low to high and a fret count.
    ///
    /// # Errors
    /// Fails if any open string has an unknown pitch class or a non-positive
    /// frequency, or if `frets` exceeds [`MAX_FRETS`]. No partial fretboard
    /// is returned.
    pub fn new(tuning: Vec<Note>, frets: usize) -> Result<Self> {
        if frets > MAX_FRETS {
            return Err(TheoryError::InvalidFretCount {
                frets,
                max: MAX_FRETS,
            });
        }

        let mut open_classes = Vec::with_capacity(tuning.len());
        let mut grid = Vec::with_capacity(tuning.len());
        let mut notes: HashMap<NoteKey, Vec<Position>> = HashMap::new();

        for (string, open) in tuning.iter().enumerate() {
            pitch::validate_pitch(open.pitch)?;
            open_classes.push(open.pitch_class()?);
            let mut string_notes = Vec::with_capacity(frets + 1);
            for fret in 0..=frets {
                let interval = i32::try_from(fret).map_err(|_| TheoryError::InvalidFretCount {
                    frets,
                    max: MAX_FRETS,
                })?;
                let note = open.transpose(interval)?;
                notes
                    .entry(note.key())
                    .or_default()
                    .push(Position::new(string, fret));
                string_notes.push(note);
            }
            grid.push(string_notes);
        }

        debug!(
            "[FRETBOARD] Built {} strings x {} frets ({} distinct pitches)",
            tuning.len(),
            frets,
            notes.len()
        );

        Ok(Self {
            name: "guitar".to_string(),
            tuning,
            frets,
            open_classes,
            grid,
            notes,
        })
    }

    /// A six-string guitar in standard tuning.
    pub fn standard_guitar(frets: usize) -> Result<Self> {
        let tuning = STANDARD_TUNING
            .iter()
            .map(|&(name, pitch)| Note::new(name, pitch))
            .collect();
        Self::new(tuning, frets)
    }

    /// Renames the instrument, e.g. "bass" or "ukulele".
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn tuning(&self) -> &[Note] {
        &self.tuning
    }

    pub fn strings(&self) -> usize {
        self.tuning.len()
    }

    /// Highest fret; valid frets are `0..=frets()`.
    pub fn frets(&self) -> usize {
        self.frets
    }

    /// The note sounded at `string`, `fret`.
    ///
    /// # Errors
    /// * `TheoryError::PositionOutOfRange` - If the string or fret is off the neck
    pub fn note_at(&self, string: usize, fret: usize) -> Result<Note> {
        self.grid
            .get(string)
            .and_then(|frets| frets.get(fret))
            .cloned()
            .ok_or(TheoryError::PositionOutOfRange {
                string,
                fret,
                strings: self.tuning.len(),
                frets: self.frets,
            })
    }

    /// The equivalence class of `target`: every position producing an equal
    /// note, ascending by string then fret.
    pub fn equivalence_class(&self, target: &Note) -> Result<Vec<Position>> {
        pitch::validate_pitch(target.pitch)?;
        Ok(self.notes.get(&target.key()).cloned().unwrap_or_default())
    }

    /// Every position whose pitch class is `name`, in any octave, ascending
    /// by string then fret.
    ///
    /// Enharmonic spellings select the same positions (`"A#"` and `"Bb"`).
    ///
    /// # Errors
    /// * `TheoryError::UnknownPitchClass` - If `name` is not a known spelling
    pub fn pitch_class_positions(&self, name: &str) -> Result<Vec<Position>> {
        let target = note::index_of(name)?;
        let mut positions = Vec::new();
        for (string, &open) in self.open_classes.iter().enumerate() {
            for fret in 0..=self.frets {
                if (open + fret) % NOTE_NAMES.len() == target {
                    positions.push(Position::new(string, fret));
                }
            }
        }
        Ok(positions)
    }

    /// Positions for each target note, grouped per note in input order.
    ///
    /// A note the neck cannot reach yields an empty group. An invalid target
    /// frequency aborts the whole lookup.
    pub fn positions_for(&self, targets: &[Note]) -> Result<Vec<Vec<Position>>> {
        targets
            .iter()
            .map(|target| self.equivalence_class(target))
            .collect()
    }

    /// Every position on the neck paired with the note it sounds, ascending.
    pub fn iter_positions(&self) -> impl Iterator<Item = (Position, &Note)> {
        self.grid.iter().enumerate().flat_map(|(string, frets)| {
            frets
                .iter()
                .enumerate()
                .map(move |(fret, note)| (Position::new(string, fret), note))
        })
    }
}

impl Instrument for Fretboard {
    type Position = Position;

    fn name(&self) -> &str {
        &self.name
    }

    fn note_at(&self, position: Position) -> Result<Note> {
        Fretboard::note_at(self, position.string, position.fret)
    }

    fn positions_of(&self, note: &Note) -> Result<Vec<Position>> {
        self.equivalence_class(note)
    }
}
