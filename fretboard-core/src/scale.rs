//! # Scale Module
//!
//! Builds ordered scales from a base note and a list of step intervals.
//!
//! ## Interval convention
//! A scale's interval list is a closed cycle of steps: the last entry is the
//! step that returns to the octave. [`Scale::build`] is exclusive of that
//! returning octave, so the major steps `[2, 2, 1, 2, 2, 2, 1]` on C give the
//! seven notes C D E F G A B and `notes.len() == intervals.len()`.
//! [`Scale::build_inclusive`] applies every step and ends on the octave.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Result, TheoryError};
use crate::note::{self, Note};
use crate::pitch;

/// Steps of the major (ionian) scale.
pub const MAJOR_INTERVALS: &[i32] = &[2, 2, 1, 2, 2, 2, 1];
/// Steps of the natural minor (aeolian) scale.
pub const MINOR_INTERVALS: &[i32] = &[2, 1, 2, 2, 1, 2, 2];
/// Steps of the whole-half diminished scale.
pub const DIMINISHED_INTERVALS: &[i32] = &[2, 1, 2, 1, 2, 1, 2, 1];

/// Looks up the step intervals of a named scale.
pub fn scale_intervals(name: &str) -> Result<&'static [i32]> {
    match name {
        "major" => Ok(MAJOR_INTERVALS),
        "minor" => Ok(MINOR_INTERVALS),
        "diminished" | "dim" => Ok(DIMINISHED_INTERVALS),
        _ => Err(TheoryError::UnknownScale {
            name: name.to_string(),
        }),
    }
}

/// The seven diatonic modes, in the order they occur on the major scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
}

impl Mode {
    pub const ALL: [Mode; 7] = [
        Mode::Ionian,
        Mode::Dorian,
        Mode::Phrygian,
        Mode::Lydian,
        Mode::Mixolydian,
        Mode::Aeolian,
        Mode::Locrian,
    ];

    /// The major scale degree (0-based) this mode starts on.
    pub fn degree(self) -> usize {
        self as usize
    }

    /// The step intervals of this mode: the major steps rotated to start on its degree.
    pub fn intervals(self) -> Vec<i32> {
        let mut steps = MAJOR_INTERVALS.to_vec();
        steps.rotate_left(self.degree());
        steps
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Ionian => "ionian",
            Mode::Dorian => "dorian",
            Mode::Phrygian => "phrygian",
            Mode::Lydian => "lydian",
            Mode::Mixolydian => "mixolydian",
            Mode::Aeolian => "aeolian",
            Mode::Locrian => "locrian",
        }
    }
}

impl FromStr for Mode {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| TheoryError::UnknownMode {
                name: s.to_string(),
            })
    }
}

/// Represents a musical scale built from a base note.
#[derive(Debug, Clone, Serialize)]
pub struct Scale {
    pub name: String,
    pub base_note: Note,
    /// The full step list, including the step back to the octave.
    pub intervals: Vec<i32>,
    notes: Vec<Note>,
}

impl Scale {
    /// Builds a scale, exclusive of the note the final step returns to.
    ///
    /// Every interval but the last is applied in order, each one producing
    /// exactly one new note from the previous note. The result always starts
    /// with `base_note` and holds `intervals.len()` notes (one note for an
    /// empty list).
    ///
    /// # Errors
    /// Fails without a partial result if the base note has an unknown pitch
    /// class or a non-positive frequency.
    pub fn build(name: impl Into<String>, base_note: Note, intervals: &[i32]) -> Result<Self> {
        let steps = intervals.len().saturating_sub(1);
        Self::build_steps(name.into(), base_note, intervals, steps)
    }

    /// Builds a scale applying every interval, ending on the returning octave.
    ///
    /// The result holds `intervals.len() + 1` notes.
    pub fn build_inclusive(
        name: impl Into<String>,
        base_note: Note,
        intervals: &[i32],
    ) -> Result<Self> {
        Self::build_steps(name.into(), base_note, intervals, intervals.len())
    }

    /// Builds a mode of the major scale on `base_note`.
    pub fn mode(base_note: Note, mode: Mode) -> Result<Self> {
        let name = format!("{} {}", base_note.name, mode.name());
        Self::build(name, base_note, &mode.intervals())
    }

    fn build_steps(name: String, base_note: Note, intervals: &[i32], steps: usize) -> Result<Self> {
        let mut current_index = note::index_of(&base_note.name)? as i64;
        let mut current_pitch = pitch::validate_pitch(base_note.pitch)?;

        let mut notes = Vec::with_capacity(steps + 1);
        notes.push(base_note.clone());

        for &interval in &intervals[..steps] {
            current_pitch = pitch::compute(current_pitch, interval)?;
            current_index += interval as i64;
            notes.push(Note::new(note::name_at(current_index), current_pitch));
        }

        Ok(Self {
            name,
            base_note,
            intervals: intervals.to_vec(),
            notes,
        })
    }

    /// Gets a note by its 1-based scale degree, wrapping in both directions.
    ///
    /// `degree(1)` is the base note, `degree(0)` the last note and
    /// `degree(len + 1)` the base note again.
    pub fn degree(&self, degree: i64) -> &Note {
        let index = (degree - 1).rem_euclid(self.notes.len() as i64) as usize;
        &self.notes[index]
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Always false: a scale holds at least its base note.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }
}

impl<'a> IntoIterator for &'a Scale {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.name)?;
        for (i, note) in self.notes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{note}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn c4() -> Note {
        Note::new("C", 261.63)
    }

    fn names(scale: &Scale) -> Vec<&str> {
        scale.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn test_major_scale_excludes_returning_octave() {
        let scale = Scale::build("C major", c4(), MAJOR_INTERVALS).unwrap();
        assert_eq!(names(&scale), vec!["C", "D", "E", "F", "G", "A", "B"]);

        let expected = [261.63, 293.66, 329.63, 349.23, 392.00, 440.00, 493.88];
        assert_eq!(scale.len(), expected.len());
        for (note, hz) in scale.iter().zip(expected) {
            assert!((note.pitch - hz).abs() < 1.0, "{note} vs {hz}");
        }
    }

    #[test]
    fn test_inclusive_build_ends_on_octave() {
        let scale = Scale::build_inclusive("C major", c4(), MAJOR_INTERVALS).unwrap();
        assert_eq!(scale.len(), MAJOR_INTERVALS.len() + 1);
        let last = scale.notes().last().unwrap();
        assert_eq!(last.name, "C");
        assert!((last.pitch - 523.26).abs() < 0.01);
    }

    #[test]
    fn test_notes_chain_from_previous_note() {
        let scale = Scale::build("A minor", Note::new("A", 220.0), MINOR_INTERVALS).unwrap();
        assert_eq!(scale.notes()[0], Note::new("A", 220.0));
        for i in 0..scale.len() - 1 {
            let expected = pitch::compute(scale.notes()[i].pitch, scale.intervals[i]).unwrap();
            assert!((scale.notes()[i + 1].pitch - expected).abs() < 1e-9);
        }
        assert_eq!(names(&scale), vec!["A", "B", "C", "D", "E", "F", "G"]);
    }

    #[test]
    fn test_degree_wraps() {
        let scale = Scale::build("C major", c4(), MAJOR_INTERVALS).unwrap();
        assert_eq!(scale.degree(1).name, "C");
        assert_eq!(scale.degree(5).name, "G");
        assert_eq!(scale.degree(0).name, "B");
        assert_eq!(scale.degree(8).name, "C");
        assert_eq!(scale.degree(-6).name, "C");
    }

    #[test]
    fn test_empty_intervals_give_base_note_only() {
        let scale = Scale::build("unison", c4(), &[]).unwrap();
        assert_eq!(scale.len(), 1);
        assert_eq!(scale.degree(3).name, "C");
    }

    #[test]
    fn test_build_aborts_on_invalid_base() {
        assert!(Scale::build("bad", Note::new("H", 100.0), MAJOR_INTERVALS).is_err());
        assert_eq!(
            Scale::build("bad", Note::new("C", -1.0), MAJOR_INTERVALS).unwrap_err(),
            TheoryError::InvalidPitch { pitch: -1.0 }
        );
    }

    #[test]
    fn test_scale_is_re_iterable() {
        let scale = Scale::build("C major", c4(), MAJOR_INTERVALS).unwrap();
        let first: Vec<_> = (&scale).into_iter().cloned().collect();
        let second: Vec<_> = scale.iter().cloned().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_named_scales() {
        assert_eq!(scale_intervals("major").unwrap(), MAJOR_INTERVALS);
        assert_eq!(scale_intervals("dim").unwrap().iter().sum::<i32>(), 12);
        assert_eq!(
            scale_intervals("blues").unwrap_err(),
            TheoryError::UnknownScale {
                name: "blues".to_string()
            }
        );
    }

    #[test]
    fn test_modes() {
        assert_eq!(Mode::Ionian.intervals(), MAJOR_INTERVALS.to_vec());
        assert_eq!(Mode::Aeolian.intervals(), MINOR_INTERVALS.to_vec());
        assert_eq!("dorian".parse::<Mode>().unwrap(), Mode::Dorian);
        assert!("hypodorian".parse::<Mode>().is_err());

        let d_dorian = Scale::mode(Note::new("D", 146.83), Mode::Dorian).unwrap();
        assert_eq!(names(&d_dorian), vec!["D", "E", "F", "G", "A", "B", "C"]);
        assert_eq!(d_dorian.name, "D dorian");
    }
}
