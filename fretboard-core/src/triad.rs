//! # Triad Module
//!
//! Chord templates, inversion and resolution of root-relative intervals into notes.
//!
//! Templates are process-wide `&'static` slices. Inversion always works on a
//! private copy, so rotating a chord never changes the template it came from.

use std::str::FromStr;

use serde::Serialize;

use crate::error::{Result, TheoryError};
use crate::note::{self, Note};
use crate::pitch::{self, SEMITONES_PER_OCTAVE};

/// Chord qualities with a canonical root-position interval template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriadQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
    Major7,
    Minor7,
    Dominant7,
}

impl TriadQuality {
    /// Root-position intervals, measured from the root.
    pub fn intervals(self) -> &'static [i32] {
        match self {
            TriadQuality::Major => &[0, 4, 7],
            TriadQuality::Minor => &[0, 3, 7],
            TriadQuality::Diminished => &[0, 3, 6],
            TriadQuality::Augmented => &[0, 4, 8],
            TriadQuality::Major7 => &[0, 4, 7, 11],
            TriadQuality::Minor7 => &[0, 3, 7, 10],
            TriadQuality::Dominant7 => &[0, 4, 7, 10],
        }
    }
}

impl FromStr for TriadQuality {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "major" => Ok(TriadQuality::Major),
            "minor" => Ok(TriadQuality::Minor),
            "diminished" | "dim" => Ok(TriadQuality::Diminished),
            "augmented" | "aug" => Ok(TriadQuality::Augmented),
            "major_7" => Ok(TriadQuality::Major7),
            "minor_7" => Ok(TriadQuality::Minor7),
            "dom_7" => Ok(TriadQuality::Dominant7),
            _ => Err(TheoryError::UnknownTriadQuality {
                quality: s.to_string(),
            }),
        }
    }
}

/// Rotates an interval list `n` times.
///
/// One rotation removes the first interval, raises it by an octave and
/// appends it. After `intervals.len()` rotations the order is back to the
/// original with every interval one octave higher. `n = 0` returns an
/// unchanged copy.
pub fn invert(intervals: &[i32], n: usize) -> Vec<i32> {
    let len = intervals.len();
    if len == 0 {
        return Vec::new();
    }

    let octaves = (n / len) as i32;
    let shift = n % len;
    let mut rotated: Vec<i32> = intervals
        .iter()
        .map(|interval| interval + octaves * SEMITONES_PER_OCTAVE)
        .collect();
    rotated.rotate_left(shift);
    for interval in &mut rotated[len - shift..] {
        *interval += SEMITONES_PER_OCTAVE;
    }
    rotated
}

/// Gets the intervals of a named chord quality at the requested inversion.
///
/// # Errors
/// * `TheoryError::UnknownTriadQuality` - If `quality` is not a known name
pub fn triad_intervals(quality: &str, inversion: usize) -> Result<Vec<i32>> {
    let quality: TriadQuality = quality.parse()?;
    Ok(invert(quality.intervals(), inversion))
}

/// Resolves root-relative intervals into notes.
///
/// Unlike scale building, every note is computed independently from the
/// root, never from the previous note. When the intervals are inverted the
/// root's own frequency may not appear in the result.
pub fn resolve(root: &Note, intervals: &[i32]) -> Result<Vec<Note>> {
    let root_index = note::index_of(&root.name)? as i64;
    intervals
        .iter()
        .map(|&interval| {
            let pitch = pitch::compute(root.pitch, interval)?;
            Ok(Note::new(note::name_at(root_index + interval as i64), pitch))
        })
        .collect()
}

/// A voiced chord: a root, a quality and an inversion resolved into notes.
#[derive(Debug, Clone, Serialize)]
pub struct Triad {
    pub root: Note,
    pub quality: TriadQuality,
    pub inversion: usize,
    pub intervals: Vec<i32>,
    pub notes: Vec<Note>,
}

impl Triad {
    pub fn new(root: Note, quality: TriadQuality, inversion: usize) -> Result<Self> {
        let intervals = invert(quality.intervals(), inversion);
        let notes = resolve(&root, &intervals)?;
        Ok(Self {
            root,
            quality,
            inversion,
            intervals,
            notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn c4() -> Note {
        Note::new("C", 261.63)
    }

    #[test]
    fn test_invert_single_rotation() {
        assert_eq!(invert(&[0, 4, 7], 1), vec![4, 7, 12]);
        assert_eq!(invert(&[0, 4, 7], 2), vec![7, 12, 16]);
    }

    #[test]
    fn test_invert_zero_is_identity() {
        assert_eq!(invert(&[0, 3, 7], 0), vec![0, 3, 7]);
    }

    #[test]
    fn test_full_rotation_shifts_octave() {
        let original = [0, 4, 7, 10];
        let inverted = invert(&original, original.len());
        assert_eq!(inverted, vec![12, 16, 19, 22]);
        assert_eq!(invert(&original, 2 * original.len() + 1), vec![28, 31, 34, 36]);
    }

    #[test]
    fn test_invert_composes() {
        let original = TriadQuality::Minor.intervals();
        for a in 0..7 {
            for b in 0..7 {
                assert_eq!(invert(&invert(original, a), b), invert(original, a + b));
            }
        }
    }

    #[test]
    fn test_invert_empty() {
        assert!(invert(&[], 5).is_empty());
    }

    #[test]
    fn test_templates_survive_inversion() {
        let _ = triad_intervals("major", 2).unwrap();
        assert_eq!(triad_intervals("major", 0).unwrap(), vec![0, 4, 7]);
    }

    #[test]
    fn test_triad_intervals_lookup() {
        assert_eq!(triad_intervals("minor", 1).unwrap(), vec![3, 7, 12]);
        assert_eq!(triad_intervals("dim", 0).unwrap(), vec![0, 3, 6]);
        assert_eq!(triad_intervals("augmented", 0).unwrap(), vec![0, 4, 8]);
        assert_eq!(triad_intervals("dom_7", 1).unwrap(), vec![4, 7, 10, 12]);
        assert_eq!(
            triad_intervals("sus4", 0).unwrap_err(),
            TheoryError::UnknownTriadQuality {
                quality: "sus4".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_root_position() {
        let notes = resolve(&c4(), &[0, 4, 7]).unwrap();
        let names: Vec<_> = notes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["C", "E", "G"]);
        for (note, hz) in notes.iter().zip([261.63, 329.63, 392.00]) {
            assert!((note.pitch - hz).abs() < 0.05, "{note} vs {hz}");
        }
    }

    #[test]
    fn test_resolve_first_inversion() {
        let notes = resolve(&c4(), &invert(&[0, 4, 7], 1)).unwrap();
        let names: Vec<_> = notes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["E", "G", "C"]);
        for (note, hz) in notes.iter().zip([329.63, 392.00, 523.26]) {
            assert!((note.pitch - hz).abs() < 0.05, "{note} vs {hz}");
        }
    }

    #[test]
    fn test_resolve_rejects_unknown_root() {
        assert!(resolve(&Note::new("Z", 100.0), &[0, 4, 7]).is_err());
        assert!(resolve(&Note::new("C", 0.0), &[0, 4, 7]).is_err());
    }

    #[test]
    fn test_triad_new() {
        let triad = Triad::new(Note::new("A", 220.0), TriadQuality::Minor, 2).unwrap();
        assert_eq!(triad.intervals, vec![7, 12, 15]);
        let names: Vec<_> = triad.notes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["E", "A", "C"]);
    }
}
