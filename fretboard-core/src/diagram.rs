//! # Diagram Module
//!
//! Turns equivalence classes into markers a fretboard renderer can draw.
//! Nothing here draws; the markers serialize to JSON for whatever renderer
//! consumes them.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fretboard::Fretboard;
use crate::note::Note;

/// Rendering options handed to the diagram renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramOptions {
    /// Marker color, any CSS color string.
    pub color: String,
    /// Inclusive range of frets to show.
    pub frets: (usize, usize),
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            color: "dodgerblue".to_string(),
            frets: (1, 12),
        }
    }
}

/// One dot on the diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub string: usize,
    pub fret: usize,
    pub label: String,
    pub color: String,
}

/// Builds markers for every position of every target inside the shown fret range.
///
/// Markers follow the target order, then ascending position order. Each
/// label is the pitch class name of the note under that position.
pub fn markers(
    fretboard: &Fretboard,
    targets: &[Note],
    options: &DiagramOptions,
) -> Result<Vec<Marker>> {
    let (low, high) = options.frets;
    let mut markers = Vec::new();
    for group in fretboard.positions_for(targets)? {
        for position in group {
            if position.fret < low || position.fret > high {
                continue;
            }
            let note = fretboard.note_at(position.string, position.fret)?;
            markers.push(Marker {
                string: position.string,
                fret: position.fret,
                label: note.name,
                color: options.color.clone(),
            });
        }
    }
    Ok(markers)
}
