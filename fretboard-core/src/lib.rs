// fretboard-core/src/lib.rs

//! The core logic for the fretboard theory engine.
//! This crate computes equal-tempered pitches, scales and chords, and maps
//! notes onto the playable positions of an instrument. It is completely
//! headless: notation and diagrams are handed to external renderers.

pub mod diagram;
pub mod error;
pub mod fingering;
pub mod fretboard;
pub mod instrument;
pub mod notation;
pub mod note;
pub mod pitch;
pub mod profile;
pub mod scale;
pub mod triad;

pub use error::{Result, TheoryError};
pub use fretboard::{Fretboard, Position};
pub use instrument::{Instrument, Piano};
pub use note::{Note, NoteKey};
pub use scale::{Mode, Scale};
pub use triad::{Triad, TriadQuality};
