//! # Notation Module
//!
//! Engraves notes as sheet music through an external typesetter. This
//! module writes LilyPond source and drives the `lilypond` executable; the
//! image it produces is opaque to the engine, which only reports its path.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use log::{info, warn};

use crate::error::TheoryError;
use crate::note::{self, Note};
use crate::pitch;

/// LilyPond language version written into every source file.
pub const LILYPOND_VERSION: &str = "2.24.3";

/// File stem of the generated source and image inside the working directory.
const OUTPUT_STEM: &str = "temp";

/// Renders notes into an image file inside a working directory.
pub trait NotationRenderer {
    /// Returns the path of the rendered image.
    fn render(&self, notes: &[Note], workdir: &Path) -> Result<PathBuf>;
}

/// Spells a single note in LilyPond's absolute pitch syntax.
///
/// The octave comes from the note's frequency: LilyPond's unmarked octave
/// runs from C3 to B3, each `'` raises it by one octave and each `,` lowers it.
fn lilypond_pitch(note: &Note) -> std::result::Result<String, TheoryError> {
    note::index_of(&note.name)?;
    let hz = pitch::validate_pitch(note.pitch)?;

    let mut chars = note.name.chars();
    let mut spelled = String::new();
    if let Some(letter) = chars.next() {
        spelled.push(letter.to_ascii_lowercase());
    }
    match chars.next() {
        Some('#') => spelled.push_str("is"),
        Some('b') => spelled.push_str("es"),
        _ => {}
    }

    let midi = (69.0 + 12.0 * (hz / 440.0).log2()).round() as i64;
    let marks = midi.div_euclid(12) - 1 - 3;
    let mark = if marks > 0 { "'" } else { "," };
    spelled.push_str(&mark.repeat(marks.unsigned_abs() as usize));
    Ok(spelled)
}

/// Generates a complete LilyPond document for `notes`, in order.
pub fn lilypond_source(notes: &[Note]) -> std::result::Result<String, TheoryError> {
    let pitches = notes
        .iter()
        .map(lilypond_pitch)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(format!(
        "\\version \"{LILYPOND_VERSION}\"\n{{\n  {}\n}}\n",
        pitches.join(" ")
    ))
}

/// Renders through a `lilypond` executable, producing a PNG.
#[derive(Debug, Clone)]
pub struct LilyPond {
    program: PathBuf,
}

impl LilyPond {
    /// Uses the `lilypond` found on `PATH`.
    pub fn new() -> Self {
        Self::with_program("lilypond")
    }

    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for LilyPond {
    fn default() -> Self {
        Self::new()
    }
}

impl NotationRenderer for LilyPond {
    fn render(&self, notes: &[Note], workdir: &Path) -> Result<PathBuf> {
        let source = lilypond_source(notes)?;
        let source_path = workdir.join(format!("{OUTPUT_STEM}.ly"));
        fs::write(&source_path, source)
            .with_context(|| format!("Failed to write {}", source_path.display()))?;

        info!(
            "[NOTATION] Engraving {} notes with {}",
            notes.len(),
            self.program.display()
        );
        let output = Command::new(&self.program)
            .arg("-o")
            .arg(workdir.join(OUTPUT_STEM))
            .arg("-fpng")
            .arg(&source_path)
            .output()
            .with_context(|| format!("Failed to start {}", self.program.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("[NOTATION] Engraving failed: {}", stderr.trim());
            bail!("{} exited with {}: {}", self.program.display(), output.status, stderr.trim());
        }

        let image_path = workdir.join(format!("{OUTPUT_STEM}.png"));
        if !image_path.exists() {
            bail!("{} produced no image at {}", self.program.display(), image_path.display());
        }
        info!("[NOTATION] Wrote {}", image_path.display());
        Ok(image_path)
    }
}
