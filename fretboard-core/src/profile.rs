//! # Instrument Profile Module
//!
//! Describes a fretted instrument (name, fret count, open strings) as a JSON
//! document so tunings can be saved and loaded between sessions.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::fretboard::{DEFAULT_FRETS, Fretboard, STANDARD_TUNING};
use crate::note::Note;

/// One open string of a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringSpec {
    pub name: String,
    /// Open string frequency in Hz
    pub pitch: f64,
}

/// The saved description of a fretted instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentProfile {
    pub name: String,
    pub frets: usize,
    /// Open strings ordered low to high.
    pub tuning: Vec<StringSpec>,
}

impl Default for InstrumentProfile {
    /// A six-string guitar in standard tuning with 24 frets.
    fn default() -> Self {
        Self {
            name: "guitar".to_string(),
            frets: DEFAULT_FRETS,
            tuning: STANDARD_TUNING
                .iter()
                .map(|&(name, pitch)| StringSpec {
                    name: name.to_string(),
                    pitch,
                })
                .collect(),
        }
    }
}

impl InstrumentProfile {
    /// Validates the profile and builds its fretboard.
    pub fn fretboard(&self) -> crate::error::Result<Fretboard> {
        let tuning = self
            .tuning
            .iter()
            .map(|spec| Note::try_new(spec.name.clone(), spec.pitch))
            .collect::<crate::error::Result<Vec<_>>>()?;
        Ok(Fretboard::new(tuning, self.frets)?.with_name(self.name.clone()))
    }

    /// Saves the profile as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json_string = serde_json::to_string_pretty(self).context("Failed to serialize profile")?;
        let mut file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        file.write_all(json_string.as_bytes())?;
        Ok(())
    }

    /// Loads a profile previously written by [`InstrumentProfile::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let mut data = String::new();
        file.read_to_string(&mut data)?;
        let profile: InstrumentProfile = serde_json::from_str(&data)
            .with_context(|| format!("Invalid instrument profile in {}", path.display()))?;
        Ok(profile)
    }
}
