//! # Pitch Calculation Module
//!
//! Equal temperament frequency math. Every interval is a signed count of
//! semitones and every semitone is a frequency ratio of 2^(1/12).

use crate::error::{Result, TheoryError};

/// Number of equal steps in one octave.
pub const SEMITONES_PER_OCTAVE: i32 = 12;

/// Rejects frequencies that have no musical meaning.
pub(crate) fn validate_pitch(pitch: f64) -> Result<f64> {
    if pitch.is_finite() && pitch > 0.0 {
        Ok(pitch)
    } else {
        Err(TheoryError::InvalidPitch { pitch })
    }
}

/// Calculates the pitch reached after applying `interval` semitones to `base_pitch`.
///
/// The formula for frequency in equal temperament is f = f0 * 2^(n/12).
/// Positive intervals go up, negative intervals go down and zero returns
/// `base_pitch` unchanged. No musical upper bound is enforced; only results
/// that leave the range of `f64` are rejected.
///
/// # Arguments
/// * `base_pitch` - Starting frequency in Hz
/// * `interval` - Signed number of semitones
///
/// # Returns
/// * `Ok(frequency)` - Resulting frequency in Hz
/// * `Err(TheoryError::InvalidPitch)` - If `base_pitch` is not a positive, finite number
/// * `Err(TheoryError::PitchOutOfRange)` - If the result underflows to zero or overflows to infinity
pub fn compute(base_pitch: f64, interval: i32) -> Result<f64> {
    let base_pitch = validate_pitch(base_pitch)?;
    if interval == 0 {
        return Ok(base_pitch);
    }
    let pitch = base_pitch * 2.0_f64.powf(interval as f64 / SEMITONES_PER_OCTAVE as f64);
    if pitch.is_finite() && pitch > 0.0 {
        Ok(pitch)
    } else {
        Err(TheoryError::PitchOutOfRange {
            base: base_pitch,
            interval,
        })
    }
}

/// Calculates the deviation of `freq` from `target_freq` in cents.
///
/// - 100 cents = 1 semitone
/// - 1200 cents = 1 octave
/// - Positive values indicate sharpness, negative values indicate flatness
pub fn cents_between(freq: f64, target_freq: f64) -> Result<f64> {
    let freq = validate_pitch(freq)?;
    let target_freq = validate_pitch(target_freq)?;
    Ok(1200.0 * (freq / target_freq).log2())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn test_octave_doubles_frequency() {
        for pitch in [27.5, 82.41, 261.63, 440.0, 4186.01] {
            assert!(approx(compute(pitch, 12).unwrap(), 2.0 * pitch));
            assert!(approx(compute(pitch, -12).unwrap(), pitch / 2.0));
        }
    }

    #[test]
    fn test_zero_interval_is_identity() {
        assert_eq!(compute(261.63, 0).unwrap(), 261.63);
    }

    #[test]
    fn test_known_semitone_steps() {
        // A4 -> C5 is three semitones up.
        assert!((compute(440.0, 3).unwrap() - 523.25).abs() < 0.01);
        // A4 -> E4 is five semitones down.
        assert!((compute(440.0, -5).unwrap() - 329.63).abs() < 0.01);
    }

    #[test]
    fn test_round_trip() {
        for interval in -48..=48 {
            let up = compute(110.0, interval).unwrap();
            assert!(approx(compute(up, -interval).unwrap(), 110.0));
        }
    }

    #[test]
    fn test_non_positive_pitch_is_rejected() {
        assert_eq!(
            compute(0.0, 3),
            Err(TheoryError::InvalidPitch { pitch: 0.0 })
        );
        assert!(compute(-440.0, 0).is_err());
        assert!(compute(f64::NAN, 1).is_err());
        assert!(compute(f64::INFINITY, 1).is_err());
    }

    #[test]
    fn test_no_upper_bound() {
        assert!(compute(20_000.0, 48).unwrap() > 300_000.0);
    }

    #[test]
    fn test_extreme_intervals_are_rejected() {
        assert_eq!(
            compute(261.63, -20000),
            Err(TheoryError::PitchOutOfRange {
                base: 261.63,
                interval: -20000
            })
        );
        assert!(matches!(
            compute(261.63, 20000),
            Err(TheoryError::PitchOutOfRange { .. })
        ));
    }

    #[test]
    fn test_cents_between() {
        assert!(approx(cents_between(880.0, 440.0).unwrap(), 1200.0));
        let semitone_up = compute(440.0, 1).unwrap();
        assert!(approx(cents_between(semitone_up, 440.0).unwrap(), 100.0));
        assert!(cents_between(440.0, 0.0).is_err());
    }
}
