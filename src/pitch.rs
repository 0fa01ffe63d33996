//! Note names like "C4", "F#3", "Bb5", resolved to MIDI numbers and
//! frequencies once, when the palette is built.

use serde::{Deserialize, Serialize};

/// Reference tuning: A4 = 440 Hz.
pub const A4_FREQUENCY: f64 = 440.0;

/// A fixed musical pitch assigned to a palette color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pitch {
    /// Note name as written in the config (e.g. "C4").
    pub name: String,
    /// MIDI note number (C4 = 60).
    pub midi: i32,
    /// Frequency in Hz at A4 = 440.
    pub frequency: f64,
}

impl Pitch {
    /// Parse a note name. Returns `None` for anything that is not
    /// `<letter>[#|b]<octave>`.
    pub fn parse(name: &str) -> Option<Self> {
        let midi = note_to_midi(name)?;
        Some(Pitch {
            name: name.to_string(),
            midi,
            frequency: midi_to_frequency(midi, A4_FREQUENCY),
        })
    }
}

/// Highest MIDI note number.
pub const MIDI_MAX: i32 = 127;

/// Parse a note name (e.g. "C4", "F#3", "Bb5") into a MIDI note number.
///
/// Notes outside the MIDI range `0..=127` (C-1 to G9) are rejected, as is
/// anything that is not `<letter>[#|b]<octave>`.
pub fn note_to_midi(note: &str) -> Option<i32> {
    let mut chars = note.chars();
    let letter = match chars.next()? {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };

    let rest = chars.as_str();
    let (accidental, octave) = if let Some(o) = rest.strip_prefix('#') {
        (1, o)
    } else if let Some(o) = rest.strip_prefix('b') {
        (-1, o)
    } else {
        (0, rest)
    };

    let octave: i32 = octave.parse().ok()?;
    let midi = octave
        .checked_add(1)?
        .checked_mul(12)?
        .checked_add(letter + accidental)?;
    (0..=MIDI_MAX).contains(&midi).then_some(midi)
}

/// `tuning_pitch * 2^((midi - 69) / 12)`
pub fn midi_to_frequency(midi: i32, tuning_pitch: f64) -> f64 {
    tuning_pitch * (2.0_f64).powf((midi as f64 - 69.0) / 12.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_naturals_and_accidentals() {
        assert_eq!(note_to_midi("C4"), Some(60));
        assert_eq!(note_to_midi("A4"), Some(69));
        assert_eq!(note_to_midi("F#3"), Some(54));
        assert_eq!(note_to_midi("Bb5"), Some(82));
        assert_eq!(note_to_midi("C-1"), Some(0));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(note_to_midi(""), None);
        assert_eq!(note_to_midi("H4"), None);
        assert_eq!(note_to_midi("C"), None);
        assert_eq!(note_to_midi("C#x"), None);
    }

    #[test]
    fn rejects_notes_outside_midi_range() {
        assert_eq!(note_to_midi("G9"), Some(127));
        assert_eq!(note_to_midi("G#9"), None);
        assert_eq!(note_to_midi("Cb-1"), None);
        assert_eq!(note_to_midi("C400"), None);
        assert_eq!(note_to_midi("C2147483647"), None);
        assert_eq!(note_to_midi("C-2147483648"), None);
        assert!(Pitch::parse("C2147483647").is_none());
    }

    #[test]
    fn pitch_frequency() {
        let a4 = Pitch::parse("A4").unwrap();
        assert!((a4.frequency - 440.0).abs() < 1e-9);

        let c4 = Pitch::parse("C4").unwrap();
        assert!((c4.frequency - 261.6256).abs() < 1e-3, "got {}", c4.frequency);
        assert_eq!(c4.name, "C4");
    }
}
