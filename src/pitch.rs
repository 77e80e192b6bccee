//! # Pitch Model
//!
//! Pitch classes, note spelling and the fixed six-string standard tuning.
//!
//! ## Conventions
//! - Pitch classes are integers 0-11 with C = 0; all arithmetic is modulo 12
//! - String index 0 is the highest-pitched string (first string, high e),
//!   index 5 is the lowest (sixth string, low E)
//! - Open strings in standard tuning: `[E, B, G, D, A, E]` = `[4, 11, 7, 2, 9, 4]`
//!
//! ## Example
//! ```rust
//! use fretwork::pitch::{note_at, open_string_pitch, PitchClass};
//!
//! assert_eq!(open_string_pitch(1), PitchClass::new(11)); // B string
//! assert_eq!(note_at(1, 1), PitchClass::C);               // B string, 1st fret
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::quality::Quality;

/// Number of strings on the instrument.
pub const STRING_COUNT: usize = 6;

/// Sharp-based spelling table, indexed by pitch class.
const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Flat-based spelling table, indexed by pitch class.
const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// A note name reduced modulo the octave (0-11, C = 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);
    pub const D: PitchClass = PitchClass(2);
    pub const E: PitchClass = PitchClass(4);
    pub const F: PitchClass = PitchClass(5);
    pub const G: PitchClass = PitchClass(7);
    pub const A: PitchClass = PitchClass(9);
    pub const B: PitchClass = PitchClass(11);

    /// Build a pitch class from any integer, reducing it modulo 12.
    pub fn new(value: i32) -> Self {
        PitchClass(value.rem_euclid(12) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Move up (positive) or down (negative) by `semitones`.
    pub fn transpose(self, semitones: i32) -> Self {
        Self::new(self.0 as i32 + semitones)
    }

    /// Ascending distance in semitones from `self` to `other` (0-11).
    pub fn interval_to(self, other: PitchClass) -> u8 {
        (other.0 + 12 - self.0) % 12
    }

    /// Spell this pitch class as a note name.
    pub fn spell(self, spelling: Spelling) -> String {
        let name = if spelling.flats {
            FLAT_NAMES[self.0 as usize]
        } else {
            SHARP_NAMES[self.0 as usize]
        };
        if spelling.unicode {
            name.replace('#', "♯").replace('b', "♭")
        } else {
            name.to_string()
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(SHARP_NAMES[self.0 as usize])
    }
}

/// How accidentals are written when a pitch class is rendered.
///
/// The default is sharp-preferred ASCII (`C#`, `F#`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Spelling {
    pub flats: bool,
    pub unicode: bool,
}

impl Spelling {
    /// Combine two spellings; flats or glyphs used anywhere win.
    pub fn merge(self, other: Spelling) -> Spelling {
        Spelling {
            flats: self.flats || other.flats,
            unicode: self.unicode || other.unicode,
        }
    }
}

/// A note name recognized at the start of a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteToken {
    pub pitch: PitchClass,
    /// Byte length of the token in the source text.
    pub len: usize,
    /// Spelling implied by the accidental that was written.
    pub spelling: Spelling,
}

/// Every note token that `text` starts with, longest first.
///
/// `"Bblk"` yields both `Bb` and `B`; the parser falls back to the shorter
/// token when the longer one leaves an unrecognized suffix.
pub fn note_tokens(text: &str) -> Vec<NoteToken> {
    let mut chars = text.chars();
    let letter = match chars.next() {
        Some(c) => c,
        None => return vec![],
    };
    let base: i32 = match letter {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return vec![],
    };

    let natural = NoteToken {
        pitch: PitchClass::new(base),
        len: 1,
        spelling: Spelling::default(),
    };

    let accidental = match chars.next() {
        Some(c @ '#') => (1, c, Spelling { flats: false, unicode: false }),
        Some(c @ '♯') => (1, c, Spelling { flats: false, unicode: true }),
        Some(c @ 'b') => (-1, c, Spelling { flats: true, unicode: false }),
        Some(c @ '♭') => (-1, c, Spelling { flats: true, unicode: true }),
        _ => return vec![natural],
    };

    let (shift, symbol, spelling) = accidental;
    vec![
        NoteToken {
            pitch: PitchClass::new(base + shift),
            len: 1 + symbol.len_utf8(),
            spelling,
        },
        natural,
    ]
}

/// Parse a complete note name such as `"F#"`, `"Bb"` or `"E♭"`.
pub fn parse_note(text: &str) -> Option<PitchClass> {
    let text = text.trim();
    note_tokens(text)
        .into_iter()
        .find(|token| token.len == text.len())
        .map(|token| token.pitch)
}

/// Open-string pitch class for a string index (0 = high e, 5 = low E).
pub fn open_string_pitch(string: usize) -> PitchClass {
    const STANDARD_TUNING: [PitchClass; STRING_COUNT] = [
        PitchClass::E,
        PitchClass::B,
        PitchClass::G,
        PitchClass::D,
        PitchClass::A,
        PitchClass::E,
    ];
    STANDARD_TUNING[string % STRING_COUNT]
}

/// Pitch class sounded by `string` stopped at `fret` (0 = open).
pub fn note_at(string: usize, fret: u8) -> PitchClass {
    open_string_pitch(string).transpose(fret as i32)
}

/// Lowest fret (0-11) on `string` that sounds `pitch`.
pub fn fret_for(string: usize, pitch: PitchClass) -> u8 {
    open_string_pitch(string).interval_to(pitch)
}

/// Pitch classes a chord must sound, in interval order without duplicates.
///
/// Compound intervals (9ths) are reduced modulo 12 here; the quality keeps
/// them verbatim for labeling.
pub fn required_pitch_classes(root: PitchClass, quality: Quality) -> Vec<PitchClass> {
    let mut pitches: Vec<PitchClass> = Vec::with_capacity(quality.intervals().len());
    for &interval in quality.intervals() {
        let pitch = root.transpose(interval as i32);
        if !pitches.contains(&pitch) {
            pitches.push(pitch);
        }
    }
    pitches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_strings_standard_tuning() {
        let open: Vec<u8> = (0..STRING_COUNT).map(|s| open_string_pitch(s).value()).collect();
        assert_eq!(open, vec![4, 11, 7, 2, 9, 4]);
    }

    #[test]
    fn test_note_at_wraps_octave() {
        assert_eq!(note_at(0, 0), PitchClass::E);
        assert_eq!(note_at(0, 8), PitchClass::C);
        assert_eq!(note_at(0, 12), PitchClass::E);
        assert_eq!(note_at(5, 3), PitchClass::G);
        assert_eq!(fret_for(4, PitchClass::C), 3);
    }

    #[test]
    fn test_note_tokens_longest_first() {
        let tokens = note_tokens("Bbm7");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].pitch, PitchClass::new(10));
        assert_eq!(tokens[0].len, 2);
        assert!(tokens[0].spelling.flats);
        assert_eq!(tokens[1].pitch, PitchClass::B);

        let unicode = note_tokens("F♯m");
        assert_eq!(unicode[0].pitch, PitchClass::new(6));
        assert_eq!(unicode[0].len, '♯'.len_utf8() + 1);
        assert!(unicode[0].spelling.unicode);

        assert!(note_tokens("Hm").is_empty());
        assert!(note_tokens("").is_empty());
    }

    #[test]
    fn test_parse_note_enharmonics() {
        assert_eq!(parse_note("Db"), Some(PitchClass::new(1)));
        assert_eq!(parse_note("C#"), Some(PitchClass::new(1)));
        assert_eq!(parse_note("Cb"), Some(PitchClass::B));
        assert_eq!(parse_note("E#"), Some(PitchClass::F));
        assert_eq!(parse_note("Bx"), None);
    }

    #[test]
    fn test_spelling() {
        let flat = Spelling { flats: true, unicode: false };
        let glyph = Spelling { flats: true, unicode: true };
        assert_eq!(PitchClass::new(10).spell(Spelling::default()), "A#");
        assert_eq!(PitchClass::new(10).spell(flat), "Bb");
        assert_eq!(PitchClass::new(10).spell(glyph), "B♭");
        assert_eq!(PitchClass::new(6).to_string(), "F#");
    }

    #[test]
    fn test_required_pitch_classes_reduce_compound_intervals() {
        let c9 = required_pitch_classes(PitchClass::C, Quality::Ninth);
        let values: Vec<u8> = c9.iter().map(|p| p.value()).collect();
        assert_eq!(values, vec![0, 4, 7, 10, 2]);

        let am7b5 = required_pitch_classes(PitchClass::A, Quality::HalfDiminished);
        let values: Vec<u8> = am7b5.iter().map(|p| p.value()).collect();
        assert_eq!(values, vec![9, 0, 3, 7]);
    }
}
