//! # Transposition
//!
//! Shifts chord symbols and fingerings by a number of semitones.
//!
//! ## Symbols
//! The root and bass move modulo 12 and the quality suffix is re-attached
//! exactly as written (`"Am7b5"` stays `...m7b5`). Shifts that are a multiple
//! of 12 return the input unchanged. New notes are spelled with sharps unless
//! the input root or bass was written with a flat, and with `♯`/`♭` when the
//! input used those glyphs.
//!
//! ## Fingerings
//! Every sounding fret moves by `semitones % 12` (keeping its sign). A shift
//! that pushes any fret below the nut or past `max-fret` has no result; the
//! caller regenerates for the new root instead. Fingers, barre, base fret and
//! difficulty are recomputed for the moved shape.
//!
//! ## Example
//! ```rust
//! use fretwork::transpose::transpose_chord_symbol;
//!
//! assert_eq!(transpose_chord_symbol("Am7", 3).unwrap(), "Cm7");
//! assert_eq!(transpose_chord_symbol("Bbmaj7", 2).unwrap(), "Cmaj7");
//! assert_eq!(transpose_chord_symbol("Ebm/Gb", 1).unwrap(), "Em/G");
//! assert_eq!(transpose_chord_symbol("G/B", -2).unwrap(), "F/A");
//! ```

use tracing::debug;

use crate::config::FretboardConfig;
use crate::error::ChordError;
use crate::fingering::Fingering;
use crate::pitch::{PitchClass, STRING_COUNT};
use crate::symbol::parse_written;

/// Transpose a chord symbol by `semitones` (negative moves down).
///
/// # Errors
/// Returns the parse error if `text` is not a chord symbol.
pub fn transpose_chord_symbol(text: &str, semitones: i32) -> Result<String, ChordError> {
    let written = parse_written(text)?;
    if semitones % 12 == 0 {
        return Ok(text.to_string());
    }

    let spelling = written.spelling();
    let symbol = written.symbol;
    let mut out = symbol.root.transpose(semitones).spell(spelling);
    out.push_str(written.suffix);
    if let Some(bass) = symbol.bass_note {
        out.push('/');
        out.push_str(&bass.transpose(semitones).spell(spelling));
    }
    Ok(out)
}

/// Move a fingering up or down the neck by `semitones`.
///
/// Returns `None` when a fret would leave the fretboard or the moved shape
/// cannot be fingered.
///
/// # Example
/// ```rust
/// use fretwork::config::FretboardConfig;
/// use fretwork::fingering::Fingering;
/// use fretwork::transpose::shift_fingering;
///
/// let e = Fingering::from_frets("E", [Some(0), Some(0), Some(1), Some(2), Some(2), Some(0)]).unwrap();
/// let f = shift_fingering(&e, 1, &FretboardConfig::default()).unwrap();
/// assert_eq!(f.frets, [Some(1), Some(1), Some(2), Some(3), Some(3), Some(1)]);
/// assert_eq!(f.id, "E+1");
/// assert!(shift_fingering(&e, -1, &FretboardConfig::default()).is_none());
/// ```
pub fn shift_fingering(
    fingering: &Fingering,
    semitones: i32,
    fretboard: &FretboardConfig,
) -> Option<Fingering> {
    let shift = semitones % 12;
    if shift == 0 {
        return Some(fingering.clone());
    }

    let mut frets: [Option<u8>; STRING_COUNT] = [None; STRING_COUNT];
    for (string, fret) in fingering.layout().iter().enumerate() {
        if let Some(fret) = fret {
            let moved = *fret as i32 + shift;
            if moved < 0 || moved > fretboard.max_fret as i32 {
                debug!(id = %fingering.id, shift, "fingering shifted off the fretboard");
                return None;
            }
            frets[string] = Some(moved as u8);
        }
    }

    let id = format!("{}{:+}", fingering.id, shift);
    let mut moved = Fingering::from_frets(id, frets)?;
    moved.is_default = fingering.is_default;
    Some(moved)
}

/// Capo position that cancels a transposition, if one exists on the neck.
///
/// Returns `original_capo - transpose` when that lands on frets 0-12,
/// otherwise keeps the original capo.
pub fn recommended_capo(original_capo: u8, transpose: i32) -> u8 {
    let capo = original_capo as i32 - transpose;
    if (0..=12).contains(&capo) {
        capo as u8
    } else {
        original_capo
    }
}

/// Guess a song's key: the root of its first plain major chord.
pub fn guess_key<'a>(symbols: impl IntoIterator<Item = &'a str>) -> Option<PitchClass> {
    symbols
        .into_iter()
        .filter_map(|text| crate::parse_chord_symbol(text).ok())
        .find(|symbol| symbol.quality == crate::quality::Quality::Major)
        .map(|symbol| symbol.root)
}
