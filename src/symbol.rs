//! # Chord Symbol Parser
//!
//! Parses free-form chord strings (`"Cm7-5"`, `"G/B"`, `"F#dim7"`, `"B♭maj7"`)
//! into a [`ChordSymbol`].
//!
//! ## Algorithm
//! 1. Trim surrounding whitespace
//! 2. Match the longest root token (`[A-G]` with optional `#`, `♯`, `b`, `♭`)
//! 3. Match the suffix against the quality tokens, longest first. A token is
//!    only accepted when nothing follows it, or `/` and a bass note follow it
//! 4. If the longest root leaves an unparseable suffix, retry with the bare
//!    letter: `"Bblk"` is B blackadder, not B♭ followed by `lk`
//!
//! An empty suffix is a major triad. Parsing is pure; the same text always
//! yields the same symbol.
//!
//! ## Example
//! ```rust
//! use fretwork::{parse_chord_symbol, pitch::PitchClass, quality::Quality};
//!
//! let symbol = parse_chord_symbol("G/B").unwrap();
//! assert_eq!(symbol.root, PitchClass::G);
//! assert_eq!(symbol.quality, Quality::Major);
//! assert_eq!(symbol.bass_note, Some(PitchClass::B));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChordError;
use crate::pitch::{note_tokens, required_pitch_classes, NoteToken, PitchClass, Spelling};
use crate::quality::{matching_tokens, Quality};

/// A parsed chord symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordSymbol {
    pub root: PitchClass,
    pub quality: Quality,
    pub bass_note: Option<PitchClass>,
}

impl ChordSymbol {
    pub fn new(root: PitchClass, quality: Quality) -> Self {
        ChordSymbol {
            root,
            quality,
            bass_note: None,
        }
    }

    pub fn with_bass(root: PitchClass, quality: Quality, bass: PitchClass) -> Self {
        ChordSymbol {
            root,
            quality,
            bass_note: Some(bass),
        }
    }

    /// The same chord without its bass note.
    pub fn without_bass(self) -> Self {
        ChordSymbol {
            bass_note: None,
            ..self
        }
    }

    /// Pitch classes every fingering of this chord must sound.
    ///
    /// For slash chords the bass note is part of the requirement.
    pub fn required_pitch_classes(&self) -> Vec<PitchClass> {
        let mut pitches = required_pitch_classes(self.root, self.quality);
        if let Some(bass) = self.bass_note {
            if !pitches.contains(&bass) {
                pitches.push(bass);
            }
        }
        pitches
    }
}

impl fmt::Display for ChordSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.quality.suffix())?;
        if let Some(bass) = self.bass_note {
            write!(f, "/{}", bass)?;
        }
        Ok(())
    }
}

impl FromStr for ChordSymbol {
    type Err = ChordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_chord_symbol(s)
    }
}

/// A parsed symbol together with how it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WrittenSymbol<'a> {
    pub symbol: ChordSymbol,
    pub root_spelling: Spelling,
    /// The quality token exactly as it appeared (`"maj7"`, `"ø"`, `""`).
    pub suffix: &'a str,
    pub bass_spelling: Option<Spelling>,
}

impl WrittenSymbol<'_> {
    /// Spelling to use when re-rendering: flats or glyphs anywhere carry over.
    pub fn spelling(&self) -> Spelling {
        match self.bass_spelling {
            Some(bass) => self.root_spelling.merge(bass),
            None => self.root_spelling,
        }
    }
}

/// Parse a chord symbol.
///
/// # Errors
/// - [`ChordError::UnrecognizedRoot`] if the text does not start with a note name
/// - [`ChordError::UnrecognizedQuality`] if the suffix (or bass note) is not recognized
///
/// # Example
/// ```rust
/// use fretwork::{parse_chord_symbol, quality::Quality, ChordError};
///
/// assert_eq!(parse_chord_symbol("Cm7-5").unwrap().quality, Quality::HalfDiminished);
/// assert_eq!(parse_chord_symbol("Bbm7b5").unwrap().to_string(), "A#m7-5");
/// assert!(matches!(
///     parse_chord_symbol("Xm"),
///     Err(ChordError::UnrecognizedRoot { .. })
/// ));
/// ```
pub fn parse_chord_symbol(text: &str) -> Result<ChordSymbol, ChordError> {
    parse_written(text).map(|written| written.symbol)
}

pub(crate) fn parse_written(text: &str) -> Result<WrittenSymbol<'_>, ChordError> {
    let trimmed = text.trim();
    let roots = note_tokens(trimmed);
    if roots.is_empty() {
        return Err(ChordError::UnrecognizedRoot {
            input: trimmed.to_string(),
        });
    }

    let mut first_error = None;
    for root in roots {
        let rest = &trimmed[root.len..];
        match parse_suffix(rest) {
            Some((quality, suffix, bass)) => {
                return Ok(WrittenSymbol {
                    symbol: ChordSymbol {
                        root: root.pitch,
                        quality,
                        bass_note: bass.map(|b| b.pitch),
                    },
                    root_spelling: root.spelling,
                    suffix,
                    bass_spelling: bass.map(|b| b.spelling),
                });
            }
            None => {
                first_error.get_or_insert_with(|| ChordError::UnrecognizedQuality {
                    input: trimmed.to_string(),
                    suffix: rest.to_string(),
                });
            }
        }
    }

    Err(first_error.unwrap_or_else(|| ChordError::UnrecognizedRoot {
        input: trimmed.to_string(),
    }))
}

/// Match `rest` as a quality token plus an optional `/bass`.
fn parse_suffix(rest: &str) -> Option<(Quality, &str, Option<NoteToken>)> {
    let mut candidates = matching_tokens(rest);
    candidates.push(("", Quality::Major));

    for (token, quality) in candidates {
        let after = &rest[token.len()..];
        if after.is_empty() {
            return Some((quality, &rest[..token.len()], None));
        }
        if let Some(bass) = parse_bass(after) {
            return Some((quality, &rest[..token.len()], Some(bass)));
        }
    }
    None
}

fn parse_bass(text: &str) -> Option<NoteToken> {
    let note = text.strip_prefix('/')?;
    note_tokens(note)
        .into_iter()
        .find(|token| token.len == note.len())
}
