//! # Chord Qualities
//!
//! The closed set of chord qualities the engine understands, their interval
//! tables and the suffix tokens that name them in chord symbols.
//!
//! ## Intervals
//! Intervals are semitones above the root, kept verbatim: a 9th is stored as 14
//! and a sharp 9th as 15. Pitch matching reduces them modulo 12 (see
//! [`required_pitch_classes`](crate::pitch::required_pitch_classes)).
//!
//! ## Suffix tokens
//! Every quality has one canonical suffix (`m7-5`, `dim7`, `5`, ...) plus
//! the common aliases found in chord sheets (`m7b5`, `ø`, `°7`, `maj7`, `Δ`, ...).
//! The parser matches tokens longest-first so `m` never shadows `mM7` or `m7-5`.
//!
//! ## Example
//! ```rust
//! use fretwork::quality::Quality;
//!
//! assert_eq!(Quality::HalfDiminished.suffix(), "m7-5");
//! assert_eq!(Quality::HalfDiminished.intervals(), &[0, 3, 6, 10]);
//! assert_eq!(Quality::from_suffix("ø7"), Some(Quality::HalfDiminished));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A chord quality: the part of a chord symbol after the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quality {
    #[serde(rename = "")]
    Major,
    #[serde(rename = "m")]
    Minor,
    #[serde(rename = "7")]
    Dominant7,
    #[serde(rename = "m7")]
    Minor7,
    #[serde(rename = "M7")]
    Major7,
    #[serde(rename = "m7-5")]
    HalfDiminished,
    #[serde(rename = "m-5")]
    MinorFlat5,
    #[serde(rename = "dim")]
    Diminished,
    #[serde(rename = "dim7")]
    Diminished7,
    #[serde(rename = "aug")]
    Augmented,
    #[serde(rename = "sus2")]
    Sus2,
    #[serde(rename = "sus4")]
    Sus4,
    #[serde(rename = "7sus4")]
    SevenSus4,
    #[serde(rename = "6")]
    Sixth,
    #[serde(rename = "m6")]
    MinorSixth,
    #[serde(rename = "mM7")]
    MinorMajor7,
    #[serde(rename = "9")]
    Ninth,
    #[serde(rename = "m9")]
    Minor9,
    #[serde(rename = "M9")]
    Major9,
    #[serde(rename = "9sus4")]
    NineSus4,
    #[serde(rename = "add9")]
    Add9,
    #[serde(rename = "69")]
    SixNine,
    #[serde(rename = "m69")]
    MinorSixNine,
    #[serde(rename = "-5")]
    Flat5,
    #[serde(rename = "7-5")]
    SevenFlat5,
    #[serde(rename = "7+5")]
    SevenSharp5,
    #[serde(rename = "M7-5")]
    Major7Flat5,
    #[serde(rename = "m7+5")]
    Minor7Sharp5,
    #[serde(rename = "7+9")]
    SevenSharp9,
    #[serde(rename = "4.4")]
    Quartal,
    #[serde(rename = "blk")]
    Blackadder,
    #[serde(rename = "5")]
    Power,
}

/// Alias tokens accepted in addition to each quality's canonical suffix.
const ALIASES: &[(&str, Quality)] = &[
    ("maj", Quality::Major),
    ("M", Quality::Major),
    ("min", Quality::Minor),
    ("mi", Quality::Minor),
    ("-", Quality::Minor),
    ("maj7", Quality::Major7),
    ("Maj7", Quality::Major7),
    ("ma7", Quality::Major7),
    ("Δ", Quality::Major7),
    ("Δ7", Quality::Major7),
    ("min7", Quality::Minor7),
    ("mi7", Quality::Minor7),
    ("-7", Quality::Minor7),
    ("m7b5", Quality::HalfDiminished),
    ("min7b5", Quality::HalfDiminished),
    ("-7b5", Quality::HalfDiminished),
    ("ø", Quality::HalfDiminished),
    ("ø7", Quality::HalfDiminished),
    ("Ø", Quality::HalfDiminished),
    ("Ø7", Quality::HalfDiminished),
    ("mb5", Quality::MinorFlat5),
    ("o", Quality::Diminished),
    ("°", Quality::Diminished),
    ("o7", Quality::Diminished7),
    ("°7", Quality::Diminished7),
    ("+", Quality::Augmented),
    ("sus", Quality::Sus4),
    ("7sus", Quality::SevenSus4),
    ("M6", Quality::Sixth),
    ("maj6", Quality::Sixth),
    ("add6", Quality::Sixth),
    ("min6", Quality::MinorSixth),
    ("-6", Quality::MinorSixth),
    ("mMaj7", Quality::MinorMajor7),
    ("minMaj7", Quality::MinorMajor7),
    ("mmaj7", Quality::MinorMajor7),
    ("m(M7)", Quality::MinorMajor7),
    ("m/M7", Quality::MinorMajor7),
    ("mΔ7", Quality::MinorMajor7),
    ("-Δ7", Quality::MinorMajor7),
    ("min9", Quality::Minor9),
    ("m7(9)", Quality::Minor9),
    ("maj9", Quality::Major9),
    ("M7(9)", Quality::Major9),
    ("9sus", Quality::NineSus4),
    ("add2", Quality::Add9),
    ("6/9", Quality::SixNine),
    ("6add9", Quality::SixNine),
    ("m6/9", Quality::MinorSixNine),
    ("b5", Quality::Flat5),
    ("7b5", Quality::SevenFlat5),
    ("7#5", Quality::SevenSharp5),
    ("aug7", Quality::SevenSharp5),
    ("+7", Quality::SevenSharp5),
    ("M7b5", Quality::Major7Flat5),
    ("maj7b5", Quality::Major7Flat5),
    ("m7#5", Quality::Minor7Sharp5),
    ("7#9", Quality::SevenSharp9),
    ("quartal", Quality::Quartal),
];

impl Quality {
    /// Every quality, in canonical table order.
    pub const ALL: [Quality; 32] = [
        Quality::Major,
        Quality::Minor,
        Quality::Dominant7,
        Quality::Minor7,
        Quality::Major7,
        Quality::HalfDiminished,
        Quality::MinorFlat5,
        Quality::Diminished,
        Quality::Diminished7,
        Quality::Augmented,
        Quality::Sus2,
        Quality::Sus4,
        Quality::SevenSus4,
        Quality::Sixth,
        Quality::MinorSixth,
        Quality::MinorMajor7,
        Quality::Ninth,
        Quality::Minor9,
        Quality::Major9,
        Quality::NineSus4,
        Quality::Add9,
        Quality::SixNine,
        Quality::MinorSixNine,
        Quality::Flat5,
        Quality::SevenFlat5,
        Quality::SevenSharp5,
        Quality::Major7Flat5,
        Quality::Minor7Sharp5,
        Quality::SevenSharp9,
        Quality::Quartal,
        Quality::Blackadder,
        Quality::Power,
    ];

    /// Semitones above the root, in chord-tone order.
    pub fn intervals(self) -> &'static [u8] {
        match self {
            Quality::Major => &[0, 4, 7],
            Quality::Minor => &[0, 3, 7],
            Quality::Dominant7 => &[0, 4, 7, 10],
            Quality::Minor7 => &[0, 3, 7, 10],
            Quality::Major7 => &[0, 4, 7, 11],
            Quality::HalfDiminished => &[0, 3, 6, 10],
            Quality::MinorFlat5 => &[0, 3, 6],
            Quality::Diminished => &[0, 3, 6],
            Quality::Diminished7 => &[0, 3, 6, 9],
            Quality::Augmented => &[0, 4, 8],
            Quality::Sus2 => &[0, 2, 7],
            Quality::Sus4 => &[0, 5, 7],
            Quality::SevenSus4 => &[0, 5, 7, 10],
            Quality::Sixth => &[0, 4, 7, 9],
            Quality::MinorSixth => &[0, 3, 7, 9],
            Quality::MinorMajor7 => &[0, 3, 7, 11],
            Quality::Ninth => &[0, 4, 7, 10, 14],
            Quality::Minor9 => &[0, 3, 7, 10, 14],
            Quality::Major9 => &[0, 4, 7, 11, 14],
            Quality::NineSus4 => &[0, 5, 7, 10, 14],
            Quality::Add9 => &[0, 4, 7, 14],
            Quality::SixNine => &[0, 4, 7, 9, 14],
            Quality::MinorSixNine => &[0, 3, 7, 9, 14],
            Quality::Flat5 => &[0, 4, 6],
            Quality::SevenFlat5 => &[0, 4, 6, 10],
            Quality::SevenSharp5 => &[0, 4, 8, 10],
            Quality::Major7Flat5 => &[0, 4, 6, 11],
            Quality::Minor7Sharp5 => &[0, 3, 8, 10],
            Quality::SevenSharp9 => &[0, 4, 7, 10, 15],
            Quality::Quartal => &[0, 5, 10],
            Quality::Blackadder => &[0, 2, 6, 10],
            Quality::Power => &[0, 7],
        }
    }

    /// Canonical suffix used when rendering a chord symbol.
    pub fn suffix(self) -> &'static str {
        match self {
            Quality::Major => "",
            Quality::Minor => "m",
            Quality::Dominant7 => "7",
            Quality::Minor7 => "m7",
            Quality::Major7 => "M7",
            Quality::HalfDiminished => "m7-5",
            Quality::MinorFlat5 => "m-5",
            Quality::Diminished => "dim",
            Quality::Diminished7 => "dim7",
            Quality::Augmented => "aug",
            Quality::Sus2 => "sus2",
            Quality::Sus4 => "sus4",
            Quality::SevenSus4 => "7sus4",
            Quality::Sixth => "6",
            Quality::MinorSixth => "m6",
            Quality::MinorMajor7 => "mM7",
            Quality::Ninth => "9",
            Quality::Minor9 => "m9",
            Quality::Major9 => "M9",
            Quality::NineSus4 => "9sus4",
            Quality::Add9 => "add9",
            Quality::SixNine => "69",
            Quality::MinorSixNine => "m69",
            Quality::Flat5 => "-5",
            Quality::SevenFlat5 => "7-5",
            Quality::SevenSharp5 => "7+5",
            Quality::Major7Flat5 => "M7-5",
            Quality::Minor7Sharp5 => "m7+5",
            Quality::SevenSharp9 => "7+9",
            Quality::Quartal => "4.4",
            Quality::Blackadder => "blk",
            Quality::Power => "5",
        }
    }

    /// Human-readable name.
    pub fn description(self) -> &'static str {
        match self {
            Quality::Major => "major",
            Quality::Minor => "minor",
            Quality::Dominant7 => "dominant seventh",
            Quality::Minor7 => "minor seventh",
            Quality::Major7 => "major seventh",
            Quality::HalfDiminished => "half-diminished",
            Quality::MinorFlat5 => "minor flat five",
            Quality::Diminished => "diminished",
            Quality::Diminished7 => "diminished seventh",
            Quality::Augmented => "augmented",
            Quality::Sus2 => "suspended second",
            Quality::Sus4 => "suspended fourth",
            Quality::SevenSus4 => "seventh suspended fourth",
            Quality::Sixth => "sixth",
            Quality::MinorSixth => "minor sixth",
            Quality::MinorMajor7 => "minor major seventh",
            Quality::Ninth => "ninth",
            Quality::Minor9 => "minor ninth",
            Quality::Major9 => "major ninth",
            Quality::NineSus4 => "ninth suspended fourth",
            Quality::Add9 => "added ninth",
            Quality::SixNine => "six nine",
            Quality::MinorSixNine => "minor six nine",
            Quality::Flat5 => "flat five",
            Quality::SevenFlat5 => "seventh flat five",
            Quality::SevenSharp5 => "seventh sharp five",
            Quality::Major7Flat5 => "major seventh flat five",
            Quality::Minor7Sharp5 => "minor seventh sharp five",
            Quality::SevenSharp9 => "seventh sharp nine",
            Quality::Quartal => "quartal",
            Quality::Blackadder => "blackadder",
            Quality::Power => "power chord",
        }
    }

    /// Look up a quality by its exact suffix or alias (`""` is major).
    pub fn from_suffix(suffix: &str) -> Option<Quality> {
        if let Some(quality) = Quality::ALL.iter().find(|q| q.suffix() == suffix) {
            return Some(*quality);
        }
        ALIASES
            .iter()
            .find(|(token, _)| *token == suffix)
            .map(|(_, quality)| *quality)
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// All non-empty tokens that `text` starts with, longest first.
///
/// Tokens of equal length keep table order (canonical suffixes before aliases).
pub(crate) fn matching_tokens(text: &str) -> Vec<(&'static str, Quality)> {
    let canonical = Quality::ALL
        .iter()
        .map(|q| (q.suffix(), *q))
        .filter(|(token, _)| !token.is_empty());

    let mut matches: Vec<(&'static str, Quality)> = canonical
        .chain(ALIASES.iter().copied())
        .filter(|(token, _)| text.starts_with(token))
        .collect();
    matches.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    matches
}
