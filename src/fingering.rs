//! # Fingering Types
//!
//! The `Fingering` record shared by every part of the engine: generated
//! voicings, CAGED forms, caller-supplied database and preference fingerings,
//! and the validator's input.
//!
//! ## Layout
//! - `frets[i]`: `None` = muted, `Some(0)` = open, `Some(n)` = pressed at fret `n`
//! - `fingers[i]`: `Some(1..=4)` for a pressed string, `None` for open, muted or
//!   barred strings
//! - String 0 is the high e string, string 5 the low E string
//!
//! Serialized with camelCase keys (`barreAt`, `barreStrings`, `baseFret`,
//! `isDefault`) so the presentation layer receives the same JSON shape it
//! renders diagrams from.
//!
//! ## Example
//! ```rust
//! use fretwork::fingering::{Difficulty, Fingering};
//!
//! let c = Fingering::from_frets("C-C-open", [Some(0), Some(1), Some(0), Some(2), Some(3), None]).unwrap();
//! assert_eq!(c.fingers, [None, Some(1), None, Some(2), Some(3), None]);
//! assert_eq!(c.base_fret, 1);
//! assert_eq!(c.difficulty, Difficulty::Easy);
//! assert_eq!(c.tab_lines()[4], "A|---3--");
//! ```

use serde::{Deserialize, Serialize};

use crate::barre::assign_fingers;
use crate::difficulty::classify;
use crate::pitch::{note_at, PitchClass, STRING_COUNT};

/// String names from string 0 (high e) to string 5 (low E).
const STRING_NAMES: [&str; STRING_COUNT] = ["e", "B", "G", "D", "A", "E"];

/// Number of frets a hand can cover from the base fret (inclusive window is
/// `baseFret..=baseFret + FRET_REACH`).
pub const FRET_REACH: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// One playable six-string chord shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fingering {
    #[serde(default)]
    pub id: String,
    pub frets: [Option<u8>; STRING_COUNT],
    #[serde(default)]
    pub fingers: [Option<u8>; STRING_COUNT],
    #[serde(default)]
    pub barre_at: Option<u8>,
    #[serde(default)]
    pub barre_strings: Option<(usize, usize)>,
    pub base_fret: u8,
    #[serde(default)]
    pub muted: [bool; STRING_COUNT],
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl Fingering {
    /// Build a finished fingering from a fret layout.
    ///
    /// Derives fingers, barre, base fret, muted flags and difficulty. Returns
    /// `None` when the layout is not physically playable: it needs a fifth
    /// finger, or its pressed frets do not fit the 4-fret window.
    pub fn from_frets(id: impl Into<String>, frets: [Option<u8>; STRING_COUNT]) -> Option<Fingering> {
        let assignment = assign_fingers(&frets)?;
        let base_fret = base_fret_for(&frets);

        let in_window = frets
            .iter()
            .flatten()
            .filter(|&&f| f > 0)
            .all(|&f| f >= base_fret && f <= base_fret + FRET_REACH);
        if !in_window {
            return None;
        }

        let mut fingering = Fingering {
            id: id.into(),
            frets,
            fingers: assignment.fingers,
            barre_at: assignment.barre.map(|b| b.fret),
            barre_strings: assignment.barre.map(|b| b.strings),
            base_fret,
            muted: frets.map(|f| f.is_none()),
            is_default: false,
            difficulty: Difficulty::Medium,
        };
        fingering.difficulty = classify(&fingering);
        Some(fingering)
    }

    pub fn is_muted(&self, string: usize) -> bool {
        self.muted[string] || self.frets[string].is_none()
    }

    /// Fret for each sounding string; muted strings are `None`.
    ///
    /// Two fingerings with the same layout sound identical.
    pub fn layout(&self) -> [Option<u8>; STRING_COUNT] {
        let mut layout = self.frets;
        for (string, fret) in layout.iter_mut().enumerate() {
            if self.muted[string] {
                *fret = None;
            }
        }
        layout
    }

    /// Frets above 0 on sounding strings.
    pub fn pressed_frets(&self) -> Vec<u8> {
        self.layout().iter().flatten().copied().filter(|&f| f > 0).collect()
    }

    /// Distance between the highest and lowest pressed fret (0 when nothing is pressed).
    pub fn pressed_span(&self) -> u8 {
        let pressed = self.pressed_frets();
        match (pressed.iter().min(), pressed.iter().max()) {
            (Some(min), Some(max)) => max - min,
            _ => 0,
        }
    }

    pub fn sounding_strings(&self) -> usize {
        self.layout().iter().flatten().count()
    }

    /// Distinct pitch classes sounded by the fingering, ascending.
    pub fn pitch_classes(&self) -> Vec<PitchClass> {
        let mut pitches: Vec<PitchClass> = self
            .layout()
            .iter()
            .enumerate()
            .filter_map(|(string, fret)| fret.map(|f| note_at(string, f)))
            .collect();
        pitches.sort();
        pitches.dedup();
        pitches
    }

    /// Whether every pitch class in `required` is sounded.
    pub fn covers(&self, required: &[PitchClass]) -> bool {
        let sounding = self.pitch_classes();
        required.iter().all(|p| sounding.contains(p))
    }

    /// Guitar TAB, one line per string from high e to low E.
    ///
    /// ```text
    /// e|---0--
    /// B|---1--
    /// G|---0--
    /// D|---2--
    /// A|---3--
    /// E|---x--
    /// ```
    pub fn tab_lines(&self) -> Vec<String> {
        self.layout()
            .iter()
            .zip(STRING_NAMES)
            .map(|(fret, name)| {
                let fret = fret.map(|f| f.to_string()).unwrap_or_else(|| "x".to_string());
                format!("{}|--{:->2}--", name, fret)
            })
            .collect()
    }
}

/// Base fret of a layout: 1 for open-position shapes (a sounding open string
/// and nothing pressed above fret 4) or when nothing is pressed, otherwise the
/// lowest pressed fret.
pub fn base_fret_for(frets: &[Option<u8>; STRING_COUNT]) -> u8 {
    let pressed: Vec<u8> = frets.iter().flatten().copied().filter(|&f| f > 0).collect();
    let has_open = frets.iter().any(|&f| f == Some(0));
    match (pressed.iter().min(), pressed.iter().max()) {
        (Some(&min), Some(&max)) if !(has_open && max <= FRET_REACH + 1) => min,
        _ => 1,
    }
}
