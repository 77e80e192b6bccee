//! # Voicing Search Engine
//!
//! Finds playable fret layouts for a chord on the four highest strings
//! (indices 0-3), with the two bass strings muted.
//!
//! ## Algorithm
//! For every window start `w` from 0 to `search.max-window-start`:
//! 1. Walk strings 0..4. Each string takes the first required pitch class it
//!    can reach at a fret in `w..=w+3` (or one octave up when the lower fret
//!    falls below the window). Pitch classes not yet covered are tried before
//!    covered ones, each group in interval order
//! 2. A string with no reachable pitch class invalidates the window
//! 3. The covered set must equal the required set; missing any chord tone
//!    invalidates the window
//! 4. Record the layout with its span (highest minus lowest fret, opens included)
//! 5. Drop layouts that reach past `fretboard.max-fret`
//!
//! Candidates are sorted by span, then by window start. A layout found from
//! several windows is reported once. Five-note qualities cannot fit on four
//! strings and always come back empty.
//!
//! ## Slash chords
//! Slash chords are searched without their bass, then each result is re-voiced
//! with [`revoice_over_bass`].
//!
//! ## Example
//! ```rust
//! use fretwork::config::{FretboardConfig, SearchConfig};
//! use fretwork::pitch::PitchClass;
//! use fretwork::quality::Quality;
//! use fretwork::voicing::search_voicings;
//!
//! let voicings = search_voicings(
//!     PitchClass::C,
//!     Quality::HalfDiminished,
//!     &SearchConfig::default(),
//!     &FretboardConfig::default(),
//! );
//! assert_eq!(voicings[0].frets, [Some(8), Some(7), Some(8), Some(8), None, None]);
//! ```

use tracing::debug;

use crate::config::{FretboardConfig, SearchConfig};
use crate::fingering::{Fingering, FRET_REACH};
use crate::pitch::{fret_for, note_at, required_pitch_classes, PitchClass, STRING_COUNT};
use crate::quality::Quality;
use crate::symbol::ChordSymbol;

/// Strings used by the search: the four highest-pitched.
const SEARCH_STRINGS: usize = 4;

/// Minimum number of sounding strings for a re-voiced slash chord.
const MIN_SOUNDING_STRINGS: usize = 3;

struct Candidate {
    span: u8,
    window: u8,
    frets: [Option<u8>; STRING_COUNT],
}

/// Search four-string voicings for `root` + `quality`, tightest first.
pub fn search_voicings(
    root: PitchClass,
    quality: Quality,
    config: &SearchConfig,
    fretboard: &FretboardConfig,
) -> Vec<Fingering> {
    let name = ChordSymbol::new(root, quality).to_string();
    let required = required_pitch_classes(root, quality);

    let mut candidates: Vec<Candidate> = (0..=config.max_window_start)
        .filter_map(|window| search_window(&required, window))
        .filter(|c| c.frets.iter().flatten().all(|&f| f <= fretboard.max_fret))
        .collect();
    candidates.sort_by_key(|c| (c.span, c.window));

    let mut layouts: Vec<[Option<u8>; STRING_COUNT]> = Vec::new();
    for candidate in candidates {
        if !layouts.contains(&candidate.frets) {
            layouts.push(candidate.frets);
        }
    }
    if config.max_alternates > 0 {
        layouts.truncate(config.max_alternates);
    }

    let voicings: Vec<Fingering> = layouts
        .into_iter()
        .enumerate()
        .filter_map(|(i, frets)| Fingering::from_frets(format!("generated-{}-{}", name, i), frets))
        .collect();

    debug!(chord = %name, found = voicings.len(), "voicing search finished");
    voicings
}

/// Search voicings for a full chord symbol, re-voicing slash chords over their bass.
pub fn search_symbol(
    symbol: &ChordSymbol,
    config: &SearchConfig,
    fretboard: &FretboardConfig,
) -> Vec<Fingering> {
    let voicings = search_voicings(symbol.root, symbol.quality, config, fretboard);
    if symbol.bass_note.is_none() {
        return voicings;
    }

    let name = symbol.to_string();
    let mut revoiced: Vec<Fingering> = Vec::new();
    for voicing in &voicings {
        if let Some(mut fingering) = revoice_over_bass(voicing, symbol, fretboard) {
            if revoiced.iter().all(|f| f.frets != fingering.frets) {
                fingering.id = format!("generated-{}-{}", name, revoiced.len());
                revoiced.push(fingering);
            }
        }
    }
    revoiced
}

fn search_window(required: &[PitchClass], window: u8) -> Option<Candidate> {
    let mut frets = [None; STRING_COUNT];
    let mut covered: Vec<PitchClass> = Vec::with_capacity(required.len());

    for string in 0..SEARCH_STRINGS {
        let uncovered = required.iter().filter(|p| !covered.contains(p));
        let already = required.iter().filter(|p| covered.contains(p));
        let (pitch, fret) = uncovered
            .chain(already)
            .find_map(|&pitch| fret_in_window(string, pitch, window).map(|f| (pitch, f)))?;

        frets[string] = Some(fret);
        if !covered.contains(&pitch) {
            covered.push(pitch);
        }
    }

    if covered.len() != required.len() {
        return None;
    }

    let assigned: Vec<u8> = frets.iter().flatten().copied().collect();
    let span = assigned.iter().max()? - assigned.iter().min()?;
    Some(Candidate { span, window, frets })
}

fn fret_in_window(string: usize, pitch: PitchClass, window: u8) -> Option<u8> {
    let fret = fret_for(string, pitch);
    let fits = |f: u8| f >= window && f <= window + FRET_REACH;
    if fits(fret) {
        Some(fret)
    } else if fits(fret + 12) {
        Some(fret + 12)
    } else {
        None
    }
}

/// Re-voice `fingering` so the bass note of `symbol` is its lowest sounding note.
///
/// Tries adding the bass on a muted string below the shape first (open, or
/// inside the shape's 4-fret window), then falls back to muting every string
/// below the lowest one that already sounds the bass. The result must sound
/// the chord tones plus the bass on at least three strings, stay within
/// `max-fret` and be fingerable.
pub fn revoice_over_bass(
    fingering: &Fingering,
    symbol: &ChordSymbol,
    fretboard: &FretboardConfig,
) -> Option<Fingering> {
    let bass = symbol.bass_note?;
    let frets = place_bass(&fingering.layout(), bass)?;
    if frets.iter().flatten().any(|&f| f > fretboard.max_fret) {
        return None;
    }

    let revoiced = Fingering::from_frets(fingering.id.clone(), frets)?;
    if revoiced.sounding_strings() < MIN_SOUNDING_STRINGS
        || !revoiced.covers(&symbol.required_pitch_classes())
    {
        return None;
    }
    Some(revoiced)
}

/// Put `bass` on the lowest sounding string of a layout.
pub fn place_bass(frets: &[Option<u8>; STRING_COUNT], bass: PitchClass) -> Option<[Option<u8>; STRING_COUNT]> {
    let lowest = (0..STRING_COUNT).rev().find(|&s| frets[s].is_some())?;
    let lowest_fret = frets[lowest]?;
    if note_at(lowest, lowest_fret) == bass {
        return Some(*frets);
    }

    let pressed: Vec<u8> = frets.iter().flatten().copied().filter(|&f| f > 0).collect();
    let reachable = |f: u8| {
        if f == 0 {
            return true;
        }
        let low = pressed.iter().copied().min().unwrap_or(f).min(f);
        let high = pressed.iter().copied().max().unwrap_or(f).max(f);
        high - low <= FRET_REACH
    };

    for string in lowest + 1..STRING_COUNT {
        let fret = fret_for(string, bass);
        if let Some(f) = [fret, fret + 12].into_iter().find(|&f| reachable(f)) {
            let mut added = *frets;
            added[string] = Some(f);
            return Some(added);
        }
    }

    let bass_string = (0..=lowest)
        .rev()
        .find(|&s| matches!(frets[s], Some(f) if note_at(s, f) == bass))?;
    let mut trimmed = *frets;
    for fret in trimmed.iter_mut().skip(bass_string + 1) {
        *fret = None;
    }
    Some(trimmed)
}
