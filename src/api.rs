//! # Public API
//!
//! Entry points for the fingering engine.
//!
//! ## Functions
//!
//! - [`parse_chord_symbol()`](crate::parse_chord_symbol) - Chord string to [`ChordSymbol`]
//! - [`generate_fingering()`] - Best single fingering for a root and quality
//! - [`generate_fingerings()`] - Full ranked list, merged with caller fingerings
//! - [`transpose_chord_symbol()`](crate::transpose_chord_symbol) - Shift a chord symbol
//! - [`transpose_fingering()`] - Shift a fingering along the neck
//! - [`validate_fingering_dataset()`](crate::validate_fingering_dataset) - Lint fingering records
//! - [`generate_tab_notation()`] - TAB lines for a chord symbol
//!
//! Functions that depend on tunables use [`EngineConfig::default()`]; each has
//! a `_with_config` twin taking an explicit configuration.
//!
//! ## Typical Usage
//!
//! ```rust
//! use fretwork::{generate_fingerings, parse_chord_symbol, transpose_chord_symbol};
//!
//! let symbol = parse_chord_symbol("G/B")?;
//! let fingerings = generate_fingerings(&symbol, None, &[]);
//! for line in fingerings[0].tab_lines() {
//!     println!("{}", line);
//! }
//!
//! assert_eq!(transpose_chord_symbol("G/B", 2)?, "A/C#");
//! # Ok::<(), fretwork::ChordError>(())
//! ```
//!
//! All functions are pure: they hold no state between calls and are safe to
//! call from several threads at once.

use crate::aggregate::{aggregate, FingeringRequest};
use crate::caged::{caged_form, CagedForm};
use crate::config::EngineConfig;
use crate::error::ChordError;
use crate::fingering::Fingering;
use crate::pitch::PitchClass;
use crate::quality::Quality;
use crate::symbol::{parse_chord_symbol, ChordSymbol};
use crate::transpose::shift_fingering;
use crate::voicing::search_voicings;

/// Best single fingering for `root` + `quality`.
///
/// The tightest four-string search result, or the first CAGED form (C, A, G,
/// E, D order) when the search finds nothing.
///
/// # Example
/// ```rust
/// use fretwork::{generate_fingering, pitch::PitchClass, quality::Quality};
///
/// let f = generate_fingering(PitchClass::C, Quality::HalfDiminished).unwrap();
/// assert_eq!(f.frets, [Some(8), Some(7), Some(8), Some(8), None, None]);
/// assert_eq!(f.base_fret, 7);
/// ```
pub fn generate_fingering(root: PitchClass, quality: Quality) -> Option<Fingering> {
    generate_fingering_with_config(root, quality, &EngineConfig::default())
}

/// [`generate_fingering()`] with an explicit configuration.
pub fn generate_fingering_with_config(
    root: PitchClass,
    quality: Quality,
    config: &EngineConfig,
) -> Option<Fingering> {
    let name = ChordSymbol::new(root, quality).to_string();
    let mut best = search_voicings(root, quality, &config.search, &config.fretboard)
        .into_iter()
        .next()
        .or_else(|| {
            CagedForm::ALL
                .iter()
                .find_map(|&form| caged_form(root, quality, form, &name, &config.fretboard))
        })?;
    best.is_default = true;
    Some(best)
}

/// Ranked, de-duplicated fingerings for a chord.
///
/// `preference` is the user's saved fingering, if any; `database` holds
/// curated fingerings for this exact chord. Both are read-only inputs. An
/// empty result means no fingering is available.
///
/// # Example
/// ```rust
/// use fretwork::{generate_fingerings, parse_chord_symbol};
///
/// let symbol = parse_chord_symbol("Cm7-5")?;
/// let fingerings = generate_fingerings(&symbol, None, &[]);
/// assert_eq!(fingerings[0].id, "Cm7-5-C-open");
/// assert_eq!(fingerings.iter().filter(|f| f.is_default).count(), 1);
/// # Ok::<(), fretwork::ChordError>(())
/// ```
pub fn generate_fingerings(
    symbol: &ChordSymbol,
    preference: Option<&Fingering>,
    database: &[Fingering],
) -> Vec<Fingering> {
    generate_fingerings_with_config(symbol, preference, database, &EngineConfig::default())
}

/// [`generate_fingerings()`] with an explicit configuration.
pub fn generate_fingerings_with_config(
    symbol: &ChordSymbol,
    preference: Option<&Fingering>,
    database: &[Fingering],
    config: &EngineConfig,
) -> Vec<Fingering> {
    aggregate(&FingeringRequest {
        symbol: *symbol,
        preference,
        database,
        config,
    })
}

/// Move a fingering by `semitones`; `None` when it would leave the fretboard.
///
/// Shifts that are a multiple of 12 return the fingering unchanged.
pub fn transpose_fingering(fingering: &Fingering, semitones: i32) -> Option<Fingering> {
    transpose_fingering_with_config(fingering, semitones, &EngineConfig::default())
}

/// [`transpose_fingering()`] with an explicit configuration.
pub fn transpose_fingering_with_config(
    fingering: &Fingering,
    semitones: i32,
    config: &EngineConfig,
) -> Option<Fingering> {
    shift_fingering(fingering, semitones, &config.fretboard)
}

/// TAB lines (high e to low E) of the best fingering for a chord symbol.
///
/// Empty when the chord has no fingering.
///
/// # Errors
/// Returns the parse error for an unrecognized chord symbol.
pub fn generate_tab_notation(text: &str) -> Result<Vec<String>, ChordError> {
    let symbol = parse_chord_symbol(text)?;
    let lines = generate_fingerings(&symbol, None, &[])
        .first()
        .map(Fingering::tab_lines)
        .unwrap_or_default();
    Ok(lines)
}
