//! Difficulty classification for finished fingerings.

use crate::fingering::{Difficulty, Fingering};

/// Classify a fingering as easy, medium or hard.
///
/// - `Hard`: pressed span of 3 or more frets, a barre over 4+ strings, or base fret 7+
/// - `Easy`: base fret 1 (or open), no barre, pressed span of at most 2
/// - `Medium`: everything else
pub fn classify(fingering: &Fingering) -> Difficulty {
    let span = fingering.pressed_span();
    let barre_strings = fingering
        .barre_strings
        .map(|(low, high)| high.saturating_sub(low) + 1)
        .unwrap_or(0);

    if span >= 3 || barre_strings >= 4 || fingering.base_fret >= 7 {
        Difficulty::Hard
    } else if fingering.base_fret <= 1 && fingering.barre_at.is_none() && span <= 2 {
        Difficulty::Easy
    } else {
        Difficulty::Medium
    }
}
