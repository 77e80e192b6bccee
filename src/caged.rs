//! # CAGED Form Generator
//!
//! Produces up to five movable-shape fingerings per chord, one for each of the
//! open-position shapes C, A, G, E and D.
//!
//! ## Templates
//! Each shape is stored as an open-position fret layout anchored at the
//! shape's home root (C shape at C, A shape at A, ...). For a requested root the
//! template is shifted by `(root - home) mod 12` frets: every sounding string
//! moves, so template open strings become fretted notes at the offset. Muted
//! strings stay muted.
//!
//! Not every quality has all five shapes. Shapes without a template are simply
//! left out; five-note qualities in particular only have the shapes that fit
//! all chord tones.
//!
//! ## Example
//! ```rust
//! use fretwork::caged::{generate_caged_forms, CagedForm};
//! use fretwork::config::FretboardConfig;
//! use fretwork::parse_chord_symbol;
//!
//! let forms = generate_caged_forms(&parse_chord_symbol("A").unwrap(), &FretboardConfig::default());
//! assert_eq!(forms[1].id, "A-A-open");
//! assert_eq!(forms[3].id, "A-E-barre");
//! assert_eq!(forms[3].frets, [Some(5), Some(5), Some(6), Some(7), Some(7), Some(5)]);
//! assert_eq!(CagedForm::E.home_root().value(), 4);
//! ```

use std::fmt;

use tracing::debug;

use crate::config::FretboardConfig;
use crate::fingering::Fingering;
use crate::pitch::{PitchClass, STRING_COUNT};
use crate::quality::Quality;
use crate::symbol::ChordSymbol;
use crate::voicing::revoice_over_bass;

/// Muted string in a template.
const X: i8 = -1;

type Template = [i8; STRING_COUNT];

/// One of the five CAGED shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CagedForm {
    C,
    A,
    G,
    E,
    D,
}

impl CagedForm {
    /// Shapes in generation order.
    pub const ALL: [CagedForm; 5] = [CagedForm::C, CagedForm::A, CagedForm::G, CagedForm::E, CagedForm::D];

    /// Root the template is written for.
    pub fn home_root(self) -> PitchClass {
        match self {
            CagedForm::C => PitchClass::C,
            CagedForm::A => PitchClass::A,
            CagedForm::G => PitchClass::G,
            CagedForm::E => PitchClass::E,
            CagedForm::D => PitchClass::D,
        }
    }

    pub fn letter(self) -> char {
        match self {
            CagedForm::C => 'C',
            CagedForm::A => 'A',
            CagedForm::G => 'G',
            CagedForm::E => 'E',
            CagedForm::D => 'D',
        }
    }
}

impl fmt::Display for CagedForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Generate the CAGED forms of a chord in C, A, G, E, D order.
///
/// Slash chords are re-voiced over their bass; shapes that cannot take the
/// bass are dropped. Shapes reaching past `max-fret` are dropped too.
pub fn generate_caged_forms(symbol: &ChordSymbol, fretboard: &FretboardConfig) -> Vec<Fingering> {
    let name = symbol.to_string();
    let forms: Vec<Fingering> = CagedForm::ALL
        .iter()
        .filter_map(|&form| {
            let fingering = caged_form(symbol.root, symbol.quality, form, &name, fretboard)?;
            match symbol.bass_note {
                Some(_) => revoice_over_bass(&fingering, symbol, fretboard),
                None => Some(fingering),
            }
        })
        .collect();

    debug!(chord = %name, forms = forms.len(), "generated CAGED forms");
    forms
}

/// A single CAGED shape moved to `root`, if the quality has one.
pub fn caged_form(
    root: PitchClass,
    quality: Quality,
    form: CagedForm,
    name: &str,
    fretboard: &FretboardConfig,
) -> Option<Fingering> {
    let template = template(quality, form)?;
    let offset = form.home_root().interval_to(root);

    let frets = template.map(|f| if f < 0 { None } else { Some(f as u8 + offset) });
    if frets.iter().flatten().any(|&f| f > fretboard.max_fret) {
        return None;
    }

    let position = if offset == 0 { "open" } else { "barre" };
    Fingering::from_frets(format!("{}-{}-{}", name, form, position), frets)
}

/// Open-position template for a shape (string 0 = high e).
fn template(quality: Quality, form: CagedForm) -> Option<Template> {
    use CagedForm::*;
    use Quality::*;

    let frets = match (quality, form) {
        (Major, C) => [0, 1, 0, 2, 3, X],
        (Major, A) => [0, 2, 2, 2, 0, X],
        (Major, G) => [3, 0, 0, 0, 2, 3],
        (Major, E) => [0, 0, 1, 2, 2, 0],
        (Major, D) => [2, 3, 2, 0, X, X],

        (Minor, C) => [X, 1, 0, 1, 3, X],
        (Minor, A) => [0, 1, 2, 2, 0, X],
        (Minor, G) => [3, 3, 0, 0, 1, 3],
        (Minor, E) => [0, 0, 0, 2, 2, 0],
        (Minor, D) => [1, 3, 2, 0, X, X],

        (Dominant7, C) => [3, 1, 3, 2, 3, X],
        (Dominant7, A) => [0, 2, 0, 2, 0, X],
        (Dominant7, G) => [1, 0, 0, 0, 2, 3],
        (Dominant7, E) => [0, 0, 1, 0, 2, 0],
        (Dominant7, D) => [2, 1, 2, 0, X, X],

        (Minor7, C) => [3, 1, 3, 1, 3, X],
        (Minor7, A) => [0, 1, 0, 2, 0, X],
        (Minor7, G) => [1, 3, 0, 0, 1, 3],
        (Minor7, E) => [0, 0, 0, 0, 2, 0],
        (Minor7, D) => [1, 1, 2, 0, X, X],

        (Major7, C) => [0, 0, 0, 2, 3, X],
        (Major7, A) => [0, 2, 1, 2, 0, X],
        (Major7, G) => [2, 0, 0, 0, 2, 3],
        (Major7, E) => [0, 0, 1, 1, 2, 0],
        (Major7, D) => [2, 2, 2, 0, X, X],

        (HalfDiminished, C) => [2, 1, 3, 1, 3, X],
        (HalfDiminished, A) => [X, 1, 0, 1, 0, X],
        (HalfDiminished, G) => [1, 2, 0, 3, 1, 3],
        (HalfDiminished, E) => [0, 3, 0, 2, 1, 0],
        (HalfDiminished, D) => [1, 1, 1, 0, X, X],

        (Diminished | MinorFlat5, C) => [2, 1, X, 1, 3, X],
        (Diminished | MinorFlat5, A) => [X, 1, 2, 1, 0, X],
        (Diminished | MinorFlat5, G) => [X, 2, 0, X, 1, 3],
        (Diminished | MinorFlat5, E) => [X, X, 0, 2, 1, 0],
        (Diminished | MinorFlat5, D) => [1, 3, 1, 0, X, X],

        (Diminished7, C) => [2, 1, 2, 1, 3, X],
        (Diminished7, A) => [2, 1, 2, 1, 0, X],
        (Diminished7, G) => [0, 2, 0, 2, 1, 3],
        (Diminished7, E) => [0, 2, 0, 2, 1, 0],
        (Diminished7, D) => [1, 0, 1, 0, X, X],

        (Augmented, C) => [0, 1, 1, 2, 3, X],
        (Augmented, A) => [1, 2, 2, 3, 0, X],
        (Augmented, G) => [3, 0, 0, 1, 2, 3],
        (Augmented, E) => [0, 1, 1, 2, 3, 0],
        (Augmented, D) => [2, 3, 3, 0, X, X],

        (Sus2, C) => [3, 1, 0, 0, 3, X],
        (Sus2, A) => [0, 0, 2, 2, 0, X],
        (Sus2, G) => [3, 3, 2, 0, 0, 3],
        (Sus2, E) => [2, 0, X, 2, 2, 0],
        (Sus2, D) => [0, 3, 2, 0, X, X],

        (Sus4, C) => [1, 1, 0, 3, 3, X],
        (Sus4, A) => [0, 3, 2, 2, 0, X],
        (Sus4, G) => [3, 1, 0, 0, 3, 3],
        (Sus4, E) => [0, 0, 2, 2, 2, 0],
        (Sus4, D) => [3, 3, 2, 0, X, X],

        (SevenSus4, C) => [3, 1, 3, 3, 3, X],
        (SevenSus4, A) => [0, 3, 0, 2, 0, X],
        (SevenSus4, G) => [1, 1, 0, 0, 3, 3],
        (SevenSus4, E) => [0, 0, 2, 0, 2, 0],
        (SevenSus4, D) => [3, 1, 2, 0, X, X],

        (Sixth, C) => [3, 1, 2, 2, 3, X],
        (Sixth, A) => [2, 2, 2, 2, 0, X],
        (Sixth, G) => [0, 0, 0, 0, 2, 3],
        (Sixth, E) => [0, 2, 1, 2, 2, 0],
        (Sixth, D) => [2, 0, 2, 0, X, X],

        (MinorSixth, C) => [3, 1, 2, 1, 3, X],
        (MinorSixth, A) => [2, 1, 2, 2, 0, X],
        (MinorSixth, G) => [0, 3, 0, 0, 1, 3],
        (MinorSixth, E) => [0, 2, 0, 2, 2, 0],
        (MinorSixth, D) => [1, 0, 2, 0, X, X],

        (MinorMajor7, C) => [3, 0, 0, 1, 3, X],
        (MinorMajor7, A) => [0, 1, 1, 2, 0, X],
        (MinorMajor7, G) => [2, 3, 0, 0, 1, 3],
        (MinorMajor7, E) => [0, 0, 0, 1, 2, 0],
        (MinorMajor7, D) => [1, 2, 2, 0, X, X],

        (Ninth, C) => [3, 3, 3, 2, 3, X],
        (Ninth, G) => [3, 3, 2, 3, 2, 3],
        (Ninth, E) => [2, 0, 1, 0, 2, 0],

        (Minor9, C) => [3, 3, 3, 1, 3, X],
        (Minor9, G) => [3, 3, 3, 3, 0, 3],
        (Minor9, E) => [2, 0, 0, 0, 2, 0],

        (Major9, C) => [0, 0, 0, 0, 3, X],
        (Major9, G) => [2, 0, 0, 0, 0, 3],
        (Major9, E) => [2, 0, 1, 1, 2, 0],

        (NineSus4, C) => [3, 3, 3, 3, 3, X],
        (NineSus4, A) => [0, 0, 0, 0, 0, X],
        (NineSus4, G) => [3, 3, 2, 3, 3, 3],
        (NineSus4, E) => [2, 0, 2, 0, 0, 0],

        (Add9, C) => [0, 3, 0, 0, 3, X],
        (Add9, G) => [3, 0, 0, 0, 0, 3],
        (Add9, E) => [2, 0, 1, 2, 2, 0],

        (SixNine, C) => [3, 3, 2, 2, 3, X],
        (SixNine, G) => [0, 0, 0, 0, 0, 3],
        (SixNine, E) => [2, 2, 1, 2, 2, 0],

        (MinorSixNine, C) => [3, 3, 2, 1, 3, X],
        (MinorSixNine, G) => [0, 3, 3, 0, 0, 3],
        (MinorSixNine, E) => [2, 2, 0, 2, 2, 0],

        (Flat5, C) => [2, 1, X, 2, 3, X],
        (Flat5, A) => [X, 2, 2, 1, 0, X],
        (Flat5, G) => [3, 2, 0, X, 2, 3],
        (Flat5, E) => [X, X, 1, 2, 1, 0],
        (Flat5, D) => [2, 3, 1, 0, X, X],

        (SevenFlat5, C) => [2, 1, 3, 2, 3, X],
        (SevenFlat5, A) => [3, 2, 0, 1, 0, X],
        (SevenFlat5, G) => [3, 2, 0, 3, 2, 3],
        (SevenFlat5, E) => [0, 3, 1, 0, 1, 0],
        (SevenFlat5, D) => [2, 1, 1, 0, X, X],

        (SevenSharp5, A) => [3, 2, 0, 3, 0, X],
        (SevenSharp5, G) => [1, 0, 0, 1, 2, 3],
        (SevenSharp5, E) => [0, 1, 1, 0, 3, 0],
        (SevenSharp5, D) => [2, 1, 3, 0, X, X],

        (Major7Flat5, C) => [2, 0, X, 2, 3, X],
        (Major7Flat5, A) => [X, 2, 1, 1, 0, X],
        (Major7Flat5, G) => [2, 2, 0, X, 2, 3],
        (Major7Flat5, E) => [X, X, 1, 1, 1, 0],
        (Major7Flat5, D) => [2, 2, 1, 0, X, X],

        (Minor7Sharp5, A) => [1, 1, 0, 3, 0, X],
        (Minor7Sharp5, G) => [1, X, 0, 1, 1, 3],
        (Minor7Sharp5, E) => [0, 3, 0, 0, 3, 0],
        (Minor7Sharp5, D) => [1, 1, 3, 0, X, X],

        (SevenSharp9, G) => [3, 3, 3, 3, 2, 3],
        (SevenSharp9, E) => [3, 0, 1, 0, 2, 0],

        (Quartal, C) => [1, 1, 3, 3, 3, X],
        (Quartal, A) => [3, 3, 0, 0, 0, X],
        (Quartal, G) => [1, 1, 0, 3, 3, 3],
        (Quartal, E) => [0, 3, 2, 0, 0, 0],
        (Quartal, D) => [X, 1, 0, 0, X, X],

        (Blackadder, C) => [2, 3, 3, 0, 3, X],
        (Blackadder, A) => [X, 0, 0, 1, 0, X],
        (Blackadder, G) => [3, 2, 0, 3, 0, 3],
        (Blackadder, E) => [2, 3, 3, 0, 1, 0],
        (Blackadder, D) => [0, 1, 1, 0, X, X],

        // root on the 5th and 6th strings only
        (Power, A) => [X, X, 2, 2, 0, X],
        (Power, E) => [X, X, X, 2, 2, 0],

        _ => return None,
    };
    Some(frets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::required_pitch_classes;

    fn frets(values: [i8; 6]) -> [Option<u8>; 6] {
        values.map(|v| if v < 0 { None } else { Some(v as u8) })
    }

    fn forms(text: &str) -> Vec<Fingering> {
        let symbol = crate::parse_chord_symbol(text).unwrap();
        generate_caged_forms(&symbol, &FretboardConfig::default())
    }

    #[test]
    fn test_open_c_shapes_at_home() {
        let c = forms("C");
        assert_eq!(c.len(), 5);
        assert_eq!(c[0].id, "C-C-open");
        assert_eq!(c[0].frets, frets([0, 1, 0, 2, 3, -1]));
        assert_eq!(c[1].id, "C-A-barre");
        assert_eq!(c[1].frets, frets([3, 5, 5, 5, 3, -1]));
    }

    #[test]
    fn test_shift_turns_opens_into_frets() {
        let f = forms("F");
        let e_shape = f.iter().find(|x| x.id == "F-E-barre").unwrap();
        assert_eq!(e_shape.frets, frets([1, 1, 2, 3, 3, 1]));
        assert_eq!(e_shape.base_fret, 1);
        assert_eq!(e_shape.barre_at, Some(1));
        assert_eq!(e_shape.barre_strings, Some((0, 5)));
    }

    #[test]
    fn test_missing_templates_are_omitted() {
        let ninths = forms("D9");
        let ids: Vec<&str> = ninths.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["D9-C-barre", "D9-G-barre", "D9-E-barre"]);

        assert_eq!(forms("C7+9").len(), 2);
    }

    #[test]
    fn test_minor_flat_five_shares_diminished_shapes() {
        let dim: Vec<_> = forms("Bdim").into_iter().map(|f| f.frets).collect();
        let mb5: Vec<_> = forms("Bm-5").into_iter().map(|f| f.frets).collect();
        assert_eq!(dim, mb5);
    }

    #[test]
    fn test_every_template_covers_exactly_its_chord() {
        for quality in Quality::ALL {
            for form in CagedForm::ALL {
                let Some(fingering) =
                    caged_form(form.home_root(), quality, form, "t", &FretboardConfig::default())
                else {
                    continue;
                };
                let mut required = required_pitch_classes(form.home_root(), quality);
                required.sort();
                assert_eq!(fingering.pitch_classes(), required, "{:?} {:?}", quality, form);
            }
        }
    }

    #[test]
    fn test_power_chord_shapes() {
        let e5 = forms("E5");
        let ids: Vec<&str> = e5.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["E5-A-barre", "E5-E-open"]);
        assert_eq!(e5[1].frets, frets([-1, -1, -1, 2, 2, 0]));

        let bb5 = forms("Bb5");
        assert_eq!(bb5[0].frets, frets([-1, -1, 3, 3, 1, -1]));
        assert_eq!(bb5[1].frets, frets([-1, -1, -1, 8, 8, 6]));
        assert_eq!(bb5[1].base_fret, 6);
    }

    #[test]
    fn test_short_fretboard_drops_high_shapes() {
        let fretboard = FretboardConfig { max_fret: 12 };
        let symbol = crate::parse_chord_symbol("B").unwrap();
        let ids: Vec<String> = generate_caged_forms(&symbol, &fretboard)
            .into_iter()
            .map(|f| f.id)
            .collect();
        // the C shape moved to B sits at frets 11-14
        assert!(!ids.iter().any(|id| id == "B-C-barre"));
        assert!(ids.iter().any(|id| id == "B-A-barre"));
    }

    #[test]
    fn test_slash_chord_revoices_shapes() {
        let g_over_b = forms("G/B");
        let g_shape = g_over_b.iter().find(|f| f.id == "G/B-G-open").unwrap();
        assert_eq!(g_shape.frets, frets([3, 0, 0, 0, 2, -1]));

        let c_over_e = forms("C/E");
        assert_eq!(c_over_e[0].frets, frets([0, 1, 0, 2, 3, 0]));
    }
}
