//! Integration tests for the fretwork engine
//!
//! Exercises the public API end to end: parsing, generation, transposition and
//! dataset validation.

use fretwork::dataset::validate_source;
use fretwork::pitch::{note_at, required_pitch_classes, PitchClass};
use fretwork::quality::Quality;
use fretwork::validate::check_invariants;
use fretwork::{
    generate_fingering, generate_fingerings, generate_tab_notation, parse_chord_symbol,
    transpose_chord_symbol, transpose_fingering, validate_fingering_dataset, ChordSymbol,
    Difficulty, EngineConfig, FaultKind, Fingering,
};

const SHARP_ROOTS: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

fn frets(values: [i8; 6]) -> [Option<u8>; 6] {
    values.map(|v| if v < 0 { None } else { Some(v as u8) })
}

fn record(frets_in: [i8; 6], fingers: [i8; 6], base_fret: u8) -> Fingering {
    let frets_out = frets(frets_in);
    Fingering {
        id: "record".to_string(),
        frets: frets_out,
        fingers: frets(fingers),
        barre_at: None,
        barre_strings: None,
        base_fret,
        muted: frets_out.map(|f| f.is_none()),
        is_default: false,
        difficulty: Difficulty::Medium,
    }
}

fn all_symbols() -> Vec<ChordSymbol> {
    let mut symbols = Vec::new();
    for root in 0..12 {
        for quality in Quality::ALL {
            symbols.push(ChordSymbol::new(PitchClass::new(root), quality));
        }
    }
    symbols
}

#[test]
fn test_every_fingering_covers_its_chord() {
    for symbol in all_symbols() {
        let required = required_pitch_classes(symbol.root, symbol.quality);
        let fingerings = generate_fingerings(&symbol, None, &[]);
        assert!(!fingerings.is_empty(), "no fingering for {}", symbol);
        for fingering in &fingerings {
            assert!(
                fingering.covers(&required),
                "{} ({}) misses a chord tone: {:?}",
                fingering.id,
                symbol,
                fingering.frets
            );
        }
    }
}

#[test]
fn test_every_fingering_is_playable() {
    for symbol in all_symbols() {
        for fingering in generate_fingerings(&symbol, None, &[]) {
            let faults = check_invariants(&fingering);
            assert!(faults.is_empty(), "{} breaks {:?}", fingering.id, faults);
            for finger in fingering.fingers.iter().flatten() {
                assert!((1..=4).contains(finger));
            }
        }
    }
}

#[test]
fn test_exactly_one_default() {
    for symbol in all_symbols() {
        let fingerings = generate_fingerings(&symbol, None, &[]);
        assert!(fingerings[0].is_default, "{}", symbol);
        assert_eq!(fingerings.iter().filter(|f| f.is_default).count(), 1);
    }
}

#[test]
fn test_generation_is_deterministic() {
    let database = vec![Fingering::from_frets("db", frets([3, 0, 0, 0, 2, 3])).unwrap()];
    for text in ["C", "G", "Cm7-5", "F#dim7", "Bb9", "E7+9", "G/B"] {
        let symbol = parse_chord_symbol(text).unwrap();
        let first = generate_fingerings(&symbol, None, &database);
        let second = generate_fingerings(&symbol, None, &database);
        assert_eq!(first, second, "{}", text);
    }
}

#[test]
fn test_layouts_are_unique() {
    for symbol in all_symbols() {
        let fingerings = generate_fingerings(&symbol, None, &[]);
        for (i, a) in fingerings.iter().enumerate() {
            for b in &fingerings[i + 1..] {
                assert_ne!(a.layout(), b.layout(), "{} duplicates {}", a.id, b.id);
            }
        }
    }
}

#[test]
fn test_cap_applies_to_merged_list() {
    let symbol = parse_chord_symbol("C").unwrap();
    let config = EngineConfig::from_yaml("aggregate:\n  max-fingerings: 4\n").unwrap();
    let fingerings = fretwork::generate_fingerings_with_config(&symbol, None, &[], &config);
    assert_eq!(fingerings.len(), 4);
}

#[test]
fn test_generate_fingering_half_diminished() {
    let fingering = generate_fingering(PitchClass::C, Quality::HalfDiminished).unwrap();
    let pcs: Vec<u8> = fingering.pitch_classes().iter().map(|p| p.value()).collect();
    for required in [0, 3, 6, 10] {
        assert!(pcs.contains(&required), "missing {} in {:?}", required, pcs);
    }
    assert_eq!(fingering.frets, frets([8, 7, 8, 8, -1, -1]));
    assert_eq!(fingering.fingers, [Some(2), Some(1), Some(2), Some(2), None, None]);
    assert_eq!(fingering.barre_at, None);
    assert_eq!(fingering.difficulty, Difficulty::Hard);
}

#[test]
fn test_generate_fingering_falls_back_to_caged() {
    // five chord tones never fit on four strings
    let fingering = generate_fingering(PitchClass::C, Quality::Ninth).unwrap();
    assert_eq!(fingering.id, "C9-C-open");

    for root in 0..12 {
        for quality in Quality::ALL {
            let root = PitchClass::new(root);
            let fingering = generate_fingering(root, quality);
            assert!(fingering.is_some(), "{}{}", root, quality.suffix());
            assert!(fingering.unwrap().covers(&required_pitch_classes(root, quality)));
        }
    }
}

#[test]
fn test_slash_chords_put_bass_lowest() {
    for text in ["C/G", "C/E", "G/B", "A/G", "D/F#"] {
        let symbol = parse_chord_symbol(text).unwrap();
        let fingerings = generate_fingerings(&symbol, None, &[]);
        assert!(!fingerings.is_empty(), "{}", text);
        for fingering in &fingerings {
            let lowest = (0..6).rev().find(|&s| fingering.frets[s].is_some()).unwrap();
            let bass = note_at(lowest, fingering.frets[lowest].unwrap());
            assert_eq!(Some(bass), symbol.bass_note, "{} in {}", fingering.id, text);
            assert!(fingering.covers(&symbol.required_pitch_classes()));
        }
    }
}

#[test]
fn test_transpose_identity() {
    for root in SHARP_ROOTS {
        for quality in Quality::ALL {
            let text = format!("{}{}", root, quality.suffix());
            assert_eq!(transpose_chord_symbol(&text, 0).unwrap(), text);
            assert_eq!(transpose_chord_symbol(&text, 12).unwrap(), text);
        }
    }
    assert_eq!(transpose_chord_symbol("Bbmaj7/D", 12).unwrap(), "Bbmaj7/D");
}

#[test]
fn test_transpose_round_trip() {
    for root in SHARP_ROOTS {
        for quality in Quality::ALL {
            let text = format!("{}{}", root, quality.suffix());
            for n in -13..=13 {
                let there = transpose_chord_symbol(&text, n).unwrap();
                let back = transpose_chord_symbol(&there, -n).unwrap();
                assert_eq!(back, text, "{} by {} gave {}", text, n, there);
            }
        }
    }
    let there = transpose_chord_symbol("Ebm7/Db", 5).unwrap();
    assert_eq!(there, "Abm7/Gb");
    assert_eq!(transpose_chord_symbol(&there, -5).unwrap(), "Ebm7/Db");
}

#[test]
fn test_transpose_round_trip_keeps_pitch_classes() {
    // flat spellings may come back sharp, but the chord itself never changes
    for text in ["Dbmaj7/Ab", "Db/Ab", "Bbm7b5", "Ebø7", "Abmaj9", "Gb6/9", "Bb5"] {
        let original = parse_chord_symbol(text).unwrap();
        for n in [-13, -7, -1, 1, 5, 11, 13] {
            let there = transpose_chord_symbol(text, n).unwrap();
            let back = transpose_chord_symbol(&there, -n).unwrap();
            assert_eq!(
                parse_chord_symbol(&back).unwrap(),
                original,
                "{} by {} gave {} then {}",
                text,
                n,
                there,
                back
            );
        }
    }
    assert_eq!(transpose_chord_symbol("Db/Ab", 1).unwrap(), "D/A");
    assert_eq!(transpose_chord_symbol("D/A", -1).unwrap(), "C#/G#");
}

#[test]
fn test_power_chords_end_to_end() {
    let symbol = parse_chord_symbol("Bb5").unwrap();
    assert_eq!(symbol.root, PitchClass::new(10));
    assert_eq!(symbol.quality, Quality::Power);
    let fingerings = generate_fingerings(&symbol, None, &[]);
    assert!(!fingerings.is_empty());
    for fingering in &fingerings {
        assert!(fingering.covers(&[PitchClass::new(10), PitchClass::F]));
    }
    assert_eq!(transpose_chord_symbol("Bb5", 1).unwrap(), "B5");
}

#[test]
fn test_transpose_am7_to_cm7() {
    assert_eq!(transpose_chord_symbol("Am7", 3).unwrap(), "Cm7");
}

#[test]
fn test_transpose_fingering_identity_and_bounds() {
    let symbol = parse_chord_symbol("G").unwrap();
    for fingering in generate_fingerings(&symbol, None, &[]) {
        assert_eq!(transpose_fingering(&fingering, 0).as_ref(), Some(&fingering));
        assert_eq!(transpose_fingering(&fingering, 12).as_ref(), Some(&fingering));
        if let Some(moved) = transpose_fingering(&fingering, 2) {
            assert!(check_invariants(&moved).is_empty());
            let expected = symbol.root.transpose(2);
            assert!(moved.covers(&required_pitch_classes(expected, symbol.quality)));
        }
    }
    let open_g = Fingering::from_frets("G", frets([3, 0, 0, 0, 2, 3])).unwrap();
    assert!(transpose_fingering(&open_g, -1).is_none());
}

#[test]
fn test_validator_scenarios() {
    // 1. open C: three fingers inside the window
    let clean = record([0, 1, 0, 2, 3, -1], [-1, 1, -1, 2, 3, -1], 1);
    // 2. repeated finger values count once
    let barre = record([3, 5, 5, 5, 3, -1], [1, 3, 3, 3, 2, -1], 3);
    // 3. fret 8 is far outside 1-4
    let wide = record([0, 8, 0, 2, 3, -1], [-1, 4, -1, 2, 3, -1], 1);
    // 4. there is no fifth finger
    let bad_finger = record([0, 1, 0, 2, 3, -1], [-1, 5, -1, 2, 3, -1], 1);
    // five distinct fingers on six strings
    let crowded = record([3, 5, 4, 5, 6, 6], [1, 3, 2, 3, 4, 5], 3);

    let report = validate_fingering_dataset(&[clean, barre, wide, bad_finger, crowded]);
    assert_eq!(report.records_analyzed, 5);

    let too_many: Vec<usize> = report.by_kind(FaultKind::TooManyFingers).map(|i| i.record).collect();
    assert_eq!(too_many, vec![4]);
    let range: Vec<usize> = report.by_kind(FaultKind::FretRangeExceeded).map(|i| i.record).collect();
    assert_eq!(range, vec![2]);
    let invalid: Vec<usize> = report.by_kind(FaultKind::InvalidFingerValue).map(|i| i.record).collect();
    assert_eq!(invalid, vec![3, 4]);
}

#[test]
fn test_validator_on_source_text() {
    let source = r#"
    { id: 'ok', frets: [0, 1, 0, 2, 3, null], fingers: [null, 1, null, 2, 3, null], baseFret: 1 },
    { id: 'wide', frets: [0, 8, 0, 2, 3, null], fingers: [null, 4, null, 2, 3, null], baseFret: 1 },
    { id: 'five', frets: [0, 1, 0, 2, 3, null], fingers: [null, 5, null, 2, 3, null], baseFret: 1 },
    { id: 'short', frets: [0, 1, 0], fingers: [null, 1, null], baseFret: 1 },
    "#;
    let report = validate_source(source).unwrap();
    assert_eq!(report.records_analyzed, 3);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.total(), 2);
    assert_eq!(report.by_kind(FaultKind::FretRangeExceeded).next().unwrap().chord_id, "wide");
    assert_eq!(report.by_kind(FaultKind::InvalidFingerValue).next().unwrap().chord_id, "five");
}

#[test]
fn test_generated_fingerings_pass_the_validator() {
    let fingerings: Vec<Fingering> = all_symbols()
        .iter()
        .flat_map(|symbol| generate_fingerings(symbol, None, &[]))
        .collect();
    let report = validate_fingering_dataset(&fingerings);
    assert!(report.is_clean(), "{:?}", report.issues.first());
}

#[test]
fn test_preference_and_database_merge() {
    let symbol = parse_chord_symbol("G").unwrap();
    let curated = Fingering::from_frets("curated-g", frets([3, 3, 0, 0, 2, 3])).unwrap();
    let preferred = Fingering::from_frets("mine", frets([3, 0, 0, 0, 2, 3])).unwrap();

    let fingerings = generate_fingerings(&symbol, Some(&preferred), &[curated]);
    // the saved layout matches the G shape, which moves to the front
    assert_eq!(fingerings[0].id, "G-G-open");
    assert_eq!(fingerings[1].id, "curated-g");
    assert!(fingerings[0].is_default);
    assert!(!fingerings[1].is_default);
}

#[test]
fn test_parse_errors() {
    assert!(matches!(
        parse_chord_symbol("H7"),
        Err(fretwork::ChordError::UnrecognizedRoot { .. })
    ));
    assert!(matches!(
        parse_chord_symbol("Cmaj13"),
        Err(fretwork::ChordError::UnrecognizedQuality { .. })
    ));
    assert!(generate_tab_notation("Zz").is_err());
}

#[test]
fn test_tab_notation() {
    let tab = generate_tab_notation("C").unwrap();
    assert_eq!(
        tab,
        vec!["e|---0--", "B|---1--", "G|---0--", "D|---2--", "A|---3--", "E|---x--"]
    );
}

#[test]
fn test_fingering_json_round_trip_shape() {
    let fingering = generate_fingering(PitchClass::G, Quality::Major).unwrap();
    let json = serde_json::to_string(&fingering).unwrap();
    assert!(json.contains("\"baseFret\""));
    assert!(json.contains("\"isDefault\":true"));
    let back: Fingering = serde_json::from_str(&json).unwrap();
    assert_eq!(back, fingering);
}
