//! # Fingering Validator
//!
//! Read-only lint pass over fingering records. Reports every record that
//! breaks one of the physical invariants:
//!
//! | Fault                | Rule                                                       |
//! |----------------------|------------------------------------------------------------|
//! | `TooManyFingers`     | pressed strings use more than 4 distinct finger values     |
//! | `FretRangeExceeded`  | a pressed fret lies outside `baseFret..=baseFret + 3`      |
//! | `InvalidFingerValue` | a finger value outside 1-4                                 |
//!
//! The same checks guard caller-supplied fingerings in the aggregator. Faults
//! are data, never errors; the validator does not modify records.
//!
//! ## Example
//! ```rust
//! use fretwork::fingering::Fingering;
//! use fretwork::validate::{validate_fingering_dataset, FaultKind};
//!
//! let mut record = Fingering::from_frets("C", [Some(0), Some(1), Some(0), Some(2), Some(3), None]).unwrap();
//! record.fingers[1] = Some(5);
//!
//! let report = validate_fingering_dataset(&[record]);
//! assert_eq!(report.count(FaultKind::InvalidFingerValue), 1);
//! assert_eq!(report.records_analyzed, 1);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::barre::MAX_FINGER;
use crate::fingering::{Fingering, FRET_REACH};
use crate::pitch::STRING_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    TooManyFingers,
    FretRangeExceeded,
    InvalidFingerValue,
}

impl FaultKind {
    /// Fault kinds in report order.
    pub const ALL: [FaultKind; 3] = [
        FaultKind::TooManyFingers,
        FaultKind::FretRangeExceeded,
        FaultKind::InvalidFingerValue,
    ];

    pub fn title(self) -> &'static str {
        match self {
            FaultKind::TooManyFingers => "Too Many Fingers (5+ distinct fingers)",
            FaultKind::FretRangeExceeded => "Fret Range Exceeded (outside the 4-fret window)",
            FaultKind::InvalidFingerValue => "Invalid Finger Values",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FaultKind::TooManyFingers => "too_many_fingers",
            FaultKind::FretRangeExceeded => "fret_range_exceeded",
            FaultKind::InvalidFingerValue => "invalid_finger_value",
        };
        f.write_str(name)
    }
}

/// One invariant violation found in one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub kind: FaultKind,
    /// Position of the record in the scanned dataset.
    pub record: usize,
    pub chord_id: String,
    pub details: String,
    pub frets: [Option<u8>; STRING_COUNT],
    pub fingers: [Option<u8>; STRING_COUNT],
    pub base_fret: u8,
}

/// Result of a validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
    pub records_analyzed: usize,
    /// Malformed records that could not be checked.
    pub skipped: usize,
}

impl ValidationReport {
    pub fn by_kind(&self, kind: FaultKind) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |issue| issue.kind == kind)
    }

    pub fn count(&self, kind: FaultKind) -> usize {
        self.by_kind(kind).count()
    }

    pub fn total(&self) -> usize {
        self.issues.len()
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Check every record and collect the faults, grouped by kind.
pub fn validate_fingering_dataset(records: &[Fingering]) -> ValidationReport {
    let mut issues: Vec<ValidationIssue> = records
        .iter()
        .enumerate()
        .flat_map(|(index, record)| {
            check_invariants(record)
                .into_iter()
                .map(move |(kind, details)| ValidationIssue {
                    kind,
                    record: index,
                    chord_id: record.id.clone(),
                    details,
                    frets: record.frets,
                    fingers: record.fingers,
                    base_fret: record.base_fret,
                })
        })
        .collect();
    issues.sort_by_key(|issue| (issue.kind, issue.record));

    ValidationReport {
        issues,
        records_analyzed: records.len(),
        skipped: 0,
    }
}

/// Faults of a single fingering with human-readable details.
pub fn check_invariants(fingering: &Fingering) -> Vec<(FaultKind, String)> {
    let mut faults = Vec::new();
    let layout = fingering.layout();
    let pressed_strings: Vec<usize> = (0..STRING_COUNT)
        .filter(|&s| matches!(layout[s], Some(f) if f > 0))
        .collect();

    let mut distinct: Vec<u8> = pressed_strings
        .iter()
        .filter_map(|&s| fingering.fingers[s])
        .collect();
    distinct.sort_unstable();
    distinct.dedup();
    if distinct.len() > MAX_FINGER as usize {
        faults.push((
            FaultKind::TooManyFingers,
            format!(
                "{} distinct fingers used: [{}] (fingers: [{}])",
                distinct.len(),
                join(distinct.iter()),
                join_slots(&fingering.fingers)
            ),
        ));
    }

    let pressed: Vec<u8> = pressed_strings.iter().filter_map(|&s| layout[s]).collect();
    if let (Some(&min), Some(&max)) = (pressed.iter().min(), pressed.iter().max()) {
        let base = fingering.base_fret;
        let outside: Vec<u8> = pressed
            .iter()
            .copied()
            .filter(|&f| f < base || f > base.saturating_add(FRET_REACH))
            .collect();
        if !outside.is_empty() {
            faults.push((
                FaultKind::FretRangeExceeded,
                format!(
                    "Frets span {} frets (min: {}, max: {}, baseFret: {}). Frets outside {}-{}: [{}]",
                    max - min + 1,
                    min,
                    max,
                    base,
                    base,
                    base.saturating_add(FRET_REACH),
                    join(outside.iter())
                ),
            ));
        }
    }

    let invalid: Vec<u8> = fingering
        .fingers
        .iter()
        .flatten()
        .copied()
        .filter(|&f| !(1..=MAX_FINGER).contains(&f))
        .collect();
    if !invalid.is_empty() {
        faults.push((
            FaultKind::InvalidFingerValue,
            format!("Invalid finger values: [{}] (valid: 1-4 or null)", join(invalid.iter())),
        ));
    }

    faults
}

/// Whether a fingering satisfies every invariant.
pub fn is_playable(fingering: &Fingering) -> bool {
    check_invariants(fingering).is_empty()
}

fn join<'a>(values: impl Iterator<Item = &'a u8>) -> String {
    values.map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
}

/// Render a per-string array with `null` for empty slots.
pub fn join_slots(slots: &[Option<u8>]) -> String {
    slots
        .iter()
        .map(|slot| slot.map(|v| v.to_string()).unwrap_or_else(|| "null".to_string()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(frets: [i8; 6], fingers: [i8; 6], base_fret: u8) -> Fingering {
        let slots = |values: [i8; 6]| values.map(|v| if v < 0 { None } else { Some(v as u8) });
        let frets = slots(frets);
        Fingering {
            id: "test".to_string(),
            frets,
            fingers: slots(fingers),
            barre_at: None,
            barre_strings: None,
            base_fret,
            muted: frets.map(|f| f.is_none()),
            is_default: false,
            difficulty: Default::default(),
        }
    }

    #[test]
    fn test_open_c_is_clean() {
        let c = record([0, 1, 0, 2, 3, -1], [-1, 1, -1, 2, 3, -1], 1);
        assert!(check_invariants(&c).is_empty());
        assert!(is_playable(&c));
    }

    #[test]
    fn test_repeated_fingers_count_once() {
        let f = record([3, 5, 5, 5, 3, -1], [1, 3, 3, 3, 2, -1], 3);
        assert!(check_invariants(&f).is_empty());
    }

    #[test]
    fn test_five_distinct_fingers() {
        let f = record([3, 5, 4, 5, 6, 6], [1, 3, 2, 3, 4, 5], 3);
        let faults = check_invariants(&f);
        let kinds: Vec<FaultKind> = faults.iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, vec![FaultKind::TooManyFingers, FaultKind::InvalidFingerValue]);
        assert!(faults[0].1.starts_with("5 distinct fingers used: [1, 2, 3, 4, 5]"));
    }

    #[test]
    fn test_fret_outside_window() {
        let f = record([0, 8, 0, 2, 3, -1], [-1, 4, -1, 2, 3, -1], 1);
        let faults = check_invariants(&f);
        assert_eq!(faults.len(), 1);
        assert_eq!(faults[0].0, FaultKind::FretRangeExceeded);
        assert_eq!(
            faults[0].1,
            "Frets span 7 frets (min: 2, max: 8, baseFret: 1). Frets outside 1-4: [8]"
        );
    }

    #[test]
    fn test_invalid_finger_value() {
        let f = record([0, 1, 0, 2, 3, -1], [-1, 5, -1, 2, 3, -1], 1);
        let faults = check_invariants(&f);
        assert_eq!(faults.len(), 1);
        assert_eq!(faults[0].0, FaultKind::InvalidFingerValue);
        assert!(faults[0].1.contains("[5]"));

        let zero = record([0, 1, 0, 2, 3, -1], [-1, 0, -1, 2, 3, -1], 1);
        assert_eq!(check_invariants(&zero)[0].0, FaultKind::InvalidFingerValue);
    }

    #[test]
    fn test_report_groups_by_kind() {
        let records = vec![
            record([0, 1, 0, 2, 3, -1], [-1, 5, -1, 2, 3, -1], 1),
            record([0, 8, 0, 2, 3, -1], [-1, 4, -1, 2, 3, -1], 1),
            record([0, 1, 0, 2, 3, -1], [-1, 1, -1, 2, 3, -1], 1),
        ];
        let report = validate_fingering_dataset(&records);
        assert_eq!(report.records_analyzed, 3);
        assert_eq!(report.total(), 2);
        assert_eq!(report.issues[0].kind, FaultKind::FretRangeExceeded);
        assert_eq!(report.issues[0].record, 1);
        assert_eq!(report.issues[1].kind, FaultKind::InvalidFingerValue);
        assert_eq!(report.count(FaultKind::TooManyFingers), 0);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_join_slots() {
        assert_eq!(join_slots(&[Some(0), None, Some(3)]), "0, null, 3");
    }
}
