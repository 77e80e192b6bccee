//! # Dataset Extraction
//!
//! Pulls fingering records out of source text that stores them as object
//! literals, e.g. a chord table in a script file:
//!
//! ```text
//! { id: 'C-open', frets: [0, 1, 0, 2, 3, null], fingers: [null, 1, null, 2, 3, null], baseFret: 1 },
//! ```
//!
//! The match is permissive: any `{ ... frets: [...] ... fingers: [...] ... baseFret: N`
//! span counts, with an optional leading `id: '...'`. Array entries are
//! integers, `null` or empty (both meaning unset). Records whose arrays do not
//! hold six entries, or hold something that is not a small non-negative
//! integer, are skipped and counted rather than failing the scan.

use regex::Regex;
use tracing::debug;

use crate::error::ChordError;
use crate::fingering::Fingering;
use crate::pitch::STRING_COUNT;
use crate::validate::{validate_fingering_dataset, ValidationReport};

const RECORD_PATTERN: &str = r#"(?s)\{\s*(?:id:\s*['"`]([^'"`]+)['"`],?\s*)?[^{}]*?frets:\s*\[([^\]]+)\][^{}]*?fingers:\s*\[([^\]]+)\][^{}]*?baseFret:\s*(\d+)"#;

/// A record that matched the pattern but could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub chord_id: String,
    pub reason: String,
}

/// Records found in one source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub records: Vec<Fingering>,
    pub skipped: Vec<SkippedRecord>,
}

/// Scan `source` for fingering records.
pub fn extract_records(source: &str) -> Result<Extraction, ChordError> {
    let pattern = Regex::new(RECORD_PATTERN).map_err(|e| ChordError::DatasetError(e.to_string()))?;

    let mut extraction = Extraction::default();
    for caps in pattern.captures_iter(source) {
        let chord_id = caps
            .get(1)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let frets = caps.get(2).map(|m| parse_slots(m.as_str(), "frets"));
        let fingers = caps.get(3).map(|m| parse_slots(m.as_str(), "fingers"));
        let base_fret = caps.get(4).map(|m| {
            m.as_str()
                .parse::<u8>()
                .map_err(|_| format!("baseFret {} is out of range", m.as_str()))
        });

        match (frets, fingers, base_fret) {
            (Some(Ok(frets)), Some(Ok(fingers)), Some(Ok(base_fret))) => {
                extraction.records.push(Fingering {
                    id: chord_id,
                    frets,
                    fingers,
                    barre_at: None,
                    barre_strings: None,
                    base_fret,
                    muted: frets.map(|f| f.is_none()),
                    is_default: false,
                    difficulty: Default::default(),
                });
            }
            (frets, fingers, base_fret) => {
                let reason = [
                    frets.and_then(Result::err),
                    fingers.and_then(Result::err),
                    base_fret.and_then(Result::err),
                ]
                .into_iter()
                .flatten()
                .next()
                .unwrap_or_else(|| "incomplete record".to_string());
                debug!(chord = %chord_id, %reason, "skipping malformed record");
                extraction.skipped.push(SkippedRecord { chord_id, reason });
            }
        }
    }

    Ok(extraction)
}

/// Extract and validate all records in `source`.
pub fn validate_source(source: &str) -> Result<ValidationReport, ChordError> {
    let extraction = extract_records(source)?;
    let mut report = validate_fingering_dataset(&extraction.records);
    report.skipped = extraction.skipped.len();
    Ok(report)
}

fn parse_slots(list: &str, field: &str) -> Result<[Option<u8>; STRING_COUNT], String> {
    let entries: Vec<&str> = list.split(',').map(str::trim).collect();
    if entries.len() != STRING_COUNT {
        return Err(format!("{} has {} entries, expected {}", field, entries.len(), STRING_COUNT));
    }

    let mut slots = [None; STRING_COUNT];
    for (slot, entry) in slots.iter_mut().zip(entries) {
        if entry.is_empty() || entry == "null" {
            continue;
        }
        let value = entry
            .parse::<u8>()
            .map_err(|_| format!("{} entry '{}' is not a non-negative integer", field, entry))?;
        *slot = Some(value);
    }
    Ok(slots)
}
