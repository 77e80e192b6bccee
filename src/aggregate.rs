//! # Fingering Aggregator
//!
//! Merges fingerings from every source into one ranked, de-duplicated list and
//! picks the default.
//!
//! ## Pipeline
//! Sources run in a fixed order, each a pure function of the request:
//!
//! 1. [`Provider::Preference`]: the caller's saved fingering for this chord
//! 2. [`Provider::Database`]: curated fingerings supplied by the caller
//! 3. [`Provider::Caged`]: CAGED forms in C, A, G, E, D order
//! 4. [`Provider::Search`]: four-string search results, tightest first
//!
//! Database, CAGED and search results are concatenated; a layout already seen
//! (same sounding fret per string) is dropped. A playable preference then goes
//! to the front: the matching candidate moves to index 0, or the preference
//! itself is inserted there when nothing matches. Caller-supplied fingerings
//! that break the physical invariants are dropped with a warning.
//!
//! Exactly one fingering, the first, has `is_default` set. An empty list means
//! no fingering is available for the chord.
//!
//! ## Example
//! ```rust
//! use fretwork::{generate_fingerings, parse_chord_symbol};
//!
//! let symbol = parse_chord_symbol("Am").unwrap();
//! let fingerings = generate_fingerings(&symbol, None, &[]);
//! assert_eq!(fingerings[0].id, "Am-C-barre");
//! assert!(fingerings[0].is_default);
//! assert!(fingerings[1..].iter().all(|f| !f.is_default));
//! ```

use tracing::{debug, warn};

use crate::caged::generate_caged_forms;
use crate::config::EngineConfig;
use crate::fingering::Fingering;
use crate::pitch::STRING_COUNT;
use crate::symbol::ChordSymbol;
use crate::validate::check_invariants;
use crate::voicing::search_symbol;

/// A source of candidate fingerings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Preference,
    Database,
    Caged,
    Search,
}

impl Provider {
    /// Providers in priority order.
    pub const PIPELINE: [Provider; 4] = [
        Provider::Preference,
        Provider::Database,
        Provider::Caged,
        Provider::Search,
    ];

    /// Fingerings this provider offers for a request.
    pub fn fingerings(self, request: &FingeringRequest<'_>) -> Vec<Fingering> {
        match self {
            Provider::Preference => request
                .preference
                .into_iter()
                .filter(|f| playable(f, "preference"))
                .cloned()
                .collect(),
            Provider::Database => request
                .database
                .iter()
                .filter(|f| playable(f, "database"))
                .cloned()
                .collect(),
            Provider::Caged => generate_caged_forms(&request.symbol, &request.config.fretboard),
            Provider::Search => search_symbol(&request.symbol, &request.config.search, &request.config.fretboard),
        }
    }
}

/// Everything the aggregator needs for one chord query.
#[derive(Debug, Clone, Copy)]
pub struct FingeringRequest<'a> {
    pub symbol: ChordSymbol,
    pub preference: Option<&'a Fingering>,
    pub database: &'a [Fingering],
    pub config: &'a EngineConfig,
}

/// Run the provider pipeline and merge the results.
pub fn aggregate(request: &FingeringRequest<'_>) -> Vec<Fingering> {
    let mut preference: Option<Fingering> = None;
    let mut merged: Vec<Fingering> = Vec::new();

    for provider in Provider::PIPELINE {
        let fingerings = provider.fingerings(request);
        debug!(?provider, count = fingerings.len(), "provider finished");
        if provider == Provider::Preference {
            preference = fingerings.into_iter().next();
            continue;
        }
        for fingering in fingerings {
            let layout = fingering.layout();
            if merged.iter().all(|f| f.layout() != layout) {
                merged.push(fingering);
            }
        }
    }

    if let Some(preference) = preference {
        promote(&mut merged, preference);
    }

    let cap = request.config.aggregate.max_fingerings;
    if cap > 0 {
        merged.truncate(cap);
    }
    for (index, fingering) in merged.iter_mut().enumerate() {
        fingering.is_default = index == 0;
    }

    debug!(chord = %request.symbol, count = merged.len(), "aggregated fingerings");
    merged
}

/// Put the preferred layout first.
fn promote(merged: &mut Vec<Fingering>, preference: Fingering) {
    let layout: [Option<u8>; STRING_COUNT] = preference.layout();
    match merged.iter().position(|f| f.layout() == layout) {
        Some(index) => {
            let chosen = merged.remove(index);
            merged.insert(0, chosen);
        }
        None => merged.insert(0, preference),
    }
}

fn playable(fingering: &Fingering, source: &str) -> bool {
    let faults = check_invariants(fingering);
    if faults.is_empty() {
        return true;
    }
    for (kind, details) in &faults {
        warn!(id = %fingering.id, source, %kind, %details, "dropping unplayable fingering");
    }
    false
}
