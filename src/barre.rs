//! # Barre & Finger Assignment
//!
//! Derives finger numbers (1-4) and an optional barre from a raw fret layout.
//!
//! ## Rules
//! - A barre is only considered at the lowest pressed fret, and only when at
//!   least two adjacent strings sit at that fret
//! - The barre spans from the lowest to the highest string index at that fret
//!   when every string in between is pressed at or above it; otherwise it
//!   covers the longest contiguous run at that fret
//! - The barre is played by the index finger, so barred strings carry no
//!   finger number and individual numbering starts at 2
//! - Remaining pressed strings are numbered by ascending fret; strings at the
//!   same fret share a finger
//! - A layout that would need a fifth finger has no assignment
//!
//! ## Example
//! ```rust
//! use fretwork::barre::assign_fingers;
//!
//! // F major, E shape: barre across all six strings at fret 1
//! let f = assign_fingers(&[Some(1), Some(1), Some(2), Some(3), Some(3), Some(1)]).unwrap();
//! let barre = f.barre.unwrap();
//! assert_eq!((barre.fret, barre.strings), (1, (0, 5)));
//! assert_eq!(f.fingers, [None, None, Some(2), Some(3), Some(3), None]);
//! ```

use crate::pitch::STRING_COUNT;

/// Highest finger number available to the fretting hand.
pub const MAX_FINGER: u8 = 4;

/// One finger pressing several strings at the same fret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Barre {
    pub fret: u8,
    /// Inclusive string index range `(low, high)`.
    pub strings: (usize, usize),
}

impl Barre {
    pub fn string_count(&self) -> usize {
        self.strings.1 - self.strings.0 + 1
    }

    fn covers(&self, string: usize) -> bool {
        string >= self.strings.0 && string <= self.strings.1
    }
}

/// Finger numbers per string plus the barre, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingerAssignment {
    pub fingers: [Option<u8>; STRING_COUNT],
    pub barre: Option<Barre>,
}

/// Assign fingers to a fret layout (`None` = muted, `Some(0)` = open).
///
/// Returns `None` when the layout needs more than four fingers.
pub fn assign_fingers(frets: &[Option<u8>; STRING_COUNT]) -> Option<FingerAssignment> {
    let pressed = |string: usize| frets[string].filter(|&f| f > 0);

    let lowest = match (0..STRING_COUNT).filter_map(pressed).min() {
        Some(fret) => fret,
        None => {
            return Some(FingerAssignment {
                fingers: [None; STRING_COUNT],
                barre: None,
            })
        }
    };

    let barre = detect_barre(frets, lowest);

    let mut remaining: Vec<u8> = (0..STRING_COUNT)
        .filter(|&s| !is_barred(barre, frets, s))
        .filter_map(pressed)
        .collect();
    remaining.sort_unstable();
    remaining.dedup();

    let first_finger: u8 = if barre.is_some() { 2 } else { 1 };
    if remaining.len() as u8 + first_finger - 1 > MAX_FINGER {
        return None;
    }

    let mut fingers = [None; STRING_COUNT];
    for string in 0..STRING_COUNT {
        if is_barred(barre, frets, string) {
            continue;
        }
        if let Some(fret) = pressed(string) {
            let rank = remaining.iter().position(|&f| f == fret)? as u8;
            fingers[string] = Some(first_finger + rank);
        }
    }

    Some(FingerAssignment { fingers, barre })
}

fn is_barred(barre: Option<Barre>, frets: &[Option<u8>; STRING_COUNT], string: usize) -> bool {
    match barre {
        Some(b) => b.covers(string) && frets[string] == Some(b.fret),
        None => false,
    }
}

fn detect_barre(frets: &[Option<u8>; STRING_COUNT], lowest: u8) -> Option<Barre> {
    let at_lowest: Vec<usize> = (0..STRING_COUNT)
        .filter(|&s| frets[s] == Some(lowest))
        .collect();

    let has_adjacent_pair = at_lowest.windows(2).any(|pair| pair[1] == pair[0] + 1);
    if !has_adjacent_pair {
        return None;
    }

    let first = at_lowest[0];
    let last = at_lowest[at_lowest.len() - 1];
    let bridged = (first..=last).all(|s| matches!(frets[s], Some(f) if f >= lowest));
    if bridged {
        return Some(Barre {
            fret: lowest,
            strings: (first, last),
        });
    }

    // Longest contiguous run at the lowest fret; earlier runs win ties.
    let mut best = (first, first);
    let mut start = first;
    for pair in at_lowest.windows(2) {
        if pair[1] != pair[0] + 1 {
            start = pair[1];
        }
        if pair[1] - start > best.1 - best.0 {
            best = (start, pair[1]);
        }
    }
    Some(Barre {
        fret: lowest,
        strings: best,
    })
}
