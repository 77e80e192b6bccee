//! # Error Types
//!
//! This module defines the error type for the fretwork engine.
//!
//! Only chord-symbol parsing, configuration loading and dataset scanning can
//! fail. Everything else in the engine reports "nothing found" through its
//! return value:
//! - an empty fingering list means no voicing exists for the chord
//! - `None` from `transpose_fingering` means the shift leaves the fretboard
//! - validator faults are data in a [`ValidationReport`](crate::ValidationReport)
//!
//! ## Usage
//! ```rust
//! use fretwork::{parse_chord_symbol, ChordError};
//!
//! match parse_chord_symbol("Hm7") {
//!     Ok(symbol) => println!("root {}", symbol.root),
//!     Err(ChordError::UnrecognizedRoot { input }) => {
//!         eprintln!("unknown chord: {}", input);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChordError {
    /// The symbol does not start with a note name `A`-`G` (with optional accidental).
    ///
    /// # Example
    /// ```
    /// # use fretwork::ChordError;
    /// let err = ChordError::UnrecognizedRoot { input: "Hm7".to_string() };
    /// assert_eq!(err.to_string(), "Unrecognized root in chord symbol 'Hm7'");
    /// ```
    #[error("Unrecognized root in chord symbol '{input}'")]
    UnrecognizedRoot { input: String },

    /// The text after the root is not a known quality (or a malformed bass note).
    ///
    /// # Example
    /// ```
    /// # use fretwork::ChordError;
    /// let err = ChordError::UnrecognizedQuality {
    ///     input: "Cxyz".to_string(),
    ///     suffix: "xyz".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Unrecognized chord quality 'xyz' in 'Cxyz'");
    /// ```
    #[error("Unrecognized chord quality '{suffix}' in '{input}'")]
    UnrecognizedQuality { input: String, suffix: String },

    /// Invalid engine configuration (bad YAML or out-of-range values).
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// The fingering dataset could not be scanned.
    #[error("Dataset error: {0}")]
    DatasetError(String),
}
