pub mod aggregate;
pub mod api;
pub mod barre;
pub mod caged;
pub mod config;
pub mod dataset;
pub mod difficulty;
pub mod error;
pub mod fingering;
pub mod pitch;
pub mod quality;
pub mod symbol;
pub mod transpose;
pub mod validate;
pub mod voicing;

pub use api::*;
pub use config::EngineConfig;
pub use error::*;
pub use fingering::{Difficulty, Fingering};
pub use symbol::{parse_chord_symbol, ChordSymbol};
pub use transpose::transpose_chord_symbol;
pub use validate::{validate_fingering_dataset, FaultKind, ValidationIssue, ValidationReport};
