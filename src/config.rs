//! # Engine Configuration
//!
//! Tunables for the search, the fretboard and the aggregator, loaded from YAML.
//! Every key is optional; missing keys take the defaults below.
//!
//! ```yaml
//! search:
//!   max-window-start: 12   # last window start the voicing search tries
//!   max-alternates: 8      # search results kept (0 = all)
//! fretboard:
//!   max-fret: 22           # highest fret a transposed fingering may use
//! aggregate:
//!   max-fingerings: 12     # length cap of the merged list (0 = unlimited)
//! ```
//!
//! ## Example
//! ```rust
//! use fretwork::config::EngineConfig;
//!
//! let config = EngineConfig::from_yaml("fretboard:\n  max-fret: 15\n").unwrap();
//! assert_eq!(config.fretboard.max_fret, 15);
//! assert_eq!(config.search.max_window_start, 12);
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ChordError;

/// Window starts above this would push the search past fret 23.
const WINDOW_START_LIMIT: u8 = 20;

/// A fretboard shorter than an octave cannot hold every CAGED form.
const MIN_FRETBOARD: u8 = 12;

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct EngineConfig {
    pub search: SearchConfig,
    pub fretboard: FretboardConfig,
    pub aggregate: AggregateConfig,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct SearchConfig {
    pub max_window_start: u8,
    pub max_alternates: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_window_start: 12,
            max_alternates: 8,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct FretboardConfig {
    /// Highest fret any generated, re-voiced or shifted fingering may use.
    pub max_fret: u8,
}

impl Default for FretboardConfig {
    fn default() -> Self {
        FretboardConfig { max_fret: 22 }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct AggregateConfig {
    pub max_fingerings: usize,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        AggregateConfig { max_fingerings: 12 }
    }
}

impl EngineConfig {
    /// Parse and validate a YAML configuration document.
    pub fn from_yaml(content: &str) -> Result<EngineConfig, ChordError> {
        if content.trim().is_empty() {
            return Ok(EngineConfig::default());
        }
        let config: EngineConfig =
            serde_yaml::from_str(content).map_err(|e| ChordError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<EngineConfig, ChordError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ChordError::ConfigError(format!("{}: {}", path.display(), e)))?;
        EngineConfig::from_yaml(&content)
    }

    fn validate(&self) -> Result<(), ChordError> {
        if self.search.max_window_start > WINDOW_START_LIMIT {
            return Err(ChordError::ConfigError(format!(
                "search.max-window-start must be at most {}, got {}",
                WINDOW_START_LIMIT, self.search.max_window_start
            )));
        }
        if self.fretboard.max_fret < MIN_FRETBOARD {
            return Err(ChordError::ConfigError(format!(
                "fretboard.max-fret must be at least {}, got {}",
                MIN_FRETBOARD, self.fretboard.max_fret
            )));
        }
        Ok(())
    }
}
