//! Start-up settings for a [`Sequencer`](crate::runtime::Sequencer).
//!
//! ```ignore
//! let config = SequencerConfig::new()
//!     .bpm(96)
//!     .time_signature(TimeSignature::SIX_EIGHT)
//!     .bars(2)
//!     .library_dir("~/grooves");
//! ```
//!
//! or from JSON, where every field is optional:
//!
//! ```json
//! { "bpm": 96, "timeSignature": { "numerator": 6, "denominator": 8 }, "lookaheadMs": 30 }
//! ```

use std::{
    fmt, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::{
    engine::EngineOptions,
    sequencing::{
        pattern::clamp_bars,
        sequence::{clamp_bpm, DEFAULT_BPM},
        TimeSignature,
    },
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SequencerConfig {
    pub bpm: u32,
    pub time_signature: TimeSignature,
    pub bars: u32,
    /// How far ahead of the audio clock voices are scheduled.
    pub lookahead_ms: u64,
    pub queue_capacity: usize,
    pub max_voices: usize,
    /// Where `JsonDirStore` keeps saved sequences. `None` keeps them in
    /// memory only.
    pub library_dir: Option<PathBuf>,
}

impl SequencerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bpm(mut self, bpm: u32) -> Self {
        self.bpm = bpm;
        self
    }

    pub fn time_signature(mut self, time_signature: TimeSignature) -> Self {
        self.time_signature = time_signature;
        self
    }

    pub fn bars(mut self, bars: u32) -> Self {
        self.bars = bars;
        self
    }

    pub fn lookahead_ms(mut self, ms: u64) -> Self {
        self.lookahead_ms = ms;
        self
    }

    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn max_voices(mut self, voices: usize) -> Self {
        self.max_voices = voices;
        self
    }

    pub fn library_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.library_dir = Some(dir.into());
        self
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.normalized())
    }

    /// Every value brought into its valid range.
    pub fn normalized(mut self) -> Self {
        self.bpm = clamp_bpm(self.bpm);
        self.bars = clamp_bars(self.bars);
        self.time_signature = TimeSignature::new(self.time_signature.numerator, self.time_signature.denominator);
        self.lookahead_ms = self.lookahead_ms.min(500);
        self.queue_capacity = self.queue_capacity.max(1);
        self.max_voices = self.max_voices.max(1);
        self
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            lookahead: Duration::from_millis(self.lookahead_ms),
            queue_capacity: self.queue_capacity.max(1),
            max_voices: self.max_voices.max(1),
        }
    }
}

impl Default for SequencerConfig {
    fn default() -> Self {
        let engine = EngineOptions::default();
        Self {
            bpm: DEFAULT_BPM,
            time_signature: TimeSignature::FOUR_FOUR,
            bars: 1,
            lookahead_ms: engine.lookahead.as_millis() as u64,
            queue_capacity: engine.queue_capacity,
            max_voices: engine.max_voices,
            library_dir: None,
        }
    }
}

/// Errors that can occur when loading a config file
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read config {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "invalid config {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}
