use crate::mixer::{EffectLevels, MixLevels};

use super::pattern::{clamp_bars, RemovedSet, TrackSet};

pub const MIN_BPM: u32 = 60;
pub const MAX_BPM: u32 = 200;
pub const DEFAULT_BPM: u32 = 120;
pub const DEFAULT_NAME: &str = "Untitled Sequence";

pub fn clamp_bpm(bpm: u32) -> u32 {
    bpm.clamp(MIN_BPM, MAX_BPM)
}

/// The live working copy: what the grid shows and what the clock plays.
///
/// Its lanes mirror the active pattern; the pattern slot itself is only
/// written back when another pattern is switched in.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    pub name: String,
    bpm: u32,
    pub tracks: TrackSet,
    pub removed: RemovedSet,
    bars: u32,
    pub levels: MixLevels,
    pub effects: EffectLevels,
    /// Persistence id once saved.
    pub id: Option<String>,
}

impl Sequence {
    pub fn new(bpm: u32, bars: u32, steps_per_bar: usize) -> Self {
        let bars = clamp_bars(bars);
        Self {
            name: DEFAULT_NAME.to_string(),
            bpm: clamp_bpm(bpm),
            tracks: TrackSet::new(bars as usize * steps_per_bar),
            removed: RemovedSet::default(),
            bars,
            levels: MixLevels::default(),
            effects: EffectLevels::default(),
            id: None,
        }
    }

    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    /// Clamped into [60, 200].
    pub fn set_bpm(&mut self, bpm: u32) {
        self.bpm = clamp_bpm(bpm);
    }

    pub fn bars(&self) -> u32 {
        self.bars
    }

    pub(crate) fn set_bars(&mut self, bars: u32) {
        self.bars = clamp_bars(bars);
    }

    pub fn steps(&self) -> usize {
        self.tracks.len()
    }
}
