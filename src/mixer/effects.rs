use std::fmt;

use serde::{Deserialize, Serialize};

use super::levels::clamp_level;

/// Master filter cutoff at level 0.0 (fully open).
pub const FILTER_OPEN_HZ: f32 = 22_050.0;
/// Master filter cutoff at level 1.0.
pub const FILTER_CLOSED_HZ: f32 = 200.0;

/// Map the filter level onto the master low-pass cutoff. The mapping is
/// linear and inverted: turning the control up closes the filter.
pub fn filter_cutoff_hz(level: f32) -> f32 {
    let level = clamp_level(level);
    FILTER_OPEN_HZ - level * (FILTER_OPEN_HZ - FILTER_CLOSED_HZ)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    Reverb,
    Delay,
    Filter,
}

impl Effect {
    pub const ALL: [Effect; 3] = [Effect::Reverb, Effect::Delay, Effect::Filter];

    pub fn name(self) -> &'static str {
        match self {
            Effect::Reverb => "reverb",
            Effect::Delay => "delay",
            Effect::Filter => "filter",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|effect| effect.name() == name)
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Effect rack levels in [0, 1].
///
/// Only the filter level reaches the audio path; reverb and delay are stored
/// and shown but not rendered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectLevels {
    pub reverb: f32,
    pub delay: f32,
    pub filter: f32,
}

impl EffectLevels {
    pub fn get(&self, effect: Effect) -> f32 {
        match effect {
            Effect::Reverb => self.reverb,
            Effect::Delay => self.delay,
            Effect::Filter => self.filter,
        }
    }

    pub fn set(&mut self, effect: Effect, level: f32) {
        let level = clamp_level(level);
        match effect {
            Effect::Reverb => self.reverb = level,
            Effect::Delay => self.delay = level,
            Effect::Filter => self.filter = level,
        }
    }

    /// Master low-pass cutoff for the current filter level.
    pub fn filter_cutoff_hz(&self) -> f32 {
        filter_cutoff_hz(self.filter)
    }
}

impl Default for EffectLevels {
    fn default() -> Self {
        Self {
            reverb: 0.2,
            delay: 0.1,
            filter: 0.0,
        }
    }
}
