use crate::instruments::{Instrument, Section};

/// Clamp a fader level into [0, 1]. NaN counts as silence.
pub fn clamp_level(level: f32) -> f32 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 1.0)
    }
}

/// Master, section and per-instrument faders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixLevels {
    master: f32,
    drums: f32,
    synths: f32,
    instruments: [f32; Instrument::COUNT],
}

impl MixLevels {
    pub const DEFAULT_MASTER: f32 = 0.7;
    pub const DEFAULT_DRUMS: f32 = 0.75;
    pub const DEFAULT_SYNTHS: f32 = 0.65;
    pub const DEFAULT_INSTRUMENT: f32 = 0.8;

    pub fn master(&self) -> f32 {
        self.master
    }

    pub fn set_master(&mut self, level: f32) {
        self.master = clamp_level(level);
    }

    pub fn section(&self, section: Section) -> f32 {
        match section {
            Section::Drums => self.drums,
            Section::Synths => self.synths,
        }
    }

    pub fn set_section(&mut self, section: Section, level: f32) {
        let level = clamp_level(level);
        match section {
            Section::Drums => self.drums = level,
            Section::Synths => self.synths = level,
        }
    }

    pub fn instrument(&self, instrument: Instrument) -> f32 {
        self.instruments[instrument.index()]
    }

    pub fn set_instrument(&mut self, instrument: Instrument, level: f32) {
        self.instruments[instrument.index()] = clamp_level(level);
    }

    /// Gain for a voice triggered now: instrument × section × master.
    pub fn voice_gain(&self, instrument: Instrument) -> f32 {
        self.instrument(instrument) * self.section(instrument.section()) * self.master
    }
}

impl Default for MixLevels {
    fn default() -> Self {
        Self {
            master: Self::DEFAULT_MASTER,
            drums: Self::DEFAULT_DRUMS,
            synths: Self::DEFAULT_SYNTHS,
            instruments: [Self::DEFAULT_INSTRUMENT; Instrument::COUNT],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let levels = MixLevels::default();
        assert_eq!(levels.master(), 0.7);
        assert_eq!(levels.section(Section::Drums), 0.75);
        assert_eq!(levels.section(Section::Synths), 0.65);
        assert_eq!(levels.instrument(Instrument::Pad), 0.8);
    }

    #[test]
    fn voice_gain_multiplies_all_three_stages() {
        let mut levels = MixLevels::default();
        levels.set_master(0.5);
        levels.set_section(Section::Drums, 0.5);
        levels.set_instrument(Instrument::Kick, 0.5);
        assert_eq!(levels.voice_gain(Instrument::Kick), 0.125);
        assert!((levels.voice_gain(Instrument::Bass) - 0.8 * 0.65 * 0.5).abs() < 1e-6);
    }

    #[test]
    fn levels_clamp() {
        let mut levels = MixLevels::default();
        levels.set_master(3.0);
        levels.set_instrument(Instrument::Clap, -1.0);
        levels.set_section(Section::Synths, f32::NAN);
        assert_eq!(levels.master(), 1.0);
        assert_eq!(levels.instrument(Instrument::Clap), 0.0);
        assert_eq!(levels.section(Section::Synths), 0.0);
    }
}
