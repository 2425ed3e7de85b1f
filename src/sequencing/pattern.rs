//! Step data for one pattern: an activation lane per instrument, a pitch lane
//! per synth, the removed flags and the bar count.
//!
//! Every lane in a [`TrackSet`] has the same length. The only way to change
//! that length is [`TrackSet::resize`], which pads or truncates all lanes at
//! once.

use crate::instruments::{Instrument, Section};

pub const MIN_BARS: u32 = 1;
pub const MAX_BARS: u32 = 16;

/// A4, the pitch every new synth step starts on.
pub const DEFAULT_PITCH: u8 = 69;
/// C3
pub const MIN_PITCH: u8 = 48;
/// C6
pub const MAX_PITCH: u8 = 84;

pub fn clamp_bars(bars: u32) -> u32 {
    bars.clamp(MIN_BARS, MAX_BARS)
}

pub fn clamp_pitch(pitch: u8) -> u8 {
    pitch.clamp(MIN_PITCH, MAX_PITCH)
}

/// One instrument's lane. Drum lanes carry no pitches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    steps: Vec<bool>,
    pitches: Vec<u8>,
    pitched: bool,
}

impl Track {
    pub fn new(instrument: Instrument, len: usize) -> Self {
        let pitched = instrument.is_synth();
        Self {
            steps: vec![false; len],
            pitches: if pitched {
                vec![DEFAULT_PITCH; len]
            } else {
                Vec::new()
            },
            pitched,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[bool] {
        &self.steps
    }

    /// Empty for drum lanes.
    pub fn pitches(&self) -> &[u8] {
        &self.pitches
    }

    pub fn is_active(&self, step: usize) -> bool {
        self.steps.get(step).copied().unwrap_or(false)
    }

    pub fn pitch(&self, step: usize) -> Option<u8> {
        self.pitches.get(step).copied()
    }

    fn resize(&mut self, len: usize) {
        self.steps.resize(len, false);
        if self.pitched {
            self.pitches.resize(len, DEFAULT_PITCH);
        }
    }

    fn clear(&mut self) {
        self.steps.fill(false);
        self.pitches.fill(DEFAULT_PITCH);
    }
}

/// Lanes for every instrument, indexed by [`Instrument::index`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackSet {
    tracks: Vec<Track>,
    len: usize,
}

impl TrackSet {
    pub fn new(len: usize) -> Self {
        Self {
            tracks: Instrument::ALL
                .iter()
                .map(|&inst| Track::new(inst, len))
                .collect(),
            len,
        }
    }

    /// Step count shared by every lane.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn track(&self, instrument: Instrument) -> &Track {
        &self.tracks[instrument.index()]
    }

    pub fn is_active(&self, instrument: Instrument, step: usize) -> bool {
        self.track(instrument).is_active(step)
    }

    /// Flip a step. Returns the new value, or `None` when out of range.
    pub fn toggle(&mut self, instrument: Instrument, step: usize) -> Option<bool> {
        let slot = self.tracks[instrument.index()].steps.get_mut(step)?;
        *slot = !*slot;
        Some(*slot)
    }

    /// Returns false when the step is out of range.
    pub fn set(&mut self, instrument: Instrument, step: usize, active: bool) -> bool {
        match self.tracks[instrument.index()].steps.get_mut(step) {
            Some(slot) => {
                *slot = active;
                true
            }
            None => false,
        }
    }

    /// Pitch of a synth step. `None` for drums or out of range.
    pub fn pitch(&self, instrument: Instrument, step: usize) -> Option<u8> {
        self.track(instrument).pitch(step)
    }

    /// Set a synth step's MIDI pitch, clamped into the playable range.
    /// Returns false for drums and out-of-range steps.
    pub fn set_pitch(&mut self, instrument: Instrument, step: usize, pitch: u8) -> bool {
        match self.tracks[instrument.index()].pitches.get_mut(step) {
            Some(slot) => {
                *slot = clamp_pitch(pitch);
                true
            }
            None => false,
        }
    }

    /// Replace one lane from loaded data. Missing tail entries become off /
    /// default pitch, extra entries are dropped.
    pub fn load_lane(&mut self, instrument: Instrument, steps: &[bool], pitches: Option<&[u8]>) {
        let len = self.len;
        let track = &mut self.tracks[instrument.index()];
        track.steps = steps.iter().copied().take(len).collect();
        track.steps.resize(len, false);

        if track.pitched {
            track.pitches = pitches
                .unwrap_or_default()
                .iter()
                .map(|&p| clamp_pitch(p))
                .take(len)
                .collect();
            track.pitches.resize(len, DEFAULT_PITCH);
        }
    }

    /// Pad with off steps / default pitch, or truncate, every lane at once.
    pub fn resize(&mut self, len: usize) {
        for track in &mut self.tracks {
            track.resize(len);
        }
        self.len = len;
    }

    pub fn clear(&mut self) {
        for track in &mut self.tracks {
            track.clear();
        }
    }

    /// Every lane has `len()` steps and synth lanes have as many pitches.
    pub fn is_consistent(&self) -> bool {
        self.tracks.iter().all(|track| {
            track.steps.len() == self.len
                && (!track.pitched || track.pitches.len() == self.len)
        })
    }
}

/// Instruments muted out of playback. Their lanes are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemovedSet {
    flags: [bool; Instrument::COUNT],
}

impl RemovedSet {
    pub fn contains(&self, instrument: Instrument) -> bool {
        self.flags[instrument.index()]
    }

    pub fn set(&mut self, instrument: Instrument, removed: bool) {
        self.flags[instrument.index()] = removed;
    }

    /// Returns the new state.
    pub fn toggle(&mut self, instrument: Instrument) -> bool {
        let flag = &mut self.flags[instrument.index()];
        *flag = !*flag;
        *flag
    }

    pub fn in_section(&self, section: Section) -> impl Iterator<Item = Instrument> + '_ {
        section
            .instruments()
            .iter()
            .copied()
            .filter(|&inst| self.contains(inst))
    }
}

/// One of the four switchable patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub tracks: TrackSet,
    pub removed: RemovedSet,
    pub bars: u32,
}

impl Pattern {
    /// An empty pattern of `bars` bars (clamped) at `steps_per_bar`.
    pub fn empty(bars: u32, steps_per_bar: usize) -> Self {
        let bars = clamp_bars(bars);
        Self {
            tracks: TrackSet::new(bars as usize * steps_per_bar),
            removed: RemovedSet::default(),
            bars,
        }
    }

    pub fn steps(&self) -> usize {
        self.tracks.len()
    }

    pub fn resize(&mut self, len: usize) {
        self.tracks.resize(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_set_has_uniform_lanes() {
        let set = TrackSet::new(16);
        assert!(set.is_consistent());
        assert_eq!(set.track(Instrument::Kick).pitches().len(), 0);
        assert_eq!(set.track(Instrument::Bass).pitches(), &[DEFAULT_PITCH; 16]);
    }

    #[test]
    fn resize_pads_and_truncates_every_lane() {
        let mut set = TrackSet::new(16);
        set.set(Instrument::Kick, 15, true);
        set.set(Instrument::Lead, 3, true);
        set.set_pitch(Instrument::Lead, 3, 60);

        set.resize(8);
        assert!(set.is_consistent());
        assert_eq!(set.len(), 8);
        assert!(!set.is_active(Instrument::Kick, 15));
        assert_eq!(set.pitch(Instrument::Lead, 3), Some(60));

        set.resize(24);
        assert!(set.is_consistent());
        assert!(!set.is_active(Instrument::Kick, 20));
        assert_eq!(set.pitch(Instrument::Lead, 20), Some(DEFAULT_PITCH));
    }

    #[test]
    fn out_of_range_edits_are_ignored() {
        let mut set = TrackSet::new(4);
        assert_eq!(set.toggle(Instrument::Snare, 4), None);
        assert!(!set.set(Instrument::Snare, 9, true));
        assert!(!set.set_pitch(Instrument::Kick, 0, 60));
        assert_eq!(set.pitch(Instrument::Kick, 0), None);
    }

    #[test]
    fn pitches_clamp_into_range() {
        let mut set = TrackSet::new(4);
        set.set_pitch(Instrument::Pad, 0, 10);
        set.set_pitch(Instrument::Pad, 1, 127);
        assert_eq!(set.pitch(Instrument::Pad, 0), Some(MIN_PITCH));
        assert_eq!(set.pitch(Instrument::Pad, 1), Some(MAX_PITCH));
    }

    #[test]
    fn load_lane_normalizes_length() {
        let mut set = TrackSet::new(4);
        set.load_lane(Instrument::Arp, &[true, false, true, true, true, true], Some(&[50]));
        assert_eq!(set.track(Instrument::Arp).steps(), &[true, false, true, true]);
        assert_eq!(set.track(Instrument::Arp).pitches(), &[50, 69, 69, 69]);

        set.load_lane(Instrument::Kick, &[true], None);
        assert_eq!(set.track(Instrument::Kick).steps(), &[true, false, false, false]);
        assert!(set.is_consistent());
    }

    #[test]
    fn clear_resets_steps_and_pitches() {
        let mut set = TrackSet::new(4);
        set.set(Instrument::Bass, 1, true);
        set.set_pitch(Instrument::Bass, 1, 50);
        set.clear();
        assert_eq!(set, TrackSet::new(4));
    }

    #[test]
    fn removed_set_tracks_sections() {
        let mut removed = RemovedSet::default();
        assert!(removed.toggle(Instrument::Kick));
        removed.set(Instrument::Pad, true);
        assert_eq!(removed.in_section(Section::Drums).collect::<Vec<_>>(), vec![Instrument::Kick]);
        assert_eq!(removed.in_section(Section::Synths).collect::<Vec<_>>(), vec![Instrument::Pad]);
        assert!(!removed.toggle(Instrument::Kick));
    }

    #[test]
    fn empty_pattern_clamps_bars() {
        let pattern = Pattern::empty(40, 16);
        assert_eq!(pattern.bars, MAX_BARS);
        assert_eq!(pattern.steps(), 256);
    }
}
