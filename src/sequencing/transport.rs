//! The owned transport state: live sequence, pattern slots, meter, position.
//!
//! Every mutation goes through a `&mut Transport`, and the runtime keeps the
//! only instance behind one lock shared by UI calls and the clock thread. A
//! [`Transport::tick`] therefore always sees lanes of one consistent length,
//! even while bars or meter are being changed from the UI.
//!
//! ```text
//!   tick():  fire(step) ──► boundary? apply pending ──► advance ──► Tick
//! ```

use std::time::Duration;

use crate::{
    graph::midi_note_to_freq,
    instruments::{Instrument, Section},
    mixer::{Effect, EffectLevels, MixLevels},
    snapshot::SequenceSnapshot,
};

use super::{
    pattern::{clamp_bars, clamp_pitch, Pattern, RemovedSet, TrackSet, DEFAULT_PITCH},
    sequence::{clamp_bpm, Sequence, DEFAULT_NAME},
    store::{PatternId, PatternStore},
    time_signature::TimeSignature,
};

/// One voice to start: which instrument, at what pitch and level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trigger {
    pub instrument: Instrument,
    /// Synths only.
    pub frequency: Option<f32>,
    /// `instrument × section × master`, frozen when the step fired.
    pub gain: f32,
}

/// What one clock tick did.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// The step that was played.
    pub fired_step: usize,
    pub triggers: Vec<Trigger>,
    /// Set when a pending pattern was switched in at the loop boundary.
    pub switched: Option<PatternId>,
    /// Position after advancing.
    pub step: usize,
}

/// Outcome of [`Transport::request_pattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternRequest {
    /// Not a slot number.
    Unknown,
    /// Already the active pattern; nothing changed.
    AlreadyActive,
    /// Stopped, so the switch happened immediately.
    Applied(PatternId),
    /// Playing; will switch when the loop wraps.
    Queued(PatternId),
}

#[derive(Debug, Clone)]
pub struct Transport {
    sequence: Sequence,
    patterns: PatternStore,
    time_signature: TimeSignature,
    playing: bool,
    step: usize,
    active: PatternId,
    pending: Option<PatternId>,
}

impl Transport {
    pub fn new(bpm: u32, time_signature: TimeSignature, bars: u32) -> Self {
        let time_signature = TimeSignature::new(time_signature.numerator, time_signature.denominator);
        let steps_per_bar = time_signature.steps_per_bar();
        Self {
            sequence: Sequence::new(bpm, bars, steps_per_bar),
            patterns: PatternStore::new(bars, steps_per_bar),
            time_signature,
            playing: false,
            step: 0,
            active: PatternId::FIRST,
            pending: None,
        }
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn patterns(&self) -> &PatternStore {
        &self.patterns
    }

    pub fn time_signature(&self) -> TimeSignature {
        self.time_signature
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Step that the next tick will play.
    pub fn step(&self) -> usize {
        self.step
    }

    pub fn steps(&self) -> usize {
        self.sequence.steps()
    }

    pub fn bpm(&self) -> u32 {
        self.sequence.bpm()
    }

    pub fn bars(&self) -> u32 {
        self.sequence.bars()
    }

    pub fn active_pattern(&self) -> PatternId {
        self.active
    }

    pub fn pending_pattern(&self) -> Option<PatternId> {
        self.pending
    }

    pub fn levels(&self) -> &MixLevels {
        &self.sequence.levels
    }

    pub fn effects(&self) -> &EffectLevels {
        &self.sequence.effects
    }

    /// One sixteenth note at the current tempo. The meter does not matter.
    pub fn step_interval(&self) -> Duration {
        step_interval(self.sequence.bpm())
    }

    // ---- transport ---------------------------------------------------------

    /// Returns false when already playing.
    pub fn start(&mut self) -> bool {
        if self.playing {
            return false;
        }
        self.playing = true;
        true
    }

    /// Stop and rewind to step 0. A switch still waiting for the loop
    /// boundary is applied now, since playback restarts from the top anyway.
    /// Returns false when already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        self.playing = false;
        if let Some(id) = self.pending.take() {
            self.apply_pattern(id);
        }
        self.step = 0;
        true
    }

    /// Clamped into [60, 200]; returns the tempo actually set.
    pub fn set_bpm(&mut self, bpm: u32) -> u32 {
        self.sequence.set_bpm(bpm);
        self.sequence.bpm()
    }

    /// Play the current step and move on.
    ///
    /// Ordering is fixed: fire the current step, switch a pending pattern in
    /// if this was the last step, advance modulo the step count. The switch
    /// lands on the wrap, so the new pattern always starts from its step 0.
    pub fn tick(&mut self) -> Tick {
        let fired_step = self.step;
        let triggers = self.triggers_at(fired_step);

        let steps = self.steps();
        let mut switched = None;
        if fired_step + 1 >= steps {
            if let Some(id) = self.pending.take() {
                self.apply_pattern(id);
                switched = Some(id);
            }
        }

        self.step = if switched.is_some() {
            0
        } else {
            (fired_step + 1) % self.steps().max(1)
        };

        Tick {
            fired_step,
            triggers,
            switched,
            step: self.step,
        }
    }

    /// Voices that `step` would start: drums before synths, catalog order,
    /// removed instruments skipped.
    pub fn triggers_at(&self, step: usize) -> Vec<Trigger> {
        let tracks = &self.sequence.tracks;
        Instrument::ALL
            .into_iter()
            .filter(|&inst| !self.sequence.removed.contains(inst))
            .filter(|&inst| tracks.is_active(inst, step))
            .map(|inst| Trigger {
                instrument: inst,
                frequency: inst
                    .is_synth()
                    .then(|| midi_note_to_freq(tracks.pitch(inst, step).unwrap_or(DEFAULT_PITCH))),
                gain: self.sequence.levels.voice_gain(inst),
            })
            .collect()
    }

    // ---- patterns ----------------------------------------------------------

    pub fn request_pattern(&mut self, id: u8) -> PatternRequest {
        let Some(id) = PatternId::new(id) else {
            return PatternRequest::Unknown;
        };
        if id == self.active {
            return PatternRequest::AlreadyActive;
        }
        if self.playing {
            self.pending = Some(id);
            PatternRequest::Queued(id)
        } else {
            self.apply_pattern(id);
            PatternRequest::Applied(id)
        }
    }

    /// Switch the live sequence over to slot `id`.
    ///
    /// The outgoing live data is written back into the active slot first. All
    /// slots are then sized for the incoming bar count at the current meter,
    /// and the incoming slot is copied into the live sequence.
    pub fn apply_pattern(&mut self, id: PatternId) {
        let outgoing = self.patterns.get_mut(self.active);
        outgoing.tracks = self.sequence.tracks.clone();
        outgoing.removed = self.sequence.removed;
        outgoing.bars = self.sequence.bars();

        let bars = self.patterns.get(id).bars;
        let steps = self.time_signature.steps_for(bars);
        self.patterns.resize_all(steps);

        let incoming = self.patterns.get(id);
        self.sequence.tracks = incoming.tracks.clone();
        self.sequence.removed = incoming.removed;
        self.sequence.set_bars(bars);

        self.active = id;
        if self.pending == Some(id) {
            self.pending = None;
        }
        self.step = self.step.min(steps.saturating_sub(1));
    }

    // ---- length ------------------------------------------------------------

    /// Clamped into [1, 16]; resizes every lane in every slot.
    pub fn set_bars(&mut self, bars: u32) -> u32 {
        let bars = clamp_bars(bars);
        self.sequence.set_bars(bars);
        self.resize(self.time_signature.steps_for(bars));
        bars
    }

    /// Keeps the bar count and resizes to the new bar length.
    pub fn set_time_signature(&mut self, time_signature: TimeSignature) {
        self.time_signature = TimeSignature::new(time_signature.numerator, time_signature.denominator);
        self.resize(self.time_signature.steps_for(self.sequence.bars()));
    }

    fn resize(&mut self, steps: usize) {
        self.sequence.tracks.resize(steps);
        self.patterns.resize_all(steps);
        if steps > 0 {
            self.step %= steps;
        } else {
            self.step = 0;
        }
    }

    // ---- grid edits --------------------------------------------------------

    /// Returns the new state, or `None` when the step is out of range.
    pub fn toggle_step(&mut self, instrument: Instrument, step: usize) -> Option<bool> {
        self.sequence.tracks.toggle(instrument, step)
    }

    pub fn set_step(&mut self, instrument: Instrument, step: usize, active: bool) -> bool {
        self.sequence.tracks.set(instrument, step, active)
    }

    /// MIDI pitch of a synth step, clamped into [48, 84].
    pub fn set_pitch(&mut self, instrument: Instrument, step: usize, pitch: u8) -> bool {
        self.sequence.tracks.set_pitch(instrument, step, pitch)
    }

    /// Returns whether the instrument is now removed.
    pub fn toggle_removed(&mut self, instrument: Instrument) -> bool {
        self.sequence.removed.toggle(instrument)
    }

    /// Turn every step off and reset synth pitches. Removed flags, levels and
    /// the other pattern slots are left alone.
    pub fn clear(&mut self) {
        self.sequence.tracks.clear();
    }

    // ---- mixer -------------------------------------------------------------

    pub fn set_instrument_volume(&mut self, instrument: Instrument, level: f32) {
        self.sequence.levels.set_instrument(instrument, level);
    }

    pub fn set_section_volume(&mut self, section: Section, level: f32) {
        self.sequence.levels.set_section(section, level);
    }

    pub fn set_master_volume(&mut self, level: f32) {
        self.sequence.levels.set_master(level);
    }

    pub fn set_effect_level(&mut self, effect: Effect, level: f32) {
        self.sequence.effects.set(effect, level);
    }

    // ---- snapshots ---------------------------------------------------------

    pub fn snapshot(&self) -> SequenceSnapshot {
        SequenceSnapshot::capture(&self.sequence, self.time_signature)
    }

    /// Surrounding whitespace is trimmed; a blank name falls back to the
    /// default.
    pub fn set_name(&mut self, name: &str) {
        let name = name.trim();
        self.sequence.name = if name.is_empty() { DEFAULT_NAME } else { name }.to_string();
    }

    pub fn set_id(&mut self, id: Option<String>) {
        self.sequence.id = id;
    }

    /// Replace the whole state with `snapshot`.
    ///
    /// Values are clamped and every lane is sized to `bars × steps_per_bar`.
    /// Without a `bars` field the bar count is derived from `steps`; without
    /// a `timeSignature` the meter is 4/4. Pattern slots start over, holding
    /// the loaded data in slot 1. Play state is kept; the position rewinds.
    pub fn load(&mut self, snapshot: &SequenceSnapshot) {
        let time_signature = snapshot
            .time_signature
            .map(|ts| TimeSignature::new(ts.numerator, ts.denominator))
            .unwrap_or_default();
        let steps_per_bar = time_signature.steps_per_bar();
        let bars = clamp_bars(snapshot.bars.unwrap_or_else(|| {
            snapshot.steps.div_ceil(steps_per_bar).min(u32::MAX as usize) as u32
        }));
        let steps = time_signature.steps_for(bars);

        let mut tracks = TrackSet::new(steps);
        for (inst, lane) in snapshot.tracks.known() {
            let pitches = inst.is_synth().then(|| {
                snapshot
                    .pitches
                    .get(inst)
                    .map(|p| p.iter().map(|&midi| pitch_from_i32(midi)).collect::<Vec<u8>>())
                    .unwrap_or_default()
            });
            tracks.load_lane(inst, lane, pitches.as_deref());
        }
        // Pitch lanes can arrive without an activation lane.
        for inst in Instrument::SYNTHS {
            if snapshot.tracks.get(inst).is_none() {
                if let Some(pitches) = snapshot.pitches.get(inst) {
                    let pitches: Vec<u8> = pitches.iter().map(|&midi| pitch_from_i32(midi)).collect();
                    tracks.load_lane(inst, &[], Some(&pitches));
                }
            }
        }

        let mut removed = RemovedSet::default();
        for (inst, &flag) in snapshot.removed.known() {
            removed.set(inst, flag);
        }

        let mut effects = EffectLevels::default();
        for effect in Effect::ALL {
            effects.set(effect, snapshot.effects.get(effect));
        }

        let mut sequence = Sequence::new(clamp_bpm(snapshot.bpm), bars, steps_per_bar);
        sequence.name = snapshot.name.clone();
        sequence.tracks = tracks;
        sequence.removed = removed;
        sequence.levels = snapshot.volume.to_levels();
        sequence.effects = effects;
        sequence.id = snapshot.id.clone();

        let mut patterns = PatternStore::new(bars, steps_per_bar);
        *patterns.get_mut(PatternId::FIRST) = Pattern {
            tracks: sequence.tracks.clone(),
            removed: sequence.removed,
            bars,
        };

        self.time_signature = time_signature;
        self.sequence = sequence;
        self.patterns = patterns;
        self.active = PatternId::FIRST;
        self.pending = None;
        self.step = 0;
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new(super::sequence::DEFAULT_BPM, TimeSignature::FOUR_FOUR, 1)
    }
}

/// Duration of one sixteenth-note step at `bpm` (clamped).
pub fn step_interval(bpm: u32) -> Duration {
    Duration::from_secs_f64(60.0 / f64::from(clamp_bpm(bpm)) / 4.0)
}

fn pitch_from_i32(midi: i32) -> u8 {
    clamp_pitch(midi.clamp(0, 127) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport() -> Transport {
        Transport::default()
    }

    fn pattern(id: u8) -> PatternId {
        PatternId::new(id).unwrap()
    }

    #[test]
    fn interval_is_a_sixteenth_note() {
        assert_eq!(step_interval(120), Duration::from_millis(125));
        assert_eq!(step_interval(60), Duration::from_millis(250));
        // Out-of-range tempos are clamped first.
        assert_eq!(step_interval(1000), step_interval(200));
    }

    #[test]
    fn tick_fires_then_advances_and_wraps() {
        let mut t = transport();
        t.start();
        t.set_step(Instrument::Kick, 0, true);
        t.set_step(Instrument::Kick, 15, true);

        let first = t.tick();
        assert_eq!(first.fired_step, 0);
        assert_eq!(first.step, 1);
        assert_eq!(first.triggers.len(), 1);

        for _ in 1..15 {
            assert!(t.tick().triggers.is_empty());
        }
        let last = t.tick();
        assert_eq!(last.fired_step, 15);
        assert_eq!(last.step, 0);
        assert_eq!(last.triggers[0].instrument, Instrument::Kick);
    }

    #[test]
    fn triggers_fire_drums_before_synths() {
        let mut t = transport();
        t.set_step(Instrument::Arp, 0, true);
        t.set_step(Instrument::Clap, 0, true);
        t.set_step(Instrument::Kick, 0, true);
        t.set_step(Instrument::Bass, 0, true);

        let order: Vec<_> = t.triggers_at(0).iter().map(|tr| tr.instrument).collect();
        assert_eq!(
            order,
            vec![Instrument::Kick, Instrument::Clap, Instrument::Bass, Instrument::Arp]
        );
    }

    #[test]
    fn synth_triggers_carry_the_step_pitch() {
        let mut t = transport();
        t.set_step(Instrument::Lead, 3, true);
        t.set_pitch(Instrument::Lead, 3, 81);
        t.set_step(Instrument::Snare, 3, true);

        let triggers = t.triggers_at(3);
        assert_eq!(triggers[0].frequency, None);
        let freq = triggers[1].frequency.unwrap();
        assert!((freq - 880.0).abs() < 0.01);
    }

    #[test]
    fn removed_instruments_keep_their_steps_but_stay_silent() {
        let mut t = transport();
        t.set_step(Instrument::Kick, 0, true);
        assert!(t.toggle_removed(Instrument::Kick));

        assert!(t.triggers_at(0).is_empty());
        assert!(t.sequence().tracks.is_active(Instrument::Kick, 0));
    }

    #[test]
    fn gain_is_captured_when_the_step_fires() {
        let mut t = transport();
        t.set_step(Instrument::Hihat, 0, true);
        t.set_master_volume(0.5);
        t.set_section_volume(Section::Drums, 1.0);
        t.set_instrument_volume(Instrument::Hihat, 0.5);
        let before = t.tick().triggers[0].gain;
        assert_eq!(before, 0.25);

        t.set_master_volume(1.0);
        assert_eq!(t.triggers_at(0)[0].gain, 0.5);
    }

    #[test]
    fn requesting_the_active_pattern_is_a_no_op() {
        let mut t = transport();
        t.start();
        assert_eq!(t.request_pattern(1), PatternRequest::AlreadyActive);
        assert_eq!(t.pending_pattern(), None);
        assert_eq!(t.request_pattern(0), PatternRequest::Unknown);
        assert_eq!(t.request_pattern(9), PatternRequest::Unknown);
    }

    #[test]
    fn stopped_switch_is_immediate_and_keeps_outgoing_data() {
        let mut t = transport();
        t.set_step(Instrument::Snare, 4, true);

        assert_eq!(t.request_pattern(2), PatternRequest::Applied(pattern(2)));
        assert_eq!(t.active_pattern(), pattern(2));
        assert!(!t.sequence().tracks.is_active(Instrument::Snare, 4));
        assert!(t.patterns().get(PatternId::FIRST).tracks.is_active(Instrument::Snare, 4));

        t.request_pattern(1);
        assert!(t.sequence().tracks.is_active(Instrument::Snare, 4));
    }

    #[test]
    fn playing_switch_waits_for_the_wrap() {
        let mut t = transport();
        t.start();
        for _ in 0..5 {
            t.tick();
        }
        assert_eq!(t.request_pattern(3), PatternRequest::Queued(pattern(3)));
        // Latest request wins.
        assert_eq!(t.request_pattern(2), PatternRequest::Queued(pattern(2)));

        for _ in 5..15 {
            assert_eq!(t.tick().switched, None);
            assert_eq!(t.active_pattern(), PatternId::FIRST);
        }
        let wrap = t.tick();
        assert_eq!(wrap.fired_step, 15);
        assert_eq!(wrap.switched, Some(pattern(2)));
        assert_eq!(wrap.step, 0);
        assert_eq!(t.pending_pattern(), None);
    }

    #[test]
    fn last_step_plays_from_the_outgoing_pattern() {
        let mut t = transport();
        t.set_step(Instrument::Crash, 15, true);
        t.start();
        for _ in 0..15 {
            t.tick();
        }
        t.request_pattern(2);
        let wrap = t.tick();
        assert_eq!(wrap.triggers[0].instrument, Instrument::Crash);
        assert_eq!(t.active_pattern(), pattern(2));
    }

    #[test]
    fn switching_to_a_longer_pattern_starts_at_its_first_step() {
        let mut t = transport();
        t.request_pattern(2);
        t.set_bars(2);
        t.request_pattern(1);
        assert_eq!(t.steps(), 16);
        assert_eq!(t.patterns().get(pattern(2)).bars, 2);

        t.start();
        t.request_pattern(2);
        for _ in 0..15 {
            t.tick();
        }
        let wrap = t.tick();
        assert_eq!(wrap.switched, Some(pattern(2)));
        assert_eq!(wrap.step, 0);
        assert_eq!(t.steps(), 32);
    }

    #[test]
    fn apply_sizes_for_the_incoming_bar_count() {
        let mut t = transport();
        t.set_bars(4);
        assert_eq!(t.steps(), 64);

        t.request_pattern(2);
        // Slot 2 was sized along with everything else but kept its own bars.
        assert_eq!(t.bars(), 1);
        assert_eq!(t.steps(), 16);
        assert_eq!(t.patterns().get(PatternId::FIRST).bars, 4);
        assert!(t.patterns().iter().all(|(_, p)| p.steps() == 16));
    }

    #[test]
    fn stop_rewinds_and_applies_pending() {
        let mut t = transport();
        t.start();
        t.tick();
        t.tick();
        t.request_pattern(4);
        assert!(t.stop());
        assert_eq!(t.step(), 0);
        assert_eq!(t.active_pattern(), pattern(4));
        assert_eq!(t.pending_pattern(), None);
        assert!(!t.stop());
    }

    #[test]
    fn start_is_idempotent() {
        let mut t = transport();
        assert!(t.start());
        assert!(!t.start());
        assert!(t.is_playing());
    }

    #[test]
    fn shrinking_truncates_everywhere_and_wraps_the_position() {
        let mut t = transport();
        t.set_bars(2);
        t.set_step(Instrument::Kick, 20, true);
        t.start();
        for _ in 0..20 {
            t.tick();
        }
        assert_eq!(t.step(), 20);

        t.set_bars(1);
        assert_eq!(t.steps(), 16);
        assert_eq!(t.step(), 4);
        assert!(t.sequence().tracks.is_consistent());
        assert!(t.patterns().iter().all(|(_, p)| p.steps() == 16 && p.tracks.is_consistent()));
    }

    #[test]
    fn meter_change_keeps_bar_count() {
        let mut t = transport();
        t.set_bars(3);
        t.set_time_signature(TimeSignature::SEVEN_EIGHT);
        assert_eq!(t.bars(), 3);
        assert_eq!(t.steps(), 42);
        t.set_time_signature(TimeSignature::new(0, 0));
        assert_eq!(t.steps(), 48);
    }

    #[test]
    fn shorter_meter_resizes_every_slot() {
        let mut t = transport();
        t.set_step(Instrument::Kick, 15, true);
        t.set_time_signature(TimeSignature::new(2, 4));
        t.set_bars(1);

        assert_eq!(t.steps(), 8);
        assert!(t.sequence().tracks.is_consistent());
        assert!(t.patterns().iter().all(|(_, p)| p.steps() == 8 && p.tracks.is_consistent()));
        assert_eq!(t.toggle_step(Instrument::Kick, 15), None);
        assert_eq!(t.tick().step, 1);
    }

    #[test]
    fn names_are_trimmed_and_never_blank() {
        let mut t = transport();
        t.set_name("  Night Drive ");
        assert_eq!(t.sequence().name, "Night Drive");
        assert_eq!(t.snapshot().name, "Night Drive");
        t.set_name("   ");
        assert_eq!(t.sequence().name, DEFAULT_NAME);
    }

    #[test]
    fn bars_clamp() {
        let mut t = transport();
        assert_eq!(t.set_bars(0), 1);
        assert_eq!(t.set_bars(99), 16);
        assert_eq!(t.steps(), 256);
    }

    #[test]
    fn clear_turns_off_the_live_grid_only() {
        let mut t = transport();
        t.set_step(Instrument::Pad, 2, true);
        t.set_pitch(Instrument::Pad, 2, 50);
        t.toggle_removed(Instrument::Pad);
        t.clear();
        assert!(!t.sequence().tracks.is_active(Instrument::Pad, 2));
        assert_eq!(t.sequence().tracks.pitch(Instrument::Pad, 2), Some(DEFAULT_PITCH));
        assert!(t.sequence().removed.contains(Instrument::Pad));
    }

    #[test]
    fn snapshot_round_trips_through_load() {
        let mut t = transport();
        t.set_bars(2);
        t.set_time_signature(TimeSignature::THREE_FOUR);
        t.set_bpm(97);
        t.set_step(Instrument::Kick, 0, true);
        t.set_step(Instrument::Bass, 7, true);
        t.set_pitch(Instrument::Bass, 7, 52);
        t.toggle_removed(Instrument::Openhat);
        t.set_instrument_volume(Instrument::Lead, 0.25);
        t.set_effect_level(Effect::Filter, 0.5);
        t.set_id(Some("abc".into()));
        let snap = t.snapshot();

        let mut other = transport();
        other.load(&snap);
        assert_eq!(other.snapshot(), snap);
        assert_eq!(other.steps(), 24);
        assert_eq!(other.time_signature(), TimeSignature::THREE_FOUR);
    }

    #[test]
    fn load_normalizes_hostile_input() {
        let json = r#"{
            "name": "Legacy", "bpm": 400, "steps": 20,
            "tracks": { "drums": { "kick": [true, false, true] },
                        "synths": { "lead": [true] } },
            "volume": { "master": 2.0, "drums": 0.5, "synths": 0.5,
                        "perInstrument": { "drums": {}, "synths": { "lead": -3 } } },
            "effects": { "reverb": 7, "delay": 0.3, "filter": -1 },
            "removed": { "drums": { "cowbell": true }, "synths": {} },
            "pitches": { "synths": { "lead": [200, -5], "pad": [60] } }
        }"#;
        let snap = SequenceSnapshot::from_json(json).unwrap();
        let mut t = transport();
        t.load(&snap);

        assert_eq!(t.bpm(), 200);
        assert_eq!(t.bars(), 2);
        assert_eq!(t.steps(), 32);
        assert!(t.sequence().tracks.is_consistent());
        assert!(t.sequence().tracks.is_active(Instrument::Kick, 2));
        assert_eq!(t.sequence().tracks.pitch(Instrument::Lead, 0), Some(84));
        assert_eq!(t.sequence().tracks.pitch(Instrument::Lead, 1), Some(48));
        assert_eq!(t.sequence().tracks.pitch(Instrument::Pad, 0), Some(60));
        assert_eq!(t.levels().master(), 1.0);
        assert_eq!(t.levels().instrument(Instrument::Lead), 0.0);
        assert_eq!(t.effects().reverb, 1.0);
        assert_eq!(t.effects().filter, 0.0);
    }

    #[test]
    fn load_rewinds_and_resets_slots() {
        let mut t = transport();
        t.request_pattern(3);
        t.start();
        t.tick();
        let snap = Transport::default().snapshot();
        t.load(&snap);
        assert!(t.is_playing());
        assert_eq!(t.step(), 0);
        assert_eq!(t.active_pattern(), PatternId::FIRST);
    }
}
