use crate::{graph::node::RenderCtx, MIN_TIME};

/*
Envelopes for One-Shot Voices
=============================

Every sound the sequencer fires is a one-shot: it is triggered by a step and
has to end on its own, because nothing ever sends a note-off. Two envelope
shapes cover all the voices.


Linear ADSR with an automatic gate
----------------------------------

  Level
    1.0 ┐     ╱╲
        │    ╱  ╲___________
    S   │   ╱               ╲
        │  ╱                 ╲
    0.0 └─╱───────────────────╲──→ Time
          A    D      S        R
          |<------ gate ------>|<- release ->|
          |<------------- duration --------->|

The gate is `duration - release`. When it elapses the envelope releases from
whatever level it has reached, exactly as if a key had been lifted. The four
stage boundaries are fitted so they never overlap:

    attack <= attack + decay <= duration - release <= duration

See `AdsrTimes::fit`.

The ramps are linear:

    increment = target_change / (time_seconds * sample_rate)

Release snapshots its start level and sample count at gate-off, then
interpolates to exactly 0.0.


Exponential decay
-----------------

Drum hits want a percussive curve rather than straight lines:

    level(t) = FLOOR ^ (t / time)        1.0 at t = 0, FLOOR at t = time

implemented as a per-sample multiplier, `coeff = FLOOR ^ (1 / samples)`.
Once `time` has elapsed the envelope drops to 0.0 and goes idle, which is what
lets a drum voice be freed.


State machine (ADSR)
--------------------

    Idle --note_on--> Attack --level=1--> Decay --level=S--> Sustain
                        |                   |                   |
                        +------ gate elapsed or note_off -------+
                                            |
                                            v
                        Idle <--level=0-- Release
*/

/// Lowest level an exponential decay reaches before going idle (-60 dB).
pub const DECAY_FLOOR: f32 = 0.001;

/// The current stage of the envelope state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    Idle,    // Gate low, envelope inactive, level = 0
    Attack,  // Gate just went high, ramping up to 1.0
    Decay,   // Reached peak, ramping down to sustain level
    Sustain, // Holding at sustain level while gate is high
    Release, // Gate went low, ramping down to 0
}

/// Stage lengths of a one-shot note, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdsrTimes {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
    pub duration: f32,
}

impl AdsrTimes {
    /// Fit the requested stage lengths inside `duration`.
    ///
    /// Release is honoured first, then attack, then decay; whatever does not
    /// fit is shortened. Negative or non-finite inputs count as zero.
    pub fn fit(attack: f32, decay: f32, sustain: f32, release: f32, duration: f32) -> Self {
        let non_negative = |value: f32| if value.is_finite() { value.max(0.0) } else { 0.0 };

        let duration = non_negative(duration).max(MIN_TIME);
        let release = non_negative(release).min(duration);
        let gate = duration - release;
        let attack = non_negative(attack).min(gate);
        let decay = non_negative(decay).min(gate - attack);
        let sustain = if sustain.is_finite() {
            sustain.clamp(0.0, 1.0)
        } else {
            0.0
        };

        Self {
            attack,
            decay,
            sustain,
            release,
            duration,
        }
    }

    /// Time at which the release stage begins.
    pub fn gate(&self) -> f32 {
        self.duration - self.release
    }
}

pub struct Envelope {
    // ADSR parameters (set once, define the envelope shape)
    attack_time: f32,   // seconds to ramp 0 → 1
    decay_time: f32,    // seconds to ramp 1 → sustain
    sustain_level: f32, // level to hold (0.0 - 1.0)
    release_time: f32,  // seconds to ramp current → 0
    gate_time: Option<f32>,

    // Runtime state (changes every sample)
    stage: EnvelopeState,
    level: f32,
    gate_elapsed_samples: u32,

    decay_start_level: f32,

    release_start_level: f32,
    release_total_samples: u32,
    release_elapsed_samples: u32,
}

impl Envelope {
    pub fn adsr(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack_time: attack.max(MIN_TIME),
            decay_time: decay.max(MIN_TIME),
            sustain_level: sustain.clamp(0.0, 1.0),
            release_time: release.max(MIN_TIME),
            gate_time: None,

            stage: EnvelopeState::Idle,
            level: 0.0,
            gate_elapsed_samples: 0,
            decay_start_level: 0.0,
            release_start_level: 0.0,
            release_total_samples: 1,
            release_elapsed_samples: 0,
        }
    }

    /// An ADSR that releases by itself once the gate time has passed.
    pub fn one_shot(times: AdsrTimes) -> Self {
        let mut env = Self::adsr(times.attack, times.decay, times.sustain, times.release);
        env.gate_time = Some(times.gate());
        env
    }

    /// Gate high: start the attack phase from zero.
    pub fn note_on(&mut self, _ctx: &RenderCtx) {
        self.level = 0.0;
        self.stage = EnvelopeState::Attack;
        self.gate_elapsed_samples = 0;
        self.release_elapsed_samples = 0;
    }

    /// Gate low: start the release phase from the current level.
    pub fn note_off(&mut self, ctx: &RenderCtx) {
        if matches!(self.stage, EnvelopeState::Idle | EnvelopeState::Release) {
            return;
        }

        self.release_start_level = self.level;
        self.release_total_samples = (self.release_time * ctx.sample_rate).round().max(1.0) as u32;
        self.release_elapsed_samples = 0;
        self.stage = EnvelopeState::Release;
    }

    /// Advance the envelope by one sample.
    pub fn next_sample(&mut self, ctx: &RenderCtx) {
        if let Some(gate) = self.gate_time {
            if matches!(
                self.stage,
                EnvelopeState::Attack | EnvelopeState::Decay | EnvelopeState::Sustain
            ) {
                let gate_samples = (gate * ctx.sample_rate).round() as u32;
                if self.gate_elapsed_samples >= gate_samples {
                    self.note_off(ctx);
                } else {
                    self.gate_elapsed_samples += 1;
                }
            }
        }

        match self.stage {
            EnvelopeState::Idle => {
                self.level = 0.0;
            }

            EnvelopeState::Attack => {
                let increment = 1.0 / (self.attack_time * ctx.sample_rate);
                self.level += increment;

                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.decay_start_level = 1.0;
                    self.stage = EnvelopeState::Decay;
                }
            }

            EnvelopeState::Decay => {
                let target = self.sustain_level;
                let total_drop = self.decay_start_level - target;
                let decrement = total_drop / (self.decay_time * ctx.sample_rate);
                self.level -= decrement;

                if self.level <= target {
                    self.level = target;
                    self.stage = EnvelopeState::Sustain;
                }
            }

            EnvelopeState::Sustain => {
                self.level = self.sustain_level;
            }

            EnvelopeState::Release => {
                // level = start * (1 - elapsed/total)
                let progress =
                    self.release_elapsed_samples as f32 / self.release_total_samples as f32;
                self.level = (self.release_start_level * (1.0 - progress)).max(0.0);

                self.release_elapsed_samples = self.release_elapsed_samples.saturating_add(1);

                if self.release_elapsed_samples >= self.release_total_samples {
                    self.level = 0.0;
                    self.stage = EnvelopeState::Idle;
                }
            }
        }

        debug_assert!((0.0..=1.0).contains(&self.level));
    }

    pub fn render(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        for sample in buffer.iter_mut() {
            self.next_sample(ctx);
            *sample = self.level;
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.stage, EnvelopeState::Idle)
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn state(&self) -> EnvelopeState {
        self.stage
    }
}

/// Percussive exponential decay from 1.0 to `DECAY_FLOOR`, then silence.
pub struct ExpDecay {
    time: f32,
    level: f32,
    elapsed_samples: u32,
    active: bool,
}

impl ExpDecay {
    pub fn new(time: f32) -> Self {
        Self {
            time: time.max(MIN_TIME),
            level: 0.0,
            elapsed_samples: 0,
            active: false,
        }
    }

    pub fn note_on(&mut self) {
        self.level = 1.0;
        self.elapsed_samples = 0;
        self.active = true;
    }

    pub fn render(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        let total = (self.time * ctx.sample_rate).round().max(1.0) as u32;
        let coeff = DECAY_FLOOR.powf(1.0 / total as f32);

        for sample in buffer.iter_mut() {
            if !self.active {
                *sample = 0.0;
                continue;
            }

            *sample = self.level;
            self.level *= coeff;
            self.elapsed_samples += 1;

            if self.elapsed_samples >= total {
                self.level = 0.0;
                self.active = false;
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn level(&self) -> f32 {
        self.level
    }
}
