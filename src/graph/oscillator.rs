use crate::dsp::oscillator::OscillatorBlock;
use crate::graph::node::{GraphNode, Modulatable, RenderCtx};

/*
Audio Oscillator
================

The raw sound source of every voice. Which waveform a recipe picks decides
most of its character before any filter touches it:

  Sine      fundamental only          kick body, sub bass, pad layers
  Sawtooth  all harmonics, 1/n        bass and lead brightness
  Square    odd harmonics, 1/n        hollow leads, bass "bite" layer
  Triangle  odd harmonics, 1/n²       soft pad layers, arp plucks
  Noise     every frequency equally   snare wires, hats, clap, crash

Pitch tracking
--------------

By default the oscillator plays `ctx.frequency`, the pitch of the step that
fired the voice. Drums pin their own frequency with `with_frequency()` so the
step pitch is ignored, and can then sweep it with `.modulate()`:

  // kick: 150 Hz falling to 50 Hz
  OscNode::sine()
      .with_frequency(50.0)
      .modulate(DecayNode::new(0.1), OscParam::Frequency, 100.0)

Detune is in cents on top of whichever base frequency is in use:

    final = base × 2^(cents / 1200)

±1200 cents is an octave, which is how the bass builds its sub and harmonic
layers from a single step pitch.
*/

/// Where an oscillator takes its pitch from.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Pitch {
    /// Follow `ctx.frequency`.
    Tracking,
    /// Pinned by the recipe. `current` moves under modulation, `base` does not.
    Fixed { base: f32, current: f32 },
}

pub struct OscNode {
    osc: OscillatorBlock,
    pitch: Pitch,
    /// Cents set by the recipe.
    detune: f32,
    /// Cents after modulation.
    detune_now: f32,
}

/// Parameters that can be modulated on an oscillator
#[derive(Clone, Copy, Debug)]
pub enum OscParam {
    /// Fixed frequency in Hz; tracking oscillators ignore it
    Frequency,
    /// Detune in cents (100 cents = 1 semitone)
    Detune,
}

const CENTS_PER_OCTAVE: f32 = 1200.0;
const MAX_DETUNE: f32 = 2.0 * CENTS_PER_OCTAVE;

impl OscNode {
    fn new(osc: OscillatorBlock) -> Self {
        Self {
            osc,
            pitch: Pitch::Tracking,
            detune: 0.0,
            detune_now: 0.0,
        }
    }

    pub fn sine() -> Self {
        Self::new(OscillatorBlock::sine())
    }

    pub fn sawtooth() -> Self {
        Self::new(OscillatorBlock::sawtooth())
    }

    pub fn square() -> Self {
        Self::new(OscillatorBlock::square())
    }

    pub fn triangle() -> Self {
        Self::new(OscillatorBlock::triangle())
    }

    pub fn noise() -> Self {
        Self::new(OscillatorBlock::noise())
    }

    /// Pin the pitch, ignoring the step's frequency.
    pub fn with_frequency(mut self, hz: f32) -> Self {
        self.pitch = Pitch::Fixed { base: hz, current: hz };
        self
    }

    /// Offset in cents (100 = one semitone, 1200 = one octave).
    pub fn with_detune(mut self, cents: f32) -> Self {
        self.detune = cents;
        self.detune_now = cents;
        self
    }

    fn frequency(&self, ctx: &RenderCtx) -> f32 {
        let hz = match self.pitch {
            Pitch::Tracking => ctx.frequency,
            Pitch::Fixed { current, .. } => current,
        };
        if self.detune_now == 0.0 {
            hz
        } else {
            hz * (self.detune_now / CENTS_PER_OCTAVE).exp2()
        }
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let ctx = RenderCtx {
            frequency: self.frequency(ctx),
            ..*ctx
        };
        self.osc.render(out, &ctx);
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        if let Pitch::Fixed { base, .. } = self.pitch {
            self.pitch = Pitch::Fixed { base, current: base };
        }
        self.detune_now = self.detune;
        self.osc.reset();
    }
}

impl Modulatable for OscNode {
    type Param = OscParam;

    fn get_param(&self, param: Self::Param) -> f32 {
        match (param, self.pitch) {
            (OscParam::Frequency, Pitch::Fixed { base, .. }) => base,
            (OscParam::Frequency, Pitch::Tracking) => 440.0,
            (OscParam::Detune, _) => self.detune,
        }
    }

    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32) {
        match param {
            OscParam::Frequency => {
                if let Pitch::Fixed { current, .. } = &mut self.pitch {
                    *current = (base + modulation).clamp(20.0, 20_000.0);
                }
            }
            OscParam::Detune => {
                self.detune_now = (base + modulation).clamp(-MAX_DETUNE, MAX_DETUNE);
            }
        }
    }
}
