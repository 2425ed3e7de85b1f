use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::graph::node::RenderCtx;

/*
Phase-Accumulator Oscillator
============================

Every periodic waveform here is driven by the same phase accumulator:

    phase += frequency / sample_rate      (wrapped into [0, 1))

and the waveform is a pure function of that phase:

    sine      sin(2π · phase)
    saw       2 · phase - 1
    square    +1 for phase < 0.5, -1 otherwise
    triangle  1 - 4 · |phase - 0.5|

These are naive (non band-limited) shapes. Voices in this crate are short and
always pass through a low-pass or band-pass stage, which hides most of the
aliasing.

Noise ignores the phase entirely and comes from a xorshift32 generator. It is
deterministic per seed, which keeps renders reproducible in tests.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OscillatorWaveform {
    Sine,
    Saw,
    Square,
    Triangle,
    Noise,
}

const NOISE_SEED: u32 = 0x9E37_79B9;

pub struct OscillatorBlock {
    waveform: OscillatorWaveform,
    phase: f32,
    noise_state: u32,
}

impl OscillatorBlock {
    pub fn new(waveform: OscillatorWaveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
            noise_state: NOISE_SEED,
        }
    }

    pub fn sine() -> Self {
        Self::new(OscillatorWaveform::Sine)
    }

    pub fn sawtooth() -> Self {
        Self::new(OscillatorWaveform::Saw)
    }

    pub fn square() -> Self {
        Self::new(OscillatorWaveform::Square)
    }

    pub fn triangle() -> Self {
        Self::new(OscillatorWaveform::Triangle)
    }

    pub fn noise() -> Self {
        Self::new(OscillatorWaveform::Noise)
    }

    pub fn waveform(&self) -> OscillatorWaveform {
        self.waveform
    }

    #[inline]
    fn next_noise(&mut self) -> f32 {
        let mut x = self.noise_state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.noise_state = x;
        (x as f32 / u32::MAX as f32) * 2.0 - 1.0
    }

    #[inline]
    pub fn next_sample(&mut self, increment: f32) -> f32 {
        let phase = self.phase;
        let sample = match self.waveform {
            OscillatorWaveform::Sine => (TAU * phase).sin(),
            OscillatorWaveform::Saw => 2.0 * phase - 1.0,
            OscillatorWaveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            OscillatorWaveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
            OscillatorWaveform::Noise => return self.next_noise(),
        };

        self.phase = (phase + increment).fract();
        sample
    }

    /// Fill `destination` with the waveform at `ctx.frequency`.
    pub fn render(&mut self, destination: &mut [f32], ctx: &RenderCtx) {
        let increment = if ctx.sample_rate > 0.0 {
            (ctx.frequency / ctx.sample_rate).clamp(0.0, 0.5)
        } else {
            0.0
        };

        for sample in destination.iter_mut() {
            *sample = self.next_sample(increment);
        }
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.noise_state = NOISE_SEED;
    }
}
