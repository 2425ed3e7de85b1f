use crate::{
    dsp::oscillator::OscillatorBlock,
    graph::node::{GraphNode, RenderCtx},
};

/*
LFO (Low Frequency Oscillator)
==============================

An oscillator running below the audio band, used only as a modulator. It
ignores the step pitch and runs at its own fixed rate.

  // lead vibrato: 5 Hz, ±8 cents
  OscNode::sawtooth().modulate(LfoNode::sine(5.0), OscParam::Detune, 8.0)

  // slow pad shimmer
  LfoNode::triangle(0.3)

Output is bipolar, [-1, 1]. Phase restarts on every note so each hit of the
same voice moves identically.
*/

pub struct LfoNode {
    osc: OscillatorBlock,
    frequency: f32, // Fixed frequency in Hz (ignores note context)
}

impl LfoNode {
    fn new(osc: OscillatorBlock, frequency: f32) -> Self {
        Self { osc, frequency }
    }

    pub fn sine(frequency: f32) -> Self {
        Self::new(OscillatorBlock::sine(), frequency)
    }

    pub fn sawtooth(frequency: f32) -> Self {
        Self::new(OscillatorBlock::sawtooth(), frequency)
    }

    pub fn square(frequency: f32) -> Self {
        Self::new(OscillatorBlock::square(), frequency)
    }

    pub fn triangle(frequency: f32) -> Self {
        Self::new(OscillatorBlock::triangle(), frequency)
    }
}

impl GraphNode for LfoNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let lfo_ctx = RenderCtx {
            frequency: self.frequency,
            ..*ctx
        };
        self.osc.render(out, &lfo_ctx);
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        self.osc.reset();
    }
}
