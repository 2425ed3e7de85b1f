use crate::{
    dsp::envelope::{AdsrTimes, Envelope, ExpDecay},
    graph::node::{GraphNode, RenderCtx},
};

/// Linear ADSR envelope node.
///
/// Built with [`EnvNode::one_shot`] it releases on its own once the gate time
/// has passed, which is what every synth voice relies on to end.
pub struct EnvNode {
    env: Envelope,
}

impl EnvNode {
    /// Gated ADSR; releases only on `note_off`.
    pub fn adsr(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            env: Envelope::adsr(attack, decay, sustain, release),
        }
    }

    /// ADSR fitted into `duration` seconds that releases by itself.
    pub fn one_shot(attack: f32, decay: f32, sustain: f32, release: f32, duration: f32) -> Self {
        Self::from_times(AdsrTimes::fit(attack, decay, sustain, release, duration))
    }

    pub fn from_times(times: AdsrTimes) -> Self {
        Self {
            env: Envelope::one_shot(times),
        }
    }
}

impl GraphNode for EnvNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.env.render(out, ctx);
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.env.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.env.note_off(ctx);
    }

    fn get_envelope_level(&self) -> Option<f32> {
        Some(self.env.level())
    }

    fn is_active(&self) -> bool {
        self.env.is_active()
    }
}

/// Exponential decay from 1.0 to silence over `time` seconds.
///
/// Drum amplitude and pitch drops, plus the filter sweeps on bass and lead.
pub struct DecayNode {
    decay: ExpDecay,
}

impl DecayNode {
    pub fn new(time: f32) -> Self {
        Self {
            decay: ExpDecay::new(time),
        }
    }
}

impl GraphNode for DecayNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.decay.render(out, ctx);
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        self.decay.note_on();
    }

    fn get_envelope_level(&self) -> Option<f32> {
        Some(self.decay.level())
    }

    fn is_active(&self) -> bool {
        self.decay.is_active()
    }
}
