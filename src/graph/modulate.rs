use crate::{
    dsp::modulate::block_average,
    graph::node::{GraphNode, Modulatable, RenderCtx},
    MAX_BLOCK_SIZE,
};

/*
Modulate Node
=============

Connects a control signal to a parameter on another node. The kit uses it
for three things:

  // kick pitch drop: 150 Hz → 50 Hz
  OscNode::sine()
      .with_frequency(50.0)
      .modulate(DecayNode::new(0.1), OscParam::Frequency, 100.0)

  // bass filter pluck: 2000 Hz → 400 Hz
  FilterNode::lowpass(400.0)
      .modulate(DecayNode::new(0.3), FilterParam::Cutoff, 1600.0)

  // lead vibrato: ±8 cents at 5 Hz
  OscNode::sawtooth()
      .modulate(LfoNode::sine(5.0), OscParam::Detune, 8.0)


Depth
-----

    modulated_value = base_value + (modulator × depth)

The base value is read back from the target every block and never written
by the modulation itself, so the parameter cannot drift.

See `dsp/modulate.rs` for the block-rate trade-offs.
*/

pub struct Modulate<S, L>
where
    S: GraphNode + Modulatable,
    L: GraphNode,
{
    source: S,            // The node being modulated (e.g., FilterNode)
    lfo: L,               // The modulation source (e.g., DecayNode, LfoNode)
    param: S::Param,      // Which parameter to modulate (e.g., FilterParam::Cutoff)
    depth: f32,           // Modulation amount
    lfo_buffer: Vec<f32>, // Temp buffer for modulator output
}

impl<S, L> Modulate<S, L>
where
    S: GraphNode + Modulatable,
    L: GraphNode,
{
    pub fn new(source: S, lfo: L, param: S::Param, depth: f32) -> Self {
        Self {
            source,
            lfo,
            param,
            depth,
            lfo_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<S, L> GraphNode for Modulate<S, L>
where
    S: GraphNode + Modulatable,
    L: GraphNode,
{
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let len = out.len();

        self.lfo.render_block(&mut self.lfo_buffer[..len], ctx);
        let lfo_avg = block_average(&self.lfo_buffer[..len]);

        let base_value = self.source.get_param(self.param);
        let modulation = lfo_avg * self.depth;
        self.source
            .apply_modulation(self.param, base_value, modulation);

        self.source.render_block(out, ctx);
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.source.note_on(ctx);
        self.lfo.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.source.note_off(ctx);
        self.lfo.note_off(ctx);
    }

    fn is_active(&self) -> bool {
        self.source.is_active()
    }

    fn get_envelope_level(&self) -> Option<f32> {
        self.source.get_envelope_level()
    }
}

impl<S, L> Modulatable for Modulate<S, L>
where
    S: GraphNode + Modulatable,
    L: GraphNode,
{
    type Param = S::Param;

    fn get_param(&self, param: Self::Param) -> f32 {
        self.source.get_param(param)
    }

    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32) {
        self.source.apply_modulation(param, base, modulation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{
        envelope::DecayNode,
        extensions::NodeExt,
        filter::{FilterNode, FilterParam},
        lfo::LfoNode,
        oscillator::{OscNode, OscParam},
    };

    fn zero_crossings(buffer: &[f32]) -> usize {
        buffer
            .windows(2)
            .filter(|w| (w[0] <= 0.0) != (w[1] <= 0.0))
            .count()
    }

    #[test]
    fn pitch_drop_starts_high_and_falls() {
        let ctx = RenderCtx::from_freq(48_000.0, 440.0, 1.0);
        let mut kick_body = OscNode::sine()
            .with_frequency(50.0)
            .modulate(DecayNode::new(0.1), OscParam::Frequency, 100.0);
        kick_body.note_on(&ctx);

        let mut early = vec![0.0; 2048];
        let mut late = vec![0.0; 2048];
        for chunk in early.chunks_mut(64) {
            kick_body.render_block(chunk, &ctx);
        }
        for _ in 0..20 {
            let mut skip = vec![0.0; 64];
            kick_body.render_block(&mut skip, &ctx);
        }
        for chunk in late.chunks_mut(64) {
            kick_body.render_block(chunk, &ctx);
        }

        assert!(zero_crossings(&early) > zero_crossings(&late));
    }

    #[test]
    fn extreme_depth_stays_finite() {
        let lfo = LfoNode::square(1.0);
        let mut filter = OscNode::sawtooth()
            .through(FilterNode::lowpass(1000.0).modulate(lfo, FilterParam::Cutoff, 100_000.0));

        let mut buffer = vec![0.0; 1024];
        let ctx = RenderCtx::from_freq(48000.0, 440.0, 1.0);
        filter.render_block(&mut buffer, &ctx);

        assert!(buffer.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn nested_modulation_reads_the_inner_base() {
        let node = OscNode::sawtooth()
            .with_detune(-12.0)
            .modulate(LfoNode::sine(5.0), OscParam::Detune, 8.0);
        assert_eq!(node.get_param(OscParam::Detune), -12.0);

        let mut stacked = node.modulate(LfoNode::sine(0.5), OscParam::Detune, 3.0);
        let ctx = RenderCtx::from_freq(48_000.0, 220.0, 1.0);
        let mut buffer = vec![0.0; 64];
        stacked.render_block(&mut buffer, &ctx);
        assert_eq!(stacked.get_param(OscParam::Detune), -12.0);
    }
}
