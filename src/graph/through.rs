use crate::graph::node::{GraphNode, RenderCtx};

/*
Serial Signal Chain (Through)
=============================

Through connects two nodes in series: the source renders into the buffer and
the effect then processes that buffer in place.

  [Source] ──→ [Effect] ──→ output

Chains can be stacked, each stage rewriting the block left by the previous:

  // hi-hat: noise, strip the lows, then ring around 10 kHz
  OscNode::noise()
      .through(FilterNode::highpass(7_000.0))
      .through(FilterNode::bandpass(10_000.0))
      .amplify(DecayNode::new(0.05))

  // pad: layered oscillators into one gentle lowpass
  pad_layers.through(FilterNode::lowpass(2_000.0))

Lifetime
--------

A Through chain lives exactly as long as its source. Effects such as filters
have no notion of "finished", so the source (which normally carries the
envelope) decides when the voice can be dropped.
*/

pub struct Through<S, E> {
    source: S,
    effect: E,
}

impl<S, E> Through<S, E> {
    pub fn new(source: S, effect: E) -> Self {
        Self { source, effect }
    }
}

impl<S: GraphNode, E: GraphNode> GraphNode for Through<S, E> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);
        self.effect.render_block(out, ctx);
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.source.note_on(ctx);
        self.effect.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.source.note_off(ctx);
        self.effect.note_off(ctx);
    }

    fn is_active(&self) -> bool {
        self.source.is_active()
    }

    fn get_envelope_level(&self) -> Option<f32> {
        self.source.get_envelope_level()
    }
}
