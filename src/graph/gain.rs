use crate::graph::node::{GraphNode, RenderCtx};

/// Scales a node's output by a fixed factor.
///
/// Recipes use it to balance layers against each other before they are mixed,
/// since `Mix` only crossfades.
pub struct Gain<N> {
    source: N,
    amount: f32,
}

impl<N> Gain<N> {
    pub fn new(source: N, amount: f32) -> Self {
        Self { source, amount }
    }
}

impl<N: GraphNode> GraphNode for Gain<N> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);
        for sample in out.iter_mut() {
            *sample *= self.amount;
        }
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.source.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.source.note_off(ctx);
    }

    fn is_active(&self) -> bool {
        self.source.is_active()
    }

    fn get_envelope_level(&self) -> Option<f32> {
        self.source.get_envelope_level()
    }
}
