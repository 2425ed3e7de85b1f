use crate::graph::node::{GraphNode, RenderCtx};

/// Holds a node silent for a fixed time after the note starts.
///
/// The wrapped node is not rendered at all during the wait, so its envelope
/// begins exactly when the delay runs out. The clap builds its flam out of
/// three bursts started 10 ms apart.
pub struct StartAt<N> {
    source: N,
    delay_secs: f32,
    remaining: Option<usize>,
    triggered: bool,
}

impl<N> StartAt<N> {
    pub fn new(source: N, delay_secs: f32) -> Self {
        Self {
            source,
            delay_secs: if delay_secs.is_finite() { delay_secs.max(0.0) } else { 0.0 },
            remaining: None,
            triggered: false,
        }
    }
}

impl<N: GraphNode> GraphNode for StartAt<N> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let remaining = match self.remaining {
            Some(remaining) => remaining,
            None if self.triggered => (self.delay_secs * ctx.sample_rate.max(0.0)).round() as usize,
            None => 0,
        };

        let silent = remaining.min(out.len());
        out[..silent].fill(0.0);
        self.remaining = Some(remaining - silent);

        if silent < out.len() {
            self.source
                .render_block(&mut out[silent..], &ctx.advanced(silent));
        }
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.triggered = true;
        self.remaining = None;
        self.source.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.source.note_off(ctx);
    }

    fn is_active(&self) -> bool {
        let waiting = self.triggered && self.remaining != Some(0);
        waiting || self.source.is_active()
    }

    fn get_envelope_level(&self) -> Option<f32> {
        self.source.get_envelope_level()
    }
}
