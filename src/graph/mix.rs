use crate::{
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/*
Parallel Signal Mixing
======================

Mix renders two sources side by side and crossfades them linearly:

    output = A × (1 - balance) + B × balance

  balance = 0.0 → all A
  balance = 0.5 → half of each
  balance = 1.0 → all B

Linear crossfades dip in perceived loudness around the middle. The voices
compensate with their own gain stages instead of using equal-power curves.

Layering more than two sources is done by nesting. Three equal parts:

    a.mix(b, 0.5).mix(c, 1.0 / 3.0)

gives a/3 + b/3 + c/3, which is how the clap stacks its three bursts.

Both sources receive note events. A mix stays active while either side is.
*/

pub struct Mix<A, B> {
    pub source_a: A,
    pub source_b: B,
    pub balance: f32, // 0.0 = all A, 1.0 = all B, 0.5 = equal mix
    temp_buffer: Vec<f32>,
}

impl<A, B> Mix<A, B> {
    pub fn new(source_a: A, source_b: B, balance: f32) -> Self {
        Mix {
            source_a,
            source_b,
            balance: balance.clamp(0.0, 1.0),
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<S: GraphNode, M: GraphNode> GraphNode for Mix<S, M> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source_a.render_block(out, ctx);

        let frames = &mut self.temp_buffer[..out.len()];
        frames.fill(0.0);

        self.source_b.render_block(frames, ctx);

        let weight_a = 1.0 - self.balance;
        let weight_b = self.balance;
        for (o, b) in out.iter_mut().zip(frames.iter()) {
            *o = (*o * weight_a) + (*b * weight_b);
        }
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.source_a.note_on(ctx);
        self.source_b.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.source_a.note_off(ctx);
        self.source_b.note_off(ctx);
    }

    fn is_active(&self) -> bool {
        self.source_a.is_active() || self.source_b.is_active()
    }

    fn get_envelope_level(&self) -> Option<f32> {
        match (
            self.source_a.get_envelope_level(),
            self.source_b.get_envelope_level(),
        ) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{envelope::DecayNode, extensions::NodeExt, oscillator::OscNode};

    fn ctx() -> RenderCtx {
        RenderCtx::from_freq(48_000.0, 440.0, 1.0)
    }

    #[test]
    fn balance_extremes_select_one_source() {
        let mut only_a = OscNode::sine().mix(OscNode::square(), 0.0);
        let mut sine = OscNode::sine();

        let mut mixed = vec![0.0; 256];
        let mut reference = vec![0.0; 256];
        only_a.render_block(&mut mixed, &ctx());
        sine.render_block(&mut reference, &ctx());

        assert_eq!(mixed, reference);
    }

    #[test]
    fn equal_mix_of_identical_sources_is_unchanged() {
        let mut mixed = OscNode::sine().mix(OscNode::sine(), 0.5);
        let mut sine = OscNode::sine();

        let mut a = vec![0.0; 256];
        let mut b = vec![0.0; 256];
        mixed.render_block(&mut a, &ctx());
        sine.render_block(&mut b, &ctx());

        for (x, y) in a.iter().zip(&b) {
            assert!((x - y).abs() < 1e-6);
        }
    }

    #[test]
    fn nested_thirds_weigh_sources_equally() {
        // At 0 Hz a square holds 1.0 and a sine holds 0.0.
        let one = || OscNode::square().with_frequency(0.0);
        let zero = || OscNode::sine().with_frequency(0.0);

        for position in 0..3 {
            let mut parts: Vec<Box<dyn GraphNode>> = vec![Box::new(zero()), Box::new(zero()), Box::new(zero())];
            parts[position] = Box::new(one());
            let mut parts = parts.into_iter();
            let (a, b, c) = match (parts.next(), parts.next(), parts.next()) {
                (Some(a), Some(b), Some(c)) => (a, b, c),
                _ => unreachable!(),
            };
            let mut nested = a.mix(b, 0.5).mix(c, 1.0 / 3.0);

            let mut buffer = vec![0.0; 8];
            nested.render_block(&mut buffer, &ctx());
            assert!((buffer[0] - 1.0 / 3.0).abs() < 1e-5, "position {position}: {}", buffer[0]);
        }
    }

    #[test]
    fn active_while_either_side_is() {
        let c = RenderCtx::from_freq(1_000.0, 100.0, 1.0);
        let mut mixed = OscNode::sine()
            .amplify(DecayNode::new(0.01))
            .mix(OscNode::sine().amplify(DecayNode::new(0.5)), 0.5);
        mixed.note_on(&c);

        let mut buffer = vec![0.0; 50];
        mixed.render_block(&mut buffer, &c);
        assert!(mixed.is_active());

        let mut buffer = vec![0.0; 500];
        for chunk in buffer.chunks_mut(100) {
            mixed.render_block(chunk, &c);
        }
        assert!(!mixed.is_active());
    }
}
