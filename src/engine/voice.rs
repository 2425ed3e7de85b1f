use crate::{
    graph::{GraphNode, RenderCtx},
    sequencing::Trigger,
    voices,
};

/// A fully built voice waiting for, or past, its start frame.
///
/// Built on the clock thread and moved to the audio thread whole, so the
/// audio side never allocates a graph.
pub struct ScheduledVoice {
    graph: Box<dyn GraphNode>,
    ctx: RenderCtx,
    gain: f32,
    /// Engine frame at which the first sample sounds.
    start_frame: u64,
    /// Frames rendered so far.
    elapsed: usize,
}

impl ScheduledVoice {
    pub fn new(trigger: &Trigger, sample_rate: f32, start_frame: u64) -> Self {
        let frequency = voices::sanitize_frequency(trigger.frequency.unwrap_or(voices::FALLBACK_FREQUENCY));
        let ctx = RenderCtx::from_freq(sample_rate, frequency, 1.0);

        let mut graph = voices::build(trigger.instrument);
        graph.note_on(&ctx);

        Self {
            graph,
            ctx,
            gain: if trigger.gain.is_finite() { trigger.gain.max(0.0) } else { 0.0 },
            start_frame,
            elapsed: 0,
        }
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// False once the graph has run out.
    pub fn is_active(&self) -> bool {
        self.graph.is_active()
    }

    /// Render the part of the chunk `[chunk_start, chunk_start + out.len())`
    /// this voice covers, added into `out` through `scratch`.
    ///
    /// Returns false when the voice has finished and can be released.
    pub fn render_into(&mut self, out: &mut [f32], scratch: &mut [f32], chunk_start: u64) -> bool {
        let len = out.len() as u64;
        if self.start_frame >= chunk_start + len {
            return true;
        }

        let skip = self.start_frame.saturating_sub(chunk_start) as usize;
        let frames = out.len() - skip;
        let scratch = &mut scratch[..frames];
        scratch.fill(0.0);

        self.graph.render_block(scratch, &self.ctx.advanced(self.elapsed));
        for (o, s) in out[skip..].iter_mut().zip(scratch.iter()) {
            *o += s * self.gain;
        }
        self.elapsed += frames;

        self.graph.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::Instrument;

    fn kick(gain: f32) -> Trigger {
        Trigger {
            instrument: Instrument::Kick,
            frequency: None,
            gain,
        }
    }

    #[test]
    fn waits_for_its_start_frame() {
        let mut voice = ScheduledVoice::new(&kick(1.0), 48_000.0, 100);
        let mut out = [0.0f32; 64];
        let mut scratch = [0.0f32; 64];

        assert!(voice.render_into(&mut out, &mut scratch, 0));
        assert!(out.iter().all(|&s| s == 0.0));

        voice.render_into(&mut out, &mut scratch, 64);
        assert!(out[..36].iter().all(|&s| s == 0.0));
        assert!(out[36..].iter().any(|&s| s != 0.0));
    }

    #[test]
    fn gain_scales_the_output() {
        let mut loud = ScheduledVoice::new(&kick(1.0), 48_000.0, 0);
        let mut quiet = ScheduledVoice::new(&kick(0.25), 48_000.0, 0);
        let mut a = [0.0f32; 64];
        let mut b = [0.0f32; 64];
        let mut scratch = [0.0f32; 64];

        loud.render_into(&mut a, &mut scratch, 0);
        quiet.render_into(&mut b, &mut scratch, 0);
        for (x, y) in a.iter().zip(&b) {
            assert!((x * 0.25 - y).abs() < 1e-6);
        }
    }

    #[test]
    fn hostile_values_are_sanitized() {
        let trigger = Trigger {
            instrument: Instrument::Lead,
            frequency: Some(f32::NAN),
            gain: f32::INFINITY,
        };
        let voice = ScheduledVoice::new(&trigger, 48_000.0, 0);
        assert_eq!(voice.gain(), 0.0);
        assert!(voice.is_active());
    }
}
