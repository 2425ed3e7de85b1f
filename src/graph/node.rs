/// Equal-tempered frequency of a MIDI note, with A4 (69) at 440 Hz.
#[inline]
pub fn midi_note_to_freq(note: u8) -> f32 {
    440.0 * ((f32::from(note) - 69.0) / 12.0).exp2()
}

/// What a node needs to know to render one block of a voice.
#[derive(Debug, Clone, Copy)]
pub struct RenderCtx {
    pub sample_rate: f32,
    /// Pitch of the step that started the voice, in Hz. Drums ignore it.
    pub frequency: f32,
    /// Level the voice was started at. Step voices always use 1.0; mixer
    /// gain is applied outside the graph.
    pub velocity: f32,
    /// Seconds since the voice started, at the first frame of the block.
    pub time: f64,
}

impl RenderCtx {
    /// Context for a synth step at a MIDI pitch.
    pub fn from_note(sample_rate: f32, note: u8, velocity: f32) -> Self {
        Self::from_freq(sample_rate, midi_note_to_freq(note), velocity)
    }

    pub fn from_freq(sample_rate: f32, frequency: f32, velocity: f32) -> Self {
        Self {
            sample_rate,
            frequency,
            velocity,
            time: 0.0,
        }
    }

    /// The same context moved forward by `frames` samples.
    pub fn advanced(&self, frames: usize) -> Self {
        let elapsed = if self.sample_rate > 0.0 {
            frames as f64 / self.sample_rate as f64
        } else {
            0.0
        };
        Self {
            time: self.time + elapsed,
            ..*self
        }
    }
}

/// A node with parameters that a [`Modulate`](super::modulate::Modulate)
/// wrapper can move each block.
pub trait Modulatable: Send {
    type Param: Copy + Send;

    fn get_param(&self, param: Self::Param) -> f32;

    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32);
}

/// One stage of a voice graph.
///
/// Voices are built once per step on the clock thread and then moved to the
/// audio thread, hence `Send`.
pub trait GraphNode: Send {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx);

    /// Start (or restart) the voice. Stateless nodes ignore it.
    fn note_on(&mut self, _ctx: &RenderCtx) {}

    /// Step voices never receive this; their envelopes end by themselves.
    fn note_off(&mut self, _ctx: &RenderCtx) {}

    fn get_envelope_level(&self) -> Option<f32> {
        None
    }

    /// False once the voice has gone silent for good and its pool slot can
    /// be reused. Sources with no envelope of their own never finish.
    fn is_active(&self) -> bool {
        true
    }
}

impl GraphNode for Box<dyn GraphNode> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        (**self).render_block(out, ctx)
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        (**self).note_on(ctx)
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        (**self).note_off(ctx)
    }

    fn get_envelope_level(&self) -> Option<f32> {
        (**self).get_envelope_level()
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}
