use super::voice::ScheduledVoice;

/// Fixed set of voice slots owned by the audio thread.
///
/// The slot vector is allocated once; taking and releasing a slot never
/// reallocates. When every slot is busy a new voice is refused rather than
/// stealing one that is still sounding.
pub struct VoicePool {
    slots: Vec<Option<ScheduledVoice>>,
    active: usize,
}

impl VoicePool {
    pub fn new(max_voices: usize) -> Self {
        let mut slots = Vec::with_capacity(max_voices.max(1));
        slots.resize_with(max_voices.max(1), || None);
        Self { slots, active: 0 }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    /// Hands the voice back when the pool is full.
    pub fn insert(&mut self, voice: ScheduledVoice) -> Result<(), ScheduledVoice> {
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(voice);
                self.active += 1;
                Ok(())
            }
            None => Err(voice),
        }
    }

    /// Render one chunk of every voice into `out`, releasing finished ones.
    pub fn render(&mut self, out: &mut [f32], scratch: &mut [f32], chunk_start: u64) {
        for slot in &mut self.slots {
            let Some(voice) = slot else { continue };
            if !voice.render_into(out, scratch, chunk_start) {
                *slot = None;
                self.active -= 1;
            }
        }
    }
}
