use std::{
    sync::{atomic::Ordering, Arc},
    time::Duration,
};

use rtrb::{Producer, PushError};

use crate::sequencing::{Trigger, TriggerSink};

use super::{voice::ScheduledVoice, EngineShared};

/// Clock-side end of the engine: builds voices and queues them for the audio
/// thread, each stamped with a start frame one lookahead past "now".
pub struct EngineHandle {
    producer: Producer<ScheduledVoice>,
    shared: Arc<EngineShared>,
    sample_rate: f32,
    lookahead_frames: u64,
    max_voices: usize,
    queue_capacity: usize,
}

impl EngineHandle {
    pub(super) fn new(
        producer: Producer<ScheduledVoice>,
        shared: Arc<EngineShared>,
        sample_rate: f32,
        lookahead: Duration,
        max_voices: usize,
    ) -> Self {
        let queue_capacity = producer.slots();
        Self {
            producer,
            shared,
            sample_rate,
            lookahead_frames: (lookahead.as_secs_f64() * f64::from(sample_rate)).round() as u64,
            max_voices,
            queue_capacity,
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn lookahead_frames(&self) -> u64 {
        self.lookahead_frames
    }

    /// Voices handed over and not yet finished, as last seen by the audio
    /// thread.
    pub fn active_voices(&self) -> usize {
        self.shared.active_voices.load(Ordering::Relaxed)
    }

    /// Triggers refused because the queue or the pool was full.
    pub fn dropped(&self) -> u64 {
        self.shared.dropped.load(Ordering::Relaxed)
    }

    /// Queue one voice. Returns false when it was dropped.
    pub fn schedule(&mut self, trigger: &Trigger, start_frame: u64) -> bool {
        let in_flight = self.active_voices() + (self.queue_capacity - self.producer.slots());
        if in_flight >= self.max_voices {
            log::debug!("voice pool full, dropping {}", trigger.instrument);
            self.shared.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        let voice = ScheduledVoice::new(trigger, self.sample_rate, start_frame);
        match self.producer.push(voice) {
            Ok(()) => true,
            Err(PushError::Full(_)) => {
                log::debug!("voice queue full, dropping {}", trigger.instrument);
                self.shared.dropped.fetch_add(1, Ordering::Relaxed);
                false
            }
        }
    }
}

impl TriggerSink for EngineHandle {
    fn fire(&mut self, triggers: &[Trigger]) {
        let start_frame = self.shared.frame.load(Ordering::Acquire) + self.lookahead_frames;
        for trigger in triggers {
            self.schedule(trigger, start_frame);
        }
    }
}
