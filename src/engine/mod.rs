//! The audio-thread renderer.
//!
//! ```text
//!   clock thread                         audio thread
//!   ────────────                         ────────────
//!   EngineHandle::fire ─► rtrb queue ─► AudioEngine::render
//!                                         ├─ VoicePool (per-voice gain)
//!                                         └─ MasterBus (filter → limiter)
//! ```
//!
//! The engine counts every frame it renders. A voice is stamped with the
//! frame it should start on (current count + lookahead) and rendered from
//! exactly that sample, so step timing does not depend on when the audio
//! callback happens to run.
//!
//! Nothing here locks, logs, or touches pattern data. Voices are rendered in
//! [`CONTROL_BLOCK`] chunks so block-rate modulation stays smooth regardless
//! of the callback size.

mod allocator;
mod scheduler;
mod voice;

use std::{
    sync::{
        atomic::{AtomicU32, AtomicU64, AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use rtrb::{Consumer, RingBuffer};

use crate::{
    mixer::{CutoffParam, MasterBus},
    MAX_BLOCK_SIZE,
};

pub use allocator::VoicePool;
pub use scheduler::EngineHandle;
pub use voice::ScheduledVoice;

/// Frames per voice render call.
pub const CONTROL_BLOCK: usize = 64;

/// Tuning for [`AudioEngine::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineOptions {
    /// How far ahead of the audio clock a triggered voice is placed.
    pub lookahead: Duration,
    /// Slots in the clock → audio voice queue.
    pub queue_capacity: usize,
    /// Voices sounding at once.
    pub max_voices: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            lookahead: Duration::from_millis(25),
            queue_capacity: 256,
            max_voices: 64,
        }
    }
}

/// Counters shared between the engine and its handle.
#[derive(Debug, Default)]
pub struct EngineShared {
    /// Frames rendered since the engine was created.
    frame: AtomicU64,
    active_voices: AtomicUsize,
    dropped: AtomicU64,
    /// Output peak of the last block, as `f32` bits.
    peak: AtomicU32,
}

/// Read-only view of the engine counters, for the front-end.
#[derive(Debug, Clone)]
pub struct EngineMeter(Arc<EngineShared>);

impl EngineMeter {
    pub fn frame(&self) -> u64 {
        self.0.frame.load(Ordering::Acquire)
    }

    pub fn active_voices(&self) -> usize {
        self.0.active_voices.load(Ordering::Relaxed)
    }

    pub fn dropped(&self) -> u64 {
        self.0.dropped.load(Ordering::Relaxed)
    }

    pub fn peak(&self) -> f32 {
        f32::from_bits(self.0.peak.load(Ordering::Relaxed))
    }
}

pub struct AudioEngine {
    consumer: Consumer<ScheduledVoice>,
    pool: VoicePool,
    bus: MasterBus,
    shared: Arc<EngineShared>,
    scratch: Vec<f32>,
    sample_rate: f32,
}

impl AudioEngine {
    /// Build the engine and the handle that feeds it.
    pub fn new(sample_rate: f32, cutoff: CutoffParam, options: EngineOptions) -> (Self, EngineHandle) {
        let (producer, consumer) = RingBuffer::new(options.queue_capacity.max(1));
        let shared = Arc::new(EngineShared::default());

        let engine = Self {
            consumer,
            pool: VoicePool::new(options.max_voices),
            bus: MasterBus::new(sample_rate, cutoff),
            shared: shared.clone(),
            scratch: vec![0.0; CONTROL_BLOCK],
            sample_rate,
        };
        let handle = EngineHandle::new(producer, shared, sample_rate, options.lookahead, options.max_voices);
        (engine, handle)
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn meter(&self) -> EngineMeter {
        EngineMeter(self.shared.clone())
    }

    /// Current position of the frame clock.
    pub fn frame(&self) -> u64 {
        self.shared.frame.load(Ordering::Acquire)
    }

    /// Render mono output of any length.
    pub fn render(&mut self, out: &mut [f32]) {
        for block in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.render_block(block);
        }
    }

    fn render_block(&mut self, out: &mut [f32]) {
        self.take_new_voices();

        out.fill(0.0);
        let start = self.frame();
        for (i, chunk) in out.chunks_mut(CONTROL_BLOCK).enumerate() {
            let chunk_start = start + (i * CONTROL_BLOCK) as u64;
            self.pool.render(chunk, &mut self.scratch, chunk_start);
        }

        self.bus.process(out);

        let peak = out.iter().fold(0.0f32, |peak, s| peak.max(s.abs()));
        self.shared.peak.store(peak.to_bits(), Ordering::Relaxed);
        self.shared.active_voices.store(self.pool.active(), Ordering::Relaxed);
        self.shared.frame.store(start + out.len() as u64, Ordering::Release);
    }

    fn take_new_voices(&mut self) {
        while let Ok(voice) = self.consumer.pop() {
            if self.pool.insert(voice).is_err() {
                self.shared.dropped.fetch_add(1, Ordering::Relaxed);
            }
        }
        self.shared.active_voices.store(self.pool.active(), Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{instruments::Instrument, sequencing::{Trigger, TriggerSink}};

    const SR: f32 = 48_000.0;

    fn options() -> EngineOptions {
        EngineOptions {
            lookahead: Duration::from_millis(10),
            queue_capacity: 8,
            max_voices: 4,
        }
    }

    fn kick() -> Trigger {
        Trigger {
            instrument: Instrument::Kick,
            frequency: None,
            gain: 0.5,
        }
    }

    fn first_sound(buffer: &[f32]) -> Option<usize> {
        buffer.iter().position(|s| s.abs() > 1e-6)
    }

    #[test]
    fn silent_without_voices() {
        let (mut engine, _handle) = AudioEngine::new(SR, CutoffParam::default(), options());
        let mut out = vec![1.0f32; 1000];
        engine.render(&mut out);
        assert!(out.iter().all(|&s| s == 0.0));
        assert_eq!(engine.frame(), 1000);
    }

    #[test]
    fn voices_start_one_lookahead_after_the_frame_clock() {
        let (mut engine, mut handle) = AudioEngine::new(SR, CutoffParam::default(), options());
        let mut out = vec![0.0f32; 1000];
        engine.render(&mut out);

        handle.fire(&[kick()]);
        let mut out = vec![0.0f32; 2000];
        engine.render(&mut out);

        // 10 ms at 48 kHz = 480 frames after frame 1000.
        let onset = first_sound(&out).unwrap();
        assert!((480..=482).contains(&onset), "onset at {onset}");
    }

    #[test]
    fn onset_does_not_depend_on_callback_size() {
        let onset_with = |block: usize| {
            let (mut engine, mut handle) = AudioEngine::new(SR, CutoffParam::default(), options());
            handle.fire(&[kick()]);
            let mut all = Vec::new();
            let mut out = vec![0.0f32; block];
            while all.len() < 2048 {
                engine.render(&mut out);
                all.extend_from_slice(&out);
            }
            first_sound(&all)
        };
        assert_eq!(onset_with(37), onset_with(512));
    }

    #[test]
    fn excess_voices_are_dropped() {
        let (mut engine, mut handle) = AudioEngine::new(SR, CutoffParam::default(), options());
        handle.fire(&[kick(), kick(), kick(), kick(), kick(), kick()]);
        assert_eq!(handle.dropped(), 2);

        let mut out = vec![0.0f32; 256];
        engine.render(&mut out);
        assert_eq!(engine.meter().active_voices(), 4);
    }

    #[test]
    fn voices_finish_and_free_the_pool() {
        let (mut engine, mut handle) = AudioEngine::new(SR, CutoffParam::default(), options());
        handle.fire(&[Trigger {
            instrument: Instrument::Hihat,
            frequency: None,
            gain: 1.0,
        }]);
        let mut out = vec![0.0f32; 512];
        for _ in 0..20 {
            engine.render(&mut out);
        }
        assert_eq!(engine.meter().active_voices(), 0);
        assert!(engine.meter().peak() < 1e-3);
    }
}
