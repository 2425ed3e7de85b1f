//! The `Sequencer`: everything a front-end needs, wired together.
//!
//! # Example
//!
//! ```ignore
//! use saavy_grid::{config::SequencerConfig, instruments::Instrument, runtime::Sequencer};
//!
//! let mut seq = Sequencer::new(SequencerConfig::new().bpm(100));
//! seq.toggle_step(Instrument::Kick, 0);
//! seq.toggle_step(Instrument::Hihat, 2);
//! seq.start();
//! for event in seq.poll_events() {
//!     println!("{event:?}");
//! }
//! ```
//!
//! Every call locks the transport briefly and returns. Ticking happens on
//! the clock thread, rendering on the audio thread. Without a usable output
//! device the sequencer still runs, silently.

mod output;

use std::sync::{Arc, Mutex};

use crossbeam_channel::Receiver;

use crate::{
    config::SequencerConfig,
    engine::EngineMeter,
    instruments::{Instrument, Section},
    mixer::{CutoffParam, Effect},
    persistence::{JsonDirStore, MemoryStore, SequenceStore, SequenceSummary, StoreError},
    sequencing::{
        clock::{lock, EVENT_CAPACITY},
        EventSender, PatternRequest, SharedTransport, StepClock, TimeSignature, Transport,
        TransportEvent, Trigger, TriggerSink,
    },
    snapshot::SequenceSnapshot,
};

pub use output::AudioOutput;

pub struct Sequencer {
    transport: SharedTransport,
    clock: StepClock,
    events: EventSender,
    event_rx: Receiver<TransportEvent>,
    cutoff: CutoffParam,
    store: Box<dyn SequenceStore>,
    meter: Option<EngineMeter>,
    // Declared last so the clock thread is joined before the stream closes.
    _output: Option<AudioOutput>,
}

impl Sequencer {
    /// Open the default audio device and start the clock thread.
    ///
    /// Audio failures are logged once and the sequencer runs without sound.
    pub fn new(config: SequencerConfig) -> Self {
        let config = config.normalized();
        let cutoff = CutoffParam::default();
        let store = default_store(&config);

        match AudioOutput::open(cutoff.clone(), config.engine_options()) {
            Ok((output, handle, meter)) => {
                let mut seq = Self::assemble(&config, cutoff, handle, store);
                seq.meter = Some(meter);
                seq._output = Some(output);
                seq
            }
            Err(err) => {
                log::warn!("audio output unavailable, running silently: {err:#}");
                Self::assemble(&config, cutoff, |_: &[Trigger]| {}, store)
            }
        }
    }

    /// A sequencer whose fired steps go to `sink` instead of an audio device.
    pub fn with_sink<S>(config: SequencerConfig, sink: S, store: Box<dyn SequenceStore>) -> Self
    where
        S: TriggerSink + 'static,
    {
        let config = config.normalized();
        Self::assemble(&config, CutoffParam::default(), sink, store)
    }

    fn assemble<S>(
        config: &SequencerConfig,
        cutoff: CutoffParam,
        sink: S,
        store: Box<dyn SequenceStore>,
    ) -> Self
    where
        S: TriggerSink + 'static,
    {
        let transport = Transport::new(config.bpm, config.time_signature, config.bars);
        cutoff.set(transport.effects().filter_cutoff_hz());
        let transport: SharedTransport = Arc::new(Mutex::new(transport));

        let (tx, event_rx) = crossbeam_channel::bounded(EVENT_CAPACITY);
        let events = EventSender::new(tx);
        let clock = StepClock::spawn(transport.clone(), sink, events.clone());

        Self {
            transport,
            clock,
            events,
            event_rx,
            cutoff,
            store,
            meter: None,
            _output: None,
        }
    }

    /// Read transport state under the lock.
    pub fn view<R>(&self, f: impl FnOnce(&Transport) -> R) -> R {
        f(&lock(&self.transport))
    }

    pub fn events(&self) -> &Receiver<TransportEvent> {
        &self.event_rx
    }

    /// Drain pending events without blocking.
    pub fn poll_events(&self) -> Vec<TransportEvent> {
        self.event_rx.try_iter().collect()
    }

    /// `None` when running without audio.
    pub fn meter(&self) -> Option<&EngineMeter> {
        self.meter.as_ref()
    }

    pub fn has_audio(&self) -> bool {
        self._output.is_some()
    }

    // ---- transport ---------------------------------------------------------

    /// Idempotent.
    pub fn start(&self) {
        if lock(&self.transport).start() {
            log::debug!("transport started");
            self.clock.start();
        }
    }

    /// Stop and rewind. Voices already sounding ring out.
    pub fn stop(&self) {
        let (stopped, active, pending) = {
            let mut transport = lock(&self.transport);
            let before = transport.active_pattern();
            let stopped = transport.stop();
            (stopped, (before, transport.active_pattern()), transport.pending_pattern())
        };
        if !stopped {
            return;
        }
        self.clock.stop();
        log::debug!("transport stopped");
        if active.0 != active.1 {
            self.events.send(TransportEvent::Pattern {
                active: active.1,
                pending,
            });
        }
        self.events.send(TransportEvent::Stopped);
    }

    /// Clamped into [60, 200]. While playing, the next step is one new
    /// interval from now.
    pub fn set_bpm(&self, bpm: u32) -> u32 {
        let (bpm, playing) = {
            let mut transport = lock(&self.transport);
            (transport.set_bpm(bpm), transport.is_playing())
        };
        if playing {
            self.clock.retime();
        }
        bpm
    }

    pub fn set_bars(&self, bars: u32) -> u32 {
        lock(&self.transport).set_bars(bars)
    }

    pub fn set_time_signature(&self, time_signature: TimeSignature) {
        lock(&self.transport).set_time_signature(time_signature);
    }

    pub fn request_pattern(&self, id: u8) -> PatternRequest {
        let (outcome, active, pending) = {
            let mut transport = lock(&self.transport);
            let outcome = transport.request_pattern(id);
            (outcome, transport.active_pattern(), transport.pending_pattern())
        };
        if matches!(outcome, PatternRequest::Applied(_) | PatternRequest::Queued(_)) {
            self.events.send(TransportEvent::Pattern { active, pending });
        }
        outcome
    }

    // ---- grid --------------------------------------------------------------

    pub fn toggle_step(&self, instrument: Instrument, step: usize) -> Option<bool> {
        lock(&self.transport).toggle_step(instrument, step)
    }

    pub fn set_step(&self, instrument: Instrument, step: usize, active: bool) -> bool {
        lock(&self.transport).set_step(instrument, step, active)
    }

    pub fn set_pitch(&self, instrument: Instrument, step: usize, pitch: u8) -> bool {
        lock(&self.transport).set_pitch(instrument, step, pitch)
    }

    pub fn toggle_instrument_removed(&self, instrument: Instrument) -> bool {
        lock(&self.transport).toggle_removed(instrument)
    }

    pub fn clear(&self) {
        lock(&self.transport).clear();
    }

    // ---- mixer -------------------------------------------------------------

    pub fn set_instrument_volume(&self, instrument: Instrument, level: f32) {
        lock(&self.transport).set_instrument_volume(instrument, level);
    }

    pub fn set_section_volume(&self, section: Section, level: f32) {
        lock(&self.transport).set_section_volume(section, level);
    }

    pub fn set_master_volume(&self, level: f32) {
        lock(&self.transport).set_master_volume(level);
    }

    pub fn set_effect_level(&self, effect: Effect, level: f32) {
        let cutoff = {
            let mut transport = lock(&self.transport);
            transport.set_effect_level(effect, level);
            transport.effects().filter_cutoff_hz()
        };
        self.cutoff.set(cutoff);
    }

    /// Current master filter cutoff in Hz.
    pub fn filter_cutoff_hz(&self) -> f32 {
        self.cutoff.get()
    }

    // ---- snapshots & persistence ------------------------------------------

    /// Rename the live sequence. Stored copies change on the next save.
    pub fn set_name(&self, name: &str) {
        lock(&self.transport).set_name(name);
    }

    pub fn sequence_data(&self) -> SequenceSnapshot {
        lock(&self.transport).snapshot()
    }

    /// Replace the whole state. Playback keeps going from step 0.
    pub fn load_sequence(&self, snapshot: &SequenceSnapshot) {
        let (cutoff, active) = {
            let mut transport = lock(&self.transport);
            transport.load(snapshot);
            (transport.effects().filter_cutoff_hz(), transport.active_pattern())
        };
        self.cutoff.set(cutoff);
        self.events.send(TransportEvent::Pattern { active, pending: None });
        self.events.send(TransportEvent::Step(0));
    }

    /// Save the live sequence. Updates the stored copy when the sequence
    /// already has an id, otherwise creates one and adopts the new id.
    pub fn save(&mut self) -> Result<String, StoreError> {
        let snapshot = self.sequence_data();
        let id = match snapshot.id.as_deref() {
            Some(id) => match self.store.update(id, &snapshot) {
                Ok(()) => id.to_string(),
                Err(StoreError::NotFound(_)) => self.store.create(&snapshot)?,
                Err(err) => return Err(err),
            },
            None => self.store.create(&snapshot)?,
        };
        lock(&self.transport).set_id(Some(id.clone()));
        log::info!("saved sequence {id}");
        Ok(id)
    }

    pub fn open(&mut self, id: &str) -> Result<(), StoreError> {
        let snapshot = self.store.get(id)?;
        self.load_sequence(&snapshot);
        log::info!("opened sequence {id}");
        Ok(())
    }

    /// Delete a stored sequence. The live sequence is kept but forgets the
    /// id if it was the one deleted.
    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        self.store.delete(id)?;
        let mut transport = lock(&self.transport);
        if transport.sequence().id.as_deref() == Some(id) {
            transport.set_id(None);
        }
        Ok(())
    }

    pub fn list(&self) -> Result<Vec<SequenceSummary>, StoreError> {
        self.store.list()
    }
}

fn default_store(config: &SequencerConfig) -> Box<dyn SequenceStore> {
    match &config.library_dir {
        Some(dir) => Box::new(JsonDirStore::new(dir.clone())),
        None => Box::new(MemoryStore::new()),
    }
}
