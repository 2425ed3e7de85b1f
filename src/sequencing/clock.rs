//! The step clock thread.
//!
//! One long-lived thread sleeps on its command channel until the next step is
//! due, then locks the transport, runs one [`Transport::tick`], and hands the
//! fired triggers to a [`TriggerSink`] after the lock is released.
//!
//! ```text
//!   Sequencer ──ClockCommand──► clock thread ──Trigger──► TriggerSink
//!                                    │
//!                                    └──TransportEvent──► UI
//! ```
//!
//! Deadlines are kept on an absolute schedule (`next += interval`) so that
//! rendering time on this thread does not drift the tempo. If the thread
//! falls more than one step behind it resynchronises to "now" instead of
//! firing a burst of late steps.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    thread::{self, JoinHandle},
    time::Instant,
};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError};

use super::{
    store::PatternId,
    transport::{Transport, Trigger},
};

/// Consumer of fired steps. Implemented by the audio engine handle; tests
/// plug in collectors.
///
/// All triggers of one step arrive in a single call so they can share a
/// start time.
pub trait TriggerSink: Send {
    fn fire(&mut self, triggers: &[Trigger]);
}

impl<F> TriggerSink for F
where
    F: FnMut(&[Trigger]) + Send,
{
    fn fire(&mut self, triggers: &[Trigger]) {
        self(triggers)
    }
}

/// Notifications for the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportEvent {
    /// The position moved to this step.
    Step(usize),
    /// Active or pending pattern changed.
    Pattern {
        active: PatternId,
        pending: Option<PatternId>,
    },
    /// Playback stopped; nothing is sounding on the grid any more.
    Stopped,
}

/// Capacity of the event channel. Events past this are dropped until the UI
/// catches up.
pub const EVENT_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockCommand {
    /// Fire the current step now, then keep ticking.
    Start,
    /// Cancel the next deadline.
    Stop,
    /// Tempo changed: next step is one new interval from now.
    Retime,
    Shutdown,
}

pub type SharedTransport = Arc<Mutex<Transport>>;

/// Lock the transport. A panic on another thread while holding the lock
/// leaves the transport in a valid state, so poisoning is ignored.
pub fn lock(transport: &Mutex<Transport>) -> MutexGuard<'_, Transport> {
    transport.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Sending side of the event channel. Never blocks.
#[derive(Debug, Clone)]
pub struct EventSender(Sender<TransportEvent>);

impl EventSender {
    pub fn new(tx: Sender<TransportEvent>) -> Self {
        Self(tx)
    }

    pub fn send(&self, event: TransportEvent) {
        match self.0.try_send(event) {
            Ok(()) | Err(TrySendError::Disconnected(_)) => {}
            Err(TrySendError::Full(_)) => log::trace!("event channel full, dropped {event:?}"),
        }
    }
}

/// Handle to the clock thread. Dropping it shuts the thread down.
pub struct StepClock {
    tx: Sender<ClockCommand>,
    handle: Option<JoinHandle<()>>,
}

impl StepClock {
    pub fn spawn<S>(transport: SharedTransport, sink: S, events: EventSender) -> Self
    where
        S: TriggerSink + 'static,
    {
        let (tx, rx) = crossbeam_channel::unbounded();
        let handle = thread::Builder::new()
            .name("grid-clock".into())
            .spawn(move || run(rx, transport, sink, events));

        let handle = match handle {
            Ok(handle) => Some(handle),
            Err(err) => {
                log::error!("failed to spawn clock thread: {err}");
                None
            }
        };
        Self { tx, handle }
    }

    pub fn send(&self, command: ClockCommand) {
        if self.tx.send(command).is_err() {
            log::warn!("clock thread is gone, dropped {command:?}");
        }
    }

    pub fn start(&self) {
        self.send(ClockCommand::Start);
    }

    pub fn stop(&self) {
        self.send(ClockCommand::Stop);
    }

    pub fn retime(&self) {
        self.send(ClockCommand::Retime);
    }
}

impl Drop for StepClock {
    fn drop(&mut self) {
        let _ = self.tx.send(ClockCommand::Shutdown);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("clock thread panicked");
            }
        }
    }
}

fn run<S: TriggerSink>(
    rx: Receiver<ClockCommand>,
    transport: SharedTransport,
    mut sink: S,
    events: EventSender,
) {
    log::debug!("clock thread started");
    let mut next: Option<Instant> = None;

    loop {
        let command = match next {
            Some(deadline) => rx.recv_deadline(deadline),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match command {
            Ok(ClockCommand::Start) => next = Some(Instant::now()),
            Ok(ClockCommand::Stop) => next = None,
            Ok(ClockCommand::Retime) => {
                if next.is_some() {
                    next = Some(Instant::now() + lock(&transport).step_interval());
                }
            }
            Ok(ClockCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {
                let Some(deadline) = next else { continue };

                let (tick, interval, pattern) = {
                    let mut transport = lock(&transport);
                    if !transport.is_playing() {
                        next = None;
                        continue;
                    }
                    let tick = transport.tick();
                    let pattern = (transport.active_pattern(), transport.pending_pattern());
                    (tick, transport.step_interval(), pattern)
                };

                if !tick.triggers.is_empty() {
                    sink.fire(&tick.triggers);
                }
                if tick.switched.is_some() {
                    events.send(TransportEvent::Pattern {
                        active: pattern.0,
                        pending: pattern.1,
                    });
                }
                events.send(TransportEvent::Step(tick.step));

                let now = Instant::now();
                let mut upcoming = deadline + interval;
                if upcoming + interval < now {
                    log::debug!("clock fell behind, resyncing");
                    upcoming = now + interval;
                }
                next = Some(upcoming);
            }
        }
    }
    log::debug!("clock thread stopped");
}
