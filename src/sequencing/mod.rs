//! Step grid, pattern slots and the clock that plays them.
//!
//! - [`pattern`]: per-instrument lanes and the removed set
//! - [`store`]: the four switchable pattern slots
//! - [`sequence`]: the live working copy shown on the grid
//! - [`transport`]: position, tempo, meter and quantized pattern switching
//! - [`clock`]: the thread that ticks the transport

pub mod clock;
pub mod pattern;
pub mod sequence;
pub mod store;
pub mod time_signature;
pub mod transport;

pub use clock::{ClockCommand, EventSender, SharedTransport, StepClock, TransportEvent, TriggerSink};
pub use pattern::{Pattern, RemovedSet, Track, TrackSet};
pub use sequence::Sequence;
pub use store::{PatternId, PatternStore, PATTERN_COUNT};
pub use time_signature::TimeSignature;
pub use transport::{step_interval, PatternRequest, Tick, Transport, Trigger};
