//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside voice structs. They stay focused on the
//! signal-processing math so graph combinators can layer on orchestration and
//! modulation.

/// Linear one-shot ADSR and exponential decay envelopes.
pub mod envelope;
/// State-variable filter implementation with multiple responses.
pub mod filter;
/// Peak limiter for the master bus.
pub mod limiter;
/// Block-rate modulation helpers.
pub mod modulate;
/// Oscillator waveforms and noise sources.
pub mod oscillator;

pub use envelope::{AdsrTimes, EnvelopeState};
