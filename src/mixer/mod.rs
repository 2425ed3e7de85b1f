//! Gain staging and the master bus.
//!
//! Levels live with the sequence on the control side. Each voice is handed
//! its final gain (`instrument × section × master`) when it is triggered, so
//! a fader move only affects voices started afterwards. The audio thread owns
//! the [`MasterBus`] and reads the filter cutoff from a shared atomic.

mod bus;
mod effects;
mod levels;

pub use bus::{CutoffParam, MasterBus};
pub use effects::{filter_cutoff_hz, Effect, EffectLevels, FILTER_CLOSED_HZ, FILTER_OPEN_HZ};
pub use levels::{clamp_level, MixLevels};
