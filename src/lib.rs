pub mod config;
pub mod dsp;
pub mod engine; // Audio-thread voice rendering
pub mod graph; // Composable audio graph nodes
pub mod instruments;
pub mod mixer;
pub mod persistence;
pub mod runtime;
pub mod sequencing; // Step grid, patterns and the clock
pub mod snapshot;
pub mod voices; // Drum and synth recipes

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
