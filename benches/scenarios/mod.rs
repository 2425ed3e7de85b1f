//! Real-world scenario benchmarks.
//!
//! Complete voice recipes as the sequencer starts them, and full engine
//! blocks with a busy pool.

mod engine;
mod voices;

pub use engine::bench_engine;
pub use voices::bench_voices;
