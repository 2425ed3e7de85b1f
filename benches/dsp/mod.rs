//! Benchmarks for low-level DSP primitives.

mod envelope;
mod filter;
mod limiter;
mod oscillator;

pub use envelope::bench_envelope;
pub use filter::bench_filter;
pub use limiter::bench_limiter;
pub use oscillator::bench_oscillator;
