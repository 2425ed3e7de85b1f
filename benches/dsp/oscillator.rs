//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_grid::dsp::oscillator::OscillatorBlock;
use saavy_grid::graph::RenderCtx;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let ctx = RenderCtx::from_freq(SAMPLE_RATE, 440.0, 1.0);

    let waveforms: [(&str, fn() -> OscillatorBlock); 5] = [
        ("sine", OscillatorBlock::sine),
        ("sawtooth", OscillatorBlock::sawtooth),
        ("square", OscillatorBlock::square),
        ("triangle", OscillatorBlock::triangle),
        // Drives every hat, snare and crash
        ("noise", OscillatorBlock::noise),
    ];

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];
        for (name, make) in waveforms {
            let mut osc = make();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| osc.render(black_box(&mut buffer), black_box(&ctx)))
            });
        }
    }

    group.finish();
}
