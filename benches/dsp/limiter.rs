//! Benchmarks for the master limiter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_grid::dsp::limiter::Limiter;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_limiter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/limiter");

    for &size in BLOCK_SIZES {
        // Loud enough to keep the limiter working
        let input: Vec<f32> = (0..size).map(|i| ((i as f32) * 0.05).sin() * 2.0).collect();
        let mut buffer = input.clone();
        let mut limiter = Limiter::new(SAMPLE_RATE);

        group.bench_with_input(BenchmarkId::new("over_threshold", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                limiter.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
