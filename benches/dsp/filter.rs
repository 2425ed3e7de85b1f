//! Benchmarks for the state-variable filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_grid::dsp::filter::SVFilter;
use saavy_grid::graph::RenderCtx;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");
    let ctx = RenderCtx::from_freq(SAMPLE_RATE, 440.0, 1.0);

    let responses: [(&str, fn(f32) -> SVFilter); 3] = [
        ("lowpass", SVFilter::lowpass),
        ("highpass", SVFilter::highpass),
        ("bandpass", SVFilter::bandpass),
    ];

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 / size as f32) * 2.0 - 1.0).collect();
        let mut buffer = input.clone();

        for (name, make) in responses {
            let mut filter = make(1000.0);
            filter.set_resonance(0.5);
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    filter.render(black_box(&mut buffer), black_box(&ctx));
                })
            });
        }

        // Master bus case: the cutoff is re-read every block
        let mut filter = SVFilter::lowpass(22_050.0);
        let mut cutoff = 200.0f32;
        group.bench_with_input(BenchmarkId::new("lowpass_sweep", size), &size, |b, _| {
            b.iter(|| {
                cutoff = if cutoff > 20_000.0 { 200.0 } else { cutoff * 1.1 };
                filter.set_cutoff(cutoff);
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer), black_box(&ctx));
            })
        });
    }

    group.finish();
}
