//! Benchmarks for the one-shot ADSR and exponential decay envelopes.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_grid::dsp::envelope::{AdsrTimes, Envelope, ExpDecay};
use saavy_grid::graph::RenderCtx;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let ctx = RenderCtx::from_freq(SAMPLE_RATE, 440.0, 1.0);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Synth envelope squeezed into a fixed note length
        let mut env = Envelope::one_shot(AdsrTimes::fit(0.05, 0.1, 0.7, 0.3, 0.4));
        env.note_on(&ctx);
        group.bench_with_input(BenchmarkId::new("one_shot", size), &size, |b, _| {
            b.iter(|| env.render(black_box(&mut buffer), black_box(&ctx)))
        });

        // Held in sustain
        let mut env = Envelope::adsr(0.001, 0.001, 0.7, 0.3);
        env.note_on(&ctx);
        for _ in 0..200 {
            env.next_sample(&ctx);
        }
        group.bench_with_input(BenchmarkId::new("sustain", size), &size, |b, _| {
            b.iter(|| env.render(black_box(&mut buffer), black_box(&ctx)))
        });

        // Drum decay, one multiply per sample
        let mut decay = ExpDecay::new(0.5);
        decay.note_on();
        group.bench_with_input(BenchmarkId::new("exp_decay", size), &size, |b, _| {
            b.iter(|| decay.render(black_box(&mut buffer), black_box(&ctx)))
        });
    }

    group.finish();
}
