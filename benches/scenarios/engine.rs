//! Benchmarks for a full engine block: voice pool, master filter and limiter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_grid::{
    engine::{AudioEngine, EngineOptions},
    instruments::Instrument,
    mixer::CutoffParam,
    sequencing::{Trigger, TriggerSink},
};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

/// Every instrument at once, as on a dense step.
fn full_step() -> Vec<Trigger> {
    Instrument::ALL
        .iter()
        .map(|&instrument| Trigger {
            instrument,
            frequency: instrument.is_synth().then_some(220.0),
            gain: 0.5,
        })
        .collect()
}

pub fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/engine");
    let step = full_step();

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let (mut engine, _handle) = AudioEngine::new(SAMPLE_RATE, CutoffParam::default(), EngineOptions::default());
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, _| {
            b.iter(|| engine.render(black_box(&mut buffer)))
        });

        // Re-fire a full step whenever the pool has drained so voices are
        // always sounding
        let (mut engine, mut handle) =
            AudioEngine::new(SAMPLE_RATE, CutoffParam::new(2_000.0), EngineOptions::default());
        group.bench_with_input(BenchmarkId::new("ten_voices", size), &size, |b, _| {
            b.iter(|| {
                if handle.active_voices() == 0 {
                    handle.fire(&step);
                }
                engine.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
