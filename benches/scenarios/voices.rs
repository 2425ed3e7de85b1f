//! Benchmarks for every instrument's voice graph.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_grid::{
    graph::{GraphNode, RenderCtx},
    instruments::Instrument,
    voices,
};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");
    let ctx = RenderCtx::from_freq(SAMPLE_RATE, 110.0, 1.0); // A2, typical bass note

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for instrument in Instrument::ALL {
            let mut voice = voices::build(instrument);
            voice.note_on(&ctx);
            group.bench_with_input(BenchmarkId::new(instrument.name(), size), &size, |b, _| {
                b.iter(|| {
                    buffer.fill(0.0);
                    voice.render_block(black_box(&mut buffer), black_box(&ctx));
                })
            });
        }
    }

    group.finish();
}
