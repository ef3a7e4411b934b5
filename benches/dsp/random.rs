//! Benchmarks for the noise generators.

use std::{hint::black_box, sync::Arc};

use criterion::{BenchmarkId, Criterion};
use tilde_dsp::{
    dsp::random::{RandomState, SeedSource},
    graph::{
        dust::{Dust, Polarity},
        gray::GrayNoise,
        node::render_block,
    },
};

use crate::BLOCK_SIZES;

pub fn bench_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/random");
    let seeds = Arc::new(SeedSource::new());

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let mut state = RandomState::from_seed(1);
        group.bench_with_input(BenchmarkId::new("frand", size), &size, |b, _| {
            b.iter(|| {
                for y in buffer.iter_mut() {
                    *y = state.frand();
                }
                black_box(&buffer);
            })
        });

        // render_block allocates; these include that cost
        let mut gray = GrayNoise::new(seeds.clone(), Some(1.0));
        group.bench_with_input(BenchmarkId::new("gray_block", size), &size, |b, &size| {
            b.iter(|| render_block(&mut gray, &[], black_box(size)))
        });

        let mut dust = Dust::new(seeds.clone(), Some(1.0), 1_000.0, Polarity::Bipolar);
        group.bench_with_input(BenchmarkId::new("dust_block", size), &size, |b, &size| {
            b.iter(|| render_block(&mut dust, &[], black_box(size)))
        });
    }

    group.finish();
}
