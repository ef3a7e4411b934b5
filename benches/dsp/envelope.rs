//! Benchmarks for the smoothing and accumulating primitives.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tilde_dsp::dsp::{accum::RunningSum, glide::Glide, lag::OnePoleLag, slew::SlewLimiter};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

/// Square wave toggling every 100 samples, so the smoothers keep moving.
fn steps(size: usize) -> Vec<f32> {
    (0..size).map(|i| if (i / 100) % 2 == 0 { 1.0 } else { -1.0 }).collect()
}

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let input = steps(size);
        let mut buffer = vec![0.0f32; size];

        let mut lag = OnePoleLag::new(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("lag", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                lag.render(black_box(&mut buffer), black_box(20.0));
            })
        });

        // Time argument changing every sample defeats the coefficient cache
        let mut lag = OnePoleLag::new(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("lag_audio_rate_time", size), &size, |b, _| {
            b.iter(|| {
                for (i, y) in buffer.iter_mut().enumerate() {
                    *y = lag.next_sample(input[i], black_box(10.0 + i as f32));
                }
            })
        });

        let mut slew = SlewLimiter::new(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("slew", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                slew.render(black_box(&mut buffer), black_box(500.0), black_box(100.0));
            })
        });

        let mut glide = Glide::new(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("glide_linear", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                glide.render(black_box(&mut buffer), black_box(1.0), black_box(1.0));
            })
        });

        let mut glide = Glide::new(SAMPLE_RATE);
        glide.set_exponent(3.0);
        group.bench_with_input(BenchmarkId::new("glide_curved", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                glide.render(black_box(&mut buffer), black_box(1.0), black_box(1.0));
            })
        });

        let mut sum = RunningSum::new();
        group.bench_with_input(BenchmarkId::new("sum", size), &size, |b, _| {
            b.iter(|| {
                for (y, &x) in buffer.iter_mut().zip(input.iter()) {
                    *y = sum.next_sample(black_box(x), 0.0);
                }
            })
        });
    }

    group.finish();
}
