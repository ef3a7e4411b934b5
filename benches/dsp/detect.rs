//! Benchmarks for crossing detectors and range tracking.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tilde_dsp::dsp::{
    crossing::{GateDetector, ThresholdDetector, ZeroCrossDetector},
    range::RangeTracker,
};

use crate::BLOCK_SIZES;

pub fn bench_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/detect");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.05).sin()).collect();

        let mut threshold = ThresholdDetector::new();
        group.bench_with_input(BenchmarkId::new("threshold", size), &size, |b, _| {
            b.iter(|| {
                let mut count = 0usize;
                for &x in &input {
                    let crossing = threshold.next(black_box(x), 0.5);
                    count += crossing.up as usize + crossing.down as usize;
                }
                count
            })
        });

        let mut zero = ZeroCrossDetector::new();
        group.bench_with_input(BenchmarkId::new("zerocross", size), &size, |b, _| {
            b.iter(|| input.iter().filter(|&&x| zero.next(black_box(x)).either()).count())
        });

        let mut gate = GateDetector::new();
        group.bench_with_input(BenchmarkId::new("gate", size), &size, |b, _| {
            b.iter(|| {
                for &x in &input {
                    black_box(gate.next(black_box(x.max(0.0))));
                }
            })
        });

        let mut range = RangeTracker::new();
        group.bench_with_input(BenchmarkId::new("minmax", size), &size, |b, _| {
            b.iter(|| {
                for (i, &x) in input.iter().enumerate() {
                    black_box(range.next(black_box(x), i == 0));
                }
            })
        });
    }

    group.finish();
}
