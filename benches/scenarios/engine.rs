//! Benchmarks for engine ticks over small operator chains.

use std::{hint::black_box, sync::Arc};

use criterion::{BenchmarkId, Criterion};
use tilde_dsp::{
    dsp::random::SeedSource,
    engine::{args::Atom, factory, scheduler::Source},
    io::{AudioInput, AudioOutput},
    Engine, EngineConfig,
};

use crate::BLOCK_SIZES;

pub fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/engine");
    let seeds = Arc::new(SeedSource::new());

    for &size in BLOCK_SIZES {
        let config = EngineConfig::new(48_000.0, size)
            .expect("bench block sizes are valid")
            .with_channels(1, 2);

        // === IMPULSE ENVELOPES ===
        // dust -> lag -> thresh
        let mut engine = Engine::new(config);
        let dust_args = [Atom::from("-seed"), Atom::Float(1.0), Atom::Float(200.0)];
        let dust = factory::create("dust~", &dust_args, &seeds).unwrap();
        let dust = engine.register(dust, &[Source::Unbound]).unwrap();

        let lag = factory::create("lag~", &[Atom::Float(30.0)], &seeds).unwrap();
        let lag = engine
            .register(lag, &[Source::Output { op: dust, port: 0 }, Source::Unbound])
            .unwrap();

        let thresh = factory::create("thresh~", &[Atom::Float(0.1)], &seeds).unwrap();
        let thresh = engine
            .register(thresh, &[Source::Output { op: lag, port: 0 }, Source::Unbound])
            .unwrap();

        engine.connect_output(0, Source::Output { op: lag, port: 0 }).unwrap();
        engine.connect_output(1, Source::Output { op: thresh, port: 0 }).unwrap();

        let input = AudioInput::new(1, size);
        let mut output = AudioOutput::new(2, size);

        group.bench_with_input(BenchmarkId::new("dust_lag_thresh", size), &size, |b, _| {
            b.iter(|| {
                engine.process_block(black_box(&input), &mut output).unwrap();
            })
        });

        // === SIGNAL ANALYSIS ===
        // host input → zerocross, minmax, slew2
        let mut engine = Engine::new(config);
        let ops: [(&str, Vec<Atom>, Vec<Source>); 3] = [
            ("zerocross~", vec![], vec![Source::HostInput(0)]),
            ("minmax~", vec![], vec![Source::HostInput(0), Source::Unbound]),
            (
                "slew2~",
                vec![Atom::Float(100.0), Atom::Float(10.0)],
                vec![Source::HostInput(0), Source::Unbound, Source::Unbound],
            ),
        ];
        for (name, args, bindings) in &ops {
            let op = factory::create(name, args, &seeds).unwrap();
            engine.register(op, bindings).unwrap();
        }

        let mut input = AudioInput::new(1, size);
        for (i, x) in input.buffers[0].iter_mut().enumerate() {
            *x = (i as f32 * 0.03).sin();
        }

        group.bench_with_input(BenchmarkId::new("analysis", size), &size, |b, _| {
            b.iter(|| {
                engine.process_block(black_box(&input), &mut output).unwrap();
            })
        });
    }

    group.finish();
}
