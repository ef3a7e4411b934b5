//! Offline render of a small operator chain, printed as text.
//!
//! dust~ fires random impulses, lag~ turns them into decaying blips and
//! thresh~ marks where each blip rises above 0.2. edge~ turns those marks
//! into sample-accurate events.
//!
//! Run with: RUST_LOG=debug cargo run --example offline_render

use std::sync::Arc;

use tilde_dsp::{
    dsp::random::SeedSource,
    engine::{args::Atom, factory, message::ControlMessage, outlet::OutletEvent, scheduler::Source},
    io::{AudioInput, AudioOutput},
    Engine, EngineConfig,
};

const BLOCK: usize = 64;
const BLOCKS: usize = 750; // one second at 48 kHz

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let seeds = Arc::new(SeedSource::new());
    let config = EngineConfig::new(48_000.0, BLOCK)?.with_channels(0, 2);
    let mut engine = Engine::new(config);

    // --- Build the chain ---
    let dust = factory::create(
        "dust~",
        &[Atom::from("-seed"), Atom::Float(42.0), Atom::Float(8.0)],
        &seeds,
    )?;
    let dust = engine.register(dust, &[Source::Unbound])?;

    let lag = factory::create("lag~", &[Atom::Float(40.0)], &seeds)?;
    let lag = engine.register(lag, &[Source::Output { op: dust, port: 0 }, Source::Unbound])?;

    let thresh = factory::create("thresh~", &[Atom::Float(0.2)], &seeds)?;
    let thresh = engine.register(thresh, &[Source::Output { op: lag, port: 0 }, Source::Unbound])?;

    let edge = factory::create("edge~", &[], &seeds)?;
    let edge = engine.register(edge, &[Source::Output { op: thresh, port: 0 }])?;

    engine.connect_output(0, Source::Output { op: lag, port: 0 })?;
    engine.connect_output(1, Source::Output { op: thresh, port: 0 })?;

    // --- Render ---
    let input = AudioInput::default();
    let mut output = AudioOutput::new(2, BLOCK);
    let mut peak = 0.0f32;
    let mut crossings = 0usize;
    let mut onsets = 0usize;

    for block in 0..BLOCKS {
        // Double the density halfway through
        if block == BLOCKS / 2 {
            engine.send(dust, ControlMessage::Float { inlet: 0, value: 16.0 })?;
        }

        engine.process_block(&input, &mut output)?;

        peak = output.buffers[0].iter().fold(peak, |p, &y| p.max(y));
        crossings += output.buffers[1].iter().filter(|&&y| y != 0.0).count();

        for record in engine.events().iter().filter(|r| r.op == edge) {
            if record.port == 0 && record.event == OutletEvent::Bang {
                onsets += 1;
                let at = block * BLOCK + record.offset;
                println!("onset at sample {at} ({:.3} s)", at as f32 / config.sample_rate);
            }
        }
    }

    println!();
    println!("Rendered {} samples", BLOCKS * BLOCK);
    println!("  lag peak:         {peak:.3}");
    println!("  threshold rises:  {crossings}");
    println!("  edge onsets:      {onsets}");

    Ok(())
}
