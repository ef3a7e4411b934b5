//! Live dust through the default output device.
//!
//! Bipolar dust, smoothed by a short lag, on every output channel. The main
//! thread sweeps the density through the lock-free control channel.
//!
//! Run with: cargo run --example cpal_dust --features cpal-demo

use std::{thread, time::Duration};

use color_eyre::eyre::{eyre, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tilde_dsp::{
    dsp::random::SeedSource,
    engine::{args::Atom, factory, message::ControlMessage, scheduler::Source},
    io::{AudioInput, AudioOutput},
    Engine, EngineConfig,
};

const BLOCK: usize = 128;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;

    println!("=== cpal dust ===");
    println!("Sample rate: {} Hz", sample_rate);
    println!("Channels: {}", channels);
    println!();

    // --- Engine ---
    let seeds = SeedSource::global();
    let engine_config = EngineConfig::new(sample_rate, BLOCK)?.with_channels(0, 1);
    let mut engine = Engine::new(engine_config);

    let dust = factory::create("dust2~", &[Atom::Float(20.0)], &seeds)?;
    let dust = engine.register(dust, &[Source::Unbound])?;
    let lag = factory::create("lag~", &[Atom::Float(3.0)], &seeds)?;
    let lag = engine.register(lag, &[Source::Output { op: dust, port: 0 }, Source::Unbound])?;
    engine.connect_output(0, Source::Output { op: lag, port: 0 })?;

    let mut tx = engine.control_channel(64);

    // --- Stream ---
    // cpal asks for arbitrary frame counts; render whole blocks and hand
    // them out as needed.
    let input = AudioInput::default();
    let mut output = AudioOutput::new(1, BLOCK);
    let mut cursor = BLOCK;

    let stream = device.build_output_stream(
        &config.into(),
        move |data: &mut [f32], _| {
            for frame in data.chunks_mut(channels) {
                if cursor == BLOCK {
                    if let Err(err) = engine.process_block(&input, &mut output) {
                        log::warn!("tick failed: {err}");
                    }
                    cursor = 0;
                }
                let sample = output.buffers[0][cursor] * 0.5;
                frame.fill(sample);
                cursor += 1;
            }
        },
        |err| eprintln!("Audio error: {}", err),
        None,
    )?;

    stream.play()?;
    println!("Playing... Press Ctrl+C to stop");

    // --- Sweep density ---
    let densities = [5.0, 20.0, 80.0, 320.0, 1280.0, 80.0];
    for density in densities.iter().cycle() {
        println!("density: {density} / s");
        if tx.send(dust, ControlMessage::Float { inlet: 0, value: *density }).is_err() {
            log::warn!("control queue full, dropping density change");
        }
        thread::sleep(Duration::from_secs(2));
    }

    Ok(())
}
