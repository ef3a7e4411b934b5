//! Triggered uniform random values.

use std::sync::Arc;

use crate::{
    dsp::random::{SeedSource, SeededRandom},
    engine::{
        args::{self, Atom, Flag},
        message::ControlMessage,
    },
    error::{BuildError, ControlError},
    graph::node::{BlockIo, ControlParameter, Param, StreamOperator},
};

/// Range and trigger handling shared by `rand.f~` and `rand.i~`.
struct Triggered {
    rng: SeededRandom,
    low: ControlParameter,
    high: ControlParameter,
    last_trigger: f32,
}

impl Triggered {
    fn new(seeds: Arc<SeedSource>, seed: Option<f32>, low: f32, high: f32) -> Self {
        Self {
            rng: SeededRandom::new(seeds, seed),
            low: ControlParameter::new(low),
            high: ControlParameter::new(high),
            last_trigger: 0.0,
        }
    }

    /// True on a rising trigger: positive now, not positive before.
    #[inline]
    fn fires(&mut self, trigger: f32) -> bool {
        let rising = trigger > 0.0 && (self.last_trigger.is_nan() || self.last_trigger <= 0.0);
        self.last_trigger = trigger;
        rising
    }

    fn process<F>(&mut self, io: &mut BlockIo<'_>, held: &mut f32, mut draw: F)
    where
        F: FnMut(&mut SeededRandom, f32, f32) -> f32,
    {
        let trigger = io.input(0);
        let low: Param<'_> = io.param(1, &self.low);
        let high: Param<'_> = io.param(2, &self.high);

        if let [out] = &mut *io.outputs {
            for (i, (&t, y)) in trigger.iter().zip(out.iter_mut()).enumerate() {
                if self.fires(t) {
                    *held = draw(&mut self.rng, low.at(i), high.at(i));
                }
                *y = *held;
            }
        }
    }

    fn handle(
        &mut self,
        object: &'static str,
        message: &ControlMessage,
    ) -> Result<(), ControlError> {
        match *message {
            ControlMessage::Float { inlet: 1, value } => {
                self.low.set(value);
                Ok(())
            }
            ControlMessage::Float { inlet: 2, value } => {
                self.high.set(value);
                Ok(())
            }
            ControlMessage::Float { inlet, .. } => Err(ControlError::NoSuchInlet { object, inlet }),
            ControlMessage::Seed(seed) => {
                self.rng.reseed(seed);
                Ok(())
            }
            _ => Err(ControlError::Unrecognized {
                object,
                selector: message.selector(),
            }),
        }
    }
}

#[inline]
fn draw_float(rng: &mut SeededRandom, low: f32, high: f32) -> f32 {
    low + rng.frand() * (high - low)
}

#[inline]
fn draw_int(rng: &mut SeededRandom, low: f32, high: f32) -> f32 {
    let (mut low, mut high) = (low.round(), high.round());
    if low > high {
        std::mem::swap(&mut low, &mut high);
    }
    let span = high - low + 1.0;
    // frand < 1, but the product can still round up to span
    (low + (rng.frand() * span).floor()).min(high)
}

/// Uniform float in `[low, high)`, redrawn on every rising trigger.
///
/// Inlets:  0 trigger, 1 low, 2 high
/// Outlets: 0 held value
pub struct RandFloat {
    inner: Triggered,
    value: f32,
}

impl RandFloat {
    pub const NAME: &'static str = "rand.f~";

    pub fn new(seeds: Arc<SeedSource>, seed: Option<f32>, low: f32, high: f32) -> Self {
        let mut inner = Triggered::new(seeds, seed, low, high);
        let value = draw_float(&mut inner.rng, low, high);
        Self { inner, value }
    }

    /// `rand.f~ [-seed n] [low] [high]`, range defaults to 0..1.
    pub fn from_args(args: &[Atom], seeds: Arc<SeedSource>) -> Result<Self, BuildError> {
        let parsed = args::parse(Self::NAME, args, &[Flag::Seed], 2)?;
        Ok(Self::new(seeds, parsed.seed, parsed.float(0, 0.0), parsed.float(1, 1.0)))
    }
}

impl StreamOperator for RandFloat {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn num_inputs(&self) -> usize {
        3
    }

    fn num_outputs(&self) -> usize {
        1
    }

    fn process(&mut self, io: &mut BlockIo<'_>) {
        self.inner.process(io, &mut self.value, draw_float);
    }

    fn handle(&mut self, message: &ControlMessage) -> Result<(), ControlError> {
        self.inner.handle(Self::NAME, message)
    }
}

/// Uniform integer in `[low, high]` inclusive, redrawn on every rising
/// trigger. Bounds are rounded and may be given in either order.
pub struct RandInt {
    inner: Triggered,
    value: f32,
}

impl RandInt {
    pub const NAME: &'static str = "rand.i~";

    pub fn new(seeds: Arc<SeedSource>, seed: Option<f32>, low: f32, high: f32) -> Self {
        let mut inner = Triggered::new(seeds, seed, low, high);
        let value = draw_int(&mut inner.rng, low, high);
        Self { inner, value }
    }

    /// `rand.i~ [-seed n] [low] [high]`, range defaults to 0..127.
    pub fn from_args(args: &[Atom], seeds: Arc<SeedSource>) -> Result<Self, BuildError> {
        let parsed = args::parse(Self::NAME, args, &[Flag::Seed], 2)?;
        Ok(Self::new(seeds, parsed.seed, parsed.float(0, 0.0), parsed.float(1, 127.0)))
    }
}

impl StreamOperator for RandInt {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn num_inputs(&self) -> usize {
        3
    }

    fn num_outputs(&self) -> usize {
        1
    }

    fn process(&mut self, io: &mut BlockIo<'_>) {
        self.inner.process(io, &mut self.value, draw_int);
    }

    fn handle(&mut self, message: &ControlMessage) -> Result<(), ControlError> {
        self.inner.handle(Self::NAME, message)
    }
}
