use std::sync::Arc;

use crate::{
    dsp::random::{SeedSource, SeededRandom},
    engine::{
        args::{self, Atom, Flag},
        message::ControlMessage,
    },
    error::{BuildError, ControlError},
    graph::node::{BlockIo, StreamOperator},
};

/// 2^-31, maps an i32 onto [-1, 1).
const I32_TO_UNIT: f32 = 4.656_612_9e-10;

/// Gray noise: a running 32-bit word with one random bit flipped per sample.
///
/// Consecutive samples differ in exactly one bit, which gives a spectrum
/// tilted towards the low end compared to white noise.
pub struct GrayNoise {
    rng: SeededRandom,
    counter: u32,
}

impl GrayNoise {
    pub const NAME: &'static str = "gray~";

    pub fn new(seeds: Arc<SeedSource>, seed: Option<f32>) -> Self {
        Self {
            rng: SeededRandom::new(seeds, seed),
            counter: 0,
        }
    }

    /// `gray~ [-seed n]`
    pub fn from_args(args: &[Atom], seeds: Arc<SeedSource>) -> Result<Self, BuildError> {
        let parsed = args::parse(Self::NAME, args, &[Flag::Seed], 0)?;
        Ok(Self::new(seeds, parsed.seed))
    }

    #[inline]
    fn next_sample(&mut self) -> f32 {
        self.counter ^= 1 << (self.rng.trand() & 31);
        self.counter as i32 as f32 * I32_TO_UNIT
    }
}

impl StreamOperator for GrayNoise {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn num_inputs(&self) -> usize {
        0
    }

    fn num_outputs(&self) -> usize {
        1
    }

    fn process(&mut self, io: &mut BlockIo<'_>) {
        if let [out] = &mut *io.outputs {
            for y in out.iter_mut() {
                *y = self.next_sample();
            }
        }
    }

    fn handle(&mut self, message: &ControlMessage) -> Result<(), ControlError> {
        match *message {
            ControlMessage::Seed(seed) => {
                self.rng.reseed(seed);
                self.counter = 0;
                Ok(())
            }
            _ => Err(ControlError::Unrecognized {
                object: Self::NAME,
                selector: message.selector(),
            }),
        }
    }
}
