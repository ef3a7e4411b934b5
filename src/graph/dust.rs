use std::sync::Arc;

use crate::{
    dsp::random::{SeedSource, SeededRandom},
    engine::{
        args::{self, Atom, Flag},
        config::EngineConfig,
        message::ControlMessage,
    },
    error::{BuildError, ControlError},
    graph::node::{BlockIo, ControlParameter, StreamOperator},
};

/*
Dust
====

Random impulses at an average rate of `density` per second. Every sample
draws one uniform value z in [0, 1) and compares it with the per-sample
probability:

    threshold = density / sr
    z < threshold   →  impulse of height z / threshold   (in [0, 1))
    otherwise       →  0

The bipolar flavour maps the height onto [-1, 1) with `h * 2 - 1`.

An impulse is always followed by a zero sample, so two impulses never touch
even when the density approaches the sample rate.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Unipolar,
    Bipolar,
}

pub struct Dust {
    rng: SeededRandom,
    density: ControlParameter,
    polarity: Polarity,
    sr_recip: f32,
    fired: bool,
}

impl Dust {
    pub const NAME: &'static str = "dust~";
    pub const BIPOLAR_NAME: &'static str = "dust2~";

    pub fn new(
        seeds: Arc<SeedSource>,
        seed: Option<f32>,
        density: f32,
        polarity: Polarity,
    ) -> Self {
        Self {
            rng: SeededRandom::new(seeds, seed),
            density: ControlParameter::new(density),
            polarity,
            sr_recip: 1.0 / EngineConfig::default().sample_rate,
            fired: false,
        }
    }

    /// `dust~ [-seed n] [density]` / `dust2~ [-seed n] [density]`
    pub fn from_args(
        args: &[Atom],
        seeds: Arc<SeedSource>,
        polarity: Polarity,
    ) -> Result<Self, BuildError> {
        let name = match polarity {
            Polarity::Unipolar => Self::NAME,
            Polarity::Bipolar => Self::BIPOLAR_NAME,
        };
        let parsed = args::parse(name, args, &[Flag::Seed], 1)?;
        Ok(Self::new(seeds, parsed.seed, parsed.float(0, 0.0), polarity))
    }

    #[inline]
    fn next_sample(&mut self, density: f32) -> f32 {
        let threshold = density.max(0.0) * self.sr_recip;
        let z = self.rng.frand();

        if self.fired {
            self.fired = false;
            return 0.0;
        }
        if z >= threshold {
            return 0.0;
        }

        self.fired = true;
        let height = z / threshold;
        match self.polarity {
            Polarity::Unipolar => height,
            Polarity::Bipolar => height * 2.0 - 1.0,
        }
    }
}

impl StreamOperator for Dust {
    fn name(&self) -> &'static str {
        match self.polarity {
            Polarity::Unipolar => Self::NAME,
            Polarity::Bipolar => Self::BIPOLAR_NAME,
        }
    }

    fn num_inputs(&self) -> usize {
        1
    }

    fn num_outputs(&self) -> usize {
        1
    }

    fn configure(&mut self, config: &EngineConfig) {
        self.sr_recip = config.sample_duration();
    }

    fn process(&mut self, io: &mut BlockIo<'_>) {
        let density = io.param(0, &self.density);

        if let [out] = &mut *io.outputs {
            for (i, y) in out.iter_mut().enumerate() {
                *y = self.next_sample(density.at(i));
            }
        }
    }

    fn handle(&mut self, message: &ControlMessage) -> Result<(), ControlError> {
        match *message {
            ControlMessage::Float { inlet: 0, value } => {
                self.density.set(value);
                Ok(())
            }
            ControlMessage::Float { inlet, .. } => Err(ControlError::NoSuchInlet {
                object: self.name(),
                inlet,
            }),
            ControlMessage::Seed(seed) => {
                self.rng.reseed(seed);
                self.fired = false;
                Ok(())
            }
            _ => Err(ControlError::Unrecognized {
                object: self.name(),
                selector: message.selector(),
            }),
        }
    }
}
