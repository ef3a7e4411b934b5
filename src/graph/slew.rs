use crate::{
    dsp::slew::SlewLimiter,
    engine::{
        args::{self, Atom},
        config::EngineConfig,
        message::ControlMessage,
    },
    error::{BuildError, ControlError},
    graph::node::{BlockIo, ControlParameter, StreamOperator},
};

/// Two-sided slew limiter.
///
/// Inlets:  0 signal, 1 up rate, 2 down rate (signal or number)
/// Outlets: 0 limited signal
///
/// Rates are scaled by 1/sr to per-sample limits. A negative rate disables
/// limiting on that side. `set <value>` jumps the output.
pub struct Slew {
    slew: SlewLimiter,
    up: ControlParameter,
    down: ControlParameter,
}

impl Slew {
    pub const NAME: &'static str = "slew2~";

    pub fn new(up: f32, down: f32) -> Self {
        Self {
            slew: SlewLimiter::new(EngineConfig::default().sample_rate),
            up: ControlParameter::new(up),
            down: ControlParameter::new(down),
        }
    }

    /// `slew2~ [up] [down]`, both default to -1 (unlimited).
    pub fn from_args(args: &[Atom]) -> Result<Self, BuildError> {
        let parsed = args::parse(Self::NAME, args, &[], 2)?;
        Ok(Self::new(parsed.float(0, -1.0), parsed.float(1, -1.0)))
    }
}

impl StreamOperator for Slew {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn num_inputs(&self) -> usize {
        3
    }

    fn num_outputs(&self) -> usize {
        1
    }

    fn configure(&mut self, config: &EngineConfig) {
        self.slew.set_sample_rate(config.sample_rate);
    }

    fn process(&mut self, io: &mut BlockIo<'_>) {
        let input = io.input(0);
        let up = io.param(1, &self.up);
        let down = io.param(2, &self.down);

        if let [out] = &mut *io.outputs {
            for (i, (&x, y)) in input.iter().zip(out.iter_mut()).enumerate() {
                *y = self.slew.next_sample(x, up.at(i), down.at(i));
            }
        }
    }

    fn handle(&mut self, message: &ControlMessage) -> Result<(), ControlError> {
        match *message {
            ControlMessage::Float { inlet: 1, value } => {
                self.up.set(value);
                Ok(())
            }
            ControlMessage::Float { inlet: 2, value } => {
                self.down.set(value);
                Ok(())
            }
            ControlMessage::Float { inlet, .. } => Err(ControlError::NoSuchInlet {
                object: Self::NAME,
                inlet,
            }),
            ControlMessage::Set(value) => {
                self.slew.set(value);
                Ok(())
            }
            _ => Err(ControlError::Unrecognized {
                object: Self::NAME,
                selector: message.selector(),
            }),
        }
    }
}
