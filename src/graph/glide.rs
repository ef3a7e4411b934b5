use crate::{
    dsp::glide::Glide as GlideLine,
    engine::{
        args::{self, Atom, Flag},
        config::EngineConfig,
        message::ControlMessage,
    },
    error::{BuildError, ControlError},
    graph::node::{BlockIo, ControlParameter, StreamOperator},
};

/// Two-sided glide: linear (or curved) travel to each new input value.
///
/// Inlets:  0 signal, 1 up time (ms), 2 down time (ms)
/// Outlets: 0 glided signal
///
/// `reset` jumps to the input on the next sample, `exp <n>` sets the curve.
pub struct Glide {
    glide: GlideLine,
    ms_up: ControlParameter,
    ms_down: ControlParameter,
}

impl Glide {
    pub const NAME: &'static str = "glide2~";

    pub fn new(ms_up: f32, ms_down: f32) -> Self {
        Self {
            glide: GlideLine::new(EngineConfig::default().sample_rate),
            ms_up: ControlParameter::new(ms_up),
            ms_down: ControlParameter::new(ms_down),
        }
    }

    /// `glide2~ [-exp <n>] [up ms] [down ms]`
    pub fn from_args(args: &[Atom]) -> Result<Self, BuildError> {
        let parsed = args::parse(Self::NAME, args, &[Flag::Exp], 2)?;
        let mut glide = Self::new(parsed.float(0, 0.0), parsed.float(1, 0.0));
        if let Some(exponent) = parsed.exp {
            glide.glide.set_exponent(exponent);
        }
        Ok(glide)
    }
}

impl StreamOperator for Glide {
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
        self.glide.set_sample_rate(config.sample_rate);
    }

    fn process(&mut self, io: &mut BlockIo<'_>) {
        let input = io.input(0);
        let ms_up = io.param(1, &self.ms_up);
        let ms_down = io.param(2, &self.ms_down);

        if let [out] = &mut *io.outputs {
            for (i, (&x, y)) in input.iter().zip(out.iter_mut()).enumerate() {
                *y = self.glide.next_sample(x, ms_up.at(i), ms_down.at(i));
            }
        }
    }

    fn handle(&mut self, message: &ControlMessage) -> Result<(), ControlError> {
        match *message {
            ControlMessage::Float { inlet: 1, value } => {
                self.ms_up.set(value);
                Ok(())
            }
            ControlMessage::Float { inlet: 2, value } => {
                self.ms_down.set(value);
                Ok(())
            }
            ControlMessage::Float { inlet, .. } => Err(ControlError::NoSuchInlet {
                object: Self::NAME,
                inlet,
            }),
            ControlMessage::Reset => {
                self.glide.reset();
                Ok(())
            }
            ControlMessage::Exp(exponent) => {
                self.glide.set_exponent(exponent);
                Ok(())
            }
            _ => Err(ControlError::Unrecognized {
                object: Self::NAME,
                selector: message.selector(),
            }),
        }
    }
}
