use crate::{
    dsp::crossing::{GateDetector, GateTransition},
    engine::{
        args::{self, Atom},
        message::ControlMessage,
    },
    error::{BuildError, ControlError},
    graph::node::{BlockIo, StreamOperator},
};

/// Converts gate onsets into impulses carrying the gate's value.
///
/// On the sample where the input leaves exactly 0.0 the output is the input
/// itself (so a gate of 0.8 becomes an impulse of 0.8); every other sample
/// is 0.
pub struct GateToImpulse {
    gate: GateDetector,
}

impl GateToImpulse {
    pub const NAME: &'static str = "gate2imp~";

    pub fn new() -> Self {
        Self {
            gate: GateDetector::new(),
        }
    }

    pub fn from_args(args: &[Atom]) -> Result<Self, BuildError> {
        args::parse(Self::NAME, args, &[], 0)?;
        Ok(Self::new())
    }
}

impl Default for GateToImpulse {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamOperator for GateToImpulse {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn num_inputs(&self) -> usize {
        1
    }

    fn num_outputs(&self) -> usize {
        1
    }

    fn process(&mut self, io: &mut BlockIo<'_>) {
        let input = io.input(0);

        if let [out] = &mut *io.outputs {
            for (&x, y) in input.iter().zip(out.iter_mut()) {
                *y = match self.gate.next(x) {
                    GateTransition::Opened => x,
                    _ => 0.0,
                };
            }
        }
    }

    fn handle(&mut self, message: &ControlMessage) -> Result<(), ControlError> {
        match message {
            ControlMessage::Reset => {
                self.gate.reset();
                Ok(())
            }
            _ => Err(ControlError::Unrecognized {
                object: Self::NAME,
                selector: message.selector(),
            }),
        }
    }
}
