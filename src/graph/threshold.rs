use crate::{
    dsp::crossing::ThresholdDetector,
    engine::{
        args::{self, Atom},
        message::ControlMessage,
    },
    error::{BuildError, ControlError},
    graph::node::{BlockIo, ControlParameter, StreamOperator},
};

/*
Threshold Crossing
==================

Outputs a 1.0 impulse on the sample where the input rises above the
threshold (left outlet) or falls back to or below it (right outlet).

    in:        0.0   0.4   0.6   0.3      threshold 0.5
    up:        0     0     1     0
    down:      0     0     0     1

The threshold is the right inlet. Bind a signal there for a per-sample
threshold, or send it a number (or `set`) for a fixed one.

Inlets:   0 signal, 1 threshold
Outlets:  0 upward crossings, 1 downward crossings
*/

pub struct Threshold {
    detector: ThresholdDetector,
    threshold: ControlParameter,
}

impl Threshold {
    pub const NAME: &'static str = "thresh~";

    pub fn new(threshold: f32) -> Self {
        Self {
            detector: ThresholdDetector::new(),
            threshold: ControlParameter::new(threshold),
        }
    }

    /// `thresh~ [threshold]`
    pub fn from_args(args: &[Atom]) -> Result<Self, BuildError> {
        let parsed = args::parse(Self::NAME, args, &[], 1)?;
        Ok(Self::new(parsed.float(0, 0.0)))
    }
}

impl StreamOperator for Threshold {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn num_inputs(&self) -> usize {
        2
    }

    fn num_outputs(&self) -> usize {
        2
    }

    fn process(&mut self, io: &mut BlockIo<'_>) {
        let input = io.input(0);
        let threshold = io.param(1, &self.threshold);

        if let [ups, downs] = &mut *io.outputs {
            let outs = ups.iter_mut().zip(downs.iter_mut());
            for (i, (&x, (up, down))) in input.iter().zip(outs).enumerate() {
                let crossing = self.detector.next(x, threshold.at(i));
                *up = if crossing.up { 1.0 } else { 0.0 };
                *down = if crossing.down { 1.0 } else { 0.0 };
            }
        }
    }

    fn handle(&mut self, message: &ControlMessage) -> Result<(), ControlError> {
        match *message {
            ControlMessage::Float { inlet: 1, value } | ControlMessage::Set(value) => {
                self.threshold.set(value);
                Ok(())
            }
            ControlMessage::Float { inlet, .. } => Err(ControlError::NoSuchInlet {
                object: Self::NAME,
                inlet,
            }),
            ControlMessage::Reset => {
                self.detector.reset();
                Ok(())
            }
            _ => Err(ControlError::Unrecognized {
                object: Self::NAME,
                selector: message.selector(),
            }),
        }
    }
}
