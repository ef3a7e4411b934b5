use crate::{
    dsp::crossing::ZeroCrossDetector,
    engine::{
        args::{self, Atom},
        message::ControlMessage,
    },
    error::{BuildError, ControlError},
    graph::node::{BlockIo, StreamOperator},
};

/// Zero-crossing detector with three impulse outlets: rising, falling, and
/// either direction.
///
/// Exact zero counts as non-positive for rising edges and non-negative for
/// falling ones, so passing through 0.0 is a single crossing. The first
/// sample of a session never reports an edge.
pub struct ZeroCross {
    detector: ZeroCrossDetector,
}

impl ZeroCross {
    pub const NAME: &'static str = "zerocross~";

    pub fn new() -> Self {
        Self {
            detector: ZeroCrossDetector::new(),
        }
    }

    pub fn from_args(args: &[Atom]) -> Result<Self, BuildError> {
        args::parse(Self::NAME, args, &[], 0)?;
        Ok(Self::new())
    }
}

impl Default for ZeroCross {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamOperator for ZeroCross {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn num_inputs(&self) -> usize {
        1
    }

    fn num_outputs(&self) -> usize {
        3
    }

    fn process(&mut self, io: &mut BlockIo<'_>) {
        let input = io.input(0);

        if let [rising, falling, either] = &mut *io.outputs {
            let outs = rising.iter_mut().zip(falling.iter_mut()).zip(either.iter_mut());
            for (&x, ((rise, fall), any)) in input.iter().zip(outs) {
                let crossing = self.detector.next(x);
                *rise = if crossing.rising { 1.0 } else { 0.0 };
                *fall = if crossing.falling { 1.0 } else { 0.0 };
                *any = if crossing.either() { 1.0 } else { 0.0 };
            }
        }
    }

    fn handle(&mut self, message: &ControlMessage) -> Result<(), ControlError> {
        match message {
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
