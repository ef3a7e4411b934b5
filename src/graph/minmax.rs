use crate::{
    dsp::range::RangeTracker,
    engine::{
        args::{self, Atom},
        message::ControlMessage,
    },
    error::{BuildError, ControlError},
    graph::node::{BlockIo, StreamOperator},
};

/// Running minimum and maximum of a signal.
///
/// Inlets:  0 signal, 1 restart (any nonzero sample)
/// Outlets: 0 min, 1 max
///
/// A restart sample makes that sample the whole range. `reset` forgets
/// everything, so the next sample starts a new range.
pub struct MinMax {
    range: RangeTracker,
}

impl MinMax {
    pub const NAME: &'static str = "minmax~";

    pub fn new() -> Self {
        Self {
            range: RangeTracker::new(),
        }
    }

    pub fn from_args(args: &[Atom]) -> Result<Self, BuildError> {
        args::parse(Self::NAME, args, &[], 0)?;
        Ok(Self::new())
    }
}

impl Default for MinMax {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamOperator for MinMax {
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
        let restart = io.input(1);

        if let [mins, maxs] = &mut *io.outputs {
            let outs = mins.iter_mut().zip(maxs.iter_mut());
            for ((&x, &r), (lo, hi)) in input.iter().zip(restart.iter()).zip(outs) {
                (*lo, *hi) = self.range.next(x, r != 0.0);
            }
        }
    }

    fn handle(&mut self, message: &ControlMessage) -> Result<(), ControlError> {
        match message {
            ControlMessage::Reset => {
                self.range.clear();
                Ok(())
            }
            _ => Err(ControlError::Unrecognized {
                object: Self::NAME,
                selector: message.selector(),
            }),
        }
    }
}
