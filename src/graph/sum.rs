use crate::{
    dsp::accum::RunningSum,
    engine::{
        args::{self, Atom},
        message::ControlMessage,
    },
    error::{BuildError, ControlError},
    graph::node::{BlockIo, StreamOperator},
};

/// Running sum of a signal.
///
/// Inlets:  0 signal, 1 trigger (a sample of exactly 1.0 rebases the sum)
/// Outlets: 0 running sum
///
/// `set <n>` replaces the baseline, `bang` restarts the sum from it.
pub struct Sum {
    acc: RunningSum,
}

impl Sum {
    pub const NAME: &'static str = "sum~";

    pub fn new(start: f32) -> Self {
        let mut acc = RunningSum::new();
        acc.set(start);
        acc.bang();
        Self { acc }
    }

    /// `sum~ [start]`
    pub fn from_args(args: &[Atom]) -> Result<Self, BuildError> {
        let parsed = args::parse(Self::NAME, args, &[], 1)?;
        Ok(Self::new(parsed.float(0, 0.0)))
    }

    pub fn value(&self) -> f64 {
        self.acc.sum()
    }
}

impl StreamOperator for Sum {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn num_inputs(&self) -> usize {
        2
    }

    fn num_outputs(&self) -> usize {
        1
    }

    fn process(&mut self, io: &mut BlockIo<'_>) {
        let input = io.input(0);
        let trigger = io.input(1);

        if let [out] = &mut *io.outputs {
            for ((&x, &t), y) in input.iter().zip(trigger.iter()).zip(out.iter_mut()) {
                *y = self.acc.next_sample(x, t);
            }
        }
    }

    fn handle(&mut self, message: &ControlMessage) -> Result<(), ControlError> {
        match *message {
            ControlMessage::Set(start) => {
                self.acc.set(start);
                Ok(())
            }
            ControlMessage::Bang => {
                self.acc.bang();
                Ok(())
            }
            _ => Err(ControlError::Unrecognized {
                object: Self::NAME,
                selector: message.selector(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::render_block;

    #[test]
    fn starts_from_creation_argument() {
        let mut op = Sum::from_args(&[Atom::Float(10.0)]).unwrap();
        let block = render_block(&mut op, &[Some(&[1.0, 1.0, 1.0][..])], 3);
        assert_eq!(block.outputs[0], [11.0, 12.0, 13.0]);
    }

    #[test]
    fn trigger_rebases_mid_block() {
        let mut op = Sum::new(0.0);
        let input = [1.0, 1.0, 2.0, 1.0];
        let trigger = [0.0, 0.0, 1.0, 0.0];

        let block = render_block(&mut op, &[Some(&input[..]), Some(&trigger[..])], 4);
        assert_eq!(block.outputs[0], [1.0, 2.0, 2.0, 3.0]);
    }

    #[test]
    fn set_then_bang() {
        let mut op = Sum::new(0.0);
        render_block(&mut op, &[Some(&[5.0][..])], 1);

        op.handle(&ControlMessage::Set(100.0)).unwrap();
        assert_eq!(op.value(), 5.0, "set alone keeps the running sum");

        op.handle(&ControlMessage::Bang).unwrap();
        let block = render_block(&mut op, &[Some(&[1.0][..])], 1);
        assert_eq!(block.outputs[0], [101.0]);
    }

    #[test]
    fn long_run_keeps_precision() {
        let mut op = Sum::new(0.0);
        let input = [1.0; 512];
        for _ in 0..10_000 {
            render_block(&mut op, &[Some(&input[..])], 512);
        }
        assert_eq!(op.value(), 5_120_000.0);
    }
}
