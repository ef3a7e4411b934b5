use crate::{
    dsp::lag::OnePoleLag,
    engine::{
        args::{self, Atom},
        config::EngineConfig,
        message::ControlMessage,
    },
    error::{BuildError, ControlError},
    graph::node::{BlockIo, ControlParameter, StreamOperator},
};

/// Exponential lag: one-pole smoothing with a 60 dB time in milliseconds.
///
/// Inlets:  0 signal, 1 time (ms, signal or number)
/// Outlets: 0 smoothed signal
///
/// `reset` makes the next sample jump to the input.
pub struct Lag {
    lag: OnePoleLag,
    ms: ControlParameter,
}

impl Lag {
    pub const NAME: &'static str = "lag~";

    pub fn new(ms: f32) -> Self {
        Self {
            lag: OnePoleLag::new(EngineConfig::default().sample_rate),
            ms: ControlParameter::new(ms),
        }
    }

    /// `lag~ [ms]`
    pub fn from_args(args: &[Atom]) -> Result<Self, BuildError> {
        let parsed = args::parse(Self::NAME, args, &[], 1)?;
        Ok(Self::new(parsed.float(0, 0.0)))
    }
}

impl StreamOperator for Lag {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn num_inputs(&self) -> usize {
        2
    }

    fn num_outputs(&self) -> usize {
        1
    }

    fn configure(&mut self, config: &EngineConfig) {
        self.lag.set_sample_rate(config.sample_rate);
    }

    fn process(&mut self, io: &mut BlockIo<'_>) {
        let input = io.input(0);
        let ms = io.param(1, &self.ms);

        if let [out] = &mut *io.outputs {
            for (i, (&x, y)) in input.iter().zip(out.iter_mut()).enumerate() {
                *y = self.lag.next_sample(x, ms.at(i));
            }
        }
    }

    fn handle(&mut self, message: &ControlMessage) -> Result<(), ControlError> {
        match *message {
            ControlMessage::Float { inlet: 1, value } => {
                self.ms.set(value);
                Ok(())
            }
            ControlMessage::Float { inlet, .. } => Err(ControlError::NoSuchInlet {
                object: Self::NAME,
                inlet,
            }),
            ControlMessage::Reset => {
                self.lag.reset();
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

    const BLOCK: usize = 64;

    #[test]
    fn approaches_target_monotonically() {
        let mut op = Lag::new(20.0);
        op.configure(&EngineConfig::default());

        let mut last = f32::NEG_INFINITY;
        for _ in 0..50 {
            let block = render_block(&mut op, &[Some(&[1.0; BLOCK][..])], BLOCK);
            for &y in &block.outputs[0] {
                assert!(y >= last, "output must approach the target monotonically");
                last = y;
            }
        }
        assert!((last - 1.0).abs() < 1e-3, "lag should settle near 1.0, got {last}");
    }

    #[test]
    fn reset_snaps_next_sample() {
        let mut op = Lag::new(500.0);
        op.configure(&EngineConfig::default());
        render_block(&mut op, &[Some(&[1.0; BLOCK][..])], BLOCK);

        op.handle(&ControlMessage::Reset).unwrap();
        let block = render_block(&mut op, &[Some(&[0.3; BLOCK][..])], BLOCK);
        assert_eq!(block.outputs[0][0], 0.3);
        assert!(block.outputs[0].iter().all(|&y| (y - 0.3).abs() < 1e-6));
    }

    #[test]
    fn zero_time_follows_input_immediately() {
        let mut op = Lag::new(50.0);
        render_block(&mut op, &[Some(&[0.0; 4][..])], 4);

        op.handle(&ControlMessage::Float { inlet: 1, value: 0.0 }).unwrap();
        let block = render_block(&mut op, &[Some(&[0.75; 4][..])], 4);
        assert_eq!(block.outputs[0], [0.75; 4]);
    }

    #[test]
    fn audio_rate_time_argument() {
        let mut op = Lag::new(1000.0);
        let input = [1.0, 1.0, 0.0, 0.0];
        let ms = [0.0, 1000.0, 0.0, 1000.0];

        let block = render_block(&mut op, &[Some(&input[..]), Some(&ms[..])], 4);
        let out = &block.outputs[0];

        assert_eq!(out[0], 1.0);
        assert_eq!(out[1], 1.0);
        assert_eq!(out[2], 0.0);
        assert_eq!(out[3], 0.0);
    }
}
