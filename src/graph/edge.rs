use crate::{
    dsp::crossing::{GateDetector, GateTransition},
    engine::{
        args::{self, Atom},
        message::ControlMessage,
        outlet::OutletEvent,
    },
    error::{BuildError, ControlError},
    graph::node::{BlockIo, StreamOperator},
};

/// Signal-to-control edge detector.
///
/// Has no signal outputs. Bangs outlet 0 when the input goes from exactly 0
/// to nonzero and outlet 1 when it returns to exactly 0, each tagged with the
/// sample offset inside the block.
pub struct Edge {
    gate: GateDetector,
}

impl Edge {
    pub const NAME: &'static str = "edge~";

    pub const ONSET: usize = 0;
    pub const RELEASE: usize = 1;

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

impl Default for Edge {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamOperator for Edge {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn num_inputs(&self) -> usize {
        1
    }

    fn num_outputs(&self) -> usize {
        0
    }

    fn process(&mut self, io: &mut BlockIo<'_>) {
        let input = io.input(0);

        for (offset, &x) in input.iter().enumerate() {
            match self.gate.next(x) {
                GateTransition::Opened => io.outlet.emit(Self::ONSET, offset, OutletEvent::Bang),
                GateTransition::Closed => io.outlet.emit(Self::RELEASE, offset, OutletEvent::Bang),
                GateTransition::Held => {}
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{engine::outlet::Emission, graph::node::render_block};

    #[test]
    fn bangs_on_both_edges_with_offsets() {
        let mut op = Edge::new();
        let input = [0.0, 0.3, 0.2, 0.0];

        let block = render_block(&mut op, &[Some(&input[..])], 4);

        assert!(block.outputs.is_empty());
        assert_eq!(
            block.events,
            [
                Emission {
                    port: Edge::ONSET,
                    offset: 1,
                    event: OutletEvent::Bang
                },
                Emission {
                    port: Edge::RELEASE,
                    offset: 3,
                    event: OutletEvent::Bang
                },
            ]
        );
    }

    #[test]
    fn steady_signal_is_silent() {
        let mut op = Edge::new();
        render_block(&mut op, &[Some(&[1.0, 1.0][..])], 2);
        let block = render_block(&mut op, &[Some(&[1.0, 1.0][..])], 2);
        assert!(block.events.is_empty());
    }
}
