use crate::{
    engine::{
        config::EngineConfig,
        message::ControlMessage,
        outlet::{Emission, Outlet},
    },
    error::ControlError,
};

/*
Block Processing Contract
=========================

Every operator is driven the same way: once per tick the host hands it one
block of input samples and one block of output buffers, and the operator
fills the outputs before returning. Nothing is retained from the host
buffers; anything an operator needs from the past (the last sample, a running
sum, a generator state) lives in its own fields.

    tick 0            tick 1            tick 2
    ┌──────────┐      ┌──────────┐      ┌──────────┐
    │ in[0..N] │      │ in[0..N] │      │ in[0..N] │
    └────┬─────┘      └────┬─────┘      └────┬─────┘
         ▼                 ▼                 ▼
      process ──state──▶ process ──state──▶ process
         │                 │                 │
    ┌────▼─────┐      ┌────▼─────┐      ┌────▼─────┐
    │out[0..N] │      │out[0..N] │      │out[0..N] │
    └──────────┘      └──────────┘      └──────────┘

Output sample i may depend on input samples 0..=i of the current block and on
the carried state. Never on later samples.

Control Parameters
------------------

A secondary input such as a threshold or a time constant can arrive two ways:

  signal    the port is bound to another operator's output, and the value
            is read sample by sample
  scalar    the port is unbound, and the operator's own `ControlParameter`
            is used for the whole block; `Float { inlet, value }` messages
            update it between blocks

`BlockIo::param` hides the difference behind `Param::at(i)`.
*/

/// Trait implemented by every stream operator.
///
/// An instance is only ever touched by one thread at a time: the host never
/// calls `process` concurrently on the same operator, and control messages
/// are delivered between blocks.
pub trait StreamOperator: Send {
    /// Object name, as used in diagnostics and by the factory.
    fn name(&self) -> &'static str;

    fn num_inputs(&self) -> usize;

    fn num_outputs(&self) -> usize;

    /// Called before the first block and again whenever the sample rate or
    /// block size changes. Recompute sample-rate derived constants here.
    fn configure(&mut self, _config: &EngineConfig) {
        // Default: nothing cached
    }

    /// Render one block.
    fn process(&mut self, io: &mut BlockIo<'_>);

    /// Handle a control message delivered between blocks.
    ///
    /// Unrecognized messages must leave the operator untouched.
    fn handle(&mut self, message: &ControlMessage) -> Result<(), ControlError> {
        Err(ControlError::Unrecognized {
            object: self.name(),
            selector: message.selector(),
        })
    }
}

/// Allow boxed operators to be used as operators (for dynamic dispatch)
impl StreamOperator for Box<dyn StreamOperator> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn num_inputs(&self) -> usize {
        (**self).num_inputs()
    }

    fn num_outputs(&self) -> usize {
        (**self).num_outputs()
    }

    fn configure(&mut self, config: &EngineConfig) {
        (**self).configure(config)
    }

    fn process(&mut self, io: &mut BlockIo<'_>) {
        (**self).process(io)
    }

    fn handle(&mut self, message: &ControlMessage) -> Result<(), ControlError> {
        (**self).handle(message)
    }
}

/// Scalar value used by an input port while no signal is bound to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlParameter {
    value: f32,
}

impl ControlParameter {
    pub fn new(value: f32) -> Self {
        Self { value }
    }

    pub fn get(&self) -> f32 {
        self.value
    }

    pub fn set(&mut self, value: f32) {
        self.value = value;
    }
}

/// A per-sample view of a control input.
#[derive(Debug, Clone, Copy)]
pub enum Param<'a> {
    Signal(&'a [f32]),
    Scalar(f32),
}

impl Param<'_> {
    #[inline]
    pub fn at(&self, index: usize) -> f32 {
        match self {
            Param::Signal(samples) => samples.get(index).copied().unwrap_or(0.0),
            Param::Scalar(value) => *value,
        }
    }
}

/// Everything an operator touches during one `process` call.
pub struct BlockIo<'a> {
    inputs: &'a [Option<&'a [f32]>],
    silence: &'a [f32],
    /// The operator's output buffers, one per output port, each one block long.
    pub outputs: &'a mut [Vec<f32>],
    /// Sink for discrete events (bangs, floats).
    pub outlet: &'a mut dyn Outlet,
}

impl<'a> BlockIo<'a> {
    /// `silence` must be one block of zeros; its length defines the block.
    pub fn new(
        inputs: &'a [Option<&'a [f32]>],
        silence: &'a [f32],
        outputs: &'a mut [Vec<f32>],
        outlet: &'a mut dyn Outlet,
    ) -> Self {
        Self {
            inputs,
            silence,
            outputs,
            outlet,
        }
    }

    /// Samples in this block.
    pub fn len(&self) -> usize {
        self.silence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.silence.is_empty()
    }

    pub fn is_connected(&self, port: usize) -> bool {
        matches!(self.inputs.get(port), Some(Some(_)))
    }

    /// Signal on `port`, or silence when nothing is bound.
    pub fn input(&self, port: usize) -> &'a [f32] {
        match self.inputs.get(port).copied().flatten() {
            Some(samples) => samples,
            None => self.silence,
        }
    }

    /// Signal on `port` when bound, otherwise the scalar `fallback`.
    pub fn param(&self, port: usize, fallback: &ControlParameter) -> Param<'a> {
        match self.inputs.get(port).copied().flatten() {
            Some(samples) => Param::Signal(samples),
            None => Param::Scalar(fallback.get()),
        }
    }
}

/// Output of [`render_block`].
#[derive(Debug, Clone, Default)]
pub struct RenderedBlock {
    pub outputs: Vec<Vec<f32>>,
    pub events: Vec<Emission>,
}

/// Run one block through an operator outside an engine.
///
/// Allocates its buffers, so it is meant for offline rendering and tests, not
/// for the audio thread.
pub fn render_block<O: StreamOperator + ?Sized>(
    op: &mut O,
    inputs: &[Option<&[f32]>],
    block_size: usize,
) -> RenderedBlock {
    let silence = vec![0.0; block_size];
    let mut outputs = vec![vec![0.0; block_size]; op.num_outputs()];
    let mut events = Vec::new();

    let mut io = BlockIo::new(inputs, &silence, &mut outputs, &mut events);
    op.process(&mut io);

    RenderedBlock { outputs, events }
}
