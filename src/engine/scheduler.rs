#[cfg(feature = "rtrb")]
use rtrb::{Consumer, RingBuffer};

#[cfg(feature = "rtrb")]
use super::message::{ControlSender, MessageReceiver, RoutedMessage};
use super::{
    config::EngineConfig,
    message::ControlMessage,
    outlet::{OutletRecord, RecordingOutlet},
    OperatorId,
};
use crate::{
    error::{ControlError, ScheduleError},
    graph::node::{BlockIo, StreamOperator},
    io::{AudioInput, AudioOutput},
    MAX_PORTS,
};

/*
Tick Order
==========

Operators run in registration order. A binding can only name an operator
registered before it, so by the time an operator runs every signal it reads
has already been written for this tick:

    register(gray)                      ──▶ #0
    register(lag,   [Output #0, Unbound]) ──▶ #1
    register(thresh,[Output #1, Unbound]) ──▶ #2

    tick:  controls ─▶ #0 ─▶ #1 ─▶ #2 ─▶ host outputs

Control messages are applied before the first operator runs, so a message
sent between two ticks takes effect from the first sample of the next one.

A tick that cannot run (never configured, wrong buffer length) zeroes every
host output and leaves all operator state where it was.
*/

/// Where an operator input or a host output channel reads from.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    HostInput(usize),
    Output { op: OperatorId, port: usize },
    Unbound,
}

struct Slot {
    op: Box<dyn StreamOperator>,
    bindings: Vec<Source>,
    outputs: Vec<Vec<f32>>,
}

pub struct Engine {
    config: EngineConfig,
    configured: bool,
    slots: Vec<Slot>,
    host_outputs: Vec<Source>,
    silence: Vec<f32>,
    events: Vec<OutletRecord>,
    #[cfg(feature = "rtrb")]
    rx: Option<Consumer<RoutedMessage>>,
    ticks: u64,
}

impl Engine {
    /// New engine. An invalid `config` leaves the engine unconfigured until
    /// [`Engine::configure`] succeeds.
    pub fn new(config: EngineConfig) -> Self {
        let mut engine = Self {
            config,
            configured: false,
            slots: Vec::new(),
            host_outputs: Vec::new(),
            silence: Vec::new(),
            events: Vec::new(),
            #[cfg(feature = "rtrb")]
            rx: None,
            ticks: 0,
        };
        if let Err(err) = engine.configure(config) {
            log::warn!("engine left unconfigured: {err}");
        }
        engine
    }

    /// Apply a new session configuration. Every registered operator is
    /// reconfigured and every buffer resized before the next tick.
    pub fn configure(&mut self, config: EngineConfig) -> Result<(), ScheduleError> {
        config.validate()?;

        let block = config.block_size;
        self.config = config;
        self.silence = vec![0.0; block];
        self.host_outputs.resize(config.output_channels, Source::Unbound);

        for slot in &mut self.slots {
            let outputs = slot.op.num_outputs();
            slot.outputs = vec![vec![0.0; block]; outputs];
            slot.op.configure(&config);
        }

        self.configured = true;
        log::info!(
            "engine configured: {} Hz, block {}, {} in / {} out",
            config.sample_rate,
            block,
            config.input_channels,
            config.output_channels
        );
        Ok(())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// Number of registered operators.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Ticks processed successfully so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Add an operator. `bindings` gives the source of each input port, in
    /// port order, and may only reference operators registered earlier.
    pub fn register(
        &mut self,
        op: Box<dyn StreamOperator>,
        bindings: &[Source],
    ) -> Result<OperatorId, ScheduleError> {
        let inputs = op.num_inputs();
        if inputs > MAX_PORTS {
            return Err(ScheduleError::TooManyPorts {
                object: op.name(),
                got: inputs,
                max: MAX_PORTS,
            });
        }
        if bindings.len() != inputs {
            return Err(ScheduleError::BindingCount {
                object: op.name(),
                expected: inputs,
                got: bindings.len(),
            });
        }
        for source in bindings {
            self.check_source(*source)?;
        }

        let mut op = op;
        let outputs = if self.configured {
            op.configure(&self.config);
            vec![vec![0.0; self.config.block_size]; op.num_outputs()]
        } else {
            vec![Vec::new(); op.num_outputs()]
        };

        let id = OperatorId(self.slots.len());
        log::debug!("registered [{}] as #{}", op.name(), id.index());
        self.slots.push(Slot {
            op,
            bindings: bindings.to_vec(),
            outputs,
        });
        Ok(id)
    }

    /// Route `source` to host output `channel`.
    pub fn connect_output(&mut self, channel: usize, source: Source) -> Result<(), ScheduleError> {
        if channel >= self.config.output_channels {
            return Err(ScheduleError::NoSuchHostOutput(channel));
        }
        self.check_source(source)?;
        if self.host_outputs.len() <= channel {
            self.host_outputs.resize(channel + 1, Source::Unbound);
        }
        self.host_outputs[channel] = source;
        Ok(())
    }

    fn check_source(&self, source: Source) -> Result<(), ScheduleError> {
        match source {
            Source::HostInput(ch) if ch >= self.config.input_channels => {
                Err(ScheduleError::NoSuchHostInput(ch))
            }
            Source::Output { op, port } => {
                let slot = self
                    .slots
                    .get(op.index())
                    .ok_or(ScheduleError::UnknownOperator(op.index()))?;
                if port >= slot.op.num_outputs() {
                    return Err(ScheduleError::NoSuchOutput {
                        op: op.index(),
                        port,
                    });
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Deliver a control message now, between ticks. It takes effect from
    /// the first sample of the next tick.
    pub fn send(
        &mut self,
        target: OperatorId,
        message: ControlMessage,
    ) -> Result<(), ControlError> {
        let slot = self
            .slots
            .get_mut(target.index())
            .ok_or(ControlError::UnknownOperator(target.index()))?;
        let result = slot.op.handle(&message);
        if let Err(err) = &result {
            log::debug!("ignored control message: {err}");
        }
        result
    }

    /// Open a lock-free control channel for another thread. Messages pushed
    /// into it are applied at the start of the next tick. Opening a new
    /// channel replaces the previous one.
    #[cfg(feature = "rtrb")]
    pub fn control_channel(&mut self, capacity: usize) -> ControlSender {
        let (tx, rx) = RingBuffer::new(capacity);
        self.rx = Some(rx);
        ControlSender::new(tx)
    }

    #[cfg(feature = "rtrb")]
    fn drain_controls(&mut self) {
        let Some(rx) = self.rx.as_mut() else {
            return;
        };
        while let Some(routed) = MessageReceiver::pop(rx) {
            let result = match self.slots.get_mut(routed.target.index()) {
                Some(slot) => slot.op.handle(&routed.message),
                None => Err(ControlError::UnknownOperator(routed.target.index())),
            };
            if let Err(err) = result {
                log::warn!("dropped queued message: {err}");
            }
        }
    }

    /// Run one tick.
    ///
    /// Every host buffer, input and output, must hold exactly one block.
    pub fn process_block(
        &mut self,
        input: &AudioInput,
        output: &mut AudioOutput,
    ) -> Result<(), ScheduleError> {
        self.events.clear();

        if !self.configured {
            output.silence();
            return Err(ScheduleError::NotConfigured);
        }

        let expected = self.config.block_size;
        let wrong = input
            .buffers
            .iter()
            .chain(output.buffers.iter())
            .map(Vec::len)
            .find(|&len| len != expected);
        if let Some(got) = wrong {
            output.silence();
            return Err(ScheduleError::BlockSizeMismatch { expected, got });
        }

        #[cfg(feature = "rtrb")]
        self.drain_controls();

        for index in 0..self.slots.len() {
            let (done, rest) = self.slots.split_at_mut(index);
            let slot = &mut rest[0];

            let mut inputs: [Option<&[f32]>; MAX_PORTS] = [None; MAX_PORTS];
            for (port, source) in slot.bindings.iter().enumerate() {
                inputs[port] = match *source {
                    Source::HostInput(ch) => input.buffers.get(ch).map(Vec::as_slice),
                    Source::Output { op, port: out } => {
                        Some(done[op.index()].outputs[out].as_slice())
                    }
                    Source::Unbound => None,
                };
            }

            let mut outlet = RecordingOutlet {
                op: OperatorId(index),
                records: &mut self.events,
            };
            let mut io = BlockIo::new(
                &inputs[..slot.bindings.len()],
                &self.silence,
                &mut slot.outputs,
                &mut outlet,
            );
            slot.op.process(&mut io);
        }

        for (channel, buffer) in output.buffers.iter_mut().enumerate() {
            match self.host_outputs.get(channel).copied().unwrap_or(Source::Unbound) {
                Source::Output { op, port } => {
                    buffer.copy_from_slice(&self.slots[op.index()].outputs[port]);
                }
                Source::HostInput(ch) => match input.buffers.get(ch) {
                    Some(samples) => buffer.copy_from_slice(samples),
                    None => buffer.fill(0.0),
                },
                Source::Unbound => buffer.fill(0.0),
            }
        }

        self.ticks += 1;
        Ok(())
    }

    /// Outlet events from the most recent tick, in emission order.
    pub fn events(&self) -> &[OutletRecord] {
        &self.events
    }

    /// Signal written by `op` on `port` during the most recent tick.
    pub fn output(&self, op: OperatorId, port: usize) -> Option<&[f32]> {
        self.slots
            .get(op.index())
            .and_then(|slot| slot.outputs.get(port))
            .map(Vec::as_slice)
    }

    pub fn operator(&self, op: OperatorId) -> Option<&dyn StreamOperator> {
        self.slots.get(op.index()).map(|slot| slot.op.as_ref())
    }
}
