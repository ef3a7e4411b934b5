#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::OperatorId;
#[cfg(feature = "rtrb")]
use crate::error::ControlError;

/// Discrete control events delivered to operators between blocks.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ControlMessage {
    Bang,
    /// A number arriving on an inlet. Inlet 0 is the leftmost.
    Float { inlet: usize, value: f32 },
    Set(f32),
    Reset,
    /// Reseed a generator; `None` draws a fresh default seed.
    Seed(Option<f32>),
    /// Curve exponent for glides.
    Exp(f32),
}

impl ControlMessage {
    /// Message name as it appears in diagnostics.
    pub fn selector(&self) -> &'static str {
        match self {
            ControlMessage::Bang => "bang",
            ControlMessage::Float { .. } => "float",
            ControlMessage::Set(_) => "set",
            ControlMessage::Reset => "reset",
            ControlMessage::Seed(_) => "seed",
            ControlMessage::Exp(_) => "exp",
        }
    }
}

/// A message addressed to one registered operator.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RoutedMessage {
    pub target: OperatorId,
    pub message: ControlMessage,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<RoutedMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<RoutedMessage> {
    fn pop(&mut self) -> Option<RoutedMessage> {
        Consumer::pop(self).ok()
    }
}

/// Control-thread end of the lock-free message ring.
#[cfg(feature = "rtrb")]
pub struct ControlSender {
    tx: Producer<RoutedMessage>,
}

#[cfg(feature = "rtrb")]
impl ControlSender {
    pub(crate) fn new(tx: Producer<RoutedMessage>) -> Self {
        Self { tx }
    }

    /// Queue a message for the start of the next tick.
    pub fn send(
        &mut self,
        target: OperatorId,
        message: ControlMessage,
    ) -> Result<(), ControlError> {
        self.tx
            .push(RoutedMessage { target, message })
            .map_err(|_| ControlError::QueueFull)
    }

    pub fn slots(&self) -> usize {
        self.tx.slots()
    }
}
