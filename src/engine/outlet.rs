//! Discrete control events leaving an operator.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::OperatorId;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutletEvent {
    Bang,
    Float(f32),
}

/// An event as emitted by one operator: which outlet, and at which sample of
/// the block it happened.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emission {
    pub port: usize,
    pub offset: usize,
    pub event: OutletEvent,
}

/// An emission tagged with the operator that produced it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutletRecord {
    pub op: OperatorId,
    pub port: usize,
    pub offset: usize,
    pub event: OutletEvent,
}

/// Sink for discrete events. The host decides what happens to them.
pub trait Outlet {
    fn emit(&mut self, port: usize, offset: usize, event: OutletEvent);
}

impl Outlet for Vec<Emission> {
    fn emit(&mut self, port: usize, offset: usize, event: OutletEvent) {
        self.push(Emission {
            port,
            offset,
            event,
        });
    }
}

/// Tags emissions with the operator currently being processed.
pub(crate) struct RecordingOutlet<'a> {
    pub(crate) op: OperatorId,
    pub(crate) records: &'a mut Vec<OutletRecord>,
}

impl Outlet for RecordingOutlet<'_> {
    fn emit(&mut self, port: usize, offset: usize, event: OutletEvent) {
        self.records.push(OutletRecord {
            op: self.op,
            port,
            offset,
            event,
        });
    }
}
