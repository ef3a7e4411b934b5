//! Host side of the block contract: configuration, control delivery,
//! outlet events and the scheduler that ticks registered operators in
//! dependency order.

pub mod args;
pub mod config;
pub mod factory;
pub mod message;
pub mod outlet;
pub mod scheduler;

/// Handle to an operator registered with an [`scheduler::Engine`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperatorId(pub(crate) usize);

impl OperatorId {
    pub fn index(&self) -> usize {
        self.0
    }
}
