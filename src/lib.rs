pub mod dsp; // Per-sample state machines and numeric helpers
pub mod engine; // Block scheduling host
pub mod error;
pub mod graph; // Stream operators rendered one block at a time
pub mod io;

pub use engine::{config::EngineConfig, scheduler::Engine};

pub const MAX_BLOCK_SIZE: usize = 2048;
/// Upper bound on signal inputs a single operator can declare.
pub const MAX_PORTS: usize = 4;
