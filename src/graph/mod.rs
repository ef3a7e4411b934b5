//! Stream operators.
//!
//! Each operator wraps one of the `dsp` state machines with the block
//! contract from [`node`]: ports, scalar fallbacks for unbound control
//! inputs, control messages and construction from arguments.

/// Signal-to-control edge detector (`edge~`).
pub mod edge;
/// Gate onsets to impulses (`gate2imp~`).
pub mod gate2imp;
/// Two-sided glide (`glide2~`).
pub mod glide;
/// Gray noise (`gray~`).
pub mod gray;
/// Random impulses (`dust~`, `dust2~`).
pub mod dust;
/// One-pole exponential lag (`lag~`).
pub mod lag;
/// Running min/max (`minmax~`).
pub mod minmax;
/// Core trait and block I/O shared by all operators.
pub mod node;
/// Triggered random values (`rand.f~`, `rand.i~`).
pub mod rand;
/// Slew limiter (`slew2~`).
pub mod slew;
/// Running sum (`sum~`).
pub mod sum;
/// Threshold crossings (`thresh~`).
pub mod threshold;
/// Zero crossings (`zerocross~`).
pub mod zerocross;

pub use node::{render_block, BlockIo, ControlParameter, Param, RenderedBlock, StreamOperator};
