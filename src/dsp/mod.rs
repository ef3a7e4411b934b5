//! Low-level per-sample state machines used by the stream operators.
//!
//! These components are allocation-free and realtime-safe, so operators embed
//! them directly. They stay focused on the per-sample math; the operators in
//! `graph` layer on control inputs, messages and block iteration.

/// Running sum with rebasing trigger.
pub mod accum;
/// Threshold, zero-crossing and gate transition detectors.
pub mod crossing;
/// Two-sided linear glide.
pub mod glide;
/// One-pole exponential smoother.
pub mod lag;
/// Bit-level NaN/Inf/denormal classification and sanitizing.
pub mod numeric;
/// Tausworthe generator and seed bookkeeping.
pub mod random;
/// Running min/max tracker.
pub mod range;
/// Two-sided slew-rate limiter.
pub mod slew;

pub use numeric::sanitize;
