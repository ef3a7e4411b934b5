//! Benchmarks for low-level DSP primitives.

mod detect;
mod envelope;
mod random;

pub use detect::bench_detect;
pub use envelope::bench_envelope;
pub use random::bench_random;
