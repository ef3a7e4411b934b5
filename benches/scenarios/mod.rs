//! Real-world scenario benchmarks.
//!
//! Whole chains ticked through the engine, the way a host drives them.

mod engine;

pub use engine::bench_engine;
