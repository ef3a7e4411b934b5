//! Error types shared across the crate.
//!
//! Runtime numeric trouble never shows up here: NaN/Inf/denormal samples are
//! sanitized in place and out-of-range control values are clamped. These
//! enums only cover the points where the host can act on a failure.

use thiserror::Error;

/// Operator construction failed. Reported once, the operator is not created.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("[{object}]: improper args")]
    ImproperArgs { object: &'static str },
    #[error("[{object}]: seed must be a finite, non-negative number (got {value})")]
    InvalidSeed { object: &'static str, value: f32 },
    #[error("[{object}]: unknown flag '{flag}'")]
    UnknownFlag { object: &'static str, flag: String },
    #[error("couldn't create '{0}'")]
    UnknownObject(String),
}

/// A control message was not accepted. The operator's state is untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControlError {
    #[error("[{object}]: no method for '{selector}'")]
    Unrecognized {
        object: &'static str,
        selector: &'static str,
    },
    #[error("[{object}]: inlet {inlet} does not take a float")]
    NoSuchInlet { object: &'static str, inlet: usize },
    #[error("operator {0} is not registered")]
    UnknownOperator(usize),
    #[error("control queue is full")]
    QueueFull,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("sample rate must be finite and positive (got {0})")]
    InvalidSampleRate(f32),
    #[error("block size must be between 1 and {max} (got {got})")]
    InvalidBlockSize { got: usize, max: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error("engine has not been configured")]
    NotConfigured,
    #[error("host buffer holds {got} samples, block size is {expected}")]
    BlockSizeMismatch { expected: usize, got: usize },
    #[error("operator {0} is not registered")]
    UnknownOperator(usize),
    #[error("operator {op} has no output port {port}")]
    NoSuchOutput { op: usize, port: usize },
    #[error("'{object}' declares {expected} inputs but {got} bindings were given")]
    BindingCount {
        object: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("'{object}' declares {got} inputs, at most {max} are supported")]
    TooManyPorts {
        object: &'static str,
        got: usize,
        max: usize,
    },
    #[error("host input channel {0} does not exist")]
    NoSuchHostInput(usize),
    #[error("host output channel {0} does not exist")]
    NoSuchHostOutput(usize),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
