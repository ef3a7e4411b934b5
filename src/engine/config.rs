#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, MAX_BLOCK_SIZE};

/// Session configuration: fixed for the lifetime of a processing session
/// unless the host explicitly reconfigures.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Samples per second (e.g. 48000.0)
    pub sample_rate: f32,
    /// Samples per block, 1..=MAX_BLOCK_SIZE
    pub block_size: usize,
    pub input_channels: usize,
    pub output_channels: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            block_size: 64,
            input_channels: 2,
            output_channels: 2,
        }
    }
}

impl EngineConfig {
    /// Stereo in/out session with the given rate and block size.
    pub fn new(sample_rate: f32, block_size: usize) -> Result<Self, ConfigError> {
        let config = Self {
            sample_rate,
            block_size,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_channels(mut self, inputs: usize, outputs: usize) -> Self {
        self.input_channels = inputs;
        self.output_channels = outputs;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(ConfigError::InvalidSampleRate(self.sample_rate));
        }
        if self.block_size == 0 || self.block_size > MAX_BLOCK_SIZE {
            return Err(ConfigError::InvalidBlockSize {
                got: self.block_size,
                max: MAX_BLOCK_SIZE,
            });
        }
        Ok(())
    }

    /// Seconds per sample.
    pub fn sample_duration(&self) -> f32 {
        1.0 / self.sample_rate
    }
}
