//! Host-facing audio buffers, one `Vec<f32>` per channel.

#[derive(Debug, Default, Clone)]
pub struct AudioInput {
    pub buffers: Vec<Vec<f32>>,
}

impl AudioInput {
    /// `channels` buffers of silence, each `block_size` long.
    pub fn new(channels: usize, block_size: usize) -> Self {
        Self {
            buffers: vec![vec![0.0; block_size]; channels],
        }
    }

    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.buffers.get(index).map(Vec::as_slice)
    }

    pub fn channel_mut(&mut self, index: usize) -> Option<&mut [f32]> {
        self.buffers.get_mut(index).map(Vec::as_mut_slice)
    }
}

#[derive(Debug, Default, Clone)]
pub struct AudioOutput {
    pub buffers: Vec<Vec<f32>>,
}

impl AudioOutput {
    pub fn new(channels: usize, block_size: usize) -> Self {
        Self {
            buffers: vec![vec![0.0; block_size]; channels],
        }
    }

    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.buffers.get(index).map(Vec::as_slice)
    }

    pub(crate) fn silence(&mut self) {
        for buffer in &mut self.buffers {
            buffer.fill(0.0);
        }
    }
}
