//! Running minimum/maximum tracker with sample-accurate restart.

/*
Range Tracking
==============

Keeps the lowest and highest values seen since the last restart. Before any
sample arrives the bounds are (+inf, -inf), so the first sample becomes both.

A restart does not clear to "nothing seen": the bounds snap to the sample
that arrives with the restart, so the range always includes at least one
real value.

No numeric protection. A NaN never wins `<` or `>` and is simply skipped,
except on a restart sample, where it is stored as-is.
*/

#[derive(Debug, Clone)]
pub struct RangeTracker {
    min: f32,
    max: f32,
}

impl RangeTracker {
    pub fn new() -> Self {
        Self {
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
        }
    }

    /// Feed one sample. `restart` makes this sample the whole range.
    #[inline]
    pub fn next(&mut self, sample: f32, restart: bool) -> (f32, f32) {
        if restart {
            self.min = sample;
            self.max = sample;
        } else {
            if sample < self.min {
                self.min = sample;
            }
            if sample > self.max {
                self.max = sample;
            }
        }
        (self.min, self.max)
    }

    /// Forget everything, back to (+inf, -inf).
    pub fn clear(&mut self) {
        self.min = f32::INFINITY;
        self.max = f32::NEG_INFINITY;
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.min, self.max)
    }
}

impl Default for RangeTracker {
    fn default() -> Self {
        Self::new()
    }
}
