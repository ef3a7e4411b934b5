//! Running sum with a rebasing trigger.

use crate::dsp::numeric::sanitize;

/*
Running Sum
===========

Adds every input sample to a running total. The total is kept in f64 so a
long-running integrator does not lose its low bits after a few seconds.

Rebase, not reset
-----------------

A trigger sample (exactly 1.0) does not zero the total. It folds the current
input into the baseline and restarts the sum from that baseline:

    trigger == 1.0:   start += x;  sum = start
    otherwise:        sum += x

Outside the stream, `set` replaces the baseline without touching the running
total, and `bang` restarts the total from the baseline.

Input is sanitized; a single NaN would otherwise latch the sum.
*/

#[derive(Debug, Clone, Default)]
pub struct RunningSum {
    sum: f64,
    start: f64,
}

impl RunningSum {
    pub fn new() -> Self {
        Self { sum: 0.0, start: 0.0 }
    }

    #[inline]
    pub fn next_sample(&mut self, input: f32, trigger: f32) -> f32 {
        let input = sanitize(input) as f64;
        if trigger == 1.0 {
            self.start += input;
            self.sum = self.start;
        } else {
            self.sum += input;
        }
        self.sum as f32
    }

    /// Replace the baseline used by the next rebase or bang.
    pub fn set(&mut self, start: f32) {
        self.start = sanitize(start) as f64;
    }

    /// Restart the running total from the baseline.
    pub fn bang(&mut self) {
        self.sum = self.start;
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn start(&self) -> f64 {
        self.start
    }
}
