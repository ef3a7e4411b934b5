//! One-pole exponential smoother.

use crate::dsp::numeric::sanitize;

/*
Exponential Lag
===============

A one-pole lowpass that follows its input with an exponential curve. The time
argument is the "60 dB time": after `ms` milliseconds the remaining distance
to a constant target has shrunk to 0.001 of where it started.

The Math
--------

    a    = exp(ln(0.001) / (ms * sr / 1000))
    y[n] = x[n] + a * (y[n-1] - x[n])

`a` sits in (0, 1), so every sample removes the same fraction of the
remaining distance and the output approaches a constant input monotonically
without overshooting.

    ms <= 0     no smoothing, y[n] = x[n]
    reset       next sample snaps to x[n], then smoothing resumes

The coefficient is cached per `ms` value and invalidated when the sample rate
changes, so a constant time argument costs one `exp` per configuration, not
one per sample.

Both the input and the carried `y` are sanitized; the decaying tail of a
one-pole is the textbook source of denormals.
*/

const LN_0_001: f32 = -6.907_755_3;

#[derive(Debug, Clone)]
pub struct OnePoleLag {
    y: f32,
    snap_next: bool,
    sr_khz: f32,
    cached_ms: f32,
    cached_coef: f32,
}

impl OnePoleLag {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            y: 0.0,
            snap_next: false,
            sr_khz: sample_rate * 0.001,
            cached_ms: f32::NAN,
            cached_coef: 0.0,
        }
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sr_khz = sample_rate * 0.001;
        // NaN never compares equal, so the next call recomputes.
        self.cached_ms = f32::NAN;
    }

    /// Feedback coefficient for a time constant in milliseconds.
    #[inline]
    pub fn coefficient(&mut self, ms: f32) -> f32 {
        if ms != self.cached_ms {
            self.cached_ms = ms;
            self.cached_coef = (LN_0_001 / (ms * self.sr_khz)).exp();
        }
        self.cached_coef
    }

    #[inline]
    pub fn next_sample(&mut self, input: f32, ms: f32) -> f32 {
        let input = sanitize(input);

        let y = if self.snap_next || ms.is_nan() || ms <= 0.0 {
            self.snap_next = false;
            input
        } else {
            let a = self.coefficient(ms);
            input + a * (self.y - input)
        };

        self.y = sanitize(y);
        self.y
    }

    /// Smooth a buffer in place with a constant time argument.
    pub fn render(&mut self, buffer: &mut [f32], ms: f32) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample, ms);
        }
    }

    /// Make the next processed sample jump straight to its input.
    pub fn reset(&mut self) {
        self.snap_next = true;
    }

    pub fn value(&self) -> f32 {
        self.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    #[test]
    fn converges_monotonically_to_constant_input() {
        let mut lag = OnePoleLag::new(SAMPLE_RATE);
        let mut previous = lag.next_sample(0.0, 10.0);
        for _ in 0..(SAMPLE_RATE as usize / 10) {
            let y = lag.next_sample(1.0, 10.0);
            assert!(y >= previous, "lag output went backwards: {previous} -> {y}");
            assert!(y <= 1.0, "lag overshot: {y}");
            previous = y;
        }
        assert!((previous - 1.0).abs() < 1e-3);
    }

    #[test]
    fn reaches_sixty_db_point_after_time_constant() {
        let mut lag = OnePoleLag::new(SAMPLE_RATE);
        let ms = 5.0;
        let samples = (ms * SAMPLE_RATE / 1000.0) as usize;
        let mut y = 0.0;
        for _ in 0..samples {
            y = lag.next_sample(1.0, ms);
        }
        assert!((1.0 - y - 0.001).abs() < 1e-4, "remaining distance {}", 1.0 - y);
    }

    #[test]
    fn non_positive_time_passes_input_through() {
        let mut lag = OnePoleLag::new(SAMPLE_RATE);
        lag.next_sample(0.0, 100.0);
        assert_eq!(lag.next_sample(0.8, 0.0), 0.8);
        assert_eq!(lag.next_sample(-0.3, -5.0), -0.3);
        assert_eq!(lag.next_sample(0.4, f32::NAN), 0.4);
    }

    #[test]
    fn reset_snaps_once() {
        let mut lag = OnePoleLag::new(SAMPLE_RATE);
        lag.next_sample(0.0, 100.0);
        lag.reset();
        assert_eq!(lag.next_sample(1.0, 100.0), 1.0);

        let y = lag.next_sample(0.0, 100.0);
        assert!(y > 0.0 && y < 1.0, "smoothing should resume after the snap");
    }

    #[test]
    fn nan_input_does_not_poison_state() {
        let mut lag = OnePoleLag::new(SAMPLE_RATE);
        lag.next_sample(1.0, 0.0);
        let y = lag.next_sample(f32::NAN, 10.0);
        assert!(y.is_finite());
        assert!(lag.next_sample(1.0, 10.0).is_finite());
    }

    #[test]
    fn sample_rate_change_recomputes_coefficient() {
        let mut lag = OnePoleLag::new(SAMPLE_RATE);
        let at_48k = lag.coefficient(10.0);
        lag.set_sample_rate(SAMPLE_RATE / 2.0);
        let at_24k = lag.coefficient(10.0);
        assert!(at_24k < at_48k, "fewer samples per ms means a faster per-sample decay");
    }
}
