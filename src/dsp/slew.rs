//! Two-sided slew-rate limiter.

use crate::dsp::numeric::sanitize;

/*
Slew Limiting
=============

A slew limiter caps how far the output may move in a single sample. Rising
and falling moves have separate limits, which is how you build envelopes
with a quick attack and a slow release out of a plain gate.

    delta = x[n] - last
    delta = clamp(delta, -down_limit, +up_limit)
    last  = last + delta

Rates are given per unit of time and scaled to per-sample limits by
multiplying with 1/sr. A rate of 0 freezes that direction; a negative rate
turns limiting off on that side, so the output snaps to the input.

Input is sanitized so one NaN cannot freeze `last` forever.
*/

#[derive(Debug, Clone)]
pub struct SlewLimiter {
    last: f32,
    sr_recip: f32,
}

impl SlewLimiter {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            last: 0.0,
            sr_recip: 1.0 / sample_rate,
        }
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sr_recip = 1.0 / sample_rate;
    }

    #[inline]
    pub fn next_sample(&mut self, input: f32, up_rate: f32, down_rate: f32) -> f32 {
        let input = sanitize(input);
        let delta = input - self.last;

        self.last = if delta > 0.0 {
            if up_rate < 0.0 {
                input
            } else {
                self.last + delta.min(up_rate * self.sr_recip)
            }
        } else if delta < 0.0 {
            if down_rate < 0.0 {
                input
            } else {
                self.last + delta.max(-down_rate * self.sr_recip)
            }
        } else {
            input
        };

        self.last
    }

    pub fn render(&mut self, buffer: &mut [f32], up_rate: f32, down_rate: f32) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample, up_rate, down_rate);
        }
    }

    /// Jump the output to `value` without slewing.
    pub fn set(&mut self, value: f32) {
        self.last = sanitize(value);
    }

    pub fn value(&self) -> f32 {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 1_000.0;

    #[test]
    fn rising_moves_are_limited() {
        let mut slew = SlewLimiter::new(SAMPLE_RATE);
        // 100 units per second at 1 kHz = 0.1 per sample
        let out: Vec<f32> = (0..4).map(|_| slew.next_sample(1.0, 100.0, -1.0)).collect();
        for (i, &y) in out.iter().enumerate() {
            let expected = 0.1 * (i + 1) as f32;
            assert!((y - expected).abs() < 1e-6, "sample {i}: expected {expected}, got {y}");
        }
    }

    #[test]
    fn up_and_down_limits_are_independent() {
        let mut slew = SlewLimiter::new(SAMPLE_RATE);
        assert_eq!(slew.next_sample(1.0, -1.0, 100.0), 1.0, "negative up rate disables limiting");

        let y = slew.next_sample(0.0, -1.0, 100.0);
        assert!((y - 0.9).abs() < 1e-6, "falling move should be limited, got {y}");
    }

    #[test]
    fn zero_rate_freezes_direction() {
        let mut slew = SlewLimiter::new(SAMPLE_RATE);
        slew.set(0.5);
        assert_eq!(slew.next_sample(1.0, 0.0, 0.0), 0.5);
        assert_eq!(slew.next_sample(0.0, 0.0, 0.0), 0.5);
    }

    #[test]
    fn equal_input_holds() {
        let mut slew = SlewLimiter::new(SAMPLE_RATE);
        slew.set(0.25);
        assert_eq!(slew.next_sample(0.25, 1.0, 1.0), 0.25);
    }

    #[test]
    fn nan_input_is_treated_as_zero() {
        let mut slew = SlewLimiter::new(SAMPLE_RATE);
        slew.set(0.05);
        let y = slew.next_sample(f32::NAN, 100.0, 100.0);
        assert_eq!(y, 0.0);
    }
}
