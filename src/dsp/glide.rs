//! Two-sided linear glide with an optional curve exponent.

/*
Glide (Portamento)
==================

Where the lag approaches a target forever, a glide arrives: every time the
input changes, the output travels from where it is to the new value in a
fixed number of samples, then sits there.

    n      = round(ms * sr / 1000) + 1       samples for the move
    step   = (n - remaining) / n             goes 1/n, 2/n, ... 1
    out    = start + shape(step) * delta

Rising moves use the up time, falling moves the down time. A time of 0 gives
n = 1, so the first step is already 1 and the move is instant.

Curves
------

The exponent bends the ramp. |exp| == 1 is linear. For a positive exponent
rising moves use step^exp and falling moves 1 - (1 - step)^exp; a negative
exponent swaps the two.

Input is not sanitized. A NaN poisons the output until the move it started
finishes, then the output lands on the input again.

Very long times saturate at u32::MAX samples, which at any audio rate is
longer than a session.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone)]
pub struct Glide {
    last_in: f32,
    last_out: f32,
    start: f32,
    delta: f32,
    remaining: u32,
    direction: Direction,
    snap_next: bool,
    exponent: f32,
    sr_khz: f32,
}

impl Glide {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            last_in: 0.0,
            last_out: 0.0,
            start: 0.0,
            delta: 0.0,
            remaining: 0,
            direction: Direction::Down,
            snap_next: false,
            exponent: 1.0,
            sr_khz: sample_rate * 0.001,
        }
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sr_khz = sample_rate * 0.001;
    }

    pub fn set_exponent(&mut self, exponent: f32) {
        self.exponent = exponent;
    }

    /// Make the next processed sample jump straight to its input.
    pub fn reset(&mut self) {
        self.snap_next = true;
    }

    #[inline]
    fn samples_for(&self, ms: f32) -> u32 {
        // float-to-int casts saturate, inf included
        ((ms.max(0.0) * self.sr_khz).round() as u32).saturating_add(1)
    }

    #[inline]
    fn shape(&self, total: u32, remaining: u32) -> f32 {
        let step = (total - remaining) as f32 / total as f32;
        if self.exponent.abs() == 1.0 {
            return step;
        }

        let rising = self.delta > 0.0;
        let (exponent, curve_in) = if self.exponent >= 0.0 {
            (self.exponent, rising)
        } else {
            (-self.exponent, !rising)
        };

        if curve_in {
            step.powf(exponent)
        } else {
            1.0 - (1.0 - step).powf(exponent)
        }
    }

    #[inline]
    pub fn next_sample(&mut self, input: f32, ms_up: f32, ms_down: f32) -> f32 {
        let n_up = self.samples_for(ms_up);
        let n_down = self.samples_for(ms_down);

        if self.snap_next {
            self.snap_next = false;
            self.remaining = 0;
            self.last_in = input;
            self.last_out = input;
            return input;
        }

        if input != self.last_in {
            self.start = self.last_out;
            self.delta = input - self.last_out;
            self.direction = if self.delta > 0.0 {
                Direction::Up
            } else {
                Direction::Down
            };
            let total = match self.direction {
                Direction::Up => n_up,
                Direction::Down => n_down,
            };
            self.remaining = total - 1;
            self.last_out += self.shape(total, self.remaining) * self.delta;
            self.last_in = input;
            return self.last_out;
        }

        if self.remaining > 0 {
            let total = match self.direction {
                Direction::Up => n_up,
                Direction::Down => n_down,
            };
            self.remaining -= 1;
            // A shorter time arriving mid-glide can leave `remaining` past
            // the new total; finish the move in that case.
            if self.remaining >= total {
                self.remaining = 0;
                self.last_out = input;
            } else {
                self.last_out = self.start + self.shape(total, self.remaining) * self.delta;
            }
        } else {
            self.last_out = input;
        }

        self.last_out
    }

    pub fn render(&mut self, buffer: &mut [f32], ms_up: f32, ms_down: f32) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample, ms_up, ms_down);
        }
    }

    pub fn value(&self) -> f32 {
        self.last_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 1_000.0;

    #[test]
    fn rising_move_is_linear_and_arrives() {
        let mut glide = Glide::new(SAMPLE_RATE);
        // 3 ms at 1 kHz = 3 samples, plus one = 4 steps
        let out: Vec<f32> = (0..6).map(|_| glide.next_sample(1.0, 3.0, 0.0)).collect();
        assert_eq!(out, [0.25, 0.5, 0.75, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn falling_move_uses_down_time() {
        let mut glide = Glide::new(SAMPLE_RATE);
        glide.next_sample(1.0, 0.0, 1.0);
        assert_eq!(glide.value(), 1.0, "zero up time is instant");

        let out: Vec<f32> = (0..3).map(|_| glide.next_sample(0.0, 0.0, 1.0)).collect();
        assert_eq!(out, [0.5, 0.0, 0.0]);
    }

    #[test]
    fn reset_snaps_to_input() {
        let mut glide = Glide::new(SAMPLE_RATE);
        glide.next_sample(1.0, 100.0, 100.0);
        glide.reset();
        assert_eq!(glide.next_sample(0.3, 100.0, 100.0), 0.3);
        assert_eq!(glide.next_sample(0.3, 100.0, 100.0), 0.3);
    }

    #[test]
    fn exponent_bends_rising_ramp_below_linear() {
        let mut linear = Glide::new(SAMPLE_RATE);
        let mut curved = Glide::new(SAMPLE_RATE);
        curved.set_exponent(2.0);

        let l = linear.next_sample(1.0, 3.0, 3.0);
        let c = curved.next_sample(1.0, 3.0, 3.0);
        assert!(c < l, "step^2 should lag a linear ramp ({c} vs {l})");
    }

    #[test]
    fn negative_time_is_instant() {
        let mut glide = Glide::new(SAMPLE_RATE);
        assert_eq!(glide.next_sample(0.7, -20.0, -20.0), 0.7);
    }

    #[test]
    fn huge_times_saturate_instead_of_overflowing() {
        let mut glide = Glide::new(48_000.0);
        let first = glide.next_sample(1.0, 1.0e8, 1.0e8);
        assert!(first > 0.0 && first < 1.0e-6, "got {first}");

        let mut glide = Glide::new(48_000.0);
        let first = glide.next_sample(1.0, f32::INFINITY, 0.0);
        assert!(first > 0.0 && first < 1.0e-6, "got {first}");
        assert!(glide.next_sample(1.0, f32::INFINITY, 0.0) > first);

        // zero down time still lands at once
        assert_eq!(glide.next_sample(0.0, f32::INFINITY, 0.0), 0.0);
    }

    #[test]
    fn nan_input_passes_through_until_the_move_ends() {
        let mut glide = Glide::new(SAMPLE_RATE);
        assert!(glide.next_sample(f32::NAN, 0.0, 0.0).is_nan());
        assert!(glide.next_sample(0.5, 0.0, 0.0).is_nan());
        assert_eq!(glide.next_sample(0.5, 0.0, 0.0), 0.5);
    }
}
