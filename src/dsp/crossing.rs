//! Previous-sample state machines for edge and threshold detection.

/*
Edge Detection
==============

All detectors here share one idea: compare the current sample with the one
before it. The only state is that previous sample, and it is overwritten on
every call whether or not an edge fired.

Vocabulary
----------

  last        The previous input sample, carried across blocks.

  startup     Before the first sample there is no "previous". The crossing
              detectors treat the first sample as its own predecessor, which
              can never produce an edge.

  tie-break   What happens to a sample exactly on the threshold.


Threshold Rules
---------------

    up:    x >  t  &&  last <= t
    down:  x <= t  &&  last >  t

Sitting exactly on the threshold counts as "below", so a signal that touches
the threshold and turns back produces nothing, and one that passes through it
produces exactly one edge.

Zero-Crossing Rules
-------------------

    rising:   x > 0  &&  last <= 0
    falling:  x < 0  &&  last >= 0

Exact zero is non-positive for rising and non-negative for falling. A move
-1 → 0 → 1 reports one rising edge (at the 1), not two.

            last    x      rising  falling
            ----    --     ------  -------
             -1      1       ✓
              0      1       ✓
             -1      0
              1     -1               ✓
              0     -1               ✓

Gates
-----

A gate is open while the signal is nonzero. Only an exact 0.0 closes it, so
tiny leftovers from a release tail still count as open. Before the first
sample the gate is considered closed.
*/

/// Result of feeding one sample to a [`ThresholdDetector`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Crossing {
    pub up: bool,
    pub down: bool,
}

/// Detects crossings of a (possibly per-sample) threshold.
#[derive(Debug, Clone, Default)]
pub struct ThresholdDetector {
    last: Option<f32>,
}

impl ThresholdDetector {
    pub fn new() -> Self {
        Self { last: None }
    }

    #[inline]
    pub fn next(&mut self, sample: f32, threshold: f32) -> Crossing {
        let last = self.last.unwrap_or(sample);
        self.last = Some(sample);

        Crossing {
            up: sample > threshold && last <= threshold,
            down: sample <= threshold && last > threshold,
        }
    }

    /// Forget the previous sample; the next one is treated as a fresh start.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn last(&self) -> Option<f32> {
        self.last
    }
}

/// Result of feeding one sample to a [`ZeroCrossDetector`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZeroCrossing {
    pub rising: bool,
    pub falling: bool,
}

impl ZeroCrossing {
    #[inline]
    pub fn either(&self) -> bool {
        self.rising || self.falling
    }
}

#[derive(Debug, Clone, Default)]
pub struct ZeroCrossDetector {
    last: Option<f32>,
}

impl ZeroCrossDetector {
    pub fn new() -> Self {
        Self { last: None }
    }

    #[inline]
    pub fn next(&mut self, sample: f32) -> ZeroCrossing {
        let last = self.last.unwrap_or(sample);
        self.last = Some(sample);

        ZeroCrossing {
            rising: sample > 0.0 && last <= 0.0,
            falling: sample < 0.0 && last >= 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Transition of a gate signal between closed (exactly 0) and open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateTransition {
    Opened,
    Closed,
    Held,
}

#[derive(Debug, Clone, Default)]
pub struct GateDetector {
    last: f32,
}

impl GateDetector {
    pub fn new() -> Self {
        Self { last: 0.0 }
    }

    #[inline]
    pub fn next(&mut self, sample: f32) -> GateTransition {
        let last = self.last;
        self.last = sample;

        if last == 0.0 && sample != 0.0 {
            GateTransition::Opened
        } else if last != 0.0 && sample == 0.0 {
            GateTransition::Closed
        } else {
            GateTransition::Held
        }
    }

    pub fn reset(&mut self) {
        self.last = 0.0;
    }
}
