//! Deterministic per-instance pseudo-random generators.

/*
Per-Instance Random Streams
===========================

Every random operator owns its own generator. Nothing is shared, so two
operators never steal values from each other and a seeded operator replays the
exact same stream no matter what else is running.

Vocabulary
----------

  state       Three 32-bit words (s1, s2, s3). Each word runs its own
              Tausworthe shift register; the output is their XOR.

  seed        A 32-bit value mixed into the three initial words. Same seed,
              same stream, bit for bit.

  trand       One step of the recurrence: advances all three words and
              returns the raw 32-bit output.

  frand       trand mapped into [0, 1).
  frand2      trand mapped into [-1, 1).


The Recurrence
--------------

    s1 = ((s1 & !1)  << 12) ^ (((s1 << 13) ^ s1) >> 19)
    s2 = ((s2 & !7)  <<  4) ^ (((s2 <<  2) ^ s2) >> 25)
    s3 = ((s3 & !15) << 17) ^ (((s3 <<  3) ^ s3) >> 11)
    out = s1 ^ s2 ^ s3

Each word must stay above a small floor (2, 8, 16) or its register collapses
to zero and stays there. Seeding falls back to the fixed initial word when the
XOR would land below the floor.


Bits to Float
-------------

Rather than dividing by 2^32, the top 23 output bits are dropped straight into
the mantissa of a float whose exponent is fixed:

    0x3f80_0000 | (out >> 9)   →  [1, 2)   minus 1  →  [0, 1)
    0x4000_0000 | (out >> 9)   →  [2, 4)   minus 3  →  [-1, 1)

The conversion goes through `f32::from_bits`, no unions, no casts of pointers.


Default Seeds
-------------

An operator created without an explicit seed still needs a stream different
from its neighbours. `SeedSource` is an explicit object holding a counter
that advances on every request plus an instance-id allocator; the default
seed mixes both. Tests create their own `SeedSource` and get reproducible
"unseeded" streams; hosts can share `SeedSource::global()`.
*/

use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc, OnceLock,
};

const S1_INIT: u32 = 1_243_598_713;
const S2_INIT: u32 = 3_093_459_404;
const S3_INIT: u32 = 1_821_928_721;

/// Scales a float seed before truncation so nearby seeds land far apart.
const SEED_SCALE: f32 = 1319.0;

/// Thomas Wang's 32-bit integer hash.
#[inline]
fn hash(key: u32) -> u32 {
    let mut h = key;
    h = h.wrapping_add(!(h << 15));
    h ^= h >> 10;
    h = h.wrapping_add(h << 3);
    h ^= h >> 6;
    h = h.wrapping_add(!(h << 11));
    h ^= h >> 16;
    h
}

/// Convert a user-facing float seed into generator seed bits.
///
/// Negative values saturate to 0 and NaN maps to 0; construction rejects
/// both earlier, runtime `seed` messages are clamped here.
#[inline]
pub fn seed_from_float(seed: f32) -> u32 {
    (seed * SEED_SCALE) as u32
}

/// Three-word Tausworthe generator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomState {
    s1: u32,
    s2: u32,
    s3: u32,
}

impl RandomState {
    pub fn from_seed(seed: u32) -> Self {
        let seed = hash(seed);

        let mut s1 = S1_INIT ^ seed;
        if s1 < 2 {
            s1 = S1_INIT;
        }
        let mut s2 = S2_INIT ^ seed;
        if s2 < 8 {
            s2 = S2_INIT;
        }
        let mut s3 = S3_INIT ^ seed;
        if s3 < 16 {
            s3 = S3_INIT;
        }

        Self { s1, s2, s3 }
    }

    /// Advance once and return the raw 32-bit output.
    #[inline]
    pub fn trand(&mut self) -> u32 {
        self.s1 = ((self.s1 & 0xffff_fffe) << 12) ^ (((self.s1 << 13) ^ self.s1) >> 19);
        self.s2 = ((self.s2 & 0xffff_fff8) << 4) ^ (((self.s2 << 2) ^ self.s2) >> 25);
        self.s3 = ((self.s3 & 0xffff_fff0) << 17) ^ (((self.s3 << 3) ^ self.s3) >> 11);
        self.s1 ^ self.s2 ^ self.s3
    }

    /// Uniform in [0, 1).
    #[inline]
    pub fn frand(&mut self) -> f32 {
        f32::from_bits(0x3f80_0000 | (self.trand() >> 9)) - 1.0
    }

    /// Uniform in [-1, 1).
    #[inline]
    pub fn frand2(&mut self) -> f32 {
        f32::from_bits(0x4000_0000 | (self.trand() >> 9)) - 3.0
    }
}

/// Process-wide source of instance ids and default seeds.
#[derive(Debug)]
pub struct SeedSource {
    counter: AtomicU32,
    instances: AtomicU32,
}

impl SeedSource {
    /// Counter value right after construction or `reset`.
    pub const INITIAL_COUNTER: u32 = 1_997_021_223;
    /// Amount the counter advances per default seed handed out.
    const COUNTER_STEP: u32 = 0x9e37_79b9;

    pub const fn new() -> Self {
        Self {
            counter: AtomicU32::new(Self::INITIAL_COUNTER),
            instances: AtomicU32::new(0),
        }
    }

    /// Shared instance for hosts that want one seed space per process.
    pub fn global() -> Arc<SeedSource> {
        static GLOBAL: OnceLock<Arc<SeedSource>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(SeedSource::new())).clone()
    }

    /// Ids start at 1 and never repeat until `reset`.
    pub fn next_instance_id(&self) -> u32 {
        self.instances.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
    }

    /// Advance the counter and mix it with the caller's instance id.
    pub fn next_default_seed(&self, instance_id: u32) -> u32 {
        let tick = self
            .counter
            .fetch_add(Self::COUNTER_STEP, Ordering::Relaxed);
        tick ^ hash(instance_id)
    }

    pub fn reset(&self) {
        self.counter.store(Self::INITIAL_COUNTER, Ordering::Relaxed);
        self.instances.store(0, Ordering::Relaxed);
    }
}

impl Default for SeedSource {
    fn default() -> Self {
        Self::new()
    }
}

/// A generator bound to its instance id and seed source, so it can be
/// reseeded at runtime with or without an explicit seed.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    state: RandomState,
    instance_id: u32,
    seeds: Arc<SeedSource>,
}

impl SeededRandom {
    pub fn new(seeds: Arc<SeedSource>, seed: Option<f32>) -> Self {
        let instance_id = seeds.next_instance_id();
        let mut rng = Self {
            state: RandomState::from_seed(0),
            instance_id,
            seeds,
        };
        rng.reseed(seed);
        rng
    }

    /// `Some(n)` restarts the stream for seed `n`; `None` draws a fresh
    /// default seed.
    pub fn reseed(&mut self, seed: Option<f32>) {
        let bits = match seed {
            Some(seed) => seed_from_float(seed),
            None => self.seeds.next_default_seed(self.instance_id),
        };
        self.state = RandomState::from_seed(bits);
    }

    pub fn instance_id(&self) -> u32 {
        self.instance_id
    }

    #[inline]
    pub fn trand(&mut self) -> u32 {
        self.state.trand()
    }

    #[inline]
    pub fn frand(&mut self) -> f32 {
        self.state.frand()
    }

    #[inline]
    pub fn frand2(&mut self) -> f32 {
        self.state.frand2()
    }
}
