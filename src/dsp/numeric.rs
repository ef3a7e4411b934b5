//! Bit-level classification and sanitizing of `f32` samples.

/*
Numeric Edge Cases
==================

Upstream operators can hand us garbage: a division by zero turns into Inf, an
Inf minus an Inf turns into NaN, and a slowly decaying feedback loop drifts
into denormal territory where many CPUs fall off a performance cliff. Any of
these, once stored in an operator's carried state, poisons every block that
follows.

Vocabulary
----------

  sign        bit 31
  exponent    bits 23..=30 (8 bits)
  mantissa    bits 0..=22 (23 bits)

    31 30      23 22                    0
    ┌─┬──────────┬───────────────────────┐
    │s│ exponent │       mantissa        │
    └─┴──────────┴───────────────────────┘

  NaN         exponent all ones, mantissa != 0
  Infinity    exponent all ones, mantissa == 0 (either sign)
  denormal    exponent all zeros (subnormals, and ±0.0 which sits in the same
              bucket and sanitizes to the same +0.0)


Classification reads the raw bit pattern through `f32::to_bits`, so the
answer does not depend on float optimisation settings.
*/

const EXPONENT_MASK: u32 = 0x7f80_0000;
const MANTISSA_MASK: u32 = 0x007f_ffff;

/// Raw IEEE-754 bit pattern of a sample.
#[inline]
pub fn to_bits(f: f32) -> u32 {
    f.to_bits()
}

/// Sample with the given IEEE-754 bit pattern.
#[inline]
pub fn from_bits(bits: u32) -> f32 {
    f32::from_bits(bits)
}

/// Exponent all ones, mantissa nonzero.
#[inline]
pub fn is_nan(f: f32) -> bool {
    let bits = to_bits(f);
    bits & EXPONENT_MASK == EXPONENT_MASK && bits & MANTISSA_MASK != 0
}

/// Exponent all ones, mantissa zero. Either sign.
#[inline]
pub fn is_infinite(f: f32) -> bool {
    let bits = to_bits(f);
    bits & EXPONENT_MASK == EXPONENT_MASK && bits & MANTISSA_MASK == 0
}

/// Exponent all zeros: subnormal magnitudes, and both zeros.
#[inline]
pub fn is_denormal(f: f32) -> bool {
    to_bits(f) & EXPONENT_MASK == 0
}

/// Replace NaN, Infinity and denormal values with `0.0`; pass everything else.
#[inline]
pub fn sanitize(f: f32) -> f32 {
    let exponent = to_bits(f) & EXPONENT_MASK;
    if exponent == 0 || exponent == EXPONENT_MASK {
        0.0
    } else {
        f
    }
}

/// Sanitize a whole buffer in place.
pub fn sanitize_buffer(buffer: &mut [f32]) {
    for sample in buffer.iter_mut() {
        *sample = sanitize(*sample);
    }
}
