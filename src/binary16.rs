//! IEEE-754 binary16 codec.
//!
//! Bit-exact conversion between the 1/5/10 half-precision layout and
//! binary32 / binary64. Encoding rounds to nearest, ties to even, in every
//! region that drops bits; binary64 is encoded directly so there is exactly
//! one rounding step.
//!
//! ```
//! use dsp_kernels::binary16::{f16_bits_to_f32, f32_to_f16_bits};
//!
//! assert_eq!(f16_bits_to_f32(0x3C00), 1.0);
//! assert_eq!(f32_to_f16_bits(1.5), 0x3E00);
//! ```

use std::fmt;

const SIGN_MASK: u16 = 0x8000;
const EXP_MASK: u16 = 0x7C00;
const MAN_MASK: u16 = 0x03FF;
/// Top mantissa bit; set on encode when a NaN payload would truncate to zero.
const QUIET_BIT: u16 = 0x0200;

const F16_BIAS: i32 = 15;
const F32_BIAS: i32 = 127;
const F64_BIAS: i32 = 1023;
/// Largest biased binary16 exponent of a finite value is 30.
const F16_EXP_INF: i32 = 0x1F;
/// A rebiased exponent below this rounds to zero even as a subnormal.
const F16_EXP_UNDERFLOW: i32 = -10;

/// Category of a binary16 bit pattern. Every pattern is exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HalfClass {
    Zero,
    Subnormal,
    Normal,
    Infinite,
    Nan,
}

/// A binary16 value stored as its raw bit pattern.
///
/// Equality and hashing are bitwise: `+0 != -0` and identical NaN patterns
/// compare equal.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Half(u16);

impl Half {
    pub const ZERO: Half = Half(0x0000);
    pub const NEG_ZERO: Half = Half(0x8000);
    pub const ONE: Half = Half(0x3C00);
    pub const INFINITY: Half = Half(0x7C00);
    pub const NEG_INFINITY: Half = Half(0xFC00);
    pub const NAN: Half = Half(0x7E00);
    /// 65504
    pub const MAX: Half = Half(0x7BFF);
    /// 2^-14
    pub const MIN_POSITIVE: Half = Half(0x0400);
    /// 2^-24
    pub const MIN_POSITIVE_SUBNORMAL: Half = Half(0x0001);
    /// 2^-10
    pub const EPSILON: Half = Half(0x1400);

    #[inline]
    pub const fn from_bits(bits: u16) -> Self {
        Half(bits)
    }

    #[inline]
    pub const fn to_bits(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn from_f32(v: f32) -> Self {
        Half(f32_to_f16_bits(v))
    }

    #[inline]
    pub const fn from_f64(v: f64) -> Self {
        Half(f64_to_f16_bits(v))
    }

    #[inline]
    pub const fn to_f32(self) -> f32 {
        f16_bits_to_f32(self.0)
    }

    #[inline]
    pub const fn to_f64(self) -> f64 {
        f16_bits_to_f64(self.0)
    }

    pub const fn classify(self) -> HalfClass {
        let exp = self.0 & EXP_MASK;
        let man = self.0 & MAN_MASK;
        match (exp, man) {
            (0, 0) => HalfClass::Zero,
            (0, _) => HalfClass::Subnormal,
            (EXP_MASK, 0) => HalfClass::Infinite,
            (EXP_MASK, _) => HalfClass::Nan,
            _ => HalfClass::Normal,
        }
    }

    #[inline]
    pub const fn is_nan(self) -> bool {
        matches!(self.classify(), HalfClass::Nan)
    }

    #[inline]
    pub const fn is_infinite(self) -> bool {
        matches!(self.classify(), HalfClass::Infinite)
    }

    #[inline]
    pub const fn is_finite(self) -> bool {
        self.0 & EXP_MASK != EXP_MASK
    }

    #[inline]
    pub const fn is_sign_negative(self) -> bool {
        self.0 & SIGN_MASK != 0
    }
}

impl fmt::Debug for Half {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Half({:#06x} = {:?})", self.0, self.to_f32())
    }
}

impl fmt::Display for Half {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f32(), f)
    }
}

impl From<Half> for f32 {
    #[inline]
    fn from(h: Half) -> f32 {
        h.to_f32()
    }
}

impl From<Half> for f64 {
    #[inline]
    fn from(h: Half) -> f64 {
        h.to_f64()
    }
}

impl From<half::f16> for Half {
    #[inline]
    fn from(h: half::f16) -> Self {
        Half(h.to_bits())
    }
}

impl From<Half> for half::f16 {
    #[inline]
    fn from(h: Half) -> Self {
        half::f16::from_bits(h.0)
    }
}

// ── Decode ──────────────────────────────────────────────────────────────

/// Decode a binary16 pattern into binary32. Exact for every input.
pub const fn f16_bits_to_f32(h: u16) -> f32 {
    let sign = ((h & SIGN_MASK) as u32) << 16;
    let exp = ((h & EXP_MASK) >> 10) as i32;
    let man = (h & MAN_MASK) as u32;

    let bits = if exp == 0 {
        if man == 0 {
            sign
        } else {
            // Subnormal: shift until the leading bit sits in the implicit-one
            // position, one exponent step per shift.
            let mut m = man;
            let mut e = 1 - F16_BIAS + F32_BIAS;
            while m & 0x0400 == 0 {
                m <<= 1;
                e -= 1;
            }
            sign | ((e as u32) << 23) | ((m & MAN_MASK as u32) << 13)
        }
    } else if exp == F16_EXP_INF {
        // Infinity when man == 0, otherwise NaN with the payload kept.
        sign | 0x7F80_0000 | (man << 13)
    } else {
        sign | (((exp - F16_BIAS + F32_BIAS) as u32) << 23) | (man << 13)
    };
    f32::from_bits(bits)
}

/// Decode a binary16 pattern into binary64. Exact for every input.
pub const fn f16_bits_to_f64(h: u16) -> f64 {
    let sign = ((h & SIGN_MASK) as u64) << 48;
    let exp = ((h & EXP_MASK) >> 10) as i32;
    let man = (h & MAN_MASK) as u64;

    let bits = if exp == 0 {
        if man == 0 {
            sign
        } else {
            let mut m = man;
            let mut e = 1 - F16_BIAS + F64_BIAS;
            while m & 0x0400 == 0 {
                m <<= 1;
                e -= 1;
            }
            sign | ((e as u64) << 52) | ((m & MAN_MASK as u64) << 42)
        }
    } else if exp == F16_EXP_INF {
        sign | 0x7FF0_0000_0000_0000 | (man << 42)
    } else {
        sign | (((exp - F16_BIAS + F64_BIAS) as u64) << 52) | (man << 42)
    };
    f64::from_bits(bits)
}

// ── Encode ──────────────────────────────────────────────────────────────

/// Round-to-nearest-even on a right shift: `kept` is `m >> shift`, the guard
/// bit is the highest dropped bit, and every lower dropped bit is sticky.
#[inline]
const fn round_shift_u32(m: u32, shift: u32) -> u32 {
    let kept = m >> shift;
    let guard = 1u32 << (shift - 1);
    let sticky = m & (guard - 1);
    if m & guard != 0 && (sticky != 0 || kept & 1 != 0) {
        kept + 1
    } else {
        kept
    }
}

#[inline]
const fn round_shift_u64(m: u64, shift: u32) -> u64 {
    let kept = m >> shift;
    let guard = 1u64 << (shift - 1);
    let sticky = m & (guard - 1);
    if m & guard != 0 && (sticky != 0 || kept & 1 != 0) {
        kept + 1
    } else {
        kept
    }
}

#[inline]
const fn nan_payload(truncated: u16) -> u16 {
    if truncated == 0 { QUIET_BIT } else { truncated }
}

/// Encode binary32 to binary16 with round-to-nearest-even.
pub const fn f32_to_f16_bits(v: f32) -> u16 {
    let x = v.to_bits();
    let sign = ((x >> 16) as u16) & SIGN_MASK;
    let exp = ((x >> 23) & 0xFF) as i32;
    let man = x & 0x007F_FFFF;

    if exp == 0xFF {
        if man == 0 {
            return sign | EXP_MASK;
        }
        return sign | EXP_MASK | nan_payload((man >> 13) as u16);
    }

    let half_exp = exp - F32_BIAS + F16_BIAS;
    if half_exp >= F16_EXP_INF {
        return sign | EXP_MASK;
    }
    if half_exp < F16_EXP_UNDERFLOW {
        return sign;
    }
    if half_exp <= 0 {
        // A carry out of the subnormal mantissa lands on the smallest normal.
        let m = man | 0x0080_0000;
        let shift = (14 - half_exp) as u32;
        return sign | round_shift_u32(m, shift) as u16;
    }

    // A mantissa carry propagates into the exponent; 0x7BFF + 1 is infinity.
    let packed = ((half_exp as u32) << 23) | man;
    sign | round_shift_u32(packed, 13) as u16
}

/// Encode binary64 to binary16 with a single round-to-nearest-even step.
pub const fn f64_to_f16_bits(v: f64) -> u16 {
    let x = v.to_bits();
    let sign = ((x >> 48) as u16) & SIGN_MASK;
    let exp = ((x >> 52) & 0x7FF) as i32;
    let man = x & 0x000F_FFFF_FFFF_FFFF;

    if exp == 0x7FF {
        if man == 0 {
            return sign | EXP_MASK;
        }
        return sign | EXP_MASK | nan_payload((man >> 42) as u16);
    }

    let half_exp = exp - F64_BIAS + F16_BIAS;
    if half_exp >= F16_EXP_INF {
        return sign | EXP_MASK;
    }
    if half_exp < F16_EXP_UNDERFLOW {
        return sign;
    }
    if half_exp <= 0 {
        let m = man | 0x0010_0000_0000_0000;
        let shift = (43 - half_exp) as u32;
        return sign | round_shift_u64(m, shift) as u16;
    }

    let packed = ((half_exp as u64) << 52) | man;
    sign | round_shift_u64(packed, 42) as u16
}
