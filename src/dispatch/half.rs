//! Half-precision kernel table.
//!
//! Storage is binary16; arithmetic runs in f32 and is rounded once on the
//! way back.

use std::sync::OnceLock;

use crate::binary16::Half;
use crate::contract::{self, effective_len};
use crate::cpu_kernels;
use crate::error::{DispatchError, DispatchResult};

use super::capabilities::Capabilities;
use super::table::{define_kernel_table, select};
use super::tier::Tier;

define_kernel_table! {
    /// Dispatch slots for `Half` sequences.
    pub struct HalfKernels / HalfOverrides {
        decode: fn(&[Half], &mut [f32]),
        encode: fn(&[f32], &mut [Half]),
        add: fn(&[Half], &[Half], &mut [Half]),
        sub: fn(&[Half], &[Half], &mut [Half]),
        mul: fn(&[Half], &[Half], &mut [Half]),
        scale: fn(&[Half], f32, &mut [Half]),
        sum: fn(&[Half]) -> f32,
        dot: fn(&[Half], &[Half]) -> f32,
    }
}

static HALF_KERNELS: OnceLock<HalfKernels> = OnceLock::new();

impl HalfKernels {
    /// The process-wide table, built on first use.
    pub fn get() -> &'static Self {
        HALF_KERNELS.get_or_init(|| Self::with_capabilities(super::capabilities(), super::ceiling()))
    }

    /// Build a table capped at `tier`. Fails if the host cannot run it.
    pub fn for_tier(tier: Tier) -> DispatchResult<Self> {
        let host = super::capabilities();
        if !tier.is_supported(host) {
            return Err(DispatchError::TierUnavailable { tier, host: host.summary() });
        }
        Ok(Self::with_capabilities(host, tier))
    }

    /// Build a table as if the host had `caps` (narrowed to the real host),
    /// capped at `ceiling`.
    pub fn with_capabilities(caps: &Capabilities, ceiling: Tier) -> Self {
        let caps = caps.intersect(*super::capabilities());
        select(
            "half",
            &caps,
            ceiling,
            cpu_kernels::scalar::half::table(),
            // SAFETY: see `RealKernels::with_capabilities`.
            |tier, caps| unsafe { cpu_kernels::half_overrides(tier, caps) },
        )
    }

    /// Widen every element to f32.
    #[inline]
    pub fn decode(&self, src: &[Half], out: &mut [f32]) {
        let n = effective_len!(src, out);
        (self.decode.call)(&src[..n], &mut out[..n])
    }

    /// Round every element to binary16, nearest-even.
    ///
    /// Non-NaN results are bit-identical at every tier. NaN stays NaN with
    /// its sign, but the F16C tier sets the quiet bit on signaling inputs
    /// while scalar truncates the payload as is, so NaN bit patterns may
    /// differ by tier. The same holds for the arithmetic slots.
    #[inline]
    pub fn encode(&self, src: &[f32], out: &mut [Half]) {
        let n = effective_len!(src, out);
        (self.encode.call)(&src[..n], &mut out[..n])
    }

    #[inline]
    pub fn add(&self, a: &[Half], b: &[Half], out: &mut [Half]) {
        let n = effective_len!(a, b, out);
        (self.add.call)(&a[..n], &b[..n], &mut out[..n])
    }

    #[inline]
    pub fn sub(&self, a: &[Half], b: &[Half], out: &mut [Half]) {
        let n = effective_len!(a, b, out);
        (self.sub.call)(&a[..n], &b[..n], &mut out[..n])
    }

    #[inline]
    pub fn mul(&self, a: &[Half], b: &[Half], out: &mut [Half]) {
        let n = effective_len!(a, b, out);
        (self.mul.call)(&a[..n], &b[..n], &mut out[..n])
    }

    /// `out[i] = a[i] * s`, rounded once.
    #[inline]
    pub fn scale(&self, a: &[Half], s: f32, out: &mut [Half]) {
        let n = effective_len!(a, out);
        (self.scale.call)(&a[..n], s, &mut out[..n])
    }

    /// Sum accumulated in f32.
    #[inline]
    pub fn sum(&self, a: &[Half]) -> f32 {
        (self.sum.call)(a)
    }

    /// Dot product accumulated in f32.
    #[inline]
    pub fn dot(&self, a: &[Half], b: &[Half]) -> f32 {
        let n = effective_len!(a, b);
        (self.dot.call)(&a[..n], &b[..n])
    }

    /// # Panics
    /// If `offset + src.len()` exceeds `dst.len()`.
    #[track_caller]
    pub fn copy_at(&self, dst: &mut [Half], src: &[Half], offset: usize) {
        let range = contract::offset_range(dst.len(), src.len(), offset);
        dst[range].copy_from_slice(src);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_half_arithmetic_rounds_once() {
        let t = HalfKernels::with_capabilities(&Capabilities::none(), Tier::Scalar);
        let a = [Half::ONE, Half::from_f32(2.0), Half::from_f32(65504.0)];
        let b = [Half::from_f32(0.5), Half::from_f32(2.0), Half::from_f32(65504.0)];
        let mut out = [Half::ZERO; 3];
        t.add(&a, &b, &mut out);
        assert_eq!(out[0].to_f32(), 1.5);
        assert_eq!(out[1].to_f32(), 4.0);
        assert!(out[2].is_infinite(), "overflow saturates to inf");

        t.mul(&a, &b, &mut out);
        assert_eq!(out[0].to_f32(), 0.5);

        assert_eq!(t.dot(&a[..2], &b[..2]), 4.5);
        assert_eq!(t.sum(&a[..2]), 3.0);
    }

    #[test]
    fn nan_stays_nan_at_every_tier() {
        let caps = *crate::dispatch::capabilities();
        let src = [f32::from_bits(0x7F80_2001), f32::from_bits(0xFFC0_0000), 1.0, f32::NAN];
        let h = [Half::from_bits(0x7C01), Half::from_bits(0xFE00), Half::ONE, Half::NAN];
        for tier in Tier::ASCENDING {
            let t = HalfKernels::with_capabilities(&caps, tier);
            let mut enc = [Half::ZERO; 4];
            t.encode(&src, &mut enc);
            assert!(enc[0].is_nan() && !enc[0].is_sign_negative(), "{tier}");
            assert!(enc[1].is_nan() && enc[1].is_sign_negative(), "{tier}");
            assert_eq!(enc[2], Half::ONE);

            let mut out = [Half::ZERO; 4];
            t.add(&h, &[Half::ONE; 4], &mut out);
            assert!(out[0].is_nan() && out[1].is_nan() && out[3].is_nan(), "{tier}");
            assert_eq!(out[2], Half::from_f32(2.0));
        }
    }

    #[test]
    fn decode_encode_slices() {
        let t = HalfKernels::with_capabilities(&Capabilities::none(), Tier::Scalar);
        let src = [1.0f32, -2.5, 0.0, 1e-8];
        let mut h = [Half::NAN; 4];
        t.encode(&src, &mut h);
        assert_eq!(h[0].to_bits(), 0x3C00);
        assert_eq!(h[3].to_bits(), 0x0000);
        let mut back = [0.0f32; 4];
        t.decode(&h, &mut back);
        assert_eq!(&back[..3], &src[..3]);
    }
}
