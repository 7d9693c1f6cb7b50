//! F16C half-precision kernels: eight lanes widened with `vcvtph2ps`,
//! computed in f32, narrowed with `vcvtps2ph` (nearest-even).
//!
//! Every non-NaN result is bit-identical to the scalar codec; NaN payloads
//! may differ.

use std::arch::x86_64::*;

use crate::binary16::Half;
use crate::dispatch::HalfOverrides;

const LANES: usize = 8;

#[target_feature(enable = "avx,f16c")]
#[inline]
unsafe fn load8(p: *const Half) -> __m256 {
    _mm256_cvtph_ps(_mm_loadu_si128(p.cast::<__m128i>()))
}

#[target_feature(enable = "avx,f16c")]
#[inline]
unsafe fn store8(p: *mut Half, v: __m256) {
    _mm_storeu_si128(p.cast::<__m128i>(), _mm256_cvtps_ph::<_MM_FROUND_TO_NEAREST_INT>(v))
}

#[target_feature(enable = "avx,f16c")]
pub unsafe fn decode(src: &[Half], out: &mut [f32]) {
    let len = src.len().min(out.len());
    let mut i = 0;
    while i + LANES <= len {
        unsafe { _mm256_storeu_ps(out.as_mut_ptr().add(i), load8(src.as_ptr().add(i))) };
        i += LANES;
    }
    while i < len {
        out[i] = src[i].to_f32();
        i += 1;
    }
}

#[target_feature(enable = "avx,f16c")]
pub unsafe fn encode(src: &[f32], out: &mut [Half]) {
    let len = src.len().min(out.len());
    let mut i = 0;
    while i + LANES <= len {
        unsafe { store8(out.as_mut_ptr().add(i), _mm256_loadu_ps(src.as_ptr().add(i))) };
        i += LANES;
    }
    while i < len {
        out[i] = Half::from_f32(src[i]);
        i += 1;
    }
}

macro_rules! f16c_binary {
    ($name:ident, $intrinsic:ident, $op:tt) => {
        #[target_feature(enable = "avx,f16c")]
        pub unsafe fn $name(a: &[Half], b: &[Half], out: &mut [Half]) {
            let len = a.len().min(b.len()).min(out.len());
            let mut i = 0;
            while i + LANES <= len {
                unsafe {
                    let va = load8(a.as_ptr().add(i));
                    let vb = load8(b.as_ptr().add(i));
                    store8(out.as_mut_ptr().add(i), $intrinsic(va, vb));
                }
                i += LANES;
            }
            while i < len {
                out[i] = Half::from_f32(a[i].to_f32() $op b[i].to_f32());
                i += 1;
            }
        }
    };
}

f16c_binary!(add, _mm256_add_ps, +);
f16c_binary!(sub, _mm256_sub_ps, -);
f16c_binary!(mul, _mm256_mul_ps, *);

#[target_feature(enable = "avx,f16c")]
pub unsafe fn scale(a: &[Half], s: f32, out: &mut [Half]) {
    let len = a.len().min(out.len());
    let vs = _mm256_set1_ps(s);
    let mut i = 0;
    while i + LANES <= len {
        unsafe { store8(out.as_mut_ptr().add(i), _mm256_mul_ps(load8(a.as_ptr().add(i)), vs)) };
        i += LANES;
    }
    while i < len {
        out[i] = Half::from_f32(a[i].to_f32() * s);
        i += 1;
    }
}

#[target_feature(enable = "avx,f16c")]
pub unsafe fn sum(a: &[Half]) -> f32 {
    let mut acc = _mm256_setzero_ps();
    let mut i = 0;
    while i + LANES <= a.len() {
        acc = _mm256_add_ps(acc, unsafe { load8(a.as_ptr().add(i)) });
        i += LANES;
    }
    let mut result = crate::simd_primitive!(avx2, f32, reduce_sum, acc);
    while i < a.len() {
        result += a[i].to_f32();
        i += 1;
    }
    result
}

#[target_feature(enable = "avx,f16c")]
pub unsafe fn dot(a: &[Half], b: &[Half]) -> f32 {
    let len = a.len().min(b.len());
    let mut acc = _mm256_setzero_ps();
    let mut i = 0;
    while i + LANES <= len {
        unsafe {
            let va = load8(a.as_ptr().add(i));
            let vb = load8(b.as_ptr().add(i));
            acc = _mm256_add_ps(acc, _mm256_mul_ps(va, vb));
        }
        i += LANES;
    }
    let mut result = crate::simd_primitive!(avx2, f32, reduce_sum, acc);
    while i < len {
        result += a[i].to_f32() * b[i].to_f32();
        i += 1;
    }
    result
}

/// # Safety
/// The host must support AVX and F16C.
pub(crate) unsafe fn overrides() -> HalfOverrides {
    HalfOverrides {
        decode: Some(|src, out| unsafe { decode(src, out) }),
        encode: Some(|src, out| unsafe { encode(src, out) }),
        add: Some(|a, b, out| unsafe { add(a, b, out) }),
        sub: Some(|a, b, out| unsafe { sub(a, b, out) }),
        mul: Some(|a, b, out| unsafe { mul(a, b, out) }),
        scale: Some(|a, s, out| unsafe { scale(a, s, out) }),
        sum: Some(|a| unsafe { sum(a) }),
        dot: Some(|a, b| unsafe { dot(a, b) }),
    }
}
