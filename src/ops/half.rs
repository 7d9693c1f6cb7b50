//! Half-precision (`Half`) operations. Arithmetic is carried out in f32
//! and rounded once to binary16.

use crate::binary16::Half;
use crate::dispatch::HalfKernels;

/// Widen to f32.
#[inline]
pub fn decode(src: &[Half], out: &mut [f32]) {
    HalfKernels::get().decode(src, out)
}

/// Round to binary16, nearest-even.
#[inline]
pub fn encode(src: &[f32], out: &mut [Half]) {
    HalfKernels::get().encode(src, out)
}

#[inline]
pub fn add(a: &[Half], b: &[Half], out: &mut [Half]) {
    HalfKernels::get().add(a, b, out)
}

#[inline]
pub fn sub(a: &[Half], b: &[Half], out: &mut [Half]) {
    HalfKernels::get().sub(a, b, out)
}

#[inline]
pub fn mul(a: &[Half], b: &[Half], out: &mut [Half]) {
    HalfKernels::get().mul(a, b, out)
}

#[inline]
pub fn scale(a: &[Half], s: f32, out: &mut [Half]) {
    HalfKernels::get().scale(a, s, out)
}

/// Sum accumulated in f32.
#[inline]
pub fn sum(a: &[Half]) -> f32 {
    HalfKernels::get().sum(a)
}

/// Dot product accumulated in f32.
#[inline]
pub fn dot(a: &[Half], b: &[Half]) -> f32 {
    HalfKernels::get().dot(a, b)
}

#[track_caller]
#[inline]
pub fn copy_at(dst: &mut [Half], src: &[Half], offset: usize) {
    HalfKernels::get().copy_at(dst, src, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_then_scale() {
        let mut h = [Half::ZERO; 3];
        encode(&[1.0, 2.0, -0.5], &mut h);
        let mut out = [Half::ZERO; 3];
        scale(&h, 2.0, &mut out);
        let mut back = [0.0f32; 3];
        decode(&out, &mut back);
        assert_eq!(back, [2.0, 4.0, -1.0]);
        assert_eq!(sum(&h), 2.5);
    }
}
