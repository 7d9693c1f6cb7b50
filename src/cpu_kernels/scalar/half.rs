//! Scalar half-precision kernels: widen to f32, compute, round once.

use crate::binary16::Half;
use crate::dispatch::{HalfKernels, Slot, Tier};

pub(crate) fn table() -> HalfKernels {
    HalfKernels {
        tier: Tier::Scalar,
        decode: Slot::scalar(decode),
        encode: Slot::scalar(encode),
        add: Slot::scalar(add),
        sub: Slot::scalar(sub),
        mul: Slot::scalar(mul),
        scale: Slot::scalar(scale),
        sum: Slot::scalar(sum),
        dot: Slot::scalar(dot),
    }
}

pub fn decode(src: &[Half], out: &mut [f32]) {
    for (o, h) in out.iter_mut().zip(src) {
        *o = h.to_f32();
    }
}

pub fn encode(src: &[f32], out: &mut [Half]) {
    for (o, &v) in out.iter_mut().zip(src) {
        *o = Half::from_f32(v);
    }
}

#[inline]
fn map_binary(a: &[Half], b: &[Half], out: &mut [Half], f: impl Fn(f32, f32) -> f32) {
    for ((o, x), y) in out.iter_mut().zip(a).zip(b) {
        *o = Half::from_f32(f(x.to_f32(), y.to_f32()));
    }
}

pub fn add(a: &[Half], b: &[Half], out: &mut [Half]) {
    map_binary(a, b, out, |x, y| x + y)
}

pub fn sub(a: &[Half], b: &[Half], out: &mut [Half]) {
    map_binary(a, b, out, |x, y| x - y)
}

pub fn mul(a: &[Half], b: &[Half], out: &mut [Half]) {
    map_binary(a, b, out, |x, y| x * y)
}

pub fn scale(a: &[Half], s: f32, out: &mut [Half]) {
    for (o, x) in out.iter_mut().zip(a) {
        *o = Half::from_f32(x.to_f32() * s);
    }
}

pub fn sum(a: &[Half]) -> f32 {
    a.iter().fold(0.0, |acc, x| acc + x.to_f32())
}

pub fn dot(a: &[Half], b: &[Half]) -> f32 {
    a.iter().zip(b).fold(0.0, |acc, (x, y)| acc + x.to_f32() * y.to_f32())
}
