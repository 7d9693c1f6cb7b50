//! Scalar reference kernels for the real domains.
//!
//! Every vector tier is tested against these. Inputs arrive already trimmed
//! to the effective length, but each loop still zips so a kernel never
//! indexes past its shortest argument.

use crate::dispatch::{RealKernels, Slot, Tier};
use crate::traits::Element;

pub(crate) fn table<T: Element>() -> RealKernels<T> {
    RealKernels {
        tier: Tier::Scalar,
        add: Slot::scalar(add::<T>),
        sub: Slot::scalar(sub::<T>),
        mul: Slot::scalar(mul::<T>),
        div: Slot::scalar(div::<T>),
        add_assign: Slot::scalar(add_assign::<T>),
        axpy: Slot::scalar(axpy::<T>),
        scale: Slot::scalar(scale::<T>),
        add_scalar: Slot::scalar(add_scalar::<T>),
        mul_add: Slot::scalar(mul_add::<T>),
        abs: Slot::scalar(abs::<T>),
        neg: Slot::scalar(neg::<T>),
        sqrt: Slot::scalar(sqrt::<T>),
        clamp: Slot::scalar(clamp::<T>),
        relu: Slot::scalar(relu::<T>),
        exp: Slot::scalar(exp::<T>),
        sigmoid: Slot::scalar(sigmoid::<T>),
        tanh: Slot::scalar(tanh::<T>),
        sum: Slot::scalar(sum::<T>),
        sum_squares: Slot::scalar(sum_squares::<T>),
        min: Slot::scalar(min::<T>),
        max: Slot::scalar(max::<T>),
        dot: Slot::scalar(dot::<T>),
        sq_euclidean: Slot::scalar(sq_euclidean::<T>),
        min_index: Slot::scalar(min_index::<T>),
        max_index: Slot::scalar(max_index::<T>),
        variance: Slot::scalar(variance::<T>),
        cumulative_sum: Slot::scalar(cumulative_sum::<T>),
        cubic_interp_dot: Slot::scalar(cubic_interp_dot::<T>),
    }
}

#[inline]
fn map_binary<T: Element>(a: &[T], b: &[T], out: &mut [T], f: impl Fn(T, T) -> T) {
    for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
        *o = f(x, y);
    }
}

#[inline]
fn map_unary<T: Element>(a: &[T], out: &mut [T], f: impl Fn(T) -> T) {
    for (o, &x) in out.iter_mut().zip(a) {
        *o = f(x);
    }
}

pub fn add<T: Element>(a: &[T], b: &[T], out: &mut [T]) {
    map_binary(a, b, out, |x, y| x + y)
}

pub fn sub<T: Element>(a: &[T], b: &[T], out: &mut [T]) {
    map_binary(a, b, out, |x, y| x - y)
}

pub fn mul<T: Element>(a: &[T], b: &[T], out: &mut [T]) {
    map_binary(a, b, out, |x, y| x * y)
}

pub fn div<T: Element>(a: &[T], b: &[T], out: &mut [T]) {
    map_binary(a, b, out, |x, y| x / y)
}

pub fn add_assign<T: Element>(dst: &mut [T], src: &[T]) {
    for (d, &s) in dst.iter_mut().zip(src) {
        *d += s;
    }
}

pub fn axpy<T: Element>(alpha: T, x: &[T], y: &mut [T]) {
    for (yi, &xi) in y.iter_mut().zip(x) {
        *yi = alpha * xi + *yi;
    }
}

pub fn scale<T: Element>(a: &[T], s: T, out: &mut [T]) {
    map_unary(a, out, |x| x * s)
}

pub fn add_scalar<T: Element>(a: &[T], s: T, out: &mut [T]) {
    map_unary(a, out, |x| x + s)
}

pub fn mul_add<T: Element>(a: &[T], b: &[T], c: &[T], out: &mut [T]) {
    for (((o, &x), &y), &z) in out.iter_mut().zip(a).zip(b).zip(c) {
        *o = x * y + z;
    }
}

pub fn abs<T: Element>(a: &[T], out: &mut [T]) {
    map_unary(a, out, T::abs)
}

pub fn neg<T: Element>(a: &[T], out: &mut [T]) {
    map_unary(a, out, |x| -x)
}

pub fn sqrt<T: Element>(a: &[T], out: &mut [T]) {
    map_unary(a, out, T::sqrt)
}

/// `min(max(x, lo), hi)` evaluated as `max(min(x, hi), lo)`; NaN becomes `hi`.
pub fn clamp<T: Element>(a: &[T], lo: T, hi: T, out: &mut [T]) {
    map_unary(a, out, |x| {
        let capped = if x < hi { x } else { hi };
        if capped > lo { capped } else { lo }
    })
}

pub fn relu<T: Element>(a: &[T], out: &mut [T]) {
    map_unary(a, out, |x| if x > T::ZERO { x } else { T::ZERO })
}

pub fn exp<T: Element>(a: &[T], out: &mut [T]) {
    map_unary(a, out, T::exp)
}

pub fn sigmoid<T: Element>(a: &[T], out: &mut [T]) {
    map_unary(a, out, |x| T::ONE / (T::ONE + (-x).exp()))
}

pub fn tanh<T: Element>(a: &[T], out: &mut [T]) {
    map_unary(a, out, T::tanh)
}

pub fn sum<T: Element>(a: &[T]) -> T {
    a.iter().fold(T::ZERO, |acc, &x| acc + x)
}

pub fn sum_squares<T: Element>(a: &[T]) -> T {
    a.iter().fold(T::ZERO, |acc, &x| acc + x * x)
}

/// Smallest non-NaN element; `+inf` if there is none.
pub fn min<T: Element>(a: &[T]) -> T {
    a.iter().fold(T::INFINITY, |acc, &x| if x < acc { x } else { acc })
}

/// Largest non-NaN element; `-inf` if there is none.
pub fn max<T: Element>(a: &[T]) -> T {
    a.iter().fold(T::NEG_INFINITY, |acc, &x| if x > acc { x } else { acc })
}

pub fn dot<T: Element>(a: &[T], b: &[T]) -> T {
    a.iter().zip(b).fold(T::ZERO, |acc, (&x, &y)| acc + x * y)
}

pub fn sq_euclidean<T: Element>(a: &[T], b: &[T]) -> T {
    a.iter().zip(b).fold(T::ZERO, |acc, (&x, &y)| {
        let d = x - y;
        acc + d * d
    })
}

/// Index of the first smallest non-NaN element.
pub fn min_index<T: Element>(a: &[T]) -> Option<usize> {
    extreme_index(a, |x, best| x < best)
}

/// Index of the first largest non-NaN element.
pub fn max_index<T: Element>(a: &[T]) -> Option<usize> {
    extreme_index(a, |x, best| x > best)
}

fn extreme_index<T: Element>(a: &[T], better: impl Fn(T, T) -> bool) -> Option<usize> {
    let mut best: Option<(usize, T)> = None;
    for (i, &x) in a.iter().enumerate() {
        if x.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if !better(x, b) => {}
            _ => best = Some((i, x)),
        }
    }
    best.map(|(i, _)| i)
}

/// Population variance, two-pass around the mean. Zero for empty input.
pub fn variance<T: Element>(a: &[T]) -> T {
    if a.is_empty() {
        return T::ZERO;
    }
    let n = T::from_usize(a.len());
    let mean = sum(a) / n;
    let ss = a.iter().fold(T::ZERO, |acc, &x| {
        let d = x - mean;
        acc + d * d
    });
    ss / n
}

/// Inclusive prefix sum into `out`; returns the total.
pub fn cumulative_sum<T: Element>(a: &[T], out: &mut [T]) -> T {
    let mut running = T::ZERO;
    for (o, &x) in out.iter_mut().zip(a) {
        running += x;
        *o = running;
    }
    running
}

/// `sum hist[i] * (a[i] + x*(b[i] + x*(c[i] + x*d[i])))`
pub fn cubic_interp_dot<T: Element>(hist: &[T], a: &[T], b: &[T], c: &[T], d: &[T], x: T) -> T {
    let mut acc = T::ZERO;
    for ((((&h, &ai), &bi), &ci), &di) in hist.iter().zip(a).zip(b).zip(c).zip(d) {
        let p = ((di * x + ci) * x + bi) * x + ai;
        acc += h * p;
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_reductions_skip_nan_and_keep_first() {
        let a = [f32::NAN, 3.0, -1.0, 7.0, -1.0, 7.0];
        assert_eq!(min_index(&a), Some(2));
        assert_eq!(max_index(&a), Some(3));
        assert_eq!(min_index::<f32>(&[]), None);
        assert_eq!(max_index(&[f64::NAN, f64::NAN]), None);
    }

    #[test]
    fn min_max_skip_nan() {
        let a = [f64::NAN, 2.0, -5.0];
        assert_eq!(min(&a), -5.0);
        assert_eq!(max(&a), 2.0);
        assert_eq!(min::<f32>(&[]), f32::INFINITY);
        assert_eq!(max::<f32>(&[]), f32::NEG_INFINITY);
    }

    #[test]
    fn variance_is_population() {
        assert_eq!(variance(&[2.0f64, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), 4.0);
        assert_eq!(variance::<f32>(&[]), 0.0);
    }

    #[test]
    fn cumulative_sum_returns_total() {
        let mut out = [0.0f32; 4];
        let total = cumulative_sum(&[1.0, 2.0, 3.0, 4.0], &mut out);
        assert_eq!(out, [1.0, 3.0, 6.0, 10.0]);
        assert_eq!(total, 10.0);
    }

    #[test]
    fn clamp_and_relu_map_nan() {
        let mut out = [0.0f32; 3];
        clamp(&[f32::NAN, -9.0, 9.0], -1.0, 1.0, &mut out);
        assert_eq!(out, [1.0, -1.0, 1.0]);
        relu(&[f32::NAN, -2.0, 2.0], &mut out);
        assert_eq!(out, [0.0, 0.0, 2.0]);
    }

    #[test]
    fn cubic_interp_dot_evaluates_horner() {
        // p(x) = 1 + 2x + 3x^2 + 4x^3 at x = 2 -> 49
        let v = cubic_interp_dot(&[2.0f64], &[1.0], &[2.0], &[3.0], &[4.0], 2.0);
        assert_eq!(v, 98.0);
    }
}
