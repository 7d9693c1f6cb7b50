//! Scalar reference kernels for the complex domains.
//!
//! Written out on `re`/`im` so the operand order matches the interleaved
//! vector kernels exactly.

use num_complex::Complex;

use crate::dispatch::{ComplexKernels, Slot, Tier};
use crate::traits::Element;

pub(crate) fn table<T: Element>() -> ComplexKernels<T> {
    ComplexKernels {
        tier: Tier::Scalar,
        add: Slot::scalar(add::<T>),
        sub: Slot::scalar(sub::<T>),
        mul: Slot::scalar(mul::<T>),
        mul_conj: Slot::scalar(mul_conj::<T>),
        scale: Slot::scalar(scale::<T>),
        scale_real: Slot::scalar(scale_real::<T>),
        add_assign: Slot::scalar(add_assign::<T>),
        conj: Slot::scalar(conj::<T>),
        abs: Slot::scalar(abs::<T>),
        abs_sq: Slot::scalar(abs_sq::<T>),
        sum: Slot::scalar(sum::<T>),
        sum_abs_sq: Slot::scalar(sum_abs_sq::<T>),
        dot: Slot::scalar(dot::<T>),
        dotc: Slot::scalar(dotc::<T>),
        sq_euclidean: Slot::scalar(sq_euclidean::<T>),
    }
}

#[inline(always)]
fn cmul<T: Element>(x: Complex<T>, y: Complex<T>) -> Complex<T> {
    Complex::new(x.re * y.re - x.im * y.im, x.re * y.im + x.im * y.re)
}

/// `x * conj(y)`
#[inline(always)]
fn cmul_conj<T: Element>(x: Complex<T>, y: Complex<T>) -> Complex<T> {
    Complex::new(x.re * y.re + x.im * y.im, x.im * y.re - x.re * y.im)
}

#[inline(always)]
fn norm_sq<T: Element>(x: Complex<T>) -> T {
    x.re * x.re + x.im * x.im
}

pub fn add<T: Element>(a: &[Complex<T>], b: &[Complex<T>], out: &mut [Complex<T>]) {
    for ((o, x), y) in out.iter_mut().zip(a).zip(b) {
        *o = Complex::new(x.re + y.re, x.im + y.im);
    }
}

pub fn sub<T: Element>(a: &[Complex<T>], b: &[Complex<T>], out: &mut [Complex<T>]) {
    for ((o, x), y) in out.iter_mut().zip(a).zip(b) {
        *o = Complex::new(x.re - y.re, x.im - y.im);
    }
}

pub fn mul<T: Element>(a: &[Complex<T>], b: &[Complex<T>], out: &mut [Complex<T>]) {
    for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
        *o = cmul(x, y);
    }
}

pub fn mul_conj<T: Element>(a: &[Complex<T>], b: &[Complex<T>], out: &mut [Complex<T>]) {
    for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
        *o = cmul_conj(x, y);
    }
}

pub fn scale<T: Element>(a: &[Complex<T>], s: Complex<T>, out: &mut [Complex<T>]) {
    for (o, &x) in out.iter_mut().zip(a) {
        *o = cmul(x, s);
    }
}

pub fn scale_real<T: Element>(a: &[Complex<T>], s: T, out: &mut [Complex<T>]) {
    for (o, x) in out.iter_mut().zip(a) {
        *o = Complex::new(x.re * s, x.im * s);
    }
}

pub fn add_assign<T: Element>(dst: &mut [Complex<T>], src: &[Complex<T>]) {
    for (d, s) in dst.iter_mut().zip(src) {
        d.re += s.re;
        d.im += s.im;
    }
}

pub fn conj<T: Element>(a: &[Complex<T>], out: &mut [Complex<T>]) {
    for (o, x) in out.iter_mut().zip(a) {
        *o = Complex::new(x.re, -x.im);
    }
}

pub fn abs<T: Element>(a: &[Complex<T>], out: &mut [T]) {
    for (o, &x) in out.iter_mut().zip(a) {
        *o = norm_sq(x).sqrt();
    }
}

pub fn abs_sq<T: Element>(a: &[Complex<T>], out: &mut [T]) {
    for (o, &x) in out.iter_mut().zip(a) {
        *o = norm_sq(x);
    }
}

pub fn sum<T: Element>(a: &[Complex<T>]) -> Complex<T> {
    a.iter().fold(Complex::new(T::ZERO, T::ZERO), |acc, x| Complex::new(acc.re + x.re, acc.im + x.im))
}

pub fn sum_abs_sq<T: Element>(a: &[Complex<T>]) -> T {
    a.iter().fold(T::ZERO, |acc, &x| acc + norm_sq(x))
}

/// `sum a[i] * b[i]`, unconjugated.
pub fn dot<T: Element>(a: &[Complex<T>], b: &[Complex<T>]) -> Complex<T> {
    a.iter().zip(b).fold(Complex::new(T::ZERO, T::ZERO), |acc, (&x, &y)| {
        let p = cmul(x, y);
        Complex::new(acc.re + p.re, acc.im + p.im)
    })
}

/// `sum conj(a[i]) * b[i]`
pub fn dotc<T: Element>(a: &[Complex<T>], b: &[Complex<T>]) -> Complex<T> {
    a.iter().zip(b).fold(Complex::new(T::ZERO, T::ZERO), |acc, (&x, &y)| {
        let p = cmul_conj(y, x);
        Complex::new(acc.re + p.re, acc.im + p.im)
    })
}

pub fn sq_euclidean<T: Element>(a: &[Complex<T>], b: &[Complex<T>]) -> T {
    a.iter().zip(b).fold(T::ZERO, |acc, (x, y)| {
        let d = Complex::new(x.re - y.re, x.im - y.im);
        acc + norm_sq(d)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conjugate_products() {
        let a = [Complex::new(1.0f64, 2.0)];
        let b = [Complex::new(3.0f64, -1.0)];
        let mut out = [Complex::new(0.0, 0.0)];
        mul(&a, &b, &mut out);
        assert_eq!(out[0], Complex::new(5.0, 5.0));
        mul_conj(&a, &b, &mut out);
        assert_eq!(out[0], Complex::new(1.0, 7.0));
        assert_eq!(dotc(&a, &b), Complex::new(1.0, -7.0));
    }

    #[test]
    fn magnitudes() {
        let a = [Complex::new(3.0f32, -4.0), Complex::new(0.0, 0.0)];
        let mut out = [0.0f32; 2];
        abs(&a, &mut out);
        assert_eq!(out, [5.0, 0.0]);
        abs_sq(&a, &mut out);
        assert_eq!(out, [25.0, 0.0]);
        assert_eq!(sum_abs_sq(&a), 25.0);
    }
}
