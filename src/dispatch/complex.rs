//! Complex-domain (`Complex<f32>`, `Complex<f64>`) kernel table.

use num_complex::Complex;

use crate::contract::{self, effective_len};
use crate::cpu_kernels::scalar;
use crate::error::{DispatchError, DispatchResult};
use crate::traits::Real;

use super::capabilities::Capabilities;
use super::table::{define_kernel_table, select};
use super::tier::Tier;

define_kernel_table! {
    /// Dispatch slots for `Complex<T>`.
    pub struct ComplexKernels<T> / ComplexOverrides {
        add: fn(&[Complex<T>], &[Complex<T>], &mut [Complex<T>]),
        sub: fn(&[Complex<T>], &[Complex<T>], &mut [Complex<T>]),
        mul: fn(&[Complex<T>], &[Complex<T>], &mut [Complex<T>]),
        mul_conj: fn(&[Complex<T>], &[Complex<T>], &mut [Complex<T>]),
        scale: fn(&[Complex<T>], Complex<T>, &mut [Complex<T>]),
        scale_real: fn(&[Complex<T>], T, &mut [Complex<T>]),
        add_assign: fn(&mut [Complex<T>], &[Complex<T>]),
        conj: fn(&[Complex<T>], &mut [Complex<T>]),
        abs: fn(&[Complex<T>], &mut [T]),
        abs_sq: fn(&[Complex<T>], &mut [T]),
        sum: fn(&[Complex<T>]) -> Complex<T>,
        sum_abs_sq: fn(&[Complex<T>]) -> T,
        dot: fn(&[Complex<T>], &[Complex<T>]) -> Complex<T>,
        dotc: fn(&[Complex<T>], &[Complex<T>]) -> Complex<T>,
        sq_euclidean: fn(&[Complex<T>], &[Complex<T>]) -> T,
    }
}

impl<T: Real> ComplexKernels<T> {
    /// The process-wide table, built on first use.
    pub fn get() -> &'static Self {
        T::complex_kernels()
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
            &format!("complex<{}>", T::NAME),
            &caps,
            ceiling,
            scalar::complex::table::<T>(),
            // SAFETY: see `RealKernels::with_capabilities`.
            |tier, caps| unsafe { T::complex_overrides(tier, caps) },
        )
    }

    #[inline]
    pub fn add(&self, a: &[Complex<T>], b: &[Complex<T>], out: &mut [Complex<T>]) {
        let n = effective_len!(a, b, out);
        (self.add.call)(&a[..n], &b[..n], &mut out[..n])
    }

    #[inline]
    pub fn sub(&self, a: &[Complex<T>], b: &[Complex<T>], out: &mut [Complex<T>]) {
        let n = effective_len!(a, b, out);
        (self.sub.call)(&a[..n], &b[..n], &mut out[..n])
    }

    /// Complex product `a[i] * b[i]`.
    #[inline]
    pub fn mul(&self, a: &[Complex<T>], b: &[Complex<T>], out: &mut [Complex<T>]) {
        let n = effective_len!(a, b, out);
        (self.mul.call)(&a[..n], &b[..n], &mut out[..n])
    }

    /// `a[i] * conj(b[i])`, the cross-spectrum product.
    #[inline]
    pub fn mul_conj(&self, a: &[Complex<T>], b: &[Complex<T>], out: &mut [Complex<T>]) {
        let n = effective_len!(a, b, out);
        (self.mul_conj.call)(&a[..n], &b[..n], &mut out[..n])
    }

    #[inline]
    pub fn scale(&self, a: &[Complex<T>], s: Complex<T>, out: &mut [Complex<T>]) {
        let n = effective_len!(a, out);
        (self.scale.call)(&a[..n], s, &mut out[..n])
    }

    #[inline]
    pub fn scale_real(&self, a: &[Complex<T>], s: T, out: &mut [Complex<T>]) {
        let n = effective_len!(a, out);
        (self.scale_real.call)(&a[..n], s, &mut out[..n])
    }

    #[inline]
    pub fn add_assign(&self, dst: &mut [Complex<T>], src: &[Complex<T>]) {
        let n = effective_len!(dst, src);
        (self.add_assign.call)(&mut dst[..n], &src[..n])
    }

    #[inline]
    pub fn conj(&self, a: &[Complex<T>], out: &mut [Complex<T>]) {
        let n = effective_len!(a, out);
        (self.conj.call)(&a[..n], &mut out[..n])
    }

    /// Magnitude `|a[i]|` into a real output.
    #[inline]
    pub fn abs(&self, a: &[Complex<T>], out: &mut [T]) {
        let n = effective_len!(a, out);
        (self.abs.call)(&a[..n], &mut out[..n])
    }

    /// Squared magnitude `re² + im²` into a real output.
    #[inline]
    pub fn abs_sq(&self, a: &[Complex<T>], out: &mut [T]) {
        let n = effective_len!(a, out);
        (self.abs_sq.call)(&a[..n], &mut out[..n])
    }

    #[inline]
    pub fn sum(&self, a: &[Complex<T>]) -> Complex<T> {
        (self.sum.call)(a)
    }

    /// `sum |a[i]|²`
    #[inline]
    pub fn sum_abs_sq(&self, a: &[Complex<T>]) -> T {
        (self.sum_abs_sq.call)(a)
    }

    /// Unconjugated dot product `sum a[i] * b[i]`.
    #[inline]
    pub fn dot(&self, a: &[Complex<T>], b: &[Complex<T>]) -> Complex<T> {
        let n = effective_len!(a, b);
        (self.dot.call)(&a[..n], &b[..n])
    }

    /// Conjugated dot product `sum conj(a[i]) * b[i]`.
    #[inline]
    pub fn dotc(&self, a: &[Complex<T>], b: &[Complex<T>]) -> Complex<T> {
        let n = effective_len!(a, b);
        (self.dotc.call)(&a[..n], &b[..n])
    }

    #[inline]
    pub fn sq_euclidean(&self, a: &[Complex<T>], b: &[Complex<T>]) -> T {
        let n = effective_len!(a, b);
        (self.sq_euclidean.call)(&a[..n], &b[..n])
    }

    pub fn euclidean_distance(&self, a: &[Complex<T>], b: &[Complex<T>]) -> T {
        self.sq_euclidean(a, b).sqrt()
    }

    /// Scale to unit norm; below a norm of 1e-10 the input is copied through.
    pub fn normalize(&self, a: &[Complex<T>], out: &mut [Complex<T>]) {
        let n = effective_len!(a, out);
        let (a, out) = (&a[..n], &mut out[..n]);
        let norm = self.sum_abs_sq(a).sqrt();
        if norm < T::NORM_THRESHOLD {
            out.copy_from_slice(a);
        } else {
            self.scale_real(a, norm.recip(), out);
        }
    }

    /// Overlap-add `src` into `dst` starting at `offset`.
    ///
    /// # Panics
    /// If `offset + src.len()` exceeds `dst.len()`.
    #[track_caller]
    pub fn add_at(&self, dst: &mut [Complex<T>], src: &[Complex<T>], offset: usize) {
        let range = contract::offset_range(dst.len(), src.len(), offset);
        self.add_assign(&mut dst[range], src);
    }

    /// # Panics
    /// If `offset + src.len()` exceeds `dst.len()`.
    #[track_caller]
    pub fn copy_at(&self, dst: &mut [Complex<T>], src: &[Complex<T>], offset: usize) {
        let range = contract::offset_range(dst.len(), src.len(), offset);
        dst[range].copy_from_slice(src);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_products() {
        let t = ComplexKernels::<f64>::with_capabilities(&Capabilities::none(), Tier::Scalar);
        let a = [Complex::new(1.0, 2.0), Complex::new(0.0, 1.0)];
        let b = [Complex::new(3.0, -1.0), Complex::new(0.0, 1.0)];
        let mut out = [Complex::new(0.0, 0.0); 2];

        t.mul(&a, &b, &mut out);
        assert_eq!(out, [Complex::new(5.0, 5.0), Complex::new(-1.0, 0.0)]);

        t.mul_conj(&a, &b, &mut out);
        assert_eq!(out, [Complex::new(1.0, 7.0), Complex::new(1.0, 0.0)]);

        assert_eq!(t.dot(&a, &b), Complex::new(4.0, 5.0));
        assert_eq!(t.dotc(&a, &b), Complex::new(2.0, -7.0));
    }

    #[test]
    fn normalize_uses_complex_norm() {
        let t = ComplexKernels::<f32>::with_capabilities(&Capabilities::none(), Tier::Scalar);
        let a = [Complex::new(3.0f32, 0.0), Complex::new(0.0, 4.0)];
        let mut out = [Complex::new(0.0f32, 0.0); 2];
        t.normalize(&a, &mut out);
        assert!((out[0].re - 0.6).abs() < 1e-6);
        assert!((out[1].im - 0.8).abs() < 1e-6);

        let tiny = [Complex::new(1e-12f32, 0.0)];
        let mut out = [Complex::new(9.0f32, 9.0)];
        t.normalize(&tiny, &mut out);
        assert_eq!(out, tiny);
    }

    #[test]
    fn abs_writes_real_output() {
        let t = ComplexKernels::<f32>::with_capabilities(&Capabilities::none(), Tier::Scalar);
        let a = [Complex::new(3.0f32, 4.0), Complex::new(-5.0, 12.0)];
        let mut mag = [0.0f32; 3];
        t.abs(&a, &mut mag);
        assert_eq!(mag, [5.0, 13.0, 0.0]);
        t.abs_sq(&a, &mut mag);
        assert_eq!(&mag[..2], &[25.0, 169.0]);
    }
}
