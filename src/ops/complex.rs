//! Complex-domain (`Complex<f32>`, `Complex<f64>`) operations.

use num_complex::Complex;

use crate::dispatch::ComplexKernels;
use crate::traits::Real;

use super::forward_generic;

forward_generic! { ComplexKernels;
    fn add(a: &[Complex<T>], b: &[Complex<T>], out: &mut [Complex<T>]);
    fn sub(a: &[Complex<T>], b: &[Complex<T>], out: &mut [Complex<T>]);
    fn mul(a: &[Complex<T>], b: &[Complex<T>], out: &mut [Complex<T>]);
    /// `out[i] = a[i] * conj(b[i])`
    fn mul_conj(a: &[Complex<T>], b: &[Complex<T>], out: &mut [Complex<T>]);
    fn scale(a: &[Complex<T>], s: Complex<T>, out: &mut [Complex<T>]);
    fn scale_real(a: &[Complex<T>], s: T, out: &mut [Complex<T>]);
    fn add_assign(dst: &mut [Complex<T>], src: &[Complex<T>]);
    fn conj(a: &[Complex<T>], out: &mut [Complex<T>]);
    /// Magnitudes into a real buffer.
    fn abs(a: &[Complex<T>], out: &mut [T]);
    /// Squared magnitudes into a real buffer.
    fn abs_sq(a: &[Complex<T>], out: &mut [T]);
    fn sum(a: &[Complex<T>]) -> Complex<T>;
    fn sum_abs_sq(a: &[Complex<T>]) -> T;
    /// Unconjugated: `sum a[i] * b[i]`.
    fn dot(a: &[Complex<T>], b: &[Complex<T>]) -> Complex<T>;
    /// `sum conj(a[i]) * b[i]`
    fn dotc(a: &[Complex<T>], b: &[Complex<T>]) -> Complex<T>;
    fn sq_euclidean(a: &[Complex<T>], b: &[Complex<T>]) -> T;
    fn euclidean_distance(a: &[Complex<T>], b: &[Complex<T>]) -> T;
    /// Scale to unit norm; inputs with norm below `1e-10` are copied.
    fn normalize(a: &[Complex<T>], out: &mut [Complex<T>]);
    #[track_caller]
    fn add_at(dst: &mut [Complex<T>], src: &[Complex<T>], offset: usize);
    #[track_caller]
    fn copy_at(dst: &mut [Complex<T>], src: &[Complex<T>], offset: usize);
}
