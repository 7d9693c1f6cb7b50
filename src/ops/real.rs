//! Real-domain (`f32`, `f64`) operations.

use crate::dispatch::RealKernels;
use crate::traits::Real;

use super::forward_generic;

forward_generic! { RealKernels;
    /// `out[i] = a[i] + b[i]`
    fn add(a: &[T], b: &[T], out: &mut [T]);
    /// `out[i] = a[i] - b[i]`
    fn sub(a: &[T], b: &[T], out: &mut [T]);
    /// `out[i] = a[i] * b[i]`
    fn mul(a: &[T], b: &[T], out: &mut [T]);
    /// `out[i] = a[i] / b[i]`
    fn div(a: &[T], b: &[T], out: &mut [T]);
    /// `dst[i] += src[i]`
    fn add_assign(dst: &mut [T], src: &[T]);
    /// `y[i] += alpha * x[i]`
    fn axpy(alpha: T, x: &[T], y: &mut [T]);
    fn scale(a: &[T], s: T, out: &mut [T]);
    fn add_scalar(a: &[T], s: T, out: &mut [T]);
    /// `out[i] = a[i] * b[i] + c[i]`
    fn mul_add(a: &[T], b: &[T], c: &[T], out: &mut [T]);
    fn abs(a: &[T], out: &mut [T]);
    fn neg(a: &[T], out: &mut [T]);
    fn sqrt(a: &[T], out: &mut [T]);
    /// Clamp into `[lo, hi]`; NaN comes out as `hi`.
    fn clamp(a: &[T], lo: T, hi: T, out: &mut [T]);
    fn relu(a: &[T], out: &mut [T]);
    fn exp(a: &[T], out: &mut [T]);
    fn sigmoid(a: &[T], out: &mut [T]);
    fn tanh(a: &[T], out: &mut [T]);

    fn sum(a: &[T]) -> T;
    fn sum_squares(a: &[T]) -> T;
    /// Zero for empty input.
    fn mean(a: &[T]) -> T;
    /// Population variance; zero for empty input.
    fn variance(a: &[T]) -> T;
    /// Smallest non-NaN element, `+inf` if none.
    fn min(a: &[T]) -> T;
    /// Largest non-NaN element, `-inf` if none.
    fn max(a: &[T]) -> T;
    /// Index of the first smallest non-NaN element.
    fn min_index(a: &[T]) -> Option<usize>;
    /// Index of the first largest non-NaN element.
    fn max_index(a: &[T]) -> Option<usize>;
    /// Inclusive prefix sum; returns the total.
    fn cumulative_sum(a: &[T], out: &mut [T]) -> T;
    fn dot(a: &[T], b: &[T]) -> T;
    fn sq_euclidean(a: &[T], b: &[T]) -> T;
    fn euclidean_distance(a: &[T], b: &[T]) -> T;
    /// `sum hist[i] * (a[i] + x*(b[i] + x*(c[i] + x*d[i])))`
    fn cubic_interp_dot(hist: &[T], a: &[T], b: &[T], c: &[T], d: &[T], x: T) -> T;

    /// Scale to unit L2 norm; inputs with norm below `1e-10` are copied.
    fn normalize(a: &[T], out: &mut [T]);
    /// Valid-mode convolution: `out[i] = sum_k kernel[k] * signal[i + K - 1 - k]`.
    fn convolve_valid(signal: &[T], kernel: &[T], out: &mut [T]);
    /// `convolve_valid` for several kernels over one signal.
    fn convolve_valid_multi(signal: &[T], kernels: &[&[T]], outs: &mut [&mut [T]]);
    /// `out[r] = dot(shared, rows[r])`
    fn dot_batch(shared: &[T], rows: &[&[T]], out: &mut [T]);
    /// Overlap-add `src` into `dst[offset..]`.
    #[track_caller]
    fn add_at(dst: &mut [T], src: &[T], offset: usize);
    #[track_caller]
    fn copy_at(dst: &mut [T], src: &[T], offset: usize);
}
