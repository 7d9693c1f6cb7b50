//! Real-domain (f32, f64) kernel table.

use crate::contract::{self, effective_len};
use crate::cpu_kernels::scalar;
use crate::error::{DispatchError, DispatchResult};
use crate::traits::Real;

use super::capabilities::Capabilities;
use super::table::{define_kernel_table, select};
use super::tier::Tier;

define_kernel_table! {
    /// Dispatch slots for one real element type.
    ///
    /// Every public method applies the effective-length rule before calling
    /// the bound kernel, so kernels only ever see equal-length slices.
    pub struct RealKernels<T> / RealOverrides {
        add: fn(&[T], &[T], &mut [T]),
        sub: fn(&[T], &[T], &mut [T]),
        mul: fn(&[T], &[T], &mut [T]),
        div: fn(&[T], &[T], &mut [T]),
        add_assign: fn(&mut [T], &[T]),
        axpy: fn(T, &[T], &mut [T]),
        scale: fn(&[T], T, &mut [T]),
        add_scalar: fn(&[T], T, &mut [T]),
        mul_add: fn(&[T], &[T], &[T], &mut [T]),
        abs: fn(&[T], &mut [T]),
        neg: fn(&[T], &mut [T]),
        sqrt: fn(&[T], &mut [T]),
        clamp: fn(&[T], T, T, &mut [T]),
        relu: fn(&[T], &mut [T]),
        exp: fn(&[T], &mut [T]),
        sigmoid: fn(&[T], &mut [T]),
        tanh: fn(&[T], &mut [T]),
        sum: fn(&[T]) -> T,
        sum_squares: fn(&[T]) -> T,
        min: fn(&[T]) -> T,
        max: fn(&[T]) -> T,
        dot: fn(&[T], &[T]) -> T,
        sq_euclidean: fn(&[T], &[T]) -> T,
        min_index: fn(&[T]) -> Option<usize>,
        max_index: fn(&[T]) -> Option<usize>,
        variance: fn(&[T]) -> T,
        cumulative_sum: fn(&[T], &mut [T]) -> T,
        cubic_interp_dot: fn(&[T], &[T], &[T], &[T], &[T], T) -> T,
    }
}

impl<T: Real> RealKernels<T> {
    /// The process-wide table, built on first use.
    pub fn get() -> &'static Self {
        T::real_kernels()
    }

    /// Build a table capped at `tier`. Fails if the host cannot run it.
    pub fn for_tier(tier: Tier) -> DispatchResult<Self> {
        let host = super::capabilities();
        if !tier.is_supported(host) {
            return Err(DispatchError::TierUnavailable { tier, host: host.summary() });
        }
        Ok(Self::with_capabilities(host, tier))
    }

    /// Build a table as if the host had `caps`, capped at `ceiling`.
    ///
    /// Features the real host lacks are ignored, so a synthetic table can
    /// only narrow the selection.
    pub fn with_capabilities(caps: &Capabilities, ceiling: Tier) -> Self {
        let caps = caps.intersect(*super::capabilities());
        select(
            &format!("real<{}>", T::NAME),
            &caps,
            ceiling,
            scalar::real::table::<T>(),
            // SAFETY: `select` only asks for tiers supported by `caps`, and
            // `caps` is a subset of the running host.
            |tier, caps| unsafe { T::real_overrides(tier, caps) },
        )
    }

    // ── element-wise ────────────────────────────────────────────────────

    /// `out[i] = a[i] + b[i]`
    #[inline]
    pub fn add(&self, a: &[T], b: &[T], out: &mut [T]) {
        let n = effective_len!(a, b, out);
        (self.add.call)(&a[..n], &b[..n], &mut out[..n])
    }

    /// `out[i] = a[i] - b[i]`
    #[inline]
    pub fn sub(&self, a: &[T], b: &[T], out: &mut [T]) {
        let n = effective_len!(a, b, out);
        (self.sub.call)(&a[..n], &b[..n], &mut out[..n])
    }

    /// `out[i] = a[i] * b[i]`
    #[inline]
    pub fn mul(&self, a: &[T], b: &[T], out: &mut [T]) {
        let n = effective_len!(a, b, out);
        (self.mul.call)(&a[..n], &b[..n], &mut out[..n])
    }

    /// `out[i] = a[i] / b[i]`, IEEE division (x/0 is ±inf or NaN).
    #[inline]
    pub fn div(&self, a: &[T], b: &[T], out: &mut [T]) {
        let n = effective_len!(a, b, out);
        (self.div.call)(&a[..n], &b[..n], &mut out[..n])
    }

    /// `dst[i] += src[i]`
    #[inline]
    pub fn add_assign(&self, dst: &mut [T], src: &[T]) {
        let n = effective_len!(dst, src);
        (self.add_assign.call)(&mut dst[..n], &src[..n])
    }

    /// `y[i] += alpha * x[i]`
    #[inline]
    pub fn axpy(&self, alpha: T, x: &[T], y: &mut [T]) {
        let n = effective_len!(x, y);
        (self.axpy.call)(alpha, &x[..n], &mut y[..n])
    }

    /// `out[i] = a[i] * s`
    #[inline]
    pub fn scale(&self, a: &[T], s: T, out: &mut [T]) {
        let n = effective_len!(a, out);
        (self.scale.call)(&a[..n], s, &mut out[..n])
    }

    /// `out[i] = a[i] + s`
    #[inline]
    pub fn add_scalar(&self, a: &[T], s: T, out: &mut [T]) {
        let n = effective_len!(a, out);
        (self.add_scalar.call)(&a[..n], s, &mut out[..n])
    }

    /// `out[i] = a[i] * b[i] + c[i]`, fused on tiers with FMA.
    #[inline]
    pub fn mul_add(&self, a: &[T], b: &[T], c: &[T], out: &mut [T]) {
        let n = effective_len!(a, b, c, out);
        (self.mul_add.call)(&a[..n], &b[..n], &c[..n], &mut out[..n])
    }

    #[inline]
    pub fn abs(&self, a: &[T], out: &mut [T]) {
        let n = effective_len!(a, out);
        (self.abs.call)(&a[..n], &mut out[..n])
    }

    #[inline]
    pub fn neg(&self, a: &[T], out: &mut [T]) {
        let n = effective_len!(a, out);
        (self.neg.call)(&a[..n], &mut out[..n])
    }

    #[inline]
    pub fn sqrt(&self, a: &[T], out: &mut [T]) {
        let n = effective_len!(a, out);
        (self.sqrt.call)(&a[..n], &mut out[..n])
    }

    /// Clamp into `[lo, hi]`. NaN elements come out as `hi`.
    #[inline]
    pub fn clamp(&self, a: &[T], lo: T, hi: T, out: &mut [T]) {
        let n = effective_len!(a, out);
        (self.clamp.call)(&a[..n], lo, hi, &mut out[..n])
    }

    /// `max(a[i], 0)`; NaN maps to zero.
    #[inline]
    pub fn relu(&self, a: &[T], out: &mut [T]) {
        let n = effective_len!(a, out);
        (self.relu.call)(&a[..n], &mut out[..n])
    }

    #[inline]
    pub fn exp(&self, a: &[T], out: &mut [T]) {
        let n = effective_len!(a, out);
        (self.exp.call)(&a[..n], &mut out[..n])
    }

    /// `1 / (1 + exp(-a[i]))`
    #[inline]
    pub fn sigmoid(&self, a: &[T], out: &mut [T]) {
        let n = effective_len!(a, out);
        (self.sigmoid.call)(&a[..n], &mut out[..n])
    }

    #[inline]
    pub fn tanh(&self, a: &[T], out: &mut [T]) {
        let n = effective_len!(a, out);
        (self.tanh.call)(&a[..n], &mut out[..n])
    }

    // ── reductions ──────────────────────────────────────────────────────

    /// Sum of all elements; `0` when empty.
    #[inline]
    pub fn sum(&self, a: &[T]) -> T {
        (self.sum.call)(a)
    }

    #[inline]
    pub fn sum_squares(&self, a: &[T]) -> T {
        (self.sum_squares.call)(a)
    }

    /// Smallest non-NaN element; `+inf` when empty.
    ///
    /// When the extreme is zero and the slice holds both `0.0` and `-0.0`,
    /// the sign of the result depends on lane order and may differ by tier.
    #[inline]
    pub fn min(&self, a: &[T]) -> T {
        (self.min.call)(a)
    }

    /// Largest non-NaN element; `-inf` when empty.
    ///
    /// When the extreme is zero and the slice holds both `0.0` and `-0.0`,
    /// the sign of the result depends on lane order and may differ by tier.
    #[inline]
    pub fn max(&self, a: &[T]) -> T {
        (self.max.call)(a)
    }

    /// Arithmetic mean; `0` when empty.
    pub fn mean(&self, a: &[T]) -> T {
        if a.is_empty() {
            return T::ZERO;
        }
        self.sum(a) / T::from_usize(a.len())
    }

    /// Population variance; `0` when empty.
    #[inline]
    pub fn variance(&self, a: &[T]) -> T {
        (self.variance.call)(a)
    }

    /// Index of the first smallest element, skipping NaN. `None` when the
    /// input is empty or all NaN.
    #[inline]
    pub fn min_index(&self, a: &[T]) -> Option<usize> {
        (self.min_index.call)(a)
    }

    /// Index of the first largest element, skipping NaN.
    #[inline]
    pub fn max_index(&self, a: &[T]) -> Option<usize> {
        (self.max_index.call)(a)
    }

    /// Running sum into `out`; returns the total over the effective length.
    #[inline]
    pub fn cumulative_sum(&self, a: &[T], out: &mut [T]) -> T {
        let n = effective_len!(a, out);
        (self.cumulative_sum.call)(&a[..n], &mut out[..n])
    }

    #[inline]
    pub fn dot(&self, a: &[T], b: &[T]) -> T {
        let n = effective_len!(a, b);
        (self.dot.call)(&a[..n], &b[..n])
    }

    /// Squared Euclidean distance.
    #[inline]
    pub fn sq_euclidean(&self, a: &[T], b: &[T]) -> T {
        let n = effective_len!(a, b);
        (self.sq_euclidean.call)(&a[..n], &b[..n])
    }

    pub fn euclidean_distance(&self, a: &[T], b: &[T]) -> T {
        self.sq_euclidean(a, b).sqrt()
    }

    /// `sum(hist[i] * (a[i] + x*(b[i] + x*(c[i] + x*d[i]))))`: one cubic
    /// polynomial per bin, evaluated at `x` and weighted.
    #[inline]
    pub fn cubic_interp_dot(&self, hist: &[T], a: &[T], b: &[T], c: &[T], d: &[T], x: T) -> T {
        let n = effective_len!(hist, a, b, c, d);
        (self.cubic_interp_dot.call)(&hist[..n], &a[..n], &b[..n], &c[..n], &d[..n], x)
    }

    // ── composites ──────────────────────────────────────────────────────

    /// Scale `a` to unit Euclidean norm. Below a norm of 1e-10 the input is
    /// copied through unscaled.
    pub fn normalize(&self, a: &[T], out: &mut [T]) {
        let n = effective_len!(a, out);
        let (a, out) = (&a[..n], &mut out[..n]);
        let norm = self.sum_squares(a).sqrt();
        if norm < T::NORM_THRESHOLD {
            out.copy_from_slice(a);
        } else {
            self.scale(a, norm.recip(), out);
        }
    }

    /// Valid-mode convolution: `out[i] = sum_k kernel[k] * signal[i + K-1-k]`
    /// for every `i` where the kernel fits entirely inside the signal.
    ///
    /// Writes `min(out.len(), signal.len() - kernel.len() + 1)` outputs.
    pub fn convolve_valid(&self, signal: &[T], kernel: &[T], out: &mut [T]) {
        let n = contract::valid_len(signal.len(), kernel.len()).min(out.len());
        let out = &mut out[..n];
        out.fill(T::ZERO);
        self.accumulate_taps(signal, kernel, 0, out);
    }

    /// Convolve one signal with several kernels.
    ///
    /// Pairs `kernels[j]` with `outs[j]` up to the shorter list. Work is
    /// blocked over the output so the signal stays in cache across kernels;
    /// every output is bit-identical to a separate `convolve_valid` call.
    pub fn convolve_valid_multi(&self, signal: &[T], kernels: &[&[T]], outs: &mut [&mut [T]]) {
        let valid = |kernel_len: usize, out_len: usize| {
            contract::valid_len(signal.len(), kernel_len).min(out_len)
        };
        let mut longest = 0;
        for (kernel, out) in kernels.iter().zip(outs.iter_mut()) {
            let n = valid(kernel.len(), out.len());
            out[..n].fill(T::ZERO);
            longest = longest.max(n);
        }
        let mut start = 0;
        while start < longest {
            let stop = (start + contract::CONV_BLOCK).min(longest);
            for (kernel, out) in kernels.iter().zip(outs.iter_mut()) {
                let n = valid(kernel.len(), out.len());
                if start < n {
                    let end = stop.min(n);
                    self.accumulate_taps(signal, kernel, start, &mut out[start..end]);
                }
            }
            start = stop;
        }
    }

    /// Add every tap's contribution to `block`, which holds outputs
    /// `first..first + block.len()`.
    fn accumulate_taps(&self, signal: &[T], kernel: &[T], first: usize, block: &mut [T]) {
        // A kernel longer than the signal puts `lo` past the end.
        if block.is_empty() {
            return;
        }
        let taps = kernel.len();
        for (k, &w) in kernel.iter().enumerate() {
            let lo = first + taps - 1 - k;
            self.axpy(w, &signal[lo..lo + block.len()], block);
        }
    }

    /// `out[j] = dot(shared, rows[j])`, identical to calling `dot` per row.
    pub fn dot_batch(&self, shared: &[T], rows: &[&[T]], out: &mut [T]) {
        for (o, row) in out.iter_mut().zip(rows) {
            *o = self.dot(shared, row);
        }
    }

    /// Overlap-add: `dst[offset + i] += src[i]` for all of `src`.
    ///
    /// # Panics
    /// If `offset + src.len()` exceeds `dst.len()`.
    #[track_caller]
    pub fn add_at(&self, dst: &mut [T], src: &[T], offset: usize) {
        let range = contract::offset_range(dst.len(), src.len(), offset);
        self.add_assign(&mut dst[range], src);
    }

    /// `dst[offset..offset + src.len()] = src`
    ///
    /// # Panics
    /// If `offset + src.len()` exceeds `dst.len()`.
    #[track_caller]
    pub fn copy_at(&self, dst: &mut [T], src: &[T], offset: usize) {
        let range = contract::offset_range(dst.len(), src.len(), offset);
        dst[range].copy_from_slice(src);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar_f32() -> RealKernels<f32> {
        RealKernels::with_capabilities(&Capabilities::none(), Tier::Scalar)
    }

    #[test]
    fn scalar_table_binds_every_slot_to_scalar() {
        let t = scalar_f32();
        assert_eq!(t.tier(), Tier::Scalar);
        assert_eq!(t.bindings().len(), RealKernels::<f32>::SLOTS);
        assert!(t.bindings().iter().all(|&(_, tier)| tier == Tier::Scalar));
        assert_eq!(t.binding("axpy"), Some(Tier::Scalar));
        assert_eq!(t.binding("nope"), None);
    }

    #[test]
    fn convolve_valid_flips_kernel() {
        let t = scalar_f32();
        let signal = [1.0, 2.0, 3.0, 4.0];
        let kernel = [1.0, 10.0];
        let mut out = [f32::NAN; 5];
        t.convolve_valid(&signal, &kernel, &mut out);
        // out[i] = 1 * s[i+1] + 10 * s[i]
        assert_eq!(&out[..3], &[12.0, 23.0, 34.0]);
        assert!(out[3].is_nan(), "past the valid length is untouched");
    }

    #[test]
    fn convolve_with_kernel_longer_than_signal_is_a_noop() {
        let t = scalar_f32();
        let mut out = [7.0f32; 4];
        t.convolve_valid(&[1.0], &[1.0, 2.0, 3.0], &mut out);
        assert_eq!(out, [7.0; 4]);
        let empty: [f32; 0] = [];
        t.convolve_valid(&empty, &[1.0, 2.0], &mut out);
        assert_eq!(out, [7.0; 4]);

        let mut other = [7.0f32; 2];
        {
            let mut outs: [&mut [f32]; 2] = [&mut out, &mut other];
            let kernels: [&[f32]; 2] = [&[1.0; 5], &[1.0, 1.0]];
            t.convolve_valid_multi(&[1.0, 2.0, 3.0], &kernels, &mut outs);
        }
        assert_eq!(out, [7.0; 4]);
        assert_eq!(other, [3.0, 5.0]);
    }

    #[test]
    fn convolve_multi_matches_single() {
        let t = scalar_f32();
        let signal: Vec<f32> = (0..3000).map(|i| ((i * 37) % 101) as f32 * 0.01).collect();
        let k1 = [0.5f32, -0.25, 0.125];
        let k2 = [1.0f32; 17];
        let mut single1 = vec![0.0; 2998];
        let mut single2 = vec![0.0; 2984];
        t.convolve_valid(&signal, &k1, &mut single1);
        t.convolve_valid(&signal, &k2, &mut single2);

        let mut m1 = vec![0.0; 2998];
        let mut m2 = vec![0.0; 2984];
        {
            let mut outs: [&mut [f32]; 2] = [&mut m1, &mut m2];
            let kernels: [&[f32]; 2] = [&k1, &k2];
            t.convolve_valid_multi(&signal, &kernels, &mut outs);
        }
        assert_eq!(m1, single1);
        assert_eq!(m2, single2);
    }

    #[test]
    fn dot_batch_matches_dot() {
        let t = scalar_f32();
        let shared = [1.0f32, 2.0, 3.0];
        let r0 = [1.0f32, 1.0, 1.0];
        let r1 = [0.5f32, 0.0, -1.0, 99.0];
        let mut out = [0.0; 2];
        let rows: [&[f32]; 2] = [&r0, &r1];
        t.dot_batch(&shared, &rows, &mut out);
        assert_eq!(out, [6.0, t.dot(&shared, &r1)]);
        assert_eq!(out[1], -2.5);
    }

    #[test]
    fn add_at_accumulates_into_window() {
        let t = scalar_f32();
        let mut dst = [1.0f32; 6];
        t.add_at(&mut dst, &[1.0, 2.0], 3);
        assert_eq!(dst, [1.0, 1.0, 1.0, 2.0, 3.0, 1.0]);
        t.copy_at(&mut dst, &[7.0], 0);
        assert_eq!(dst[0], 7.0);
    }

    #[test]
    #[should_panic(expected = "exceeds destination length 6")]
    fn add_at_overhang_panics_before_writing() {
        let t = scalar_f32();
        let mut dst = [0.0f32; 6];
        t.add_at(&mut dst, &[1.0, 2.0, 3.0], 4);
    }
}
