//! Operator bodies written once against `simd_primitive!` and stamped out
//! per (ISA, element) pair.
//!
//! Every generated kernel is a `#[target_feature]` `unsafe fn`: a vector
//! loop over full registers followed by a scalar remainder that rounds the
//! same way (`scalar_fma` mirrors `fma`). Kernels trust the dispatch layer
//! to pass equal lengths but still process only the shortest slice.

/// Element-wise arithmetic, BLAS-1 style updates and reductions over one
/// real element type.
#[doc(hidden)]
#[macro_export]
macro_rules! define_real_ops {
    ($isa:ident, $elem:ident, $feat:literal) => {
        $crate::define_real_ops!(@binary $isa, $elem, $feat, add, +);
        $crate::define_real_ops!(@binary $isa, $elem, $feat, sub, -);
        $crate::define_real_ops!(@binary $isa, $elem, $feat, mul, *);
        $crate::define_real_ops!(@binary $isa, $elem, $feat, div, /);

        $crate::define_real_ops!(@unary $isa, $elem, $feat, abs, |x: $elem| x.abs());
        $crate::define_real_ops!(@unary $isa, $elem, $feat, neg, |x: $elem| -x);
        $crate::define_real_ops!(@unary $isa, $elem, $feat, sqrt, |x: $elem| x.sqrt());

        /// dst[i] += src[i]
        #[target_feature(enable = $feat)]
        pub unsafe fn add_assign(dst: &mut [$elem], src: &[$elem]) {
            const LANES: usize = $crate::simd_primitive!($isa, $elem, lanes);
            let len = dst.len().min(src.len());
            let mut i = 0;
            while i + LANES <= len {
                #[allow(unused_unsafe)]
                unsafe {
                    let vd = $crate::simd_primitive!($isa, $elem, load, dst.as_ptr().add(i));
                    let vs = $crate::simd_primitive!($isa, $elem, load, src.as_ptr().add(i));
                    let res = $crate::simd_primitive!($isa, $elem, add, vd, vs);
                    $crate::simd_primitive!($isa, $elem, store, dst.as_mut_ptr().add(i), res);
                }
                i += LANES;
            }
            while i < len { dst[i] += src[i]; i += 1; }
        }

        /// y[i] += alpha * x[i]
        #[target_feature(enable = $feat)]
        pub unsafe fn axpy(alpha: $elem, x: &[$elem], y: &mut [$elem]) {
            const LANES: usize = $crate::simd_primitive!($isa, $elem, lanes);
            let len = x.len().min(y.len());
            let mut i = 0;
            #[allow(unused_unsafe)]
            let valpha = unsafe { $crate::simd_primitive!($isa, $elem, splat, alpha) };
            while i + LANES <= len {
                #[allow(unused_unsafe)]
                unsafe {
                    let vx = $crate::simd_primitive!($isa, $elem, load, x.as_ptr().add(i));
                    let vy = $crate::simd_primitive!($isa, $elem, load, y.as_ptr().add(i));
                    let res = $crate::simd_primitive!($isa, $elem, fma, valpha, vx, vy);
                    $crate::simd_primitive!($isa, $elem, store, y.as_mut_ptr().add(i), res);
                }
                i += LANES;
            }
            while i < len {
                y[i] = $crate::simd_primitive!($isa, $elem, scalar_fma, alpha, x[i], y[i]);
                i += 1;
            }
        }

        /// out[i] = a[i] * s
        #[target_feature(enable = $feat)]
        pub unsafe fn scale(a: &[$elem], s: $elem, out: &mut [$elem]) {
            const LANES: usize = $crate::simd_primitive!($isa, $elem, lanes);
            let len = a.len().min(out.len());
            let mut i = 0;
            #[allow(unused_unsafe)]
            let vs = unsafe { $crate::simd_primitive!($isa, $elem, splat, s) };
            while i + LANES <= len {
                #[allow(unused_unsafe)]
                unsafe {
                    let va = $crate::simd_primitive!($isa, $elem, load, a.as_ptr().add(i));
                    let res = $crate::simd_primitive!($isa, $elem, mul, va, vs);
                    $crate::simd_primitive!($isa, $elem, store, out.as_mut_ptr().add(i), res);
                }
                i += LANES;
            }
            while i < len { out[i] = a[i] * s; i += 1; }
        }

        /// out[i] = a[i] + s
        #[target_feature(enable = $feat)]
        pub unsafe fn add_scalar(a: &[$elem], s: $elem, out: &mut [$elem]) {
            const LANES: usize = $crate::simd_primitive!($isa, $elem, lanes);
            let len = a.len().min(out.len());
            let mut i = 0;
            #[allow(unused_unsafe)]
            let vs = unsafe { $crate::simd_primitive!($isa, $elem, splat, s) };
            while i + LANES <= len {
                #[allow(unused_unsafe)]
                unsafe {
                    let va = $crate::simd_primitive!($isa, $elem, load, a.as_ptr().add(i));
                    let res = $crate::simd_primitive!($isa, $elem, add, va, vs);
                    $crate::simd_primitive!($isa, $elem, store, out.as_mut_ptr().add(i), res);
                }
                i += LANES;
            }
            while i < len { out[i] = a[i] + s; i += 1; }
        }

        /// out[i] = a[i] * b[i] + c[i]
        #[target_feature(enable = $feat)]
        pub unsafe fn mul_add(a: &[$elem], b: &[$elem], c: &[$elem], out: &mut [$elem]) {
            const LANES: usize = $crate::simd_primitive!($isa, $elem, lanes);
            let len = a.len().min(b.len()).min(c.len()).min(out.len());
            let mut i = 0;
            while i + LANES <= len {
                #[allow(unused_unsafe)]
                unsafe {
                    let va = $crate::simd_primitive!($isa, $elem, load, a.as_ptr().add(i));
                    let vb = $crate::simd_primitive!($isa, $elem, load, b.as_ptr().add(i));
                    let vc = $crate::simd_primitive!($isa, $elem, load, c.as_ptr().add(i));
                    let res = $crate::simd_primitive!($isa, $elem, fma, va, vb, vc);
                    $crate::simd_primitive!($isa, $elem, store, out.as_mut_ptr().add(i), res);
                }
                i += LANES;
            }
            while i < len {
                out[i] = $crate::simd_primitive!($isa, $elem, scalar_fma, a[i], b[i], c[i]);
                i += 1;
            }
        }

        /// out[i] = min(max(a[i], lo), hi); NaN comes out as hi.
        #[target_feature(enable = $feat)]
        pub unsafe fn clamp(a: &[$elem], lo: $elem, hi: $elem, out: &mut [$elem]) {
            const LANES: usize = $crate::simd_primitive!($isa, $elem, lanes);
            let len = a.len().min(out.len());
            let mut i = 0;
            #[allow(unused_unsafe)]
            let (vlo, vhi) = unsafe {
                ($crate::simd_primitive!($isa, $elem, splat, lo), $crate::simd_primitive!($isa, $elem, splat, hi))
            };
            while i + LANES <= len {
                #[allow(unused_unsafe)]
                unsafe {
                    let va = $crate::simd_primitive!($isa, $elem, load, a.as_ptr().add(i));
                    let capped = $crate::simd_primitive!($isa, $elem, min, va, vhi);
                    let res = $crate::simd_primitive!($isa, $elem, max, capped, vlo);
                    $crate::simd_primitive!($isa, $elem, store, out.as_mut_ptr().add(i), res);
                }
                i += LANES;
            }
            while i < len {
                let capped = if a[i] < hi { a[i] } else { hi };
                out[i] = if capped > lo { capped } else { lo };
                i += 1;
            }
        }

        /// out[i] = max(a[i], 0); NaN maps to zero.
        #[target_feature(enable = $feat)]
        pub unsafe fn relu(a: &[$elem], out: &mut [$elem]) {
            const LANES: usize = $crate::simd_primitive!($isa, $elem, lanes);
            let len = a.len().min(out.len());
            let mut i = 0;
            #[allow(unused_unsafe)]
            let zero = unsafe { $crate::simd_primitive!($isa, $elem, zero) };
            while i + LANES <= len {
                #[allow(unused_unsafe)]
                unsafe {
                    let va = $crate::simd_primitive!($isa, $elem, load, a.as_ptr().add(i));
                    let res = $crate::simd_primitive!($isa, $elem, max, va, zero);
                    $crate::simd_primitive!($isa, $elem, store, out.as_mut_ptr().add(i), res);
                }
                i += LANES;
            }
            while i < len {
                out[i] = if a[i] > 0.0 { a[i] } else { 0.0 };
                i += 1;
            }
        }

        #[target_feature(enable = $feat)]
        pub unsafe fn sum(a: &[$elem]) -> $elem {
            const LANES: usize = $crate::simd_primitive!($isa, $elem, lanes);
            let len = a.len();
            let mut i = 0;
            #[allow(unused_unsafe)]
            let mut acc = unsafe { $crate::simd_primitive!($isa, $elem, zero) };
            while i + LANES <= len {
                #[allow(unused_unsafe)]
                unsafe {
                    let va = $crate::simd_primitive!($isa, $elem, load, a.as_ptr().add(i));
                    acc = $crate::simd_primitive!($isa, $elem, add, acc, va);
                }
                i += LANES;
            }
            #[allow(unused_unsafe)]
            let mut result = unsafe { $crate::simd_primitive!($isa, $elem, reduce_sum, acc) };
            while i < len { result += a[i]; i += 1; }
            result
        }

        #[target_feature(enable = $feat)]
        pub unsafe fn sum_squares(a: &[$elem]) -> $elem {
            const LANES: usize = $crate::simd_primitive!($isa, $elem, lanes);
            let len = a.len();
            let mut i = 0;
            #[allow(unused_unsafe)]
            let mut acc = unsafe { $crate::simd_primitive!($isa, $elem, zero) };
            while i + LANES <= len {
                #[allow(unused_unsafe)]
                unsafe {
                    let va = $crate::simd_primitive!($isa, $elem, load, a.as_ptr().add(i));
                    acc = $crate::simd_primitive!($isa, $elem, fma, va, va, acc);
                }
                i += LANES;
            }
            #[allow(unused_unsafe)]
            let mut result = unsafe { $crate::simd_primitive!($isa, $elem, reduce_sum, acc) };
            while i < len {
                result = $crate::simd_primitive!($isa, $elem, scalar_fma, a[i], a[i], result);
                i += 1;
            }
            result
        }

        /// Smallest non-NaN element, `+inf` when there is none.
        #[target_feature(enable = $feat)]
        pub unsafe fn min(a: &[$elem]) -> $elem {
            const LANES: usize = $crate::simd_primitive!($isa, $elem, lanes);
            let len = a.len();
            let mut i = 0;
            #[allow(unused_unsafe)]
            let mut acc = unsafe { $crate::simd_primitive!($isa, $elem, splat, $elem::INFINITY) };
            while i + LANES <= len {
                #[allow(unused_unsafe)]
                unsafe {
                    let va = $crate::simd_primitive!($isa, $elem, load, a.as_ptr().add(i));
                    acc = $crate::simd_primitive!($isa, $elem, min, va, acc);
                }
                i += LANES;
            }
            #[allow(unused_unsafe)]
            let mut result = unsafe { $crate::simd_primitive!($isa, $elem, reduce_min, acc) };
            while i < len {
                if a[i] < result { result = a[i]; }
                i += 1;
            }
            result
        }

        /// Largest non-NaN element, `-inf` when there is none.
        #[target_feature(enable = $feat)]
        pub unsafe fn max(a: &[$elem]) -> $elem {
            const LANES: usize = $crate::simd_primitive!($isa, $elem, lanes);
            let len = a.len();
            let mut i = 0;
            #[allow(unused_unsafe)]
            let mut acc = unsafe { $crate::simd_primitive!($isa, $elem, splat, $elem::NEG_INFINITY) };
            while i + LANES <= len {
                #[allow(unused_unsafe)]
                unsafe {
                    let va = $crate::simd_primitive!($isa, $elem, load, a.as_ptr().add(i));
                    acc = $crate::simd_primitive!($isa, $elem, max, va, acc);
                }
                i += LANES;
            }
            #[allow(unused_unsafe)]
            let mut result = unsafe { $crate::simd_primitive!($isa, $elem, reduce_max, acc) };
            while i < len {
                if a[i] > result { result = a[i]; }
                i += 1;
            }
            result
        }

        #[target_feature(enable = $feat)]
        pub unsafe fn dot(a: &[$elem], b: &[$elem]) -> $elem {
            const LANES: usize = $crate::simd_primitive!($isa, $elem, lanes);
            let len = a.len().min(b.len());
            let mut i = 0;
            #[allow(unused_unsafe)]
            let mut acc = unsafe { $crate::simd_primitive!($isa, $elem, zero) };
            while i + LANES <= len {
                #[allow(unused_unsafe)]
                unsafe {
                    let va = $crate::simd_primitive!($isa, $elem, load, a.as_ptr().add(i));
                    let vb = $crate::simd_primitive!($isa, $elem, load, b.as_ptr().add(i));
                    acc = $crate::simd_primitive!($isa, $elem, fma, va, vb, acc);
                }
                i += LANES;
            }
            #[allow(unused_unsafe)]
            let mut result = unsafe { $crate::simd_primitive!($isa, $elem, reduce_sum, acc) };
            while i < len {
                result = $crate::simd_primitive!($isa, $elem, scalar_fma, a[i], b[i], result);
                i += 1;
            }
            result
        }

        /// sum (a[i] - b[i])^2
        #[target_feature(enable = $feat)]
        pub unsafe fn sq_euclidean(a: &[$elem], b: &[$elem]) -> $elem {
            const LANES: usize = $crate::simd_primitive!($isa, $elem, lanes);
            let len = a.len().min(b.len());
            let mut i = 0;
            #[allow(unused_unsafe)]
            let mut acc = unsafe { $crate::simd_primitive!($isa, $elem, zero) };
            while i + LANES <= len {
                #[allow(unused_unsafe)]
                unsafe {
                    let va = $crate::simd_primitive!($isa, $elem, load, a.as_ptr().add(i));
                    let vb = $crate::simd_primitive!($isa, $elem, load, b.as_ptr().add(i));
                    let d = $crate::simd_primitive!($isa, $elem, sub, va, vb);
                    acc = $crate::simd_primitive!($isa, $elem, fma, d, d, acc);
                }
                i += LANES;
            }
            #[allow(unused_unsafe)]
            let mut result = unsafe { $crate::simd_primitive!($isa, $elem, reduce_sum, acc) };
            while i < len {
                let d = a[i] - b[i];
                result = $crate::simd_primitive!($isa, $elem, scalar_fma, d, d, result);
                i += 1;
            }
            result
        }

        /// sum hist[i] * (a[i] + x*(b[i] + x*(c[i] + x*d[i])))
        #[target_feature(enable = $feat)]
        pub unsafe fn cubic_interp_dot(
            hist: &[$elem],
            a: &[$elem],
            b: &[$elem],
            c: &[$elem],
            d: &[$elem],
            x: $elem,
        ) -> $elem {
            const LANES: usize = $crate::simd_primitive!($isa, $elem, lanes);
            let len = hist.len().min(a.len()).min(b.len()).min(c.len()).min(d.len());
            let mut i = 0;
            #[allow(unused_unsafe)]
            let (vx, mut acc) = unsafe {
                ($crate::simd_primitive!($isa, $elem, splat, x), $crate::simd_primitive!($isa, $elem, zero))
            };
            while i + LANES <= len {
                #[allow(unused_unsafe)]
                unsafe {
                    let vd = $crate::simd_primitive!($isa, $elem, load, d.as_ptr().add(i));
                    let vc = $crate::simd_primitive!($isa, $elem, load, c.as_ptr().add(i));
                    let vb = $crate::simd_primitive!($isa, $elem, load, b.as_ptr().add(i));
                    let va = $crate::simd_primitive!($isa, $elem, load, a.as_ptr().add(i));
                    let vh = $crate::simd_primitive!($isa, $elem, load, hist.as_ptr().add(i));
                    let mut p = $crate::simd_primitive!($isa, $elem, fma, vd, vx, vc);
                    p = $crate::simd_primitive!($isa, $elem, fma, p, vx, vb);
                    p = $crate::simd_primitive!($isa, $elem, fma, p, vx, va);
                    acc = $crate::simd_primitive!($isa, $elem, fma, vh, p, acc);
                }
                i += LANES;
            }
            #[allow(unused_unsafe)]
            let mut result = unsafe { $crate::simd_primitive!($isa, $elem, reduce_sum, acc) };
            while i < len {
                let mut p = $crate::simd_primitive!($isa, $elem, scalar_fma, d[i], x, c[i]);
                p = $crate::simd_primitive!($isa, $elem, scalar_fma, p, x, b[i]);
                p = $crate::simd_primitive!($isa, $elem, scalar_fma, p, x, a[i]);
                result = $crate::simd_primitive!($isa, $elem, scalar_fma, hist[i], p, result);
                i += 1;
            }
            result
        }
    };

    (@binary $isa:ident, $elem:ident, $feat:literal, $name:ident, $op:tt) => {
        #[target_feature(enable = $feat)]
        pub unsafe fn $name(a: &[$elem], b: &[$elem], out: &mut [$elem]) {
            const LANES: usize = $crate::simd_primitive!($isa, $elem, lanes);
            let len = a.len().min(b.len()).min(out.len());
            let mut i = 0;
            while i + LANES <= len {
                #[allow(unused_unsafe)]
                unsafe {
                    let va = $crate::simd_primitive!($isa, $elem, load, a.as_ptr().add(i));
                    let vb = $crate::simd_primitive!($isa, $elem, load, b.as_ptr().add(i));
                    let res = $crate::simd_primitive!($isa, $elem, $name, va, vb);
                    $crate::simd_primitive!($isa, $elem, store, out.as_mut_ptr().add(i), res);
                }
                i += LANES;
            }
            while i < len { out[i] = a[i] $op b[i]; i += 1; }
        }
    };

    (@unary $isa:ident, $elem:ident, $feat:literal, $name:ident, $scalar:expr) => {
        #[target_feature(enable = $feat)]
        pub unsafe fn $name(a: &[$elem], out: &mut [$elem]) {
            const LANES: usize = $crate::simd_primitive!($isa, $elem, lanes);
            let len = a.len().min(out.len());
            let mut i = 0;
            while i + LANES <= len {
                #[allow(unused_unsafe)]
                unsafe {
                    let va = $crate::simd_primitive!($isa, $elem, load, a.as_ptr().add(i));
                    let res = $crate::simd_primitive!($isa, $elem, $name, va);
                    $crate::simd_primitive!($isa, $elem, store, out.as_mut_ptr().add(i), res);
                }
                i += LANES;
            }
            let scalar = $scalar;
            while i < len { out[i] = scalar(a[i]); i += 1; }
        }
    };
}

/// `exp` and `sigmoid` for f32 on ISAs with a vector exp (`define_exp_f32!`
/// must be expanded in the same module).
#[doc(hidden)]
#[macro_export]
macro_rules! define_exp_ops {
    ($isa:ident, $feat:literal) => {
        #[target_feature(enable = $feat)]
        pub unsafe fn exp(a: &[f32], out: &mut [f32]) {
            const LANES: usize = $crate::simd_primitive!($isa, f32, lanes);
            let len = a.len().min(out.len());
            let mut i = 0;
            while i + LANES <= len {
                #[allow(unused_unsafe)]
                unsafe {
                    let va = $crate::simd_primitive!($isa, f32, load, a.as_ptr().add(i));
                    $crate::simd_primitive!($isa, f32, store, out.as_mut_ptr().add(i), exp_ps(va));
                }
                i += LANES;
            }
            while i < len { out[i] = a[i].exp(); i += 1; }
        }

        /// out[i] = 1 / (1 + exp(-a[i]))
        #[target_feature(enable = $feat)]
        pub unsafe fn sigmoid(a: &[f32], out: &mut [f32]) {
            const LANES: usize = $crate::simd_primitive!($isa, f32, lanes);
            let len = a.len().min(out.len());
            let mut i = 0;
            #[allow(unused_unsafe)]
            let one = unsafe { $crate::simd_primitive!($isa, f32, splat, 1.0) };
            while i + LANES <= len {
                #[allow(unused_unsafe)]
                unsafe {
                    let va = $crate::simd_primitive!($isa, f32, load, a.as_ptr().add(i));
                    let e = exp_ps($crate::simd_primitive!($isa, f32, neg, va));
                    let res = $crate::simd_primitive!($isa, f32, div, one,
                        $crate::simd_primitive!($isa, f32, add, one, e));
                    $crate::simd_primitive!($isa, f32, store, out.as_mut_ptr().add(i), res);
                }
                i += LANES;
            }
            while i < len { out[i] = 1.0 / (1.0 + (-a[i]).exp()); i += 1; }
        }
    };
}

/// Complex multiply kernels over interleaved `(re, im)` lanes.
///
/// Needs `dup_even`, `dup_odd`, `swap_pairs`, `fmaddsub` and `fmsubadd`
/// from `simd_primitive!`.
#[doc(hidden)]
#[macro_export]
macro_rules! define_complex_ops {
    ($isa:ident, $elem:ident, $feat:literal) => {
        /// out[j] = a[j] * b[j]
        #[target_feature(enable = $feat)]
        pub unsafe fn complex_mul(
            a: &[$crate::Complex<$elem>],
            b: &[$crate::Complex<$elem>],
            out: &mut [$crate::Complex<$elem>],
        ) {
            const LANES: usize = $crate::simd_primitive!($isa, $elem, lanes);
            let n = a.len().min(b.len()).min(out.len());
            let len = 2 * n;
            let (pa, pb) = (a.as_ptr().cast::<$elem>(), b.as_ptr().cast::<$elem>());
            let po = out.as_mut_ptr().cast::<$elem>();
            let mut i = 0;
            while i + LANES <= len {
                #[allow(unused_unsafe)]
                unsafe {
                    let va = $crate::simd_primitive!($isa, $elem, load, pa.add(i));
                    let vb = $crate::simd_primitive!($isa, $elem, load, pb.add(i));
                    // [ai*bi, ar*bi, ...]
                    let cross = $crate::simd_primitive!($isa, $elem, mul,
                        $crate::simd_primitive!($isa, $elem, swap_pairs, va),
                        $crate::simd_primitive!($isa, $elem, dup_odd, vb));
                    let res = $crate::simd_primitive!($isa, $elem, fmaddsub, va,
                        $crate::simd_primitive!($isa, $elem, dup_even, vb), cross);
                    $crate::simd_primitive!($isa, $elem, store, po.add(i), res);
                }
                i += LANES;
            }
            let mut j = i / 2;
            while j < n {
                let (x, y) = (a[j], b[j]);
                out[j] = $crate::Complex::new(
                    $crate::simd_primitive!($isa, $elem, scalar_fma, x.re, y.re, -(x.im * y.im)),
                    $crate::simd_primitive!($isa, $elem, scalar_fma, x.im, y.re, x.re * y.im),
                );
                j += 1;
            }
        }

        /// out[j] = a[j] * conj(b[j])
        #[target_feature(enable = $feat)]
        pub unsafe fn complex_mul_conj(
            a: &[$crate::Complex<$elem>],
            b: &[$crate::Complex<$elem>],
            out: &mut [$crate::Complex<$elem>],
        ) {
            const LANES: usize = $crate::simd_primitive!($isa, $elem, lanes);
            let n = a.len().min(b.len()).min(out.len());
            let len = 2 * n;
            let (pa, pb) = (a.as_ptr().cast::<$elem>(), b.as_ptr().cast::<$elem>());
            let po = out.as_mut_ptr().cast::<$elem>();
            let mut i = 0;
            while i + LANES <= len {
                #[allow(unused_unsafe)]
                unsafe {
                    let va = $crate::simd_primitive!($isa, $elem, load, pa.add(i));
                    let vb = $crate::simd_primitive!($isa, $elem, load, pb.add(i));
                    let cross = $crate::simd_primitive!($isa, $elem, mul,
                        $crate::simd_primitive!($isa, $elem, swap_pairs, va),
                        $crate::simd_primitive!($isa, $elem, dup_odd, vb));
                    let res = $crate::simd_primitive!($isa, $elem, fmsubadd, va,
                        $crate::simd_primitive!($isa, $elem, dup_even, vb), cross);
                    $crate::simd_primitive!($isa, $elem, store, po.add(i), res);
                }
                i += LANES;
            }
            let mut j = i / 2;
            while j < n {
                let (x, y) = (a[j], b[j]);
                out[j] = $crate::Complex::new(
                    $crate::simd_primitive!($isa, $elem, scalar_fma, x.re, y.re, x.im * y.im),
                    $crate::simd_primitive!($isa, $elem, scalar_fma, x.im, y.re, -(x.re * y.im)),
                );
                j += 1;
            }
        }
    };
}
