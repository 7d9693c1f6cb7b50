/// Generates a Cephes-style `exp(x)` for f32 SIMD vectors of one ISA.
///
/// Algorithm: clamp → t = x * log2e → k = round(t) → Cody-Waite range reduction
///            → degree-5 Horner polynomial → 2^k applied as two exact halves.
///
/// The clamp bounds sit just past the f32 overflow and underflow points, so
/// `k` stays in [-150, 128]. Splitting `2^k = 2^(k>>1) * 2^(k - (k>>1))`
/// keeps both factors normal; the second multiply is the only rounding step,
/// which lands on `inf` above `ln(f32::MAX)` and on correctly rounded
/// subnormals or zero at the low end.
/// NaN passes through: the constant is the first operand of each clamp and
/// x86 min/max return the second operand when unordered.
///
/// Usage (inside a module compiled for the ISA):
/// ```ignore
/// define_exp_f32!(avx2, "avx2");      // generates exp_ps(__m256) -> __m256
/// define_exp_f32!(avx512, "avx512f"); // generates exp_ps(__m512) -> __m512
/// ```
#[doc(hidden)]
#[macro_export]
macro_rules! define_exp_f32 {
    ($isa:ident, $feat:literal) => {
        #[target_feature(enable = $feat)]
        #[inline]
        #[allow(unused_unsafe)]
        unsafe fn exp_ps(x: $crate::define_exp_f32!(@vec_type $isa)) -> $crate::define_exp_f32!(@vec_type $isa) {
            const EXP_HI: f32 = 89.0;
            const EXP_LO: f32 = -104.0;
            unsafe {
                let x = $crate::simd_primitive!($isa, f32, min,
                    $crate::simd_primitive!($isa, f32, splat, EXP_HI),
                    $crate::simd_primitive!($isa, f32, max,
                        $crate::simd_primitive!($isa, f32, splat, EXP_LO), x));

                let v_log2e = $crate::simd_primitive!($isa, f32, splat, 1.442_695_04_f32);
                let v_127 = $crate::simd_primitive!($isa, i32, splat, 127);

                // Cody-Waite range reduction: ln2 = c1 + c2 (c1 exact in float)
                let c1 = $crate::simd_primitive!($isa, f32, splat, -0.693_359_375_f32);
                let c2 = $crate::simd_primitive!($isa, f32, splat, 2.121_944_4e-4_f32);

                // k = round(x * log2e)
                let t = $crate::simd_primitive!($isa, f32, mul, x, v_log2e);
                let k = $crate::simd_primitive!($isa, f32, cvt_to_i32,
                    $crate::simd_primitive!($isa, f32, round_nearest, t));
                let k_ps = $crate::simd_primitive!($isa, i32, cast_f32, k);

                // y = x - k*ln2 (two-step for precision)
                let mut y = $crate::simd_primitive!($isa, f32, fma, k_ps, c1, x);
                y = $crate::simd_primitive!($isa, f32, fma, k_ps, c2, y);

                // Degree-5 minimax polynomial (Horner's method)
                let p0 = $crate::simd_primitive!($isa, f32, splat, 1.987_569_15E-4_f32);
                let p1 = $crate::simd_primitive!($isa, f32, splat, 1.398_199_950_7E-3_f32);
                let p2 = $crate::simd_primitive!($isa, f32, splat, 8.333_451_907_3E-3_f32);
                let p3 = $crate::simd_primitive!($isa, f32, splat, 4.166_579_589_4E-2_f32);
                let p4 = $crate::simd_primitive!($isa, f32, splat, 1.666_666_545_9E-1_f32);
                let p5 = $crate::simd_primitive!($isa, f32, splat, 5.000_000_120_1E-1_f32);
                let one = $crate::simd_primitive!($isa, f32, splat, 1.0_f32);

                let mut p = p0;
                p = $crate::simd_primitive!($isa, f32, fma, p, y, p1);
                p = $crate::simd_primitive!($isa, f32, fma, p, y, p2);
                p = $crate::simd_primitive!($isa, f32, fma, p, y, p3);
                p = $crate::simd_primitive!($isa, f32, fma, p, y, p4);
                p = $crate::simd_primitive!($isa, f32, fma, p, y, p5);
                p = $crate::simd_primitive!($isa, f32, fma, p, y, one);
                p = $crate::simd_primitive!($isa, f32, fma, p, y, one);

                // 2^k = 2^k1 * 2^k2, each built as (k_i + 127) << 23
                let k1 = $crate::simd_primitive!($isa, i32, sra_1, k);
                let k2 = $crate::simd_primitive!($isa, i32, sub, k, k1);
                let f1 = $crate::simd_primitive!($isa, i32, cast_bits_f32,
                    $crate::simd_primitive!($isa, i32, shl_23,
                        $crate::simd_primitive!($isa, i32, add, k1, v_127)));
                let f2 = $crate::simd_primitive!($isa, i32, cast_bits_f32,
                    $crate::simd_primitive!($isa, i32, shl_23,
                        $crate::simd_primitive!($isa, i32, add, k2, v_127)));

                $crate::simd_primitive!($isa, f32, mul,
                    $crate::simd_primitive!($isa, f32, mul, p, f1), f2)
            }
        }
    };

    // Vector type mapping: ISA → concrete SIMD type
    (@vec_type avx2) => { std::arch::x86_64::__m256 };
    (@vec_type avx2fma) => { std::arch::x86_64::__m256 };
    (@vec_type avx512) => { std::arch::x86_64::__m512 };
}
