/// Maps abstract SIMD operations to concrete hardware intrinsics.
///
/// # Architecture
/// This macro is "Layer 1" of the kernel macros. It gives every operator
/// template one vocabulary over all tiers:
/// - Architecture constants (`lanes`)
/// - Compute primitives (add, fma, load, store, reductions, ...)
/// - The scalar twin of `fma` (`scalar_fma`), so remainder loops round the
///   same way as the vector body.
///
/// `min`/`max` follow the x86 rule of returning the second operand when the
/// comparison is unordered; templates pass the accumulator second so NaN
/// elements are skipped. NEON uses `fminnm`/`fmaxnm`, which skip NaN too.
///
/// # Usage
/// ```ignore
/// simd_primitive!(sse2, f64, add, a, b)  // -> _mm_add_pd(a, b)
/// simd_primitive!(avx2, f32, add, a, b)  // -> _mm256_add_ps(a, b)
/// ```
#[doc(hidden)]
#[macro_export]
macro_rules! simd_primitive {
    // ========================================================================
    // SSE2 (128-bit, no FMA)
    // ========================================================================

    // --- f32 ---
    (sse2, f32, lanes) => { 4 };
    (sse2, f32, zero) => { std::arch::x86_64::_mm_setzero_ps() };
    (sse2, f32, splat, $v:expr) => { std::arch::x86_64::_mm_set1_ps($v) };
    (sse2, f32, load, $p:expr) => { std::arch::x86_64::_mm_loadu_ps($p) };
    (sse2, f32, store, $p:expr, $v:expr) => { std::arch::x86_64::_mm_storeu_ps($p, $v) };
    (sse2, f32, add, $a:expr, $b:expr) => { std::arch::x86_64::_mm_add_ps($a, $b) };
    (sse2, f32, sub, $a:expr, $b:expr) => { std::arch::x86_64::_mm_sub_ps($a, $b) };
    (sse2, f32, mul, $a:expr, $b:expr) => { std::arch::x86_64::_mm_mul_ps($a, $b) };
    (sse2, f32, div, $a:expr, $b:expr) => { std::arch::x86_64::_mm_div_ps($a, $b) };
    (sse2, f32, fma, $a:expr, $b:expr, $c:expr) => {
        std::arch::x86_64::_mm_add_ps(std::arch::x86_64::_mm_mul_ps($a, $b), $c)
    };
    (sse2, f32, scalar_fma, $a:expr, $b:expr, $c:expr) => { $a * $b + $c };
    (sse2, f32, neg, $a:expr) => { std::arch::x86_64::_mm_xor_ps($a, std::arch::x86_64::_mm_set1_ps(-0.0)) };
    (sse2, f32, abs, $a:expr) => { std::arch::x86_64::_mm_andnot_ps(std::arch::x86_64::_mm_set1_ps(-0.0), $a) };
    (sse2, f32, sqrt, $a:expr) => { std::arch::x86_64::_mm_sqrt_ps($a) };
    (sse2, f32, max, $a:expr, $b:expr) => { std::arch::x86_64::_mm_max_ps($a, $b) };
    (sse2, f32, min, $a:expr, $b:expr) => { std::arch::x86_64::_mm_min_ps($a, $b) };
    (sse2, f32, reduce_sum, $v:expr) => {
        {
            let v = $v;
            let s = std::arch::x86_64::_mm_add_ps(v, std::arch::x86_64::_mm_movehl_ps(v, v));
            let s = std::arch::x86_64::_mm_add_ss(s, std::arch::x86_64::_mm_shuffle_ps(s, s, 1));
            std::arch::x86_64::_mm_cvtss_f32(s)
        }
    };
    (sse2, f32, reduce_max, $v:expr) => {
        {
            let v = $v;
            let m = std::arch::x86_64::_mm_max_ps(v, std::arch::x86_64::_mm_movehl_ps(v, v));
            let m = std::arch::x86_64::_mm_max_ss(m, std::arch::x86_64::_mm_shuffle_ps(m, m, 1));
            std::arch::x86_64::_mm_cvtss_f32(m)
        }
    };
    (sse2, f32, reduce_min, $v:expr) => {
        {
            let v = $v;
            let m = std::arch::x86_64::_mm_min_ps(v, std::arch::x86_64::_mm_movehl_ps(v, v));
            let m = std::arch::x86_64::_mm_min_ss(m, std::arch::x86_64::_mm_shuffle_ps(m, m, 1));
            std::arch::x86_64::_mm_cvtss_f32(m)
        }
    };

    // --- f64 ---
    (sse2, f64, lanes) => { 2 };
    (sse2, f64, zero) => { std::arch::x86_64::_mm_setzero_pd() };
    (sse2, f64, splat, $v:expr) => { std::arch::x86_64::_mm_set1_pd($v) };
    (sse2, f64, load, $p:expr) => { std::arch::x86_64::_mm_loadu_pd($p) };
    (sse2, f64, store, $p:expr, $v:expr) => { std::arch::x86_64::_mm_storeu_pd($p, $v) };
    (sse2, f64, add, $a:expr, $b:expr) => { std::arch::x86_64::_mm_add_pd($a, $b) };
    (sse2, f64, sub, $a:expr, $b:expr) => { std::arch::x86_64::_mm_sub_pd($a, $b) };
    (sse2, f64, mul, $a:expr, $b:expr) => { std::arch::x86_64::_mm_mul_pd($a, $b) };
    (sse2, f64, div, $a:expr, $b:expr) => { std::arch::x86_64::_mm_div_pd($a, $b) };
    (sse2, f64, fma, $a:expr, $b:expr, $c:expr) => {
        std::arch::x86_64::_mm_add_pd(std::arch::x86_64::_mm_mul_pd($a, $b), $c)
    };
    (sse2, f64, scalar_fma, $a:expr, $b:expr, $c:expr) => { $a * $b + $c };
    (sse2, f64, neg, $a:expr) => { std::arch::x86_64::_mm_xor_pd($a, std::arch::x86_64::_mm_set1_pd(-0.0)) };
    (sse2, f64, abs, $a:expr) => { std::arch::x86_64::_mm_andnot_pd(std::arch::x86_64::_mm_set1_pd(-0.0), $a) };
    (sse2, f64, sqrt, $a:expr) => { std::arch::x86_64::_mm_sqrt_pd($a) };
    (sse2, f64, max, $a:expr, $b:expr) => { std::arch::x86_64::_mm_max_pd($a, $b) };
    (sse2, f64, min, $a:expr, $b:expr) => { std::arch::x86_64::_mm_min_pd($a, $b) };
    (sse2, f64, reduce_sum, $v:expr) => {
        {
            let v = $v;
            std::arch::x86_64::_mm_cvtsd_f64(std::arch::x86_64::_mm_add_sd(v, std::arch::x86_64::_mm_unpackhi_pd(v, v)))
        }
    };
    (sse2, f64, reduce_max, $v:expr) => {
        {
            let v = $v;
            std::arch::x86_64::_mm_cvtsd_f64(std::arch::x86_64::_mm_max_sd(v, std::arch::x86_64::_mm_unpackhi_pd(v, v)))
        }
    };
    (sse2, f64, reduce_min, $v:expr) => {
        {
            let v = $v;
            std::arch::x86_64::_mm_cvtsd_f64(std::arch::x86_64::_mm_min_sd(v, std::arch::x86_64::_mm_unpackhi_pd(v, v)))
        }
    };

    // ========================================================================
    // AVX2 + FMA: identical to AVX2 except for the fused primitives
    // ========================================================================

    (avx2fma, f32, fma, $a:expr, $b:expr, $c:expr) => { std::arch::x86_64::_mm256_fmadd_ps($a, $b, $c) };
    (avx2fma, f64, fma, $a:expr, $b:expr, $c:expr) => { std::arch::x86_64::_mm256_fmadd_pd($a, $b, $c) };
    (avx2fma, f32, fmaddsub, $a:expr, $b:expr, $c:expr) => { std::arch::x86_64::_mm256_fmaddsub_ps($a, $b, $c) };
    (avx2fma, f64, fmaddsub, $a:expr, $b:expr, $c:expr) => { std::arch::x86_64::_mm256_fmaddsub_pd($a, $b, $c) };
    (avx2fma, f32, fmsubadd, $a:expr, $b:expr, $c:expr) => { std::arch::x86_64::_mm256_fmsubadd_ps($a, $b, $c) };
    (avx2fma, f64, fmsubadd, $a:expr, $b:expr, $c:expr) => { std::arch::x86_64::_mm256_fmsubadd_pd($a, $b, $c) };
    (avx2fma, $elem:ident, scalar_fma, $a:expr, $b:expr, $c:expr) => { $a.mul_add($b, $c) };
    (avx2fma, $($rest:tt)*) => { $crate::simd_primitive!(avx2, $($rest)*) };

    // ========================================================================
    // AVX2 (256-bit, FMA not assumed)
    // ========================================================================

    // --- f32 ---
    (avx2, f32, lanes) => { 8 };
    (avx2, f32, zero) => { std::arch::x86_64::_mm256_setzero_ps() };
    (avx2, f32, splat, $v:expr) => { std::arch::x86_64::_mm256_set1_ps($v) };
    (avx2, f32, load, $p:expr) => { std::arch::x86_64::_mm256_loadu_ps($p) };
    (avx2, f32, store, $p:expr, $v:expr) => { std::arch::x86_64::_mm256_storeu_ps($p, $v) };
    (avx2, f32, add, $a:expr, $b:expr) => { std::arch::x86_64::_mm256_add_ps($a, $b) };
    (avx2, f32, sub, $a:expr, $b:expr) => { std::arch::x86_64::_mm256_sub_ps($a, $b) };
    (avx2, f32, mul, $a:expr, $b:expr) => { std::arch::x86_64::_mm256_mul_ps($a, $b) };
    (avx2, f32, div, $a:expr, $b:expr) => { std::arch::x86_64::_mm256_div_ps($a, $b) };
    (avx2, f32, fma, $a:expr, $b:expr, $c:expr) => {
        std::arch::x86_64::_mm256_add_ps(std::arch::x86_64::_mm256_mul_ps($a, $b), $c)
    };
    (avx2, f32, scalar_fma, $a:expr, $b:expr, $c:expr) => { $a * $b + $c };
    (avx2, f32, neg, $a:expr) => { std::arch::x86_64::_mm256_xor_ps($a, std::arch::x86_64::_mm256_set1_ps(-0.0)) };
    (avx2, f32, abs, $a:expr) => { std::arch::x86_64::_mm256_andnot_ps(std::arch::x86_64::_mm256_set1_ps(-0.0), $a) };
    (avx2, f32, sqrt, $a:expr) => { std::arch::x86_64::_mm256_sqrt_ps($a) };
    (avx2, f32, max, $a:expr, $b:expr) => { std::arch::x86_64::_mm256_max_ps($a, $b) };
    (avx2, f32, min, $a:expr, $b:expr) => { std::arch::x86_64::_mm256_min_ps($a, $b) };

    // Reduce sum: horizontal add
    (avx2, f32, reduce_sum, $v:expr) => {
        {
            let v = $v;
            let h1 = std::arch::x86_64::_mm256_hadd_ps(v, v);
            let h2 = std::arch::x86_64::_mm256_hadd_ps(h1, h1);
            let t1 = std::arch::x86_64::_mm256_extractf128_ps(h2, 1);
            let t2 = std::arch::x86_64::_mm256_castps256_ps128(h2);
            std::arch::x86_64::_mm_cvtss_f32(std::arch::x86_64::_mm_add_ps(t1, t2))
        }
    };
    (avx2, f32, reduce_max, $v:expr) => {
        {
            let v = $v;
            let hi = std::arch::x86_64::_mm256_extractf128_ps(v, 1);
            let lo = std::arch::x86_64::_mm256_castps256_ps128(v);
            $crate::simd_primitive!(sse2, f32, reduce_max, std::arch::x86_64::_mm_max_ps(lo, hi))
        }
    };
    (avx2, f32, reduce_min, $v:expr) => {
        {
            let v = $v;
            let hi = std::arch::x86_64::_mm256_extractf128_ps(v, 1);
            let lo = std::arch::x86_64::_mm256_castps256_ps128(v);
            $crate::simd_primitive!(sse2, f32, reduce_min, std::arch::x86_64::_mm_min_ps(lo, hi))
        }
    };

    // Rounding and bit casts for exp
    (avx2, f32, round_nearest, $a:expr) => {
        std::arch::x86_64::_mm256_round_ps($a, std::arch::x86_64::_MM_FROUND_TO_NEAREST_INT | std::arch::x86_64::_MM_FROUND_NO_EXC)
    };
    (avx2, f32, cvt_to_i32, $a:expr) => { std::arch::x86_64::_mm256_cvtps_epi32($a) };

    // Interleaved complex: lanes hold (re, im) pairs.
    // fmaddsub: even a*b - c, odd a*b + c. fmsubadd: the opposite.
    (avx2, f32, dup_even, $a:expr) => { std::arch::x86_64::_mm256_moveldup_ps($a) };
    (avx2, f32, dup_odd, $a:expr) => { std::arch::x86_64::_mm256_movehdup_ps($a) };
    (avx2, f32, swap_pairs, $a:expr) => { std::arch::x86_64::_mm256_permute_ps($a, 0xB1) };
    (avx2, f32, fmaddsub, $a:expr, $b:expr, $c:expr) => {
        std::arch::x86_64::_mm256_addsub_ps(std::arch::x86_64::_mm256_mul_ps($a, $b), $c)
    };
    (avx2, f32, fmsubadd, $a:expr, $b:expr, $c:expr) => {
        std::arch::x86_64::_mm256_addsub_ps(
            std::arch::x86_64::_mm256_mul_ps($a, $b),
            $crate::simd_primitive!(avx2, f32, neg, $c),
        )
    };

    // --- f64 ---
    (avx2, f64, lanes) => { 4 };
    (avx2, f64, zero) => { std::arch::x86_64::_mm256_setzero_pd() };
    (avx2, f64, splat, $v:expr) => { std::arch::x86_64::_mm256_set1_pd($v) };
    (avx2, f64, load, $p:expr) => { std::arch::x86_64::_mm256_loadu_pd($p) };
    (avx2, f64, store, $p:expr, $v:expr) => { std::arch::x86_64::_mm256_storeu_pd($p, $v) };
    (avx2, f64, add, $a:expr, $b:expr) => { std::arch::x86_64::_mm256_add_pd($a, $b) };
    (avx2, f64, sub, $a:expr, $b:expr) => { std::arch::x86_64::_mm256_sub_pd($a, $b) };
    (avx2, f64, mul, $a:expr, $b:expr) => { std::arch::x86_64::_mm256_mul_pd($a, $b) };
    (avx2, f64, div, $a:expr, $b:expr) => { std::arch::x86_64::_mm256_div_pd($a, $b) };
    (avx2, f64, fma, $a:expr, $b:expr, $c:expr) => {
        std::arch::x86_64::_mm256_add_pd(std::arch::x86_64::_mm256_mul_pd($a, $b), $c)
    };
    (avx2, f64, scalar_fma, $a:expr, $b:expr, $c:expr) => { $a * $b + $c };
    (avx2, f64, neg, $a:expr) => { std::arch::x86_64::_mm256_xor_pd($a, std::arch::x86_64::_mm256_set1_pd(-0.0)) };
    (avx2, f64, abs, $a:expr) => { std::arch::x86_64::_mm256_andnot_pd(std::arch::x86_64::_mm256_set1_pd(-0.0), $a) };
    (avx2, f64, sqrt, $a:expr) => { std::arch::x86_64::_mm256_sqrt_pd($a) };
    (avx2, f64, max, $a:expr, $b:expr) => { std::arch::x86_64::_mm256_max_pd($a, $b) };
    (avx2, f64, min, $a:expr, $b:expr) => { std::arch::x86_64::_mm256_min_pd($a, $b) };
    (avx2, f64, dup_even, $a:expr) => { std::arch::x86_64::_mm256_movedup_pd($a) };
    (avx2, f64, dup_odd, $a:expr) => { std::arch::x86_64::_mm256_permute_pd($a, 0xF) };
    (avx2, f64, swap_pairs, $a:expr) => { std::arch::x86_64::_mm256_permute_pd($a, 0x5) };
    (avx2, f64, fmaddsub, $a:expr, $b:expr, $c:expr) => {
        std::arch::x86_64::_mm256_addsub_pd(std::arch::x86_64::_mm256_mul_pd($a, $b), $c)
    };
    (avx2, f64, fmsubadd, $a:expr, $b:expr, $c:expr) => {
        std::arch::x86_64::_mm256_addsub_pd(
            std::arch::x86_64::_mm256_mul_pd($a, $b),
            $crate::simd_primitive!(avx2, f64, neg, $c),
        )
    };
    (avx2, f64, reduce_sum, $v:expr) => {
        {
            let v = $v;
            let lo = std::arch::x86_64::_mm256_castpd256_pd128(v);
            let hi = std::arch::x86_64::_mm256_extractf128_pd(v, 1);
            $crate::simd_primitive!(sse2, f64, reduce_sum, std::arch::x86_64::_mm_add_pd(lo, hi))
        }
    };
    (avx2, f64, reduce_max, $v:expr) => {
        {
            let v = $v;
            let lo = std::arch::x86_64::_mm256_castpd256_pd128(v);
            let hi = std::arch::x86_64::_mm256_extractf128_pd(v, 1);
            $crate::simd_primitive!(sse2, f64, reduce_max, std::arch::x86_64::_mm_max_pd(lo, hi))
        }
    };
    (avx2, f64, reduce_min, $v:expr) => {
        {
            let v = $v;
            let lo = std::arch::x86_64::_mm256_castpd256_pd128(v);
            let hi = std::arch::x86_64::_mm256_extractf128_pd(v, 1);
            $crate::simd_primitive!(sse2, f64, reduce_min, std::arch::x86_64::_mm_min_pd(lo, hi))
        }
    };

    // --- Integer primitives for exp ---
    (avx2, i32, splat, $v:expr) => { std::arch::x86_64::_mm256_set1_epi32($v) };
    (avx2, i32, add, $a:expr, $b:expr) => { std::arch::x86_64::_mm256_add_epi32($a, $b) };
    (avx2, i32, shl_23, $a:expr) => { std::arch::x86_64::_mm256_slli_epi32($a, 23) };
    (avx2, i32, sub, $a:expr, $b:expr) => { std::arch::x86_64::_mm256_sub_epi32($a, $b) };
    (avx2, i32, sra_1, $a:expr) => { std::arch::x86_64::_mm256_srai_epi32($a, 1) };
    (avx2, i32, cast_f32, $a:expr) => { std::arch::x86_64::_mm256_cvtepi32_ps($a) };
    (avx2, i32, cast_bits_f32, $a:expr) => { std::arch::x86_64::_mm256_castsi256_ps($a) };

    // ========================================================================
    // AVX-512F (512-bit, FMA included)
    // ========================================================================

    // --- f32 ---
    (avx512, f32, lanes) => { 16 };
    (avx512, f32, zero) => { std::arch::x86_64::_mm512_setzero_ps() };
    (avx512, f32, splat, $v:expr) => { std::arch::x86_64::_mm512_set1_ps($v) };
    (avx512, f32, load, $p:expr) => { std::arch::x86_64::_mm512_loadu_ps($p) };
    (avx512, f32, store, $p:expr, $v:expr) => { std::arch::x86_64::_mm512_storeu_ps($p, $v) };
    (avx512, f32, add, $a:expr, $b:expr) => { std::arch::x86_64::_mm512_add_ps($a, $b) };
    (avx512, f32, sub, $a:expr, $b:expr) => { std::arch::x86_64::_mm512_sub_ps($a, $b) };
    (avx512, f32, mul, $a:expr, $b:expr) => { std::arch::x86_64::_mm512_mul_ps($a, $b) };
    (avx512, f32, div, $a:expr, $b:expr) => { std::arch::x86_64::_mm512_div_ps($a, $b) };
    (avx512, f32, fma, $a:expr, $b:expr, $c:expr) => { std::arch::x86_64::_mm512_fmadd_ps($a, $b, $c) };
    (avx512, f32, scalar_fma, $a:expr, $b:expr, $c:expr) => { $a.mul_add($b, $c) };
    // AVX-512F has no float xor; flip the sign bit in the integer domain.
    (avx512, f32, neg, $a:expr) => {
        std::arch::x86_64::_mm512_castsi512_ps(std::arch::x86_64::_mm512_xor_si512(
            std::arch::x86_64::_mm512_castps_si512($a),
            std::arch::x86_64::_mm512_set1_epi32(i32::MIN),
        ))
    };
    (avx512, f32, abs, $a:expr) => { std::arch::x86_64::_mm512_abs_ps($a) };
    (avx512, f32, sqrt, $a:expr) => { std::arch::x86_64::_mm512_sqrt_ps($a) };
    (avx512, f32, max, $a:expr, $b:expr) => { std::arch::x86_64::_mm512_max_ps($a, $b) };
    (avx512, f32, min, $a:expr, $b:expr) => { std::arch::x86_64::_mm512_min_ps($a, $b) };
    (avx512, f32, reduce_sum, $v:expr) => { std::arch::x86_64::_mm512_reduce_add_ps($v) };
    (avx512, f32, reduce_max, $v:expr) => { std::arch::x86_64::_mm512_reduce_max_ps($v) };
    (avx512, f32, reduce_min, $v:expr) => { std::arch::x86_64::_mm512_reduce_min_ps($v) };
    (avx512, f32, round_nearest, $a:expr) => {
        std::arch::x86_64::_mm512_roundscale_ps($a, std::arch::x86_64::_MM_FROUND_TO_NEAREST_INT | std::arch::x86_64::_MM_FROUND_NO_EXC)
    };
    (avx512, f32, cvt_to_i32, $a:expr) => { std::arch::x86_64::_mm512_cvtps_epi32($a) };
    (avx512, f32, dup_even, $a:expr) => { std::arch::x86_64::_mm512_moveldup_ps($a) };
    (avx512, f32, dup_odd, $a:expr) => { std::arch::x86_64::_mm512_movehdup_ps($a) };
    (avx512, f32, swap_pairs, $a:expr) => { std::arch::x86_64::_mm512_permute_ps($a, 0xB1) };
    (avx512, f32, fmaddsub, $a:expr, $b:expr, $c:expr) => { std::arch::x86_64::_mm512_fmaddsub_ps($a, $b, $c) };
    (avx512, f32, fmsubadd, $a:expr, $b:expr, $c:expr) => { std::arch::x86_64::_mm512_fmsubadd_ps($a, $b, $c) };

    // --- f64 ---
    (avx512, f64, lanes) => { 8 };
    (avx512, f64, zero) => { std::arch::x86_64::_mm512_setzero_pd() };
    (avx512, f64, splat, $v:expr) => { std::arch::x86_64::_mm512_set1_pd($v) };
    (avx512, f64, load, $p:expr) => { std::arch::x86_64::_mm512_loadu_pd($p) };
    (avx512, f64, store, $p:expr, $v:expr) => { std::arch::x86_64::_mm512_storeu_pd($p, $v) };
    (avx512, f64, add, $a:expr, $b:expr) => { std::arch::x86_64::_mm512_add_pd($a, $b) };
    (avx512, f64, sub, $a:expr, $b:expr) => { std::arch::x86_64::_mm512_sub_pd($a, $b) };
    (avx512, f64, mul, $a:expr, $b:expr) => { std::arch::x86_64::_mm512_mul_pd($a, $b) };
    (avx512, f64, div, $a:expr, $b:expr) => { std::arch::x86_64::_mm512_div_pd($a, $b) };
    (avx512, f64, fma, $a:expr, $b:expr, $c:expr) => { std::arch::x86_64::_mm512_fmadd_pd($a, $b, $c) };
    (avx512, f64, scalar_fma, $a:expr, $b:expr, $c:expr) => { $a.mul_add($b, $c) };
    (avx512, f64, neg, $a:expr) => {
        std::arch::x86_64::_mm512_castsi512_pd(std::arch::x86_64::_mm512_xor_si512(
            std::arch::x86_64::_mm512_castpd_si512($a),
            std::arch::x86_64::_mm512_set1_epi64(i64::MIN),
        ))
    };
    (avx512, f64, abs, $a:expr) => { std::arch::x86_64::_mm512_abs_pd($a) };
    (avx512, f64, sqrt, $a:expr) => { std::arch::x86_64::_mm512_sqrt_pd($a) };
    (avx512, f64, max, $a:expr, $b:expr) => { std::arch::x86_64::_mm512_max_pd($a, $b) };
    (avx512, f64, min, $a:expr, $b:expr) => { std::arch::x86_64::_mm512_min_pd($a, $b) };
    (avx512, f64, dup_even, $a:expr) => { std::arch::x86_64::_mm512_movedup_pd($a) };
    (avx512, f64, dup_odd, $a:expr) => { std::arch::x86_64::_mm512_permute_pd($a, 0xFF) };
    (avx512, f64, swap_pairs, $a:expr) => { std::arch::x86_64::_mm512_permute_pd($a, 0x55) };
    (avx512, f64, fmaddsub, $a:expr, $b:expr, $c:expr) => { std::arch::x86_64::_mm512_fmaddsub_pd($a, $b, $c) };
    (avx512, f64, fmsubadd, $a:expr, $b:expr, $c:expr) => { std::arch::x86_64::_mm512_fmsubadd_pd($a, $b, $c) };
    (avx512, f64, reduce_sum, $v:expr) => { std::arch::x86_64::_mm512_reduce_add_pd($v) };
    (avx512, f64, reduce_max, $v:expr) => { std::arch::x86_64::_mm512_reduce_max_pd($v) };
    (avx512, f64, reduce_min, $v:expr) => { std::arch::x86_64::_mm512_reduce_min_pd($v) };

    // --- Integer primitives for exp ---
    (avx512, i32, splat, $v:expr) => { std::arch::x86_64::_mm512_set1_epi32($v) };
    (avx512, i32, add, $a:expr, $b:expr) => { std::arch::x86_64::_mm512_add_epi32($a, $b) };
    (avx512, i32, shl_23, $a:expr) => { std::arch::x86_64::_mm512_slli_epi32($a, 23) };
    (avx512, i32, sub, $a:expr, $b:expr) => { std::arch::x86_64::_mm512_sub_epi32($a, $b) };
    (avx512, i32, sra_1, $a:expr) => { std::arch::x86_64::_mm512_srai_epi32($a, 1) };
    (avx512, i32, cast_f32, $a:expr) => { std::arch::x86_64::_mm512_cvtepi32_ps($a) };
    (avx512, i32, cast_bits_f32, $a:expr) => { std::arch::x86_64::_mm512_castsi512_ps($a) };

    // ========================================================================
    // NEON (aarch64, 128-bit, FMA always available)
    // ========================================================================

    // --- f32 ---
    (neon, f32, lanes) => { 4 };
    (neon, f32, zero) => { unsafe { std::arch::aarch64::vdupq_n_f32(0.0) } };
    (neon, f32, splat, $v:expr) => { unsafe { std::arch::aarch64::vdupq_n_f32($v) } };
    (neon, f32, load, $p:expr) => { unsafe { std::arch::aarch64::vld1q_f32($p) } };
    (neon, f32, store, $p:expr, $v:expr) => { unsafe { std::arch::aarch64::vst1q_f32($p, $v) } };
    (neon, f32, add, $a:expr, $b:expr) => { unsafe { std::arch::aarch64::vaddq_f32($a, $b) } };
    (neon, f32, sub, $a:expr, $b:expr) => { unsafe { std::arch::aarch64::vsubq_f32($a, $b) } };
    (neon, f32, mul, $a:expr, $b:expr) => { unsafe { std::arch::aarch64::vmulq_f32($a, $b) } };
    (neon, f32, div, $a:expr, $b:expr) => { unsafe { std::arch::aarch64::vdivq_f32($a, $b) } };
    (neon, f32, fma, $a:expr, $b:expr, $c:expr) => { unsafe { std::arch::aarch64::vfmaq_f32($c, $a, $b) } }; // c + a * b
    (neon, f32, scalar_fma, $a:expr, $b:expr, $c:expr) => { $a.mul_add($b, $c) };
    (neon, f32, neg, $a:expr) => { unsafe { std::arch::aarch64::vnegq_f32($a) } };
    (neon, f32, abs, $a:expr) => { unsafe { std::arch::aarch64::vabsq_f32($a) } };
    (neon, f32, sqrt, $a:expr) => { unsafe { std::arch::aarch64::vsqrtq_f32($a) } };
    (neon, f32, max, $a:expr, $b:expr) => { unsafe { std::arch::aarch64::vmaxnmq_f32($a, $b) } };
    (neon, f32, min, $a:expr, $b:expr) => { unsafe { std::arch::aarch64::vminnmq_f32($a, $b) } };
    (neon, f32, reduce_sum, $v:expr) => { unsafe { std::arch::aarch64::vaddvq_f32($v) } };
    (neon, f32, reduce_max, $v:expr) => { unsafe { std::arch::aarch64::vmaxnmvq_f32($v) } };
    (neon, f32, reduce_min, $v:expr) => { unsafe { std::arch::aarch64::vminnmvq_f32($v) } };

    // --- f64 ---
    (neon, f64, lanes) => { 2 };
    (neon, f64, zero) => { unsafe { std::arch::aarch64::vdupq_n_f64(0.0) } };
    (neon, f64, splat, $v:expr) => { unsafe { std::arch::aarch64::vdupq_n_f64($v) } };
    (neon, f64, load, $p:expr) => { unsafe { std::arch::aarch64::vld1q_f64($p) } };
    (neon, f64, store, $p:expr, $v:expr) => { unsafe { std::arch::aarch64::vst1q_f64($p, $v) } };
    (neon, f64, add, $a:expr, $b:expr) => { unsafe { std::arch::aarch64::vaddq_f64($a, $b) } };
    (neon, f64, sub, $a:expr, $b:expr) => { unsafe { std::arch::aarch64::vsubq_f64($a, $b) } };
    (neon, f64, mul, $a:expr, $b:expr) => { unsafe { std::arch::aarch64::vmulq_f64($a, $b) } };
    (neon, f64, div, $a:expr, $b:expr) => { unsafe { std::arch::aarch64::vdivq_f64($a, $b) } };
    (neon, f64, fma, $a:expr, $b:expr, $c:expr) => { unsafe { std::arch::aarch64::vfmaq_f64($c, $a, $b) } };
    (neon, f64, scalar_fma, $a:expr, $b:expr, $c:expr) => { $a.mul_add($b, $c) };
    (neon, f64, neg, $a:expr) => { unsafe { std::arch::aarch64::vnegq_f64($a) } };
    (neon, f64, abs, $a:expr) => { unsafe { std::arch::aarch64::vabsq_f64($a) } };
    (neon, f64, sqrt, $a:expr) => { unsafe { std::arch::aarch64::vsqrtq_f64($a) } };
    (neon, f64, max, $a:expr, $b:expr) => { unsafe { std::arch::aarch64::vmaxnmq_f64($a, $b) } };
    (neon, f64, min, $a:expr, $b:expr) => { unsafe { std::arch::aarch64::vminnmq_f64($a, $b) } };
    (neon, f64, reduce_sum, $v:expr) => { unsafe { std::arch::aarch64::vaddvq_f64($v) } };
    (neon, f64, reduce_max, $v:expr) => { unsafe { std::arch::aarch64::vmaxnmvq_f64($v) } };
    (neon, f64, reduce_min, $v:expr) => { unsafe { std::arch::aarch64::vminnmvq_f64($v) } };
}
