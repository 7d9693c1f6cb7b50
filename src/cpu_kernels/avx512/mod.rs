//! AVX-512F tier: 512-bit, fused multiply-add throughout.

crate::expand_isa_impls!(avx512_f32, avx512, f32, "avx512f", exp, cmul);
crate::expand_isa_impls!(avx512_f64, avx512, f64, "avx512f", cmul);
