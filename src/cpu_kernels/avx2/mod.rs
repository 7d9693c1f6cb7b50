//! AVX2 tiers (256-bit): plain AVX2 rounds every multiply and add
//! separately, AVX2+FMA fuses them. F16C half kernels ride on the AVX2 tier.

crate::expand_isa_impls!(avx2_f32, avx2, f32, "avx2", exp, cmul);
crate::expand_isa_impls!(avx2_f64, avx2, f64, "avx2", cmul);
crate::expand_isa_impls!(avx2fma_f32, avx2fma, f32, "avx2,fma", exp, cmul);
crate::expand_isa_impls!(avx2fma_f64, avx2fma, f64, "avx2,fma", cmul);

pub mod f16c;
