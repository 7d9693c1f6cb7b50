//! # CPU kernels
//!
//! One module per instruction-set tier, each generated from the macro
//! layers in `crate::macros`:
//!
//! | Module | Tier(s) | Target |
//! |---|---|---|
//! | `scalar` | `Scalar` | everywhere |
//! | `sse2` | `Sse2` | x86_64 |
//! | `avx2` | `Avx2`, `Avx2Fma` (+ F16C half) | x86_64 |
//! | `avx512` | `Avx512` | x86_64 |
//! | `neon` | `Neon` | aarch64 |
//!
//! The per-element functions below (`for_f32::real_overrides`, ...) map a
//! tier to the override set compiled for it. They return `None` for tiers
//! this target has no code for, which is how unimplemented operations fall
//! through to the tier below.

use num_complex::Complex;

use crate::dispatch::{Capabilities, HalfOverrides, Tier};

pub mod scalar;

#[cfg(target_arch = "x86_64")]
pub mod avx2;
#[cfg(target_arch = "x86_64")]
pub mod avx512;
#[cfg(target_arch = "aarch64")]
pub mod neon;
#[cfg(target_arch = "x86_64")]
pub mod sse2;

/// View `n` complex values as `2n` interleaved `re, im` scalars.
#[inline(always)]
pub(crate) fn interleaved<T>(s: &[Complex<T>]) -> &[T] {
    // SAFETY: `Complex<T>` is `#[repr(C)] { re: T, im: T }`, so it has the
    // size and alignment of `[T; 2]`.
    unsafe { std::slice::from_raw_parts(s.as_ptr().cast::<T>(), s.len() * 2) }
}

#[inline(always)]
pub(crate) fn interleaved_mut<T>(s: &mut [Complex<T>]) -> &mut [T] {
    // SAFETY: as for `interleaved`; the borrow is unique.
    unsafe { std::slice::from_raw_parts_mut(s.as_mut_ptr().cast::<T>(), s.len() * 2) }
}

macro_rules! tier_overrides {
    ($module:ident, $elem:ident,
     $sse2:ident, $avx2:ident, $avx2fma:ident, $avx512:ident, $neon:ident) => {
        pub(crate) mod $module {
            use crate::dispatch::{Capabilities, ComplexOverrides, RealOverrides, Tier};

            /// # Safety
            /// The host must support `tier`.
            pub(crate) unsafe fn real_overrides(
                tier: Tier,
                _caps: &Capabilities,
            ) -> Option<RealOverrides<$elem>> {
                // SAFETY: forwarded caller contract.
                unsafe {
                    match tier {
                        #[cfg(target_arch = "x86_64")]
                        Tier::Sse2 => Some(super::sse2::$sse2::real_overrides()),
                        #[cfg(target_arch = "x86_64")]
                        Tier::Avx2 => Some(super::avx2::$avx2::real_overrides()),
                        #[cfg(target_arch = "x86_64")]
                        Tier::Avx2Fma => Some(super::avx2::$avx2fma::real_overrides()),
                        #[cfg(target_arch = "x86_64")]
                        Tier::Avx512 => Some(super::avx512::$avx512::real_overrides()),
                        #[cfg(target_arch = "aarch64")]
                        Tier::Neon => Some(super::neon::$neon::real_overrides()),
                        _ => None,
                    }
                }
            }

            /// # Safety
            /// The host must support `tier`.
            pub(crate) unsafe fn complex_overrides(
                tier: Tier,
                _caps: &Capabilities,
            ) -> Option<ComplexOverrides<$elem>> {
                // SAFETY: forwarded caller contract.
                unsafe {
                    match tier {
                        #[cfg(target_arch = "x86_64")]
                        Tier::Sse2 => Some(super::sse2::$sse2::complex_overrides()),
                        #[cfg(target_arch = "x86_64")]
                        Tier::Avx2 => Some(super::avx2::$avx2::complex_overrides()),
                        #[cfg(target_arch = "x86_64")]
                        Tier::Avx2Fma => Some(super::avx2::$avx2fma::complex_overrides()),
                        #[cfg(target_arch = "x86_64")]
                        Tier::Avx512 => Some(super::avx512::$avx512::complex_overrides()),
                        #[cfg(target_arch = "aarch64")]
                        Tier::Neon => Some(super::neon::$neon::complex_overrides()),
                        _ => None,
                    }
                }
            }
        }
    };
}

tier_overrides!(for_f32, f32, sse2_f32, avx2_f32, avx2fma_f32, avx512_f32, neon_f32);
tier_overrides!(for_f64, f64, sse2_f64, avx2_f64, avx2fma_f64, avx512_f64, neon_f64);

/// Half kernels compiled for `tier`. Only the AVX2 tier has any, and only
/// when the host also has F16C.
///
/// # Safety
/// The host must support `tier` and `caps` must describe the host.
#[allow(unused_variables)]
pub(crate) unsafe fn half_overrides(tier: Tier, caps: &Capabilities) -> Option<HalfOverrides> {
    match tier {
        #[cfg(target_arch = "x86_64")]
        // SAFETY: AVX2 tier implies AVX; F16C checked here.
        Tier::Avx2 if caps.has_f16c() => Some(unsafe { avx2::f16c::overrides() }),
        _ => None,
    }
}
