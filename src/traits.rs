use std::fmt::Debug;

use crate::dispatch::{Capabilities, ComplexKernels, ComplexOverrides, RealKernels, RealOverrides, Tier};

/// Core element trait for the real domains.
///
/// Provides the scalar operations the reference kernels are written against
/// (f32 and f64). Compile-time monomorphization, zero runtime overhead.
pub trait Element:
    Debug + Clone + Copy + Send + Sync + Default + PartialOrd + 'static
    + std::ops::Add<Output = Self>
    + std::ops::Sub<Output = Self>
    + std::ops::Mul<Output = Self>
    + std::ops::Div<Output = Self>
    + std::ops::Neg<Output = Self>
    + std::ops::AddAssign
    + std::ops::MulAssign
{
    const ZERO: Self;
    const ONE: Self;
    const INFINITY: Self;
    const NEG_INFINITY: Self;
    /// Magnitude below which `normalize` leaves its input unscaled.
    const NORM_THRESHOLD: Self;
    const NAME: &'static str;

    fn from_f64(v: f64) -> Self;
    fn to_f64(self) -> f64;
    fn from_usize(n: usize) -> Self;

    /// Fused multiply-add: `self * a + b` with a single rounding.
    fn mul_add(self, a: Self, b: Self) -> Self;

    fn sqrt(self) -> Self;
    fn exp(self) -> Self;
    fn tanh(self) -> Self;
    fn abs(self) -> Self;
    fn recip(self) -> Self;
    fn is_nan(self) -> bool;
}

macro_rules! impl_element {
    ($t:ident, $name:literal) => {
        impl Element for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const INFINITY: Self = $t::INFINITY;
            const NEG_INFINITY: Self = $t::NEG_INFINITY;
            const NORM_THRESHOLD: Self = 1e-10;
            const NAME: &'static str = $name;

            #[inline(always)] fn from_f64(v: f64) -> Self { v as $t }
            #[inline(always)] fn to_f64(self) -> f64 { self as f64 }
            #[inline(always)] fn from_usize(n: usize) -> Self { n as $t }

            #[inline(always)] fn mul_add(self, a: Self, b: Self) -> Self { $t::mul_add(self, a, b) }

            #[inline(always)] fn sqrt(self) -> Self { $t::sqrt(self) }
            #[inline(always)] fn exp(self) -> Self { $t::exp(self) }
            #[inline(always)] fn tanh(self) -> Self { $t::tanh(self) }
            #[inline(always)] fn abs(self) -> Self { $t::abs(self) }
            #[inline(always)] fn recip(self) -> Self { 1.0 / self }
            #[inline(always)] fn is_nan(self) -> bool { $t::is_nan(self) }
        }
    };
}

impl_element!(f32, "f32");
impl_element!(f64, "f64");

mod sealed {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Element types with a real and a complex kernel domain.
///
/// Sealed: implemented for `f32` and `f64` only.
pub trait Real: Element + sealed::Sealed {
    /// Process-wide real-domain table for this type.
    fn real_kernels() -> &'static RealKernels<Self>;

    /// Process-wide complex-domain table for `Complex<Self>`.
    fn complex_kernels() -> &'static ComplexKernels<Self>;

    /// Real kernels compiled for `tier`, if this target has any.
    ///
    /// # Safety
    /// The returned kernels execute `tier`'s instructions. The caller must
    /// ensure `tier.is_supported(caps)` and that `caps` describes the host.
    #[doc(hidden)]
    unsafe fn real_overrides(tier: Tier, caps: &Capabilities) -> Option<RealOverrides<Self>>;

    /// Complex kernels compiled for `tier`.
    ///
    /// # Safety
    /// Same contract as [`Real::real_overrides`].
    #[doc(hidden)]
    unsafe fn complex_overrides(tier: Tier, caps: &Capabilities) -> Option<ComplexOverrides<Self>>;
}
