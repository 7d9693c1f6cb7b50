/// Expands the operator templates for one ISA and element type.
///
/// Generates `pub mod $module_name` holding every kernel plus two
/// constructors, `real_overrides()` and `complex_overrides()`, that bind
/// them into dispatch override sets. Optional trailing flags add kernels
/// only some ISAs have:
/// - `exp`: vector `exp` and `sigmoid` (f32 only)
/// - `cmul`: interleaved complex `mul` and `mul_conj`
///
/// The constructors are `unsafe`: the returned fn pointers may only be
/// called on a host that supports `$feat`.
#[doc(hidden)]
#[macro_export]
macro_rules! expand_isa_impls {
    ($module_name:ident, $isa:ident, $elem:ident, $feat:literal $(, $extra:ident)*) => {
        pub mod $module_name {
            use $crate::cpu_kernels::{interleaved, interleaved_mut};
            use $crate::dispatch::{ComplexOverrides, RealOverrides};

            $crate::define_real_ops!($isa, $elem, $feat);
            $( $crate::expand_isa_impls!(@define $extra, $isa, $elem, $feat); )*

            /// # Safety
            /// The host must support the target features of this module.
            #[allow(unused_unsafe, unused_mut)]
            pub(crate) unsafe fn real_overrides() -> RealOverrides<$elem> {
                let mut overrides = RealOverrides::<$elem> {
                    add: Some(|a, b, out| unsafe { add(a, b, out) }),
                    sub: Some(|a, b, out| unsafe { sub(a, b, out) }),
                    mul: Some(|a, b, out| unsafe { mul(a, b, out) }),
                    div: Some(|a, b, out| unsafe { div(a, b, out) }),
                    add_assign: Some(|dst, src| unsafe { add_assign(dst, src) }),
                    axpy: Some(|alpha, x, y| unsafe { axpy(alpha, x, y) }),
                    scale: Some(|a, s, out| unsafe { scale(a, s, out) }),
                    add_scalar: Some(|a, s, out| unsafe { add_scalar(a, s, out) }),
                    mul_add: Some(|a, b, c, out| unsafe { mul_add(a, b, c, out) }),
                    abs: Some(|a, out| unsafe { abs(a, out) }),
                    neg: Some(|a, out| unsafe { neg(a, out) }),
                    sqrt: Some(|a, out| unsafe { sqrt(a, out) }),
                    clamp: Some(|a, lo, hi, out| unsafe { clamp(a, lo, hi, out) }),
                    relu: Some(|a, out| unsafe { relu(a, out) }),
                    sum: Some(|a| unsafe { sum(a) }),
                    sum_squares: Some(|a| unsafe { sum_squares(a) }),
                    min: Some(|a| unsafe { min(a) }),
                    max: Some(|a| unsafe { max(a) }),
                    dot: Some(|a, b| unsafe { dot(a, b) }),
                    sq_euclidean: Some(|a, b| unsafe { sq_euclidean(a, b) }),
                    cubic_interp_dot: Some(|h, a, b, c, d, x| unsafe { cubic_interp_dot(h, a, b, c, d, x) }),
                    ..RealOverrides::<$elem>::NONE
                };
                $( $crate::expand_isa_impls!(@bind_real $extra, overrides); )*
                overrides
            }

            /// Complex kernels that are plain real kernels over the
            /// interleaved `(re, im)` view.
            ///
            /// # Safety
            /// The host must support the target features of this module.
            #[allow(unused_unsafe, unused_mut)]
            pub(crate) unsafe fn complex_overrides() -> ComplexOverrides<$elem> {
                let mut overrides = ComplexOverrides::<$elem> {
                    add: Some(|a, b, out| unsafe { add(interleaved(a), interleaved(b), interleaved_mut(out)) }),
                    sub: Some(|a, b, out| unsafe { sub(interleaved(a), interleaved(b), interleaved_mut(out)) }),
                    add_assign: Some(|dst, src| unsafe { add_assign(interleaved_mut(dst), interleaved(src)) }),
                    scale_real: Some(|a, s, out| unsafe { scale(interleaved(a), s, interleaved_mut(out)) }),
                    sum_abs_sq: Some(|a| unsafe { sum_squares(interleaved(a)) }),
                    sq_euclidean: Some(|a, b| unsafe { sq_euclidean(interleaved(a), interleaved(b)) }),
                    ..ComplexOverrides::<$elem>::NONE
                };
                $( $crate::expand_isa_impls!(@bind_complex $extra, overrides); )*
                overrides
            }
        }
    };

    (@define exp, $isa:ident, $elem:ident, $feat:literal) => {
        $crate::define_exp_f32!($isa, $feat);
        $crate::define_exp_ops!($isa, $feat);
    };
    (@define cmul, $isa:ident, $elem:ident, $feat:literal) => {
        $crate::define_complex_ops!($isa, $elem, $feat);
    };

    (@bind_real exp, $overrides:ident) => {
        $overrides.exp = Some(|a, out| unsafe { exp(a, out) });
        $overrides.sigmoid = Some(|a, out| unsafe { sigmoid(a, out) });
    };
    (@bind_real cmul, $overrides:ident) => {};

    (@bind_complex exp, $overrides:ident) => {};
    (@bind_complex cmul, $overrides:ident) => {
        $overrides.mul = Some(|a, b, out| unsafe { complex_mul(a, b, out) });
        $overrides.mul_conj = Some(|a, b, out| unsafe { complex_mul_conj(a, b, out) });
    };
}
