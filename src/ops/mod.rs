//! Free-function entry points.
//!
//! Each function resolves the process-wide table for its domain (built on
//! first use) and calls through it. Mismatched lengths are reconciled to
//! the shortest slice; nothing allocates.
//!
//! ```
//! use dsp_kernels::ops::real;
//!
//! let a = [1.0f32, 2.0, 3.0];
//! let b = [4.0f32, 5.0, 6.0, 7.0];
//! let mut out = [0.0f32; 3];
//! real::add(&a, &b, &mut out);
//! assert_eq!(out, [5.0, 7.0, 9.0]);
//! assert_eq!(real::dot(&a, &b), 32.0);
//! ```

pub mod complex;
pub mod half;
pub mod real;

/// Generates `pub fn name<T: Real>(args) -> ret` forwarding to the same
/// method on `$table::<T>::get()`.
macro_rules! forward_generic {
    ($table:ident; $( $(#[$m:meta])* fn $name:ident ( $($arg:ident : $ty:ty),* ) $(-> $ret:ty)?; )*) => {
        $(
            $(#[$m])*
            #[inline]
            pub fn $name<T: Real>($($arg: $ty),*) $(-> $ret)? {
                $table::<T>::get().$name($($arg),*)
            }
        )*
    };
}

pub(crate) use forward_generic;
