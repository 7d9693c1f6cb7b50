//! dsp-kernels: runtime-dispatched SIMD kernels for signal processing.
//!
//! This crate provides vector arithmetic, reductions and DSP composites over
//! caller-owned buffers with:
//! - **Runtime tier selection**: the host is probed once; every operation is
//!   bound to the widest tier (SSE2, AVX2, AVX2+FMA, AVX-512, NEON) that
//!   implements it, falling back to the scalar reference kernels.
//! - **Five numeric domains**: `f32`, `f64`, `Complex<f32>`, `Complex<f64>`
//!   and binary16 ([`Half`]).
//! - **Forgiving lengths**: mismatched slices are processed up to the
//!   shortest one; only explicit bad offsets panic.
//! - **A bit-exact binary16 codec** ([`binary16`]).
//!
//! # Quick Start
//!
//! ```
//! use dsp_kernels::{ops, RealKernels, Tier};
//!
//! let x = [3.0f32, 4.0];
//! let mut unit = [0.0f32; 2];
//! ops::real::normalize(&x, &mut unit);
//! assert!((unit[0] - 0.6).abs() < 1e-6);
//!
//! // Inspect what the process-wide f32 table was bound to.
//! let table = RealKernels::<f32>::get();
//! assert!(table.tier() >= Tier::Scalar);
//! ```

#[macro_use]
pub mod macros;

pub mod binary16;
pub mod config;
mod contract;
pub mod cpu_kernels;
pub mod dispatch;
pub mod error;
pub mod ops;
pub mod traits;

pub use binary16::{Half, HalfClass};
pub use config::DispatchConfig;
pub use dispatch::{
    capabilities, configure, init, Capabilities, ComplexKernels, Feature, HalfKernels, RealKernels,
    Slot, Tier,
};
pub use error::{DispatchError, DispatchResult};
pub use num_complex::Complex;
pub use traits::{Element, Real};
