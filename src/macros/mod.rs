//! Macro system for the SIMD kernels.
//!
//! Three layers:
//! 1. `simd_primitive!` (hardware primitives)
//! 2. `define_real_ops!`, `define_exp_ops!`, `define_complex_ops!` and
//!    `define_exp_f32!` (operator logic)
//! 3. `expand_isa_impls!` (per ISA/element expansion)

#[macro_use]
pub mod simd_primitive;
#[macro_use]
pub mod math_templates;
#[macro_use]
pub mod operator_templates;
#[macro_use]
pub mod expand;
