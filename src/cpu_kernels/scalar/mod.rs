//! Portable reference kernels. Always compiled; every slot starts here.

pub mod complex;
pub mod half;
pub mod real;
