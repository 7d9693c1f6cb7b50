use crate::cpu_kernels::neon::{neon_f32, neon_f64};
use crate::cpu_kernels::scalar;

// NEON is mandatory on aarch64, so these never skip.

#[test]
fn test_neon_add_f32() {
    let a: Vec<f32> = (0..10).map(|i| i as f32).collect();
    let b = vec![2.0f32; 10];
    let mut out = vec![0.0; 10];

    unsafe { neon_f32::add(&a, &b, &mut out) };

    let expected: Vec<f32> = (0..10).map(|i| i as f32 + 2.0).collect();
    assert_eq!(out, expected);
}

#[test]
fn test_neon_min_max_skip_nan() {
    let a = [4.0f64, f64::NAN, -2.0, 8.0, f64::NAN];
    assert_eq!(unsafe { neon_f64::min(&a) }, -2.0);
    assert_eq!(unsafe { neon_f64::max(&a) }, 8.0);
}

#[test]
fn test_neon_sqrt_matches_scalar() {
    let a: Vec<f32> = (0..13).map(|i| i as f32 * 1.25).collect();
    let mut out = vec![0.0f32; 13];
    let mut expected = out.clone();
    unsafe { neon_f32::sqrt(&a, &mut out) };
    scalar::real::sqrt(&a, &mut expected);
    assert_eq!(out, expected);
}
