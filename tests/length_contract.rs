//! Mismatched lengths are reconciled to the shortest slice, empty inputs
//! give identities, and only explicit bad offsets panic.

use dsp_kernels::ops::{complex, half, real};
use dsp_kernels::{Complex, Half};
use proptest::prelude::*;

const SENTINEL: f32 = -12345.0;

fn lens() -> impl Strategy<Value = (Vec<f32>, Vec<f32>, usize)> {
    (
        prop::collection::vec(-100.0f32..100.0, 0..40),
        prop::collection::vec(-100.0f32..100.0, 0..40),
        0usize..40,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn binary_ops_match_truncated_inputs((a, b, out_len) in lens()) {
        let n = a.len().min(b.len()).min(out_len);

        let mut out = vec![SENTINEL; out_len];
        let mut truncated = vec![0.0f32; n];
        real::mul(&a, &b, &mut out);
        real::mul(&a[..n], &b[..n], &mut truncated);
        prop_assert_eq!(&out[..n], &truncated[..]);
        prop_assert!(out[n..].iter().all(|&v| v == SENTINEL));

        let m = a.len().min(b.len());
        prop_assert_eq!(real::dot(&a, &b), real::dot(&a[..m], &b[..m]));
        prop_assert_eq!(real::sq_euclidean(&a, &b), real::sq_euclidean(&a[..m], &b[..m]));
    }

    #[test]
    fn in_place_ops_leave_tail_untouched((a, b, _) in lens()) {
        let n = a.len().min(b.len());
        let mut dst = a.clone();
        real::add_assign(&mut dst, &b);
        for i in 0..n {
            prop_assert_eq!(dst[i], a[i] + b[i]);
        }
        prop_assert_eq!(&dst[n..], &a[n..]);

        let mut y = a.clone();
        real::axpy(0.5f32, &b, &mut y);
        prop_assert_eq!(&y[n..], &a[n..]);
    }

    #[test]
    fn cumulative_sum_returns_truncated_total((a, _, out_len) in lens()) {
        let n = a.len().min(out_len);
        let mut out = vec![SENTINEL; out_len];
        let total = real::cumulative_sum(&a, &mut out);
        let mut running = 0.0f32;
        for i in 0..n {
            running += a[i];
            prop_assert_eq!(out[i], running);
        }
        prop_assert_eq!(total, running);
        prop_assert!(out[n..].iter().all(|&v| v == SENTINEL));
    }

    #[test]
    fn convolution_output_is_clamped(
        signal in prop::collection::vec(-10.0f64..10.0, 0..30),
        kernel in prop::collection::vec(-10.0f64..10.0, 0..8),
        out_len in 0usize..30,
    ) {
        let valid = if kernel.is_empty() || kernel.len() > signal.len() {
            0
        } else {
            signal.len() - kernel.len() + 1
        };
        let n = valid.min(out_len);
        let mut out = vec![f64::MAX; out_len];
        real::convolve_valid(&signal, &kernel, &mut out);
        prop_assert!(out[n..].iter().all(|&v| v == f64::MAX));
        for i in 0..n {
            let k = kernel.len();
            let want: f64 = (0..k).map(|j| kernel[j] * signal[i + k - 1 - j]).sum();
            let scale: f64 = (0..k).map(|j| (kernel[j] * signal[i + k - 1 - j]).abs()).sum();
            prop_assert!((out[i] - want).abs() <= 1e-12 * (1.0 + scale));
        }
    }

    #[test]
    fn complex_mul_matches_truncated_inputs(
        a in prop::collection::vec((-5.0f64..5.0, -5.0f64..5.0), 0..20),
        b in prop::collection::vec((-5.0f64..5.0, -5.0f64..5.0), 0..20),
    ) {
        let a: Vec<Complex<f64>> = a.into_iter().map(|(r, i)| Complex::new(r, i)).collect();
        let b: Vec<Complex<f64>> = b.into_iter().map(|(r, i)| Complex::new(r, i)).collect();
        let n = a.len().min(b.len());
        let zero = Complex::new(0.0, 0.0);
        let mut out = vec![zero; a.len()];
        let mut truncated = vec![zero; n];
        complex::mul(&a, &b, &mut out);
        complex::mul(&a[..n], &b[..n], &mut truncated);
        prop_assert_eq!(&out[..n], &truncated[..]);
        prop_assert!(out[n..].iter().all(|&v| v == zero));
    }
}

#[test]
fn empty_inputs_give_identities() {
    let e: [f32; 0] = [];
    assert_eq!(real::sum(&e), 0.0);
    assert_eq!(real::sum_squares(&e), 0.0);
    assert_eq!(real::mean(&e), 0.0);
    assert_eq!(real::variance(&e), 0.0);
    assert_eq!(real::dot(&e, &e), 0.0);
    assert_eq!(real::euclidean_distance(&e, &e), 0.0);
    assert_eq!(real::cumulative_sum(&e, &mut []), 0.0);
    assert_eq!(real::min(&e), f32::INFINITY);
    assert_eq!(real::max(&e), f32::NEG_INFINITY);
    assert_eq!(real::min_index(&e), None);
    assert_eq!(real::max_index(&e), None);

    let z: [Complex<f64>; 0] = [];
    assert_eq!(complex::sum(&z), Complex::new(0.0, 0.0));
    assert_eq!(complex::dotc(&z, &z), Complex::new(0.0, 0.0));
    assert_eq!(complex::sum_abs_sq(&z), 0.0);

    let h: [Half; 0] = [];
    assert_eq!(half::sum(&h), 0.0);
    assert_eq!(half::dot(&h, &h), 0.0);
}

#[test]
fn one_side_empty_processes_nothing() {
    let a = [1.0f64, 2.0, 3.0];
    let mut out = [7.0f64; 3];
    real::add(&a, &[], &mut out);
    assert_eq!(out, [7.0; 3]);
    assert_eq!(real::dot(&a, &[]), 0.0);
}

#[test]
fn normalize_handles_tiny_and_single() {
    let tiny = [1e-12f64, -1e-12];
    let mut out = [0.0f64; 2];
    real::normalize(&tiny, &mut out);
    assert_eq!(out, tiny);

    let mut one = [0.0f32];
    real::normalize(&[5.0f32], &mut one);
    assert_eq!(one, [1.0]);

    let zc = [Complex::new(0.0f32, 0.0); 3];
    let mut outc = [Complex::new(9.0f32, 9.0); 3];
    complex::normalize(&zc, &mut outc);
    assert_eq!(outc, zc);
}

#[test]
fn all_nan_index_reductions_are_none() {
    let a = [f64::NAN, f64::NAN];
    assert_eq!(real::min_index(&a), None);
    assert_eq!(real::max_index(&a), None);
    assert_eq!(real::min_index(&[f64::NAN, 2.0, 1.0, 1.0]), Some(2));
    assert_eq!(real::max_index(&[3.0f32, f32::NAN, 3.0]), Some(0));
}

#[test]
fn offset_writes_land_in_place() {
    let mut dst = [1.0f32; 6];
    real::add_at(&mut dst, &[1.0, 2.0], 4);
    assert_eq!(dst, [1.0, 1.0, 1.0, 1.0, 2.0, 3.0]);

    real::copy_at(&mut dst, &[0.0; 2], 0);
    assert_eq!(dst[..2], [0.0, 0.0]);

    // An empty source at the very end is a no-op, not an error.
    real::copy_at(&mut dst, &[], 6);

    let mut hdst = [Half::ZERO; 3];
    half::copy_at(&mut hdst, &[Half::ONE], 2);
    assert_eq!(hdst, [Half::ZERO, Half::ZERO, Half::ONE]);
}

#[test]
#[should_panic(expected = "exceeds destination length")]
fn add_at_past_end_panics() {
    let mut dst = [0.0f64; 4];
    real::add_at(&mut dst, &[1.0, 1.0], 3);
}

#[test]
#[should_panic(expected = "exceeds destination length")]
fn copy_at_offset_beyond_destination_panics() {
    let mut dst = [0.0f32; 4];
    real::copy_at(&mut dst, &[], 5);
}

#[test]
#[should_panic(expected = "exceeds destination length")]
fn wrapped_negative_offset_panics() {
    let mut dst = [Complex::new(0.0f32, 0.0); 4];
    complex::add_at(&mut dst, &[Complex::new(1.0, 0.0)], usize::MAX);
}

#[test]
#[should_panic(expected = "exceeds destination length")]
fn half_copy_at_overhang_panics() {
    let mut dst = [Half::ZERO; 2];
    half::copy_at(&mut dst, &[Half::ONE; 2], 1);
}

#[test]
fn half_codec_spot_values() {
    let mut out = [0.0f32; 1];
    half::decode(&[Half::from_bits(0x3C00)], &mut out);
    assert_eq!(out, [1.0]);

    let mut enc = [Half::ZERO; 1];
    half::encode(&[1.5], &mut enc);
    assert_eq!(enc[0].to_bits(), 0x3E00);
}

#[test]
fn kernel_longer_than_signal_writes_nothing() {
    let mut out = [SENTINEL; 4];
    real::convolve_valid(&[1.0f32], &[1.0, 2.0, 3.0], &mut out);
    assert_eq!(out, [SENTINEL; 4]);
    let empty: [f32; 0] = [];
    real::convolve_valid(&empty, &[1.0, 2.0], &mut out);
    assert_eq!(out, [SENTINEL; 4]);
}
