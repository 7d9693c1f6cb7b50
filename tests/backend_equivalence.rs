//! Every tier the host supports must agree with the scalar reference:
//! bit-exact for correctly rounded element-wise ops, within a relative
//! tolerance where accumulation order or fused multiply-add differ.

use dsp_kernels::{
    capabilities, Capabilities, Complex, ComplexKernels, Half, HalfKernels, RealKernels, Tier,
};
use proptest::prelude::*;

fn supported_tiers() -> Vec<Tier> {
    Tier::ASCENDING
        .into_iter()
        .filter(|t| *t != Tier::Scalar && t.is_supported(capabilities()))
        .collect()
}

fn scalar_real() -> RealKernels<f32> {
    RealKernels::with_capabilities(&Capabilities::none(), Tier::Scalar)
}

fn close(got: f32, want: f32, scale: f32, rel: f32) -> bool {
    (got - want).abs() <= rel * scale.max(1.0)
}

/// Relative error plus two subnormal steps for the underflow range.
fn exp_close(got: f32, want: f32) -> bool {
    if want.is_nan() {
        return got.is_nan();
    }
    got == want || (got - want).abs() <= 4e-6 * want + 2.0 * f32::from_bits(1)
}

fn pair(max_len: usize) -> impl Strategy<Value = (Vec<f32>, Vec<f32>)> {
    (0..max_len).prop_flat_map(|n| {
        (
            prop::collection::vec(-1.0e3f32..1.0e3, n),
            prop::collection::vec(-1.0e3f32..1.0e3, n),
        )
    })
}

fn complex_pair(max_len: usize) -> impl Strategy<Value = (Vec<Complex<f64>>, Vec<Complex<f64>>)> {
    let c = || (-1.0e3f64..1.0e3, -1.0e3f64..1.0e3).prop_map(|(re, im)| Complex::new(re, im));
    (0..max_len).prop_flat_map(move |n| (prop::collection::vec(c(), n), prop::collection::vec(c(), n)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn real_elementwise_is_exact((a, b) in pair(70)) {
        let reference = scalar_real();
        let n = a.len();
        for tier in supported_tiers() {
            let t = RealKernels::<f32>::for_tier(tier).unwrap();
            let (mut got, mut want) = (vec![0.0f32; n], vec![0.0f32; n]);

            t.add(&a, &b, &mut got);
            reference.add(&a, &b, &mut want);
            prop_assert_eq!(&got, &want, "add at {}", tier);

            t.sub(&a, &b, &mut got);
            reference.sub(&a, &b, &mut want);
            prop_assert_eq!(&got, &want, "sub at {}", tier);

            t.mul(&a, &b, &mut got);
            reference.mul(&a, &b, &mut want);
            prop_assert_eq!(&got, &want, "mul at {}", tier);

            t.div(&a, &b, &mut got);
            reference.div(&a, &b, &mut want);
            prop_assert_eq!(&got, &want, "div at {}", tier);

            t.abs(&a, &mut got);
            reference.abs(&a, &mut want);
            prop_assert_eq!(&got, &want, "abs at {}", tier);

            let magnitudes = got.clone();
            t.sqrt(&magnitudes, &mut got);
            reference.sqrt(&magnitudes, &mut want);
            prop_assert_eq!(&got, &want, "sqrt at {}", tier);

            t.neg(&a, &mut got);
            reference.neg(&a, &mut want);
            prop_assert_eq!(&got, &want, "neg at {}", tier);

            t.clamp(&a, -250.0, 400.0, &mut got);
            reference.clamp(&a, -250.0, 400.0, &mut want);
            prop_assert_eq!(&got, &want, "clamp at {}", tier);

            t.relu(&a, &mut got);
            reference.relu(&a, &mut want);
            prop_assert_eq!(&got, &want, "relu at {}", tier);

            t.scale(&a, 0.3, &mut got);
            reference.scale(&a, 0.3, &mut want);
            prop_assert_eq!(&got, &want, "scale at {}", tier);

            t.add_scalar(&a, -7.25, &mut got);
            reference.add_scalar(&a, -7.25, &mut want);
            prop_assert_eq!(&got, &want, "add_scalar at {}", tier);

            prop_assert_eq!(t.min(&a), reference.min(&a), "min at {}", tier);
            prop_assert_eq!(t.max(&a), reference.max(&a), "max at {}", tier);
        }
    }

    #[test]
    fn real_reductions_within_tolerance((a, b) in pair(200)) {
        let reference = scalar_real();
        let abs_sum: f32 = a.iter().map(|x| x.abs()).sum();
        let sq_sum: f32 = a.iter().map(|x| x * x).sum();
        let prod_sum: f32 = a.iter().zip(&b).map(|(x, y)| (x * y).abs()).sum();
        for tier in supported_tiers() {
            let t = RealKernels::<f32>::for_tier(tier).unwrap();
            prop_assert!(close(t.sum(&a), reference.sum(&a), abs_sum, 1e-4), "sum at {}", tier);
            prop_assert!(close(t.sum_squares(&a), reference.sum_squares(&a), sq_sum, 1e-4));
            prop_assert!(close(t.dot(&a, &b), reference.dot(&a, &b), prod_sum, 1e-4), "dot at {}", tier);
            let d_sum: f32 = a.iter().zip(&b).map(|(x, y)| (x - y) * (x - y)).sum();
            prop_assert!(close(t.sq_euclidean(&a, &b), reference.sq_euclidean(&a, &b), d_sum, 1e-4));
        }
    }

    #[test]
    fn real_fused_updates_within_tolerance((a, b) in pair(70)) {
        let reference = scalar_real();
        let n = a.len();
        for tier in supported_tiers() {
            let t = RealKernels::<f32>::for_tier(tier).unwrap();
            let (mut got, mut want) = (b.clone(), b.clone());
            t.axpy(1.7, &a, &mut got);
            reference.axpy(1.7, &a, &mut want);
            for i in 0..n {
                let scale = (1.7 * a[i]).abs() + b[i].abs();
                prop_assert!(close(got[i], want[i], scale, 1e-6), "axpy at {}", tier);
            }

            let (mut got, mut want) = (vec![0.0f32; n], vec![0.0f32; n]);
            t.mul_add(&a, &b, &a, &mut got);
            reference.mul_add(&a, &b, &a, &mut want);
            for i in 0..n {
                let scale = (a[i] * b[i]).abs() + a[i].abs();
                prop_assert!(close(got[i], want[i], scale, 1e-6), "mul_add at {}", tier);
            }
        }
    }

    #[test]
    fn exp_and_sigmoid_track_libm(a in prop::collection::vec(-110.0f32..110.0, 0..70)) {
        let reference = scalar_real();
        let n = a.len();
        for tier in supported_tiers() {
            let t = RealKernels::<f32>::for_tier(tier).unwrap();
            let (mut got, mut want) = (vec![0.0f32; n], vec![0.0f32; n]);
            t.exp(&a, &mut got);
            reference.exp(&a, &mut want);
            for i in 0..n {
                prop_assert!(exp_close(got[i], want[i]), "exp({}) at {}: {} vs {}", a[i], tier, got[i], want[i]);
            }
            t.sigmoid(&a, &mut got);
            reference.sigmoid(&a, &mut want);
            for i in 0..n {
                prop_assert!((got[i] - want[i]).abs() <= 1e-6 + 4e-6 * want[i], "sigmoid at {}", tier);
            }
        }
    }

    #[test]
    fn complex_ops_agree((a, b) in complex_pair(40)) {
        let reference = ComplexKernels::<f64>::with_capabilities(&Capabilities::none(), Tier::Scalar);
        let n = a.len();
        for tier in supported_tiers() {
            let t = ComplexKernels::<f64>::for_tier(tier).unwrap();
            let zero = Complex::new(0.0, 0.0);
            let (mut got, mut want) = (vec![zero; n], vec![zero; n]);

            t.add(&a, &b, &mut got);
            reference.add(&a, &b, &mut want);
            prop_assert_eq!(&got, &want, "add at {}", tier);

            // Fused tiers round the cross terms once, so compare against |a||b|.
            let bound = |i: usize| 1e-14 * (1.0 + a[i].norm() * b[i].norm());

            t.mul(&a, &b, &mut got);
            reference.mul(&a, &b, &mut want);
            for i in 0..n {
                prop_assert!((got[i] - want[i]).norm() <= bound(i), "mul at {}", tier);
            }

            t.mul_conj(&a, &b, &mut got);
            reference.mul_conj(&a, &b, &mut want);
            for i in 0..n {
                prop_assert!((got[i] - want[i]).norm() <= bound(i), "mul_conj at {}", tier);
            }

            let scale: f64 = a.iter().map(|z| z.norm_sqr()).sum();
            let (g, w) = (t.sum_abs_sq(&a), reference.sum_abs_sq(&a));
            prop_assert!((g - w).abs() <= 1e-12 * scale.max(1.0), "sum_abs_sq at {}", tier);
        }
    }

    #[test]
    fn half_arithmetic_is_bit_identical(
        raw in (0usize..50).prop_flat_map(|n| (
            prop::collection::vec(-6.0e4f32..6.0e4, n),
            prop::collection::vec(-3.0f32..3.0, n),
        ))
    ) {
        let (x, y) = raw;
        let n = x.len();
        let reference = HalfKernels::with_capabilities(&Capabilities::none(), Tier::Scalar);
        let (mut a, mut b) = (vec![Half::ZERO; n], vec![Half::ZERO; n]);
        reference.encode(&x, &mut a);
        reference.encode(&y, &mut b);

        for tier in supported_tiers() {
            let t = HalfKernels::for_tier(tier).unwrap();
            let mut enc = vec![Half::ZERO; n];
            t.encode(&x, &mut enc);
            prop_assert_eq!(&enc, &a, "encode at {}", tier);

            let (mut got, mut want) = (vec![Half::ZERO; n], vec![Half::ZERO; n]);
            t.add(&a, &b, &mut got);
            reference.add(&a, &b, &mut want);
            prop_assert_eq!(&got, &want, "add at {}", tier);

            t.mul(&a, &b, &mut got);
            reference.mul(&a, &b, &mut want);
            prop_assert_eq!(&got, &want, "mul at {}", tier);

            t.scale(&a, 0.1, &mut got);
            reference.scale(&a, 0.1, &mut want);
            prop_assert_eq!(&got, &want, "scale at {}", tier);

            let abs_sum: f32 = a.iter().map(|h| h.to_f32().abs()).sum();
            prop_assert!(close(t.sum(&a), reference.sum(&a), abs_sum, 1e-4), "sum at {}", tier);
        }
    }
}

#[test]
fn supported_tiers_include_scalar_fallback_only_when_nothing_else() {
    let best = Tier::best(capabilities());
    let tiers = supported_tiers();
    match tiers.last() {
        Some(&top) => assert_eq!(top, best),
        None => assert_eq!(best, Tier::Scalar),
    }
}

#[test]
fn exp_overflows_and_underflows_like_libm() {
    let edges = [
        89.0f32, 100.0, -100.0, -95.0, 88.5, 88.72, 88.73, -87.5, -88.0, -103.0, -103.9, -104.0,
        -110.0, 0.0, -0.0, 1.0, -1.0, 50.0, f32::INFINITY, f32::NEG_INFINITY, f32::NAN,
    ];
    // Repeat so every edge lands in a full vector at every width.
    let a: Vec<f32> = edges.iter().copied().cycle().take(edges.len() * 16).collect();
    let n = a.len();
    let reference = scalar_real();
    let mut want = vec![0.0f32; n];
    reference.exp(&a, &mut want);
    assert_eq!(want[0], f32::INFINITY);
    assert!(want[2] > 0.0 && want[2] < f32::MIN_POSITIVE);

    for tier in supported_tiers() {
        let t = RealKernels::<f32>::for_tier(tier).unwrap();
        let mut got = vec![0.0f32; n];
        t.exp(&a, &mut got);
        for i in 0..n {
            assert!(exp_close(got[i], want[i]), "exp({}) at {tier}: {} vs {}", a[i], got[i], want[i]);
        }

        let mut sig = vec![1.0f32; n];
        t.sigmoid(&[-89.0f32; 32], &mut sig);
        assert!(sig[..32].iter().all(|&v| v == 0.0), "sigmoid(-89) at {tier}");
        t.sigmoid(&[110.0f32; 32], &mut sig);
        assert!(sig[..32].iter().all(|&v| v == 1.0), "sigmoid(110) at {tier}");
    }
}

#[test]
fn batched_convolution_is_bit_identical_at_every_tier() {
    let signal: Vec<f32> = (0..3333).map(|i| ((i * 37 % 101) as f32 - 50.0) * 0.013).collect();
    let k5: Vec<f32> = (0..5).map(|i| 0.3 - 0.11 * i as f32).collect();
    let k33: Vec<f32> = (0..33).map(|i| ((i * 7 % 13) as f32 - 6.0) * 0.05).collect();
    let k1 = [0.75f32];
    // Valid lengths 3329 and 3301, plus one output cut short mid-block.
    let lens = [3329, 3301, 2050];
    let kernels: [&[f32]; 3] = [&k5, &k33, &k1];

    for tier in std::iter::once(Tier::Scalar).chain(supported_tiers()) {
        let t = RealKernels::<f32>::for_tier(tier).unwrap();
        let singles: Vec<Vec<f32>> = kernels
            .iter()
            .zip(lens)
            .map(|(k, len)| {
                let mut out = vec![0.0f32; len];
                t.convolve_valid(&signal, k, &mut out);
                out
            })
            .collect();

        let mut batched: Vec<Vec<f32>> = lens.iter().map(|&len| vec![f32::NAN; len]).collect();
        {
            let mut outs: Vec<&mut [f32]> = batched.iter_mut().map(|v| v.as_mut_slice()).collect();
            t.convolve_valid_multi(&signal, &kernels, &mut outs);
        }
        for (j, (b, s)) in batched.iter().zip(&singles).enumerate() {
            let same = b.iter().zip(s).all(|(x, y)| x.to_bits() == y.to_bits());
            assert!(same, "kernel {j} at {tier}");
        }
    }
}

#[test]
fn dot_batch_is_bit_identical_at_every_tier() {
    let shared: Vec<f64> = (0..1037).map(|i| (i as f64 * 0.37).sin()).collect();
    let rows: Vec<Vec<f64>> = [1037usize, 1031, 500, 3, 0]
        .iter()
        .enumerate()
        .map(|(r, &len)| (0..len).map(|i| ((i + r) as f64 * 0.91).cos()).collect())
        .collect();
    let views: Vec<&[f64]> = rows.iter().map(Vec::as_slice).collect();

    for tier in std::iter::once(Tier::Scalar).chain(supported_tiers()) {
        let t = RealKernels::<f64>::for_tier(tier).unwrap();
        let mut out = vec![f64::NAN; views.len()];
        t.dot_batch(&shared, &views, &mut out);
        for (j, row) in views.iter().enumerate() {
            assert_eq!(out[j].to_bits(), t.dot(&shared, row).to_bits(), "row {j} at {tier}");
        }
    }
}

#[test]
fn signed_zero_extremes_agree_by_value() {
    let mut a = vec![1.0f32; 37];
    for (i, v) in a.iter_mut().enumerate().step_by(3) {
        *v = if i % 2 == 0 { 0.0 } else { -0.0 };
    }
    let reference = scalar_real();
    assert_eq!(reference.min(&a), 0.0);
    for tier in supported_tiers() {
        let t = RealKernels::<f32>::for_tier(tier).unwrap();
        // Either sign of zero is acceptable.
        assert_eq!(t.min(&a), 0.0, "min at {tier}");
        let negated: Vec<f32> = a.iter().map(|v| -v).collect();
        assert_eq!(t.max(&negated), 0.0, "max at {tier}");
    }
}
