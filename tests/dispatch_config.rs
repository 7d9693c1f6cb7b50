//! Installing a ceiling before first use. Lives in its own test binary
//! because configuration is process-wide and write-once.

use dsp_kernels::{configure, ops, DispatchConfig, DispatchError, RealKernels, Tier};

#[test]
fn configure_once_then_frozen() {
    configure(DispatchConfig::scalar_only()).expect("first configure succeeds");
    assert_eq!(
        configure(DispatchConfig::default()),
        Err(DispatchError::AlreadyConfigured)
    );

    let table = RealKernels::<f32>::get();
    assert_eq!(table.tier(), Tier::Scalar);
    assert!(table.bindings().iter().all(|(_, t)| *t == Tier::Scalar));

    let mut out = [0.0f32; 3];
    ops::real::add(&[1.0, 2.0, 3.0], &[1.0; 3], &mut out);
    assert_eq!(out, [2.0, 3.0, 4.0]);
}
