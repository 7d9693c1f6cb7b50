//! Capability probe and per-domain kernel selection.
//!
//! Each numeric domain (f32, f64, `Complex<f32>`, `Complex<f64>`, `Half`)
//! owns one table of fn-pointer slots. A table is built the first time it
//! is used: the scalar reference kernels fill every slot, then each tier the
//! host supports, up to the configured ceiling, rebinds the slots it
//! implements. Tables never change after that, so calls read them without
//! any synchronization.

pub mod capabilities;
mod complex;
mod half;
mod real;
pub(crate) mod table;
pub mod tier;

use std::sync::OnceLock;

use crate::config::DispatchConfig;
use crate::error::{DispatchError, DispatchResult};
use crate::traits::Real;

pub use capabilities::{Capabilities, Feature};
pub use complex::{ComplexKernels, ComplexOverrides};
pub use half::{HalfKernels, HalfOverrides};
pub use real::{RealKernels, RealOverrides};
pub use table::Slot;
pub use tier::Tier;

static CAPABILITIES: OnceLock<Capabilities> = OnceLock::new();
static CONFIG: OnceLock<DispatchConfig> = OnceLock::new();

/// Host capabilities, probed on first call.
pub fn capabilities() -> &'static Capabilities {
    CAPABILITIES.get_or_init(Capabilities::detect)
}

/// Install the process-wide dispatch configuration.
///
/// Must run before any kernel table is built; afterwards the configuration
/// is frozen and this returns [`DispatchError::AlreadyConfigured`].
pub fn configure(config: DispatchConfig) -> DispatchResult<()> {
    CONFIG.set(config).map_err(|_| DispatchError::AlreadyConfigured)?;
    log::info!("dispatch configured: max tier {:?}", config.max_tier);
    Ok(())
}

/// The active configuration. Freezes the default if none was installed.
pub fn config() -> &'static DispatchConfig {
    CONFIG.get_or_init(DispatchConfig::default)
}

/// Ceiling the process-wide tables are built with.
pub fn ceiling() -> Tier {
    config().clamp(Tier::best(capabilities()))
}

/// Probe the host and build every domain table now.
///
/// Optional: tables are built lazily on first use either way.
pub fn init() {
    let caps = capabilities();
    log::info!("dispatch init: host {caps}, ceiling {}", ceiling());
    f32::real_kernels();
    f64::real_kernels();
    f32::complex_kernels();
    f64::complex_kernels();
    HalfKernels::get();
}

macro_rules! impl_real {
    ($t:ident, $kernels:ident, $real_static:ident, $complex_static:ident) => {
        static $real_static: OnceLock<RealKernels<$t>> = OnceLock::new();
        static $complex_static: OnceLock<ComplexKernels<$t>> = OnceLock::new();

        impl Real for $t {
            fn real_kernels() -> &'static RealKernels<$t> {
                $real_static.get_or_init(|| RealKernels::with_capabilities(capabilities(), ceiling()))
            }

            fn complex_kernels() -> &'static ComplexKernels<$t> {
                $complex_static
                    .get_or_init(|| ComplexKernels::with_capabilities(capabilities(), ceiling()))
            }

            unsafe fn real_overrides(tier: Tier, caps: &Capabilities) -> Option<RealOverrides<$t>> {
                // SAFETY: forwarded caller contract.
                unsafe { crate::cpu_kernels::$kernels::real_overrides(tier, caps) }
            }

            unsafe fn complex_overrides(
                tier: Tier,
                caps: &Capabilities,
            ) -> Option<ComplexOverrides<$t>> {
                // SAFETY: forwarded caller contract.
                unsafe { crate::cpu_kernels::$kernels::complex_overrides(tier, caps) }
            }
        }
    };
}

impl_real!(f32, for_f32, F32_REAL, F32_COMPLEX);
impl_real!(f64, for_f64, F64_REAL, F64_COMPLEX);
