//! Dispatch configuration.
//!
//! The library probes the host and picks the best tier on its own; a
//! `DispatchConfig` only narrows that choice (for debugging, reproducibility,
//! or comparing tiers in the field).

use serde::{Deserialize, Serialize};

use crate::dispatch::Tier;

/// Process-wide dispatch settings, fixed before the first kernel call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Highest tier the selector may bind. `None` means no ceiling.
    #[serde(default)]
    pub max_tier: Option<Tier>,
}

impl DispatchConfig {
    /// Restrict every domain to the scalar reference kernels.
    pub const fn scalar_only() -> Self {
        Self { max_tier: Some(Tier::Scalar) }
    }

    pub const fn with_max_tier(tier: Tier) -> Self {
        Self { max_tier: Some(tier) }
    }

    /// Apply the ceiling to the best tier the host supports.
    pub fn clamp(&self, best: Tier) -> Tier {
        match self.max_tier {
            Some(max) if max < best => max,
            _ => best,
        }
    }
}
