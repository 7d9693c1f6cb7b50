use std::fmt;

use serde::{Deserialize, Serialize};

use super::capabilities::{Capabilities, Feature};

/// One implementation family for a numeric domain.
///
/// Ordered by preference: `Avx512 > Avx2Fma > Avx2 > {Sse2, Neon} > Scalar`.
/// `Sse2` and `Neon` never coexist on one host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Portable reference kernels; complete for every operation.
    Scalar,
    /// 128-bit, x86_64 baseline.
    Sse2,
    /// 128-bit, aarch64.
    Neon,
    /// 256-bit without fused multiply-add.
    Avx2,
    /// 256-bit with fused multiply-add.
    Avx2Fma,
    /// 512-bit; FMA is part of AVX-512F.
    Avx512,
}

impl Tier {
    /// Preference order used by the selector.
    pub const DESCENDING: [Tier; 6] = [
        Tier::Avx512,
        Tier::Avx2Fma,
        Tier::Avx2,
        Tier::Sse2,
        Tier::Neon,
        Tier::Scalar,
    ];

    /// Overlay order: lower tiers first so higher tiers win where they
    /// implement a slot.
    pub const ASCENDING: [Tier; 6] = [
        Tier::Scalar,
        Tier::Sse2,
        Tier::Neon,
        Tier::Avx2,
        Tier::Avx2Fma,
        Tier::Avx512,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Tier::Scalar => "Scalar",
            Tier::Sse2 => "SSE2",
            Tier::Neon => "NEON",
            Tier::Avx2 => "AVX2",
            Tier::Avx2Fma => "AVX2+FMA",
            Tier::Avx512 => "AVX-512",
        }
    }

    /// Register width in bits.
    pub const fn width_bits(self) -> usize {
        match self {
            Tier::Scalar => 64,
            Tier::Sse2 | Tier::Neon => 128,
            Tier::Avx2 | Tier::Avx2Fma => 256,
            Tier::Avx512 => 512,
        }
    }

    /// Features the tier's kernels are compiled for.
    pub const fn required_features(self) -> &'static [Feature] {
        match self {
            Tier::Scalar => &[],
            Tier::Sse2 => &[Feature::Sse2],
            Tier::Neon => &[Feature::Neon],
            Tier::Avx2 => &[Feature::Avx, Feature::Avx2],
            Tier::Avx2Fma => &[Feature::Avx, Feature::Avx2, Feature::Fma],
            Tier::Avx512 => &[Feature::Avx512F],
        }
    }

    pub fn is_supported(self, caps: &Capabilities) -> bool {
        self.required_features().iter().all(|&f| caps.has(f))
    }

    /// The most capable tier the host supports.
    pub fn best(caps: &Capabilities) -> Tier {
        Tier::DESCENDING
            .into_iter()
            .find(|tier| tier.is_supported(caps))
            .unwrap_or(Tier::Scalar)
    }

    /// Tiers overlaid, in order, when building a table with `ceiling`.
    ///
    /// Scalar is always first; each further tier appears only if the host
    /// supports it and it does not exceed the ceiling.
    pub fn overlay_plan(caps: &Capabilities, ceiling: Tier) -> Vec<Tier> {
        Tier::ASCENDING
            .into_iter()
            .filter(|&tier| tier == Tier::Scalar || (tier <= ceiling && tier.is_supported(caps)))
            .collect()
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
