//! Host capability probe.
//!
//! Collects the ISA features that kernel selection depends on into a single
//! frozen `Capabilities` table. Absence of a feature is a normal outcome.

use std::fmt;

use serde::Serialize;

/// A hardware feature the dispatcher can select on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Feature {
    Sse2,
    Avx,
    Avx2,
    /// Fused multiply-add (FMA3).
    Fma,
    /// Hardware binary16 <-> binary32 conversion.
    F16c,
    /// 512-bit vectors ("wide-vector-512").
    Avx512F,
    /// Advanced SIMD on aarch64.
    Neon,
}

impl Feature {
    /// Every feature, widest first.
    pub const ALL: [Feature; 7] = [
        Feature::Avx512F,
        Feature::Avx2,
        Feature::Fma,
        Feature::F16c,
        Feature::Avx,
        Feature::Sse2,
        Feature::Neon,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Feature::Sse2 => "SSE2",
            Feature::Avx => "AVX",
            Feature::Avx2 => "AVX2",
            Feature::Fma => "FMA",
            Feature::F16c => "F16C",
            Feature::Avx512F => "AVX-512F",
            Feature::Neon => "NEON",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// ISA feature set relevant to kernel selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Capabilities {
    sse2: bool,
    avx: bool,
    avx2: bool,
    fma: bool,
    f16c: bool,
    avx512f: bool,
    neon: bool,
}

impl Capabilities {
    /// A host with no vector features: every slot binds to scalar.
    pub const fn none() -> Self {
        Capabilities {
            sse2: false,
            avx: false,
            avx2: false,
            fma: false,
            f16c: false,
            avx512f: false,
            neon: false,
        }
    }

    /// Probe the current machine.
    pub fn detect() -> Self {
        let caps = detect_isa_features();
        log::debug!("capability probe: {caps}");
        caps
    }

    /// The same table with `feature` marked present.
    pub const fn with(mut self, feature: Feature) -> Self {
        match feature {
            Feature::Sse2 => self.sse2 = true,
            Feature::Avx => self.avx = true,
            Feature::Avx2 => self.avx2 = true,
            Feature::Fma => self.fma = true,
            Feature::F16c => self.f16c = true,
            Feature::Avx512F => self.avx512f = true,
            Feature::Neon => self.neon = true,
        }
        self
    }

    /// Features present in both tables.
    pub const fn intersect(self, other: Capabilities) -> Self {
        Capabilities {
            sse2: self.sse2 && other.sse2,
            avx: self.avx && other.avx,
            avx2: self.avx2 && other.avx2,
            fma: self.fma && other.fma,
            f16c: self.f16c && other.f16c,
            avx512f: self.avx512f && other.avx512f,
            neon: self.neon && other.neon,
        }
    }

    pub const fn has(&self, feature: Feature) -> bool {
        match feature {
            Feature::Sse2 => self.sse2,
            Feature::Avx => self.avx,
            Feature::Avx2 => self.avx2,
            Feature::Fma => self.fma,
            Feature::F16c => self.f16c,
            Feature::Avx512F => self.avx512f,
            Feature::Neon => self.neon,
        }
    }

    pub const fn has_sse2(&self) -> bool {
        self.sse2
    }

    pub const fn has_avx(&self) -> bool {
        self.avx
    }

    pub const fn has_avx2(&self) -> bool {
        self.avx2
    }

    pub const fn has_fma(&self) -> bool {
        self.fma
    }

    pub const fn has_f16c(&self) -> bool {
        self.f16c
    }

    pub const fn has_avx512f(&self) -> bool {
        self.avx512f
    }

    pub const fn has_neon(&self) -> bool {
        self.neon
    }

    /// Human-readable list of detected features, e.g. `AVX2+FMA+F16C+AVX+SSE2`.
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let feats: Vec<&str> = Feature::ALL
            .iter()
            .filter(|&&feat| self.has(feat))
            .map(|feat| feat.name())
            .collect();
        if feats.is_empty() {
            f.write_str("Scalar")
        } else {
            write!(f, "{}", feats.join("+"))
        }
    }
}

// ── ISA feature detection ───────────────────────────────────────────────

fn detect_isa_features() -> Capabilities {
    #[cfg(target_arch = "x86_64")]
    {
        return Capabilities {
            sse2: is_x86_feature_detected!("sse2"),
            avx: is_x86_feature_detected!("avx"),
            avx2: is_x86_feature_detected!("avx2"),
            fma: is_x86_feature_detected!("fma"),
            f16c: is_x86_feature_detected!("f16c"),
            avx512f: is_x86_feature_detected!("avx512f"),
            neon: false,
        };
    }
    #[cfg(target_arch = "aarch64")]
    {
        return Capabilities {
            neon: std::arch::is_aarch64_feature_detected!("neon"),
            ..Capabilities::none()
        };
    }
    #[allow(unreachable_code)]
    Capabilities::none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_detect() {
        let caps = Capabilities::detect();
        #[cfg(target_arch = "x86_64")]
        assert!(caps.has_sse2(), "SSE2 is baseline on x86_64");
        #[cfg(target_arch = "aarch64")]
        assert!(caps.has_neon(), "NEON is baseline on aarch64");
        if caps.has_avx2() {
            assert!(caps.has_avx());
        }
        eprintln!("Capabilities: {caps}");
    }

    #[test]
    fn summary_lists_features_widest_first() {
        let caps = Capabilities::none()
            .with(Feature::Sse2)
            .with(Feature::Fma)
            .with(Feature::Avx2);
        assert_eq!(caps.summary(), "AVX2+FMA+SSE2");
        assert_eq!(Capabilities::none().summary(), "Scalar");
    }

    #[test]
    fn named_accessors_match_query() {
        let caps = Capabilities::none().with(Feature::Avx512F).with(Feature::Neon);
        for feat in Feature::ALL {
            let expected = matches!(feat, Feature::Avx512F | Feature::Neon);
            assert_eq!(caps.has(feat), expected, "{feat}");
        }
        assert!(caps.has_avx512f());
        assert!(caps.has_neon());
        assert!(!caps.has_fma());

        for feat in Feature::ALL {
            let one = Capabilities::none().with(feat);
            let named = [
                (Feature::Sse2, one.has_sse2()),
                (Feature::Avx, one.has_avx()),
                (Feature::Avx2, one.has_avx2()),
                (Feature::Fma, one.has_fma()),
                (Feature::F16c, one.has_f16c()),
                (Feature::Avx512F, one.has_avx512f()),
                (Feature::Neon, one.has_neon()),
            ];
            for (other, set) in named {
                assert_eq!(set, other == feat, "{feat} vs {other}");
            }
        }
    }

    #[test]
    fn intersect_only_keeps_shared_features() {
        let a = Capabilities::none().with(Feature::Avx2).with(Feature::Fma);
        let b = Capabilities::none().with(Feature::Avx2).with(Feature::F16c);
        let both = a.intersect(b);
        assert!(both.has_avx2());
        assert!(!both.has_fma());
        assert!(!both.has_f16c());
    }

    #[test]
    fn serializes_flags() {
        let caps = Capabilities::none().with(Feature::Avx2);
        let json = serde_json::to_value(caps).unwrap();
        assert_eq!(json["avx2"], true);
        assert_eq!(json["avx512f"], false);
    }
}
