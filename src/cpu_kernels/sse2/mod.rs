//! SSE2 tier: 128-bit, no FMA. Baseline on every x86_64 host.

crate::expand_isa_impls!(sse2_f32, sse2, f32, "sse2");
crate::expand_isa_impls!(sse2_f64, sse2, f64, "sse2");
