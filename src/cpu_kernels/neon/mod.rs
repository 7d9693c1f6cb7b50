// Expand NEON implementations (128-bit, FMA always available)
crate::expand_isa_impls!(neon_f32, neon, f32, "neon");
crate::expand_isa_impls!(neon_f64, neon, f64, "neon");

#[cfg(test)]
mod tests;
