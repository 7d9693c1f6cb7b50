//! Kernel tables: one fn-pointer slot per operation, bound once.

use super::capabilities::Capabilities;
use super::tier::Tier;

/// A bound kernel and the tier it came from.
#[derive(Clone, Copy)]
pub struct Slot<F> {
    pub(crate) call: F,
    pub(crate) tier: Tier,
}

impl<F> Slot<F> {
    pub(crate) const fn scalar(call: F) -> Self {
        Slot { call, tier: Tier::Scalar }
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }
}

/// Operations shared by every generated kernel table.
pub(crate) trait KernelTable: Sized {
    /// Slots a single tier provides; unset slots fall through.
    type Overrides;

    /// Rebind every slot `overrides` provides to `tier`. Returns how many
    /// slots were rebound.
    fn overlay(&mut self, tier: Tier, overrides: &Self::Overrides) -> usize;

    fn bound_tier(&self) -> Tier;

    fn slot_bindings(&self) -> Vec<(&'static str, Tier)>;
}

/// Build a table for `domain` by overlaying every tier in the plan onto the
/// complete scalar table.
///
/// `overrides` must only hand out kernels whose features are present in
/// `caps`; the plan guarantees it is never asked for an unsupported tier.
pub(crate) fn select<K: KernelTable>(
    domain: &str,
    caps: &Capabilities,
    ceiling: Tier,
    scalar: K,
    overrides: impl Fn(Tier, &Capabilities) -> Option<K::Overrides>,
) -> K {
    let mut table = scalar;
    for tier in Tier::overlay_plan(caps, ceiling) {
        if tier == Tier::Scalar {
            continue;
        }
        match overrides(tier, caps) {
            Some(o) => {
                let rebound = table.overlay(tier, &o);
                log::debug!("{domain}: {tier} provides {rebound} kernels");
            }
            None => log::debug!("{domain}: no {tier} kernels on this target"),
        }
    }
    log::info!("{domain} kernels: ceiling {ceiling}, bound up to {}", table.bound_tier());
    for (name, tier) in table.slot_bindings() {
        log::debug!("  {domain}.{name} -> {tier}");
    }
    table
}

/// Generates a kernel table, its per-tier override set and the
/// `KernelTable` glue between them.
macro_rules! define_kernel_table {
    (
        $(#[$meta:meta])*
        pub struct $table:ident $(<$t:ident>)? / $overrides:ident {
            $( $(#[$fmeta:meta])* $field:ident : $fty:ty, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy)]
        pub struct $table $(<$t: 'static>)? {
            pub(crate) tier: $crate::dispatch::Tier,
            $( $(#[$fmeta])* pub(crate) $field: $crate::dispatch::table::Slot<$fty>, )*
        }

        #[doc(hidden)]
        #[derive(Clone, Copy)]
        pub struct $overrides $(<$t: 'static>)? {
            $( pub(crate) $field: Option<$fty>, )*
        }

        impl $(<$t: 'static>)? $overrides $(<$t>)? {
            pub(crate) const NONE: Self = Self { $( $field: None, )* };
        }

        impl $(<$t: 'static>)? $crate::dispatch::table::KernelTable for $table $(<$t>)? {
            type Overrides = $overrides $(<$t>)?;

            fn overlay(&mut self, tier: $crate::dispatch::Tier, o: &Self::Overrides) -> usize {
                let mut rebound = 0;
                $(
                    if let Some(call) = o.$field {
                        self.$field = $crate::dispatch::table::Slot { call, tier };
                        rebound += 1;
                    }
                )*
                if rebound > 0 {
                    self.tier = tier;
                }
                rebound
            }

            fn bound_tier(&self) -> $crate::dispatch::Tier {
                self.tier
            }

            fn slot_bindings(&self) -> Vec<(&'static str, $crate::dispatch::Tier)> {
                vec![$( (stringify!($field), self.$field.tier), )*]
            }
        }

        impl $(<$t: 'static>)? $table $(<$t>)? {
            /// Number of operation slots in this table.
            pub const SLOTS: usize = [$( stringify!($field), )*].len();

            /// Highest tier any slot is bound to.
            pub fn tier(&self) -> $crate::dispatch::Tier {
                self.tier
            }

            /// Slot name and the tier it is bound to, in declaration order.
            pub fn bindings(&self) -> Vec<(&'static str, $crate::dispatch::Tier)> {
                $crate::dispatch::table::KernelTable::slot_bindings(self)
            }

            /// Tier a named slot is bound to.
            pub fn binding(&self, slot: &str) -> Option<$crate::dispatch::Tier> {
                self.bindings().into_iter().find(|(name, _)| *name == slot).map(|(_, t)| t)
            }
        }

        impl $(<$t: 'static>)? std::fmt::Debug for $table $(<$t>)? {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let mut m = f.debug_map();
                $( m.entry(&stringify!($field), &self.$field.tier); )*
                m.finish()
            }
        }
    };
}

pub(crate) use define_kernel_table;
