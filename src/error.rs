use thiserror::Error;

use crate::dispatch::Tier;

/// Errors raised while configuring dispatch.
///
/// Arithmetic entry points never return errors; invalid offsets panic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("dispatch is already configured; configure() must run before the first kernel call")]
    AlreadyConfigured,
    #[error("tier {tier} is not supported by this host ({host})")]
    TierUnavailable { tier: Tier, host: String },
}

pub type DispatchResult<T> = Result<T, DispatchError>;
