//! Convenience result type aliases.

use crate::error::{HookError, HostError};

/// Result returned by hook methods that may reject the triggering request.
pub type HookResult<T> = Result<T, HookError>;

/// Result for host-side operations (configuration, loading, initialization).
pub type HostResult<T> = Result<T, HostError>;
