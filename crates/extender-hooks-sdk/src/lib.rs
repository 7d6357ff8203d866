//! # extender-hooks-sdk
//!
//! SDK for writing hooks for the JMS Extender.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use extender_hooks_sdk::prelude::*;
//!
//! #[derive(Default)]
//! struct TenantHook;
//!
//! impl JmsExtenderHook for TenantHook {
//!     fn on_connection_request(&self, request: &ConnectionRequest) -> HookResult<bool> {
//!         if request.password.is_empty() {
//!             return Err(HookError::with_code("Missing credentials", "AUTH_001"));
//!         }
//!         Ok(true)
//!     }
//!
//!     fn durable_subscription_name(&self, subscription: &SubscriptionInfo) -> String {
//!         format!("{}.{}", subscription.client_id, subscription.subscription_name)
//!     }
//! }
//!
//! export_hook!(TenantHook);
//! ```
//!
//! Build the crate as a `cdylib` and point the host's `hooks.library`
//! setting at the resulting library.

pub mod closures;
pub mod macros;

#[doc(hidden)]
pub use extender_hooks::abi;

/// Prelude for convenient imports.
pub mod prelude {
    pub use extender_hooks::prelude::*;

    pub use crate::closures::{ConnectionAuthenticator, SubscriptionNamer};
    pub use crate::export_hook;
}
