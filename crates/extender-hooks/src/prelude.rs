//! Prelude for convenient imports.

pub use extender_core::error::{HookError, HostError};
pub use extender_core::result::{HookResult, HostResult};
pub use extender_core::types::{
    ClientContext, ConnectionRequest, DedicatedConnection, Destination, DestinationKind,
    EndpointInfo, ObjectPayload, SessionInfo, SubscriptionInfo, SubscriptionKind,
};

pub use crate::hooks::chain::{HookChain, HookChainBuilder};
pub use crate::hooks::contract::{DefaultHook, JmsExtenderHook, SubscriptionHooks};
pub use crate::hooks::definitions::HookPoint;
pub use crate::hooks::memoize::MemoizedNames;
