//! # extender-hooks
//!
//! Hook framework for the JMS Extender. Provides:
//!
//! - The [`JmsExtenderHook`] contract with pass-through defaults
//! - Hook composition in priority order ([`HookChain`])
//! - Memoized name decoration ([`MemoizedNames`])
//! - A host-side dispatcher with timeout and panic containment
//! - Scripted replay of host events
//! - Optional dynamic loading via `libloading` (feature `dynamic`)

pub mod abi;
pub mod hooks;
pub mod host;
pub mod loader;
pub mod prelude;

pub use hooks::chain::{DEFAULT_PRIORITY, HookChain, HookChainBuilder};
pub use hooks::contract::{DefaultHook, JmsExtenderHook, SubscriptionHooks};
pub use hooks::definitions::{HookCategory, HookPoint};
pub use hooks::memoize::MemoizedNames;
pub use host::{
    Admission, ClientDenial, DispatchSettings, EventOutcome, GateDecision, HookDispatcher,
    HostEvent, OutcomeKind,
};
pub use loader::DynamicLoader;
