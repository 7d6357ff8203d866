//! Hook contract, hook points, and composition.

pub mod chain;
pub mod contract;
pub mod definitions;
pub mod memoize;

pub use chain::{HookChain, HookChainBuilder};
pub use contract::{DefaultHook, JmsExtenderHook, SubscriptionHooks};
pub use definitions::{HookCategory, HookPoint};
pub use memoize::MemoizedNames;
