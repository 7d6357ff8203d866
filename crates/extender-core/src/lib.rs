//! # extender-core
//!
//! Core crate for JMS Extender hooks. Contains the hook error carrier,
//! the host-side error system, configuration schemas, and the records
//! the host passes into every hook invocation.
//!
//! This crate has **no** internal dependencies on other extender crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{ErrorKind, HookError, HostError};
pub use result::{HookResult, HostResult};
