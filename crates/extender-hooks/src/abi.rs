//! Symbols a hook library exports for dynamic loading.
//!
//! A library built against this crate exports two functions, normally
//! generated by the SDK's `export_hook!` macro:
//!
//! ```c
//! uint32_t jms_extender_hook_abi_version();
//! void*    jms_extender_create_hook();   // Box<Box<dyn JmsExtenderHook>>
//! ```
//!
//! The hook is passed as a thin pointer to a boxed trait object, so both
//! sides must be built with the same compiler and the same version of
//! this crate. [`HOOK_ABI_VERSION`] guards the second condition.

use crate::hooks::contract::JmsExtenderHook;

/// Bumped whenever the contract trait changes shape.
pub const HOOK_ABI_VERSION: u32 = 1;

/// Name of the version symbol, NUL-terminated.
pub const ABI_VERSION_SYMBOL: &[u8] = b"jms_extender_hook_abi_version\0";

/// Name of the factory symbol, NUL-terminated.
pub const CREATE_HOOK_SYMBOL: &[u8] = b"jms_extender_create_hook\0";

/// Signature of the version symbol.
pub type AbiVersionFn = unsafe extern "C" fn() -> u32;

/// Signature of the factory symbol. Ownership of the returned box passes
/// to the caller. A null pointer means the hook could not be built.
pub type CreateHookFn = unsafe extern "C" fn() -> *mut Box<dyn JmsExtenderHook>;

/// Human-readable symbol name, for error messages.
pub(crate) fn symbol_name(symbol: &[u8]) -> &str {
    std::str::from_utf8(symbol.strip_suffix(b"\0").unwrap_or(symbol)).unwrap_or("<invalid>")
}
