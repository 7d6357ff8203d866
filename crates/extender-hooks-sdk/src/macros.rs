//! Macros for building hook libraries.

/// Exports a hook type from a `cdylib` so the host's dynamic loader can
/// create it.
///
/// Generates the `jms_extender_hook_abi_version` and
/// `jms_extender_create_hook` symbols. The constructor runs once per load.
/// A panicking constructor makes the factory return null, which the host
/// reports as a loading error.
///
/// # Example
/// ```rust,ignore
/// export_hook!(TenantHook);                               // uses Default
/// export_hook!(TenantHook, || TenantHook::new("acme"));   // custom constructor
/// ```
#[macro_export]
macro_rules! export_hook {
    ($hook:ty) => {
        $crate::export_hook!($hook, <$hook as ::std::default::Default>::default);
    };
    ($hook:ty, $constructor:expr) => {
        #[unsafe(no_mangle)]
        pub extern "C" fn jms_extender_hook_abi_version() -> u32 {
            $crate::abi::HOOK_ABI_VERSION
        }

        #[unsafe(no_mangle)]
        #[allow(improper_ctypes_definitions)]
        pub extern "C" fn jms_extender_create_hook()
        -> *mut ::std::boxed::Box<dyn $crate::prelude::JmsExtenderHook> {
            let constructor: fn() -> $hook = $constructor;
            match ::std::panic::catch_unwind(constructor) {
                Ok(hook) => {
                    let hook: ::std::boxed::Box<dyn $crate::prelude::JmsExtenderHook> =
                        ::std::boxed::Box::new(hook);
                    ::std::boxed::Box::into_raw(::std::boxed::Box::new(hook))
                }
                Err(_) => ::std::ptr::null_mut(),
            }
        }
    };
}
