//! Dynamic hook loader using `libloading` (feature-gated).

#[cfg(feature = "dynamic")]
pub mod dynamic_loader {
    use std::ops::Deref;
    use std::path::Path;
    use std::sync::Arc;

    use tracing::{error, info};

    use extender_core::error::HostError;
    use extender_core::result::{HookResult, HostResult};
    use extender_core::types::{
        ConnectionRequest, DedicatedConnection, EndpointInfo, ObjectPayload, SessionInfo,
        SubscriptionInfo,
    };

    use crate::abi::{
        ABI_VERSION_SYMBOL, AbiVersionFn, CREATE_HOOK_SYMBOL, CreateHookFn, HOOK_ABI_VERSION,
        symbol_name,
    };
    use crate::hooks::contract::{JmsExtenderHook, forward_hook};

    /// A hook created by a shared library, holding the library open for as
    /// long as the hook lives. Fields drop in order, hook first.
    struct LibraryHook<H: ?Sized> {
        hook: Box<H>,
        _library: Arc<libloading::Library>,
    }

    impl<H: ?Sized> Deref for LibraryHook<H> {
        type Target = H;

        fn deref(&self) -> &H {
            &self.hook
        }
    }

    forward_hook!(LibraryHook);

    /// Loads hooks from shared libraries (.so / .dll / .dylib).
    #[derive(Default)]
    pub struct DynamicLoader {
        libraries: Vec<Arc<libloading::Library>>,
    }

    impl DynamicLoader {
        /// Creates a new dynamic loader.
        pub fn new() -> Self {
            Self::default()
        }

        /// Number of libraries loaded so far.
        pub fn loaded_count(&self) -> usize {
            self.libraries.len()
        }

        /// Loads a hook from the given shared library path.
        ///
        /// # Safety
        /// This runs initialization code from an arbitrary shared library and
        /// trusts its exported symbols to match [`crate::abi`]. Only load
        /// libraries built against this crate version.
        pub unsafe fn load_from_path(&mut self, path: &Path) -> HostResult<Arc<dyn JmsExtenderHook>> {
            let library = unsafe { libloading::Library::new(path) }.map_err(|e| {
                HostError::loading(format!(
                    "Failed to load hook library '{}': {}",
                    path.display(),
                    e
                ))
            })?;

            let missing = |symbol: &[u8], e: libloading::Error| {
                HostError::loading(format!(
                    "Hook library '{}' missing '{}' symbol: {}",
                    path.display(),
                    symbol_name(symbol),
                    e
                ))
            };

            let version = {
                let version_fn: libloading::Symbol<AbiVersionFn> =
                    unsafe { library.get(ABI_VERSION_SYMBOL) }
                        .map_err(|e| missing(ABI_VERSION_SYMBOL, e))?;
                unsafe { version_fn() }
            };
            if version != HOOK_ABI_VERSION {
                error!(
                    path = %path.display(),
                    expected = HOOK_ABI_VERSION,
                    found = version,
                    "Hook library ABI mismatch"
                );
                return Err(HostError::loading(format!(
                    "Hook library '{}' was built for hook ABI {}, host expects {}",
                    path.display(),
                    version,
                    HOOK_ABI_VERSION
                )));
            }

            let raw = {
                let create_fn: libloading::Symbol<CreateHookFn> =
                    unsafe { library.get(CREATE_HOOK_SYMBOL) }
                        .map_err(|e| missing(CREATE_HOOK_SYMBOL, e))?;
                unsafe { create_fn() }
            };
            if raw.is_null() {
                return Err(HostError::loading(format!(
                    "Hook library '{}' returned no hook",
                    path.display()
                )));
            }

            // The factory hands over a leaked `Box<Box<dyn JmsExtenderHook>>`.
            let hook: Box<dyn JmsExtenderHook> = *unsafe { Box::from_raw(raw) };
            let library = Arc::new(library);
            self.libraries.push(Arc::clone(&library));

            info!(path = %path.display(), abi = version, "Dynamic hook loaded");

            Ok(Arc::new(LibraryHook {
                hook,
                _library: library,
            }))
        }
    }

    impl std::fmt::Debug for DynamicLoader {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("DynamicLoader")
                .field("loaded_count", &self.libraries.len())
                .finish()
        }
    }

}

/// Stub loader when the `dynamic` feature is not enabled.
#[cfg(not(feature = "dynamic"))]
pub mod dynamic_loader {
    use std::path::Path;
    use std::sync::Arc;

    use extender_core::error::HostError;
    use extender_core::result::HostResult;

    use crate::hooks::contract::JmsExtenderHook;

    /// Stub dynamic loader.
    #[derive(Debug, Default)]
    pub struct DynamicLoader;

    impl DynamicLoader {
        /// Creates a stub loader.
        pub fn new() -> Self {
            Self
        }

        /// Always zero.
        pub fn loaded_count(&self) -> usize {
            0
        }

        /// Always fails: this build cannot load shared libraries.
        ///
        /// # Safety
        /// Kept `unsafe` to match the real loader's signature.
        pub unsafe fn load_from_path(&mut self, path: &Path) -> HostResult<Arc<dyn JmsExtenderHook>> {
            Err(HostError::loading(format!(
                "Cannot load '{}': built without the `dynamic` feature",
                path.display()
            )))
        }
    }

}

pub use dynamic_loader::DynamicLoader;
