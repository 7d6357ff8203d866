//! Closure-based hooks for small deployments and tests.
//!
//! Each type implements one slice of the contract from a closure and
//! keeps the defaults for everything else. Combine them with a
//! `HookChain` to build a full hook without declaring a type.

use tracing::debug;

use extender_core::result::HookResult;
use extender_core::types::{ConnectionRequest, SubscriptionInfo, SubscriptionKind};
use extender_hooks::hooks::contract::JmsExtenderHook;

/// Authenticates connection requests with a closure.
pub struct ConnectionAuthenticator<F> {
    check: F,
}

impl<F> ConnectionAuthenticator<F>
where
    F: Fn(&ConnectionRequest) -> HookResult<bool> + Send + Sync,
{
    /// Creates an authenticator from the given check.
    pub fn new(check: F) -> Self {
        Self { check }
    }
}

impl<F> std::fmt::Debug for ConnectionAuthenticator<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionAuthenticator").finish_non_exhaustive()
    }
}

impl<F> JmsExtenderHook for ConnectionAuthenticator<F>
where
    F: Fn(&ConnectionRequest) -> HookResult<bool> + Send + Sync,
{
    fn on_connection_request(&self, request: &ConnectionRequest) -> HookResult<bool> {
        let verdict = (self.check)(request);
        debug!(
            connection_id = %request.connection_id,
            user = %request.user,
            allowed = matches!(verdict, Ok(true)),
            "Connection checked"
        );
        verdict
    }
}

/// Decorates subscription names with a closure, for every subscription
/// kind.
pub struct SubscriptionNamer<F> {
    name: F,
}

impl<F> SubscriptionNamer<F>
where
    F: Fn(SubscriptionKind, &SubscriptionInfo) -> String + Send + Sync,
{
    /// Creates a namer from the given decoration.
    pub fn new(name: F) -> Self {
        Self { name }
    }
}

impl<F> std::fmt::Debug for SubscriptionNamer<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionNamer").finish_non_exhaustive()
    }
}

impl<F> JmsExtenderHook for SubscriptionNamer<F>
where
    F: Fn(SubscriptionKind, &SubscriptionInfo) -> String + Send + Sync,
{
    fn durable_subscription_name(&self, subscription: &SubscriptionInfo) -> String {
        (self.name)(SubscriptionKind::Durable, subscription)
    }

    fn shared_subscription_name(&self, subscription: &SubscriptionInfo) -> String {
        (self.name)(SubscriptionKind::Shared, subscription)
    }

    fn shared_durable_subscription_name(&self, subscription: &SubscriptionInfo) -> String {
        (self.name)(SubscriptionKind::SharedDurable, subscription)
    }
}

#[cfg(test)]
mod tests {
    use extender_core::error::HookError;
    use extender_hooks::hooks::contract::SubscriptionHooks;

    use super::*;

    #[test]
    fn test_authenticator_runs_closure() {
        let auth = ConnectionAuthenticator::new(|req: &ConnectionRequest| {
            if req.user == "guest" {
                Err(HookError::with_code("Guests not allowed", "AUTH_002"))
            } else {
                Ok(!req.password.is_empty())
            }
        });

        assert!(auth.on_connection_request(&ConnectionRequest::new("c1", "alice", "pw")).unwrap());
        assert!(!auth.on_connection_request(&ConnectionRequest::new("c2", "bob", "")).unwrap());
        let err = auth
            .on_connection_request(&ConnectionRequest::new("c3", "guest", "pw"))
            .unwrap_err();
        assert_eq!(err.code(), Some("AUTH_002"));
        // untouched methods keep their defaults
        assert!(auth.on_durable_subscription_request(&sample()).unwrap());
    }

    #[test]
    fn test_namer_covers_every_kind() {
        let namer = SubscriptionNamer::new(|kind: SubscriptionKind, sub: &SubscriptionInfo| {
            format!("{}:{}", kind, sub.subscription_name)
        });
        for kind in SubscriptionKind::ALL {
            assert_eq!(
                namer.subscription_name(kind, &sample()),
                format!("{kind}:sub1")
            );
        }
    }

    fn sample() -> SubscriptionInfo {
        SubscriptionInfo::new("c1", "ActiveMQ", "cid1", "s1", "sub1", "stocks")
    }
}
