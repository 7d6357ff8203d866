//! Several hooks composed into one, in priority order.
//!
//! - Init and gates run in order and stop at the first error or denial.
//! - Notifications reach every hook.
//! - Names, classes, and payloads are folded through every hook in order,
//!   each hook receiving the previous hook's output.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use extender_core::result::HookResult;
use extender_core::types::{
    ConnectionRequest, DedicatedConnection, EndpointInfo, ObjectPayload, SessionInfo,
    SubscriptionInfo,
};

use super::contract::JmsExtenderHook;

/// Default priority for hooks added without one.
pub const DEFAULT_PRIORITY: i32 = 100;

/// Entry in the chain.
struct ChainEntry {
    /// The hook.
    hook: Arc<dyn JmsExtenderHook>,
    /// Priority (lower = earlier execution).
    priority: i32,
    /// Label used in logs.
    name: String,
}

/// Ordered composition of hooks that itself implements the contract.
pub struct HookChain {
    entries: Vec<ChainEntry>,
}

impl std::fmt::Debug for HookChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookChain")
            .field("hooks", &self.names())
            .finish()
    }
}

impl HookChain {
    /// Starts building a chain.
    pub fn builder() -> HookChainBuilder {
        HookChainBuilder::default()
    }

    /// Returns the hook labels in execution order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Returns the number of hooks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the chain has no hooks.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs a gate on every hook until one denies or fails.
    fn gate<F>(&self, point: &'static str, mut check: F) -> HookResult<bool>
    where
        F: FnMut(&dyn JmsExtenderHook) -> HookResult<bool>,
    {
        for entry in &self.entries {
            if !check(&*entry.hook)? {
                debug!(hook = point, denied_by = %entry.name, "Chain gate denied");
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn notify<F>(&self, mut notify: F)
    where
        F: FnMut(&dyn JmsExtenderHook),
    {
        for entry in &self.entries {
            notify(&*entry.hook);
        }
    }

    fn fold_name<F>(&self, initial: String, mut step: F) -> String
    where
        F: FnMut(&dyn JmsExtenderHook, String) -> String,
    {
        self.entries
            .iter()
            .fold(initial, |name, entry| step(&*entry.hook, name))
    }
}

impl JmsExtenderHook for HookChain {
    fn init(&self, config_dir: &Path) -> HookResult<()> {
        for entry in &self.entries {
            entry.hook.init(config_dir)?;
            debug!(hook = %entry.name, "Chained hook initialized");
        }
        Ok(())
    }

    fn on_connection_request(&self, request: &ConnectionRequest) -> HookResult<bool> {
        self.gate("connection_request", |h| h.on_connection_request(request))
    }

    fn on_connection_close(&self, connection_id: &str) {
        self.notify(|h| h.on_connection_close(connection_id));
    }

    fn on_dedicated_broker_connection_request(
        &self,
        connection: &DedicatedConnection,
    ) -> HookResult<bool> {
        self.gate("dedicated_broker_connection_request", |h| {
            h.on_dedicated_broker_connection_request(connection)
        })
    }

    fn on_session_open(&self, session: &SessionInfo) {
        self.notify(|h| h.on_session_open(session));
    }

    fn on_session_close(&self, session: &SessionInfo) {
        self.notify(|h| h.on_session_close(session));
    }

    fn on_message_consumer_request(&self, consumer: &EndpointInfo) -> HookResult<bool> {
        self.gate("message_consumer_request", |h| {
            h.on_message_consumer_request(consumer)
        })
    }

    fn on_message_consumer_close(&self, consumer: &EndpointInfo) {
        self.notify(|h| h.on_message_consumer_close(consumer));
    }

    fn on_message_producer_request(&self, producer: &EndpointInfo) -> HookResult<bool> {
        self.gate("message_producer_request", |h| {
            h.on_message_producer_request(producer)
        })
    }

    fn on_message_producer_close(&self, producer: &EndpointInfo) {
        self.notify(|h| h.on_message_producer_close(producer));
    }

    fn on_durable_subscription_request(&self, subscription: &SubscriptionInfo) -> HookResult<bool> {
        self.gate("durable_subscription_request", |h| {
            h.on_durable_subscription_request(subscription)
        })
    }

    fn on_shared_subscription_request(&self, subscription: &SubscriptionInfo) -> HookResult<bool> {
        self.gate("shared_subscription_request", |h| {
            h.on_shared_subscription_request(subscription)
        })
    }

    fn on_shared_durable_subscription_request(
        &self,
        subscription: &SubscriptionInfo,
    ) -> HookResult<bool> {
        self.gate("shared_durable_subscription_request", |h| {
            h.on_shared_durable_subscription_request(subscription)
        })
    }

    fn on_durable_subscription_close(&self, subscription: &SubscriptionInfo) {
        self.notify(|h| h.on_durable_subscription_close(subscription));
    }

    fn on_shared_subscription_close(&self, subscription: &SubscriptionInfo) {
        self.notify(|h| h.on_shared_subscription_close(subscription));
    }

    fn on_shared_durable_subscription_close(&self, subscription: &SubscriptionInfo) {
        self.notify(|h| h.on_shared_durable_subscription_close(subscription));
    }

    fn on_object_message_payload_class_request(
        &self,
        producer: &EndpointInfo,
        class_name: &str,
    ) -> HookResult<String> {
        let mut accepted = class_name.to_string();
        for entry in &self.entries {
            accepted = entry
                .hook
                .on_object_message_payload_class_request(producer, &accepted)?;
        }
        Ok(accepted)
    }

    fn on_object_message_payload_request(
        &self,
        producer: &EndpointInfo,
        payload: ObjectPayload,
    ) -> HookResult<ObjectPayload> {
        self.entries.iter().try_fold(payload, |payload, entry| {
            entry.hook.on_object_message_payload_request(producer, payload)
        })
    }

    fn dedicated_broker_connection_name(&self, connection: &DedicatedConnection) -> String {
        self.fold_name(connection.client_id.clone(), |h, client_id| {
            h.dedicated_broker_connection_name(&connection.with_client_id(client_id))
        })
    }

    fn durable_subscription_name(&self, subscription: &SubscriptionInfo) -> String {
        self.fold_name(subscription.subscription_name.clone(), |h, name| {
            h.durable_subscription_name(&subscription.with_subscription_name(name))
        })
    }

    fn shared_subscription_name(&self, subscription: &SubscriptionInfo) -> String {
        self.fold_name(subscription.subscription_name.clone(), |h, name| {
            h.shared_subscription_name(&subscription.with_subscription_name(name))
        })
    }

    fn shared_durable_subscription_name(&self, subscription: &SubscriptionInfo) -> String {
        self.fold_name(subscription.subscription_name.clone(), |h, name| {
            h.shared_durable_subscription_name(&subscription.with_subscription_name(name))
        })
    }
}

/// Builder collecting hooks with their priorities.
#[derive(Default)]
pub struct HookChainBuilder {
    entries: Vec<ChainEntry>,
}

impl HookChainBuilder {
    /// Adds a hook with the given priority (lower runs first).
    pub fn hook(
        self,
        name: impl Into<String>,
        hook: impl JmsExtenderHook + 'static,
        priority: i32,
    ) -> Self {
        self.shared(name, Arc::new(hook), priority)
    }

    /// Adds an already shared hook.
    pub fn shared(
        mut self,
        name: impl Into<String>,
        hook: Arc<dyn JmsExtenderHook>,
        priority: i32,
    ) -> Self {
        self.entries.push(ChainEntry {
            hook,
            priority,
            name: name.into(),
        });
        self
    }

    /// Builds the chain. Equal priorities keep insertion order.
    pub fn build(mut self) -> HookChain {
        // Stable sort keeps insertion order among equal priorities
        self.entries.sort_by_key(|e| e.priority);

        info!(
            hooks = ?self.entries.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
            "Hook chain assembled"
        );

        HookChain {
            entries: self.entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use extender_core::error::HookError;

    use super::*;
    use crate::hooks::contract::DefaultHook;

    fn sub() -> SubscriptionInfo {
        SubscriptionInfo::new("c1", "conn1", "cid1", "sess1", "sub1", "topicA")
    }

    /// Prefixes names and logs the order it was consulted in.
    struct Prefix {
        prefix: &'static str,
        seen: Arc<Mutex<Vec<&'static str>>>,
    }

    impl JmsExtenderHook for Prefix {
        fn durable_subscription_name(&self, subscription: &SubscriptionInfo) -> String {
            self.seen.lock().expect("lock").push(self.prefix);
            format!("{}{}", self.prefix, subscription.subscription_name)
        }

        fn on_durable_subscription_request(
            &self,
            subscription: &SubscriptionInfo,
        ) -> HookResult<bool> {
            self.seen.lock().expect("lock").push(self.prefix);
            Ok(!subscription.subscription_name.contains("forbidden"))
        }
    }

    struct Reject;

    impl JmsExtenderHook for Reject {
        fn on_message_consumer_request(&self, _consumer: &EndpointInfo) -> HookResult<bool> {
            Err(HookError::with_code("queue closed", "Q_CLOSED"))
        }
    }

    struct CountCloses(Arc<AtomicUsize>);

    impl JmsExtenderHook for CountCloses {
        fn on_connection_close(&self, _connection_id: &str) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_empty_chain_behaves_like_default() {
        let chain = HookChain::builder().build();
        assert!(chain.is_empty());
        assert!(
            chain
                .on_connection_request(&ConnectionRequest::new("c1", "alice", "pw"))
                .expect("ok")
        );
        assert_eq!(chain.durable_subscription_name(&sub()), "sub1");
    }

    #[test]
    fn test_names_fold_in_priority_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let chain = HookChain::builder()
            .hook("b", Prefix { prefix: "b.", seen: seen.clone() }, 200)
            .hook("a", Prefix { prefix: "a.", seen: seen.clone() }, 10)
            .build();

        assert_eq!(chain.names(), vec!["a", "b"]);
        assert_eq!(chain.durable_subscription_name(&sub()), "b.a.sub1");
        assert_eq!(*seen.lock().expect("lock"), vec!["a.", "b."]);
    }

    #[test]
    fn test_equal_priority_keeps_insertion_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let chain = HookChain::builder()
            .hook("first", Prefix { prefix: "1.", seen: seen.clone() }, DEFAULT_PRIORITY)
            .hook("second", Prefix { prefix: "2.", seen: seen.clone() }, DEFAULT_PRIORITY)
            .build();
        assert_eq!(chain.names(), vec!["first", "second"]);
    }

    #[test]
    fn test_gate_short_circuits_on_denial() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let chain = HookChain::builder()
            .hook("a", Prefix { prefix: "a", seen: seen.clone() }, 1)
            .hook("b", Prefix { prefix: "b", seen: seen.clone() }, 2)
            .build();

        let denied = chain
            .on_durable_subscription_request(&sub().with_subscription_name("forbidden"))
            .expect("no error");
        assert!(!denied);
        assert_eq!(*seen.lock().expect("lock"), vec!["a"]);
    }

    #[test]
    fn test_gate_propagates_error() {
        let session = SessionInfo::new("c1", "conn1", "sess1");
        let endpoint =
            EndpointInfo::new(&session, extender_core::types::Destination::queue("orders"));
        let chain = HookChain::builder()
            .hook("default", DefaultHook, 1)
            .hook("reject", Reject, 2)
            .build();
        let err = chain
            .on_message_consumer_request(&endpoint)
            .expect_err("rejected");
        assert_eq!(err.code(), Some("Q_CLOSED"));
    }

    #[test]
    fn test_notifications_reach_every_hook() {
        let count = Arc::new(AtomicUsize::new(0));
        let chain = HookChain::builder()
            .hook("one", CountCloses(count.clone()), 1)
            .hook("two", CountCloses(count.clone()), 2)
            .build();
        chain.on_connection_close("c1");
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
