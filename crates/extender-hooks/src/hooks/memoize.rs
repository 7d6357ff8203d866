//! Stable name decoration.
//!
//! [`MemoizedNames`] remembers the first decorated name produced for each
//! logical entity and returns it on every later call, so a decoration hook
//! that is not deterministic (random suffixes, time-based tags) still gives
//! the host a stable identity. Connection IDs and session GUIDs are not part
//! of the key: both change across reconnections of the same entity.

use std::path::Path;

use dashmap::DashMap;
use tracing::debug;

use extender_core::result::HookResult;
use extender_core::types::{
    ConnectionRequest, DedicatedConnection, EndpointInfo, ObjectPayload, SessionInfo,
    SubscriptionInfo, SubscriptionKind,
};

use super::contract::JmsExtenderHook;

/// Which decoration a cached name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum NameKind {
    DedicatedConnection,
    Subscription(SubscriptionKind),
}

/// Identity of a decorated entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct NameKey {
    kind: NameKind,
    connector: String,
    client_id: String,
    subscription_name: String,
    topic_name: String,
}

impl NameKey {
    fn dedicated(connection: &DedicatedConnection) -> Self {
        Self {
            kind: NameKind::DedicatedConnection,
            connector: connection.connector.clone(),
            client_id: connection.client_id.clone(),
            subscription_name: String::new(),
            topic_name: String::new(),
        }
    }

    fn subscription(kind: SubscriptionKind, subscription: &SubscriptionInfo) -> Self {
        Self {
            kind: NameKind::Subscription(kind),
            connector: subscription.connector.clone(),
            client_id: subscription.client_id.clone(),
            subscription_name: subscription.subscription_name.clone(),
            topic_name: subscription.topic_name.clone(),
        }
    }
}

/// Wraps a hook and caches its decorated names per logical entity.
///
/// Every non-decoration method is forwarded unchanged. The inner hook is
/// never called while the cache is locked, so a slow decoration delays
/// only its own request. Eviction is left to the embedder through
/// [`MemoizedNames::forget_connector`].
#[derive(Debug)]
pub struct MemoizedNames<H> {
    inner: H,
    names: DashMap<NameKey, String>,
}

impl<H: JmsExtenderHook> MemoizedNames<H> {
    /// Wraps `inner`.
    pub fn new(inner: H) -> Self {
        Self {
            inner,
            names: DashMap::new(),
        }
    }

    /// Returns the wrapped hook.
    pub fn inner(&self) -> &H {
        &self.inner
    }

    /// Number of cached names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns whether no names are cached.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Drops every cached name belonging to `connector`.
    ///
    /// Names must outlive connections and sessions, so no hook event
    /// evicts them. An embedder that removes or reconfigures a connector
    /// calls this; otherwise the cache holds one entry per decorated
    /// entity for the life of the wrapper.
    pub fn forget_connector(&self, connector: &str) {
        self.names.retain(|key, _| key.connector != connector);
        debug!(connector = %connector, remaining = self.names.len(), "Forgot decorated names");
    }

    fn cached<F>(&self, key: NameKey, decorate: F) -> String
    where
        F: FnOnce() -> String,
    {
        if let Some(name) = self.names.get(&key) {
            return name.value().clone();
        }

        // Decorate with no shard lock held. Racing first calls may both
        // decorate; the first insert wins and both return it.
        let decorated = decorate();
        self.names.entry(key).or_insert(decorated).value().clone()
    }
}

impl<H: JmsExtenderHook> JmsExtenderHook for MemoizedNames<H> {
    fn init(&self, config_dir: &Path) -> HookResult<()> {
        self.inner.init(config_dir)
    }

    fn on_connection_request(&self, request: &ConnectionRequest) -> HookResult<bool> {
        self.inner.on_connection_request(request)
    }

    fn on_connection_close(&self, connection_id: &str) {
        self.inner.on_connection_close(connection_id)
    }

    fn on_dedicated_broker_connection_request(
        &self,
        connection: &DedicatedConnection,
    ) -> HookResult<bool> {
        self.inner.on_dedicated_broker_connection_request(connection)
    }

    fn on_session_open(&self, session: &SessionInfo) {
        self.inner.on_session_open(session)
    }

    fn on_session_close(&self, session: &SessionInfo) {
        self.inner.on_session_close(session)
    }

    fn on_message_consumer_request(&self, consumer: &EndpointInfo) -> HookResult<bool> {
        self.inner.on_message_consumer_request(consumer)
    }

    fn on_message_consumer_close(&self, consumer: &EndpointInfo) {
        self.inner.on_message_consumer_close(consumer)
    }

    fn on_message_producer_request(&self, producer: &EndpointInfo) -> HookResult<bool> {
        self.inner.on_message_producer_request(producer)
    }

    fn on_message_producer_close(&self, producer: &EndpointInfo) {
        self.inner.on_message_producer_close(producer)
    }

    fn on_durable_subscription_request(&self, subscription: &SubscriptionInfo) -> HookResult<bool> {
        self.inner.on_durable_subscription_request(subscription)
    }

    fn on_shared_subscription_request(&self, subscription: &SubscriptionInfo) -> HookResult<bool> {
        self.inner.on_shared_subscription_request(subscription)
    }

    fn on_shared_durable_subscription_request(
        &self,
        subscription: &SubscriptionInfo,
    ) -> HookResult<bool> {
        self.inner.on_shared_durable_subscription_request(subscription)
    }

    fn on_durable_subscription_close(&self, subscription: &SubscriptionInfo) {
        self.inner.on_durable_subscription_close(subscription)
    }

    fn on_shared_subscription_close(&self, subscription: &SubscriptionInfo) {
        self.inner.on_shared_subscription_close(subscription)
    }

    fn on_shared_durable_subscription_close(&self, subscription: &SubscriptionInfo) {
        self.inner.on_shared_durable_subscription_close(subscription)
    }

    fn on_object_message_payload_class_request(
        &self,
        producer: &EndpointInfo,
        class_name: &str,
    ) -> HookResult<String> {
        self.inner
            .on_object_message_payload_class_request(producer, class_name)
    }

    fn on_object_message_payload_request(
        &self,
        producer: &EndpointInfo,
        payload: ObjectPayload,
    ) -> HookResult<ObjectPayload> {
        self.inner.on_object_message_payload_request(producer, payload)
    }

    fn dedicated_broker_connection_name(&self, connection: &DedicatedConnection) -> String {
        self.cached(NameKey::dedicated(connection), || {
            self.inner.dedicated_broker_connection_name(connection)
        })
    }

    fn durable_subscription_name(&self, subscription: &SubscriptionInfo) -> String {
        self.cached(
            NameKey::subscription(SubscriptionKind::Durable, subscription),
            || self.inner.durable_subscription_name(subscription),
        )
    }

    fn shared_subscription_name(&self, subscription: &SubscriptionInfo) -> String {
        self.cached(
            NameKey::subscription(SubscriptionKind::Shared, subscription),
            || self.inner.shared_subscription_name(subscription),
        )
    }

    fn shared_durable_subscription_name(&self, subscription: &SubscriptionInfo) -> String {
        self.cached(
            NameKey::subscription(SubscriptionKind::SharedDurable, subscription),
            || self.inner.shared_durable_subscription_name(subscription),
        )
    }
}
