//! The hook contract the JMS Extender calls into.
//!
//! Every method has a default, so an implementation overrides only the
//! events it cares about. The host calls methods synchronously on its own
//! threads and may call them concurrently for different connections, so
//! any state an implementation keeps must be synchronized by the
//! implementation.
//!
//! Rejection comes in two shapes. A gate returning `Ok(false)` is a silent
//! denial. Returning `Err(HookError)` denies with a message and an optional
//! code the host can forward to the client.

use std::path::Path;
use std::sync::Arc;

use extender_core::result::HookResult;
use extender_core::types::{
    ConnectionRequest, DedicatedConnection, EndpointInfo, ObjectPayload, SessionInfo,
    SubscriptionInfo, SubscriptionKind,
};

/// Callbacks received from the JMS Extender.
pub trait JmsExtenderHook: Send + Sync {
    // ── Initialization ──

    /// Called once during extender startup with the directory holding the
    /// JMS connectors configuration. An error aborts the host's startup.
    fn init(&self, _config_dir: &Path) -> HookResult<()> {
        Ok(())
    }

    // ── Connection and authentication ──

    /// A user asks to open a connection to the extender (not to the broker).
    ///
    /// `Ok(true)` clears the user, `Ok(false)` denies the connection.
    fn on_connection_request(&self, _request: &ConnectionRequest) -> HookResult<bool> {
        Ok(true)
    }

    /// A user connection was closed.
    fn on_connection_close(&self, _connection_id: &str) {}

    /// A user asks for a dedicated broker connection by specifying a client ID.
    ///
    /// The client ID has already been passed through
    /// [`dedicated_broker_connection_name`](Self::dedicated_broker_connection_name).
    fn on_dedicated_broker_connection_request(
        &self,
        _connection: &DedicatedConnection,
    ) -> HookResult<bool> {
        Ok(true)
    }

    // ── Sessions ──

    /// A JMS session was created.
    fn on_session_open(&self, _session: &SessionInfo) {}

    /// A JMS session was closed. Sessions close on internal extender events,
    /// never on user request.
    fn on_session_close(&self, _session: &SessionInfo) {}

    // ── Consumers and producers ──

    /// A user asks to create a plain message consumer. Shared and durable
    /// subscriptions go through their own gates.
    fn on_message_consumer_request(&self, _consumer: &EndpointInfo) -> HookResult<bool> {
        Ok(true)
    }

    /// A message consumer was closed.
    fn on_message_consumer_close(&self, _consumer: &EndpointInfo) {}

    /// A user asks to create a message producer.
    fn on_message_producer_request(&self, _producer: &EndpointInfo) -> HookResult<bool> {
        Ok(true)
    }

    /// A message producer was closed.
    fn on_message_producer_close(&self, _producer: &EndpointInfo) {}

    // ── Subscriptions ──

    /// A user asks for a durable subscription. The name is already decorated.
    fn on_durable_subscription_request(&self, _subscription: &SubscriptionInfo) -> HookResult<bool> {
        Ok(true)
    }

    /// A user asks for a shared subscription. The name is already decorated.
    fn on_shared_subscription_request(&self, _subscription: &SubscriptionInfo) -> HookResult<bool> {
        Ok(true)
    }

    /// A user asks for a shared durable subscription. The name is already decorated.
    fn on_shared_durable_subscription_request(
        &self,
        _subscription: &SubscriptionInfo,
    ) -> HookResult<bool> {
        Ok(true)
    }

    /// The consumer of a durable subscription was closed. The subscription
    /// itself is not removed.
    fn on_durable_subscription_close(&self, _subscription: &SubscriptionInfo) {}

    /// The consumer of a shared subscription was closed.
    fn on_shared_subscription_close(&self, _subscription: &SubscriptionInfo) {}

    /// The consumer of a shared durable subscription was closed.
    fn on_shared_durable_subscription_close(&self, _subscription: &SubscriptionInfo) {}

    // ── Object messages ──

    /// A user is about to send an object message; called before the payload
    /// class is materialized. Returns the class to use, which may differ
    /// from the requested one.
    fn on_object_message_payload_class_request(
        &self,
        _producer: &EndpointInfo,
        class_name: &str,
    ) -> HookResult<String> {
        Ok(class_name.to_string())
    }

    /// A user is about to send an object message; called after the payload
    /// has been filled with the user content. Returns the payload to send.
    fn on_object_message_payload_request(
        &self,
        _producer: &EndpointInfo,
        payload: ObjectPayload,
    ) -> HookResult<ObjectPayload> {
        Ok(payload)
    }

    // ── Name decoration ──
    //
    // The host may call these more than once for the same entity and
    // correlates identity on the result, so the same inputs must always
    // yield the same name. The connection ID can change between calls and
    // must not take part in the decoration.

    /// Returns the client ID to use for a dedicated broker connection.
    fn dedicated_broker_connection_name(&self, connection: &DedicatedConnection) -> String {
        connection.client_id.clone()
    }

    /// Returns the name to use for a durable subscription.
    fn durable_subscription_name(&self, subscription: &SubscriptionInfo) -> String {
        subscription.subscription_name.clone()
    }

    /// Returns the name to use for a shared subscription.
    fn shared_subscription_name(&self, subscription: &SubscriptionInfo) -> String {
        subscription.subscription_name.clone()
    }

    /// Returns the name to use for a shared durable subscription.
    fn shared_durable_subscription_name(&self, subscription: &SubscriptionInfo) -> String {
        subscription.subscription_name.clone()
    }
}

/// A hook that keeps every default: accepts all gates and returns every
/// name, class, and payload unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHook;

impl JmsExtenderHook for DefaultHook {}

/// Routes subscription events to the per-kind hook methods.
pub trait SubscriptionHooks {
    /// Calls the request gate for `kind`.
    fn subscription_request(
        &self,
        kind: SubscriptionKind,
        subscription: &SubscriptionInfo,
    ) -> HookResult<bool>;

    /// Calls the close notification for `kind`.
    fn subscription_close(&self, kind: SubscriptionKind, subscription: &SubscriptionInfo);

    /// Calls the name decoration for `kind`.
    fn subscription_name(&self, kind: SubscriptionKind, subscription: &SubscriptionInfo) -> String;
}

impl<H: JmsExtenderHook + ?Sized> SubscriptionHooks for H {
    fn subscription_request(
        &self,
        kind: SubscriptionKind,
        subscription: &SubscriptionInfo,
    ) -> HookResult<bool> {
        match kind {
            SubscriptionKind::Durable => self.on_durable_subscription_request(subscription),
            SubscriptionKind::Shared => self.on_shared_subscription_request(subscription),
            SubscriptionKind::SharedDurable => {
                self.on_shared_durable_subscription_request(subscription)
            }
        }
    }

    fn subscription_close(&self, kind: SubscriptionKind, subscription: &SubscriptionInfo) {
        match kind {
            SubscriptionKind::Durable => self.on_durable_subscription_close(subscription),
            SubscriptionKind::Shared => self.on_shared_subscription_close(subscription),
            SubscriptionKind::SharedDurable => {
                self.on_shared_durable_subscription_close(subscription)
            }
        }
    }

    fn subscription_name(&self, kind: SubscriptionKind, subscription: &SubscriptionInfo) -> String {
        match kind {
            SubscriptionKind::Durable => self.durable_subscription_name(subscription),
            SubscriptionKind::Shared => self.shared_subscription_name(subscription),
            SubscriptionKind::SharedDurable => self.shared_durable_subscription_name(subscription),
        }
    }
}

/// Implements the contract for a pointer-like wrapper by forwarding every
/// method through `Deref`.
macro_rules! forward_hook {
    ($ptr:ident) => {
        impl<H: JmsExtenderHook + ?Sized> JmsExtenderHook for $ptr<H> {
            fn init(&self, config_dir: &Path) -> HookResult<()> {
                (**self).init(config_dir)
            }
            fn on_connection_request(&self, request: &ConnectionRequest) -> HookResult<bool> {
                (**self).on_connection_request(request)
            }
            fn on_connection_close(&self, connection_id: &str) {
                (**self).on_connection_close(connection_id)
            }
            fn on_dedicated_broker_connection_request(
                &self,
                connection: &DedicatedConnection,
            ) -> HookResult<bool> {
                (**self).on_dedicated_broker_connection_request(connection)
            }
            fn on_session_open(&self, session: &SessionInfo) {
                (**self).on_session_open(session)
            }
            fn on_session_close(&self, session: &SessionInfo) {
                (**self).on_session_close(session)
            }
            fn on_message_consumer_request(&self, consumer: &EndpointInfo) -> HookResult<bool> {
                (**self).on_message_consumer_request(consumer)
            }
            fn on_message_consumer_close(&self, consumer: &EndpointInfo) {
                (**self).on_message_consumer_close(consumer)
            }
            fn on_message_producer_request(&self, producer: &EndpointInfo) -> HookResult<bool> {
                (**self).on_message_producer_request(producer)
            }
            fn on_message_producer_close(&self, producer: &EndpointInfo) {
                (**self).on_message_producer_close(producer)
            }
            fn on_durable_subscription_request(
                &self,
                subscription: &SubscriptionInfo,
            ) -> HookResult<bool> {
                (**self).on_durable_subscription_request(subscription)
            }
            fn on_shared_subscription_request(
                &self,
                subscription: &SubscriptionInfo,
            ) -> HookResult<bool> {
                (**self).on_shared_subscription_request(subscription)
            }
            fn on_shared_durable_subscription_request(
                &self,
                subscription: &SubscriptionInfo,
            ) -> HookResult<bool> {
                (**self).on_shared_durable_subscription_request(subscription)
            }
            fn on_durable_subscription_close(&self, subscription: &SubscriptionInfo) {
                (**self).on_durable_subscription_close(subscription)
            }
            fn on_shared_subscription_close(&self, subscription: &SubscriptionInfo) {
                (**self).on_shared_subscription_close(subscription)
            }
            fn on_shared_durable_subscription_close(&self, subscription: &SubscriptionInfo) {
                (**self).on_shared_durable_subscription_close(subscription)
            }
            fn on_object_message_payload_class_request(
                &self,
                producer: &EndpointInfo,
                class_name: &str,
            ) -> HookResult<String> {
                (**self).on_object_message_payload_class_request(producer, class_name)
            }
            fn on_object_message_payload_request(
                &self,
                producer: &EndpointInfo,
                payload: ObjectPayload,
            ) -> HookResult<ObjectPayload> {
                (**self).on_object_message_payload_request(producer, payload)
            }
            fn dedicated_broker_connection_name(&self, connection: &DedicatedConnection) -> String {
                (**self).dedicated_broker_connection_name(connection)
            }
            fn durable_subscription_name(&self, subscription: &SubscriptionInfo) -> String {
                (**self).durable_subscription_name(subscription)
            }
            fn shared_subscription_name(&self, subscription: &SubscriptionInfo) -> String {
                (**self).shared_subscription_name(subscription)
            }
            fn shared_durable_subscription_name(&self, subscription: &SubscriptionInfo) -> String {
                (**self).shared_durable_subscription_name(subscription)
            }
        }
    };
}

forward_hook!(Arc);
forward_hook!(Box);

#[allow(unused_imports)]
pub(crate) use forward_hook;
