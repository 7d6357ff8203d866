//! Host-side hook invocation.
//!
//! Hooks are synchronous, so each invocation runs on tokio's blocking pool.
//! With a timeout configured, the host stops waiting once it elapses and
//! treats the call as a rejection; the hook call itself is not interrupted
//! and finishes in the background.
//!
//! Request flows follow the extender's ordering:
//! - dedicated connections and subscriptions are decorated first, then the
//!   gate sees the decorated name;
//! - object messages have their class checked first, then the filled
//!   payload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use extender_core::error::{HookError, HostError};
use extender_core::result::{HookResult, HostResult};
use extender_core::types::{
    ConnectionRequest, DedicatedConnection, EndpointInfo, ObjectPayload, SessionInfo,
    SubscriptionInfo, SubscriptionKind,
};

use super::decision::{Admission, GateDecision, HOOK_PANIC_CODE, HOOK_TIMEOUT_CODE};
use crate::hooks::contract::{JmsExtenderHook, SubscriptionHooks};
use crate::hooks::definitions::HookPoint;

/// Invocation settings.
#[derive(Debug, Clone, Default)]
pub struct DispatchSettings {
    /// Maximum time to wait for a single hook call. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl DispatchSettings {
    /// Settings with the given timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

/// Why a hook call produced no answer.
#[derive(Debug, Clone, Copy)]
enum InvokeFailure {
    TimedOut(Duration),
    Panicked,
}

impl InvokeFailure {
    fn into_hook_error(self, point: HookPoint) -> HookError {
        match self {
            Self::TimedOut(limit) => HookError::with_code(
                format!("Hook '{point}' did not answer within {}ms", limit.as_millis()),
                HOOK_TIMEOUT_CODE,
            ),
            Self::Panicked => {
                HookError::with_code(format!("Hook '{point}' panicked"), HOOK_PANIC_CODE)
            }
        }
    }
}

/// Calls a hook on behalf of the host and maps its answers.
#[derive(Clone)]
pub struct HookDispatcher {
    /// The hook being driven.
    hook: Arc<dyn JmsExtenderHook>,
    /// Invocation settings.
    settings: DispatchSettings,
}

impl std::fmt::Debug for HookDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookDispatcher")
            .field("hook", &"<dyn JmsExtenderHook>")
            .field("settings", &self.settings)
            .finish()
    }
}

impl HookDispatcher {
    /// Creates a dispatcher driving `hook`.
    pub fn new(hook: Arc<dyn JmsExtenderHook>, settings: DispatchSettings) -> Self {
        Self { hook, settings }
    }

    /// Returns the hook being driven.
    pub fn hook(&self) -> &Arc<dyn JmsExtenderHook> {
        &self.hook
    }

    /// Returns the invocation settings.
    pub fn settings(&self) -> &DispatchSettings {
        &self.settings
    }

    /// Runs one hook call on the blocking pool.
    async fn invoke<T, F>(&self, point: HookPoint, call: F) -> Result<T, InvokeFailure>
    where
        F: FnOnce(&dyn JmsExtenderHook) -> T + Send + 'static,
        T: Send + 'static,
    {
        debug!(hook = %point, "Invoking hook");

        let hook = self.hook.clone();
        let task = tokio::task::spawn_blocking(move || call(&*hook));

        let joined = match self.settings.timeout {
            Some(limit) => match tokio::time::timeout(limit, task).await {
                Ok(joined) => joined,
                Err(_) => {
                    error!(
                        hook = %point,
                        timeout_ms = limit.as_millis() as u64,
                        "Hook timed out"
                    );
                    return Err(InvokeFailure::TimedOut(limit));
                }
            },
            None => task.await,
        };

        joined.map_err(|e| {
            error!(hook = %point, error = %e, "Hook invocation failed");
            InvokeFailure::Panicked
        })
    }

    async fn gate<F>(&self, point: HookPoint, call: F) -> GateDecision
    where
        F: FnOnce(&dyn JmsExtenderHook) -> HookResult<bool> + Send + 'static,
    {
        let decision = match self.invoke(point, call).await {
            Ok(result) => GateDecision::from(result),
            Err(failure) => GateDecision::Rejected(failure.into_hook_error(point)),
        };

        match &decision {
            GateDecision::Allowed => debug!(hook = %point, "Gate allowed"),
            GateDecision::Denied => info!(hook = %point, "Gate denied"),
            GateDecision::Rejected(err) => info!(
                hook = %point,
                code = err.code().unwrap_or("-"),
                reason = %err,
                "Gate rejected"
            ),
        }

        decision
    }

    async fn notify<F>(&self, point: HookPoint, call: F)
    where
        F: FnOnce(&dyn JmsExtenderHook) + Send + 'static,
    {
        if self.invoke(point, call).await.is_err() {
            warn!(hook = %point, "Notification hook did not complete");
        }
    }

    async fn transform<T, F>(&self, point: HookPoint, call: F) -> HookResult<T>
    where
        F: FnOnce(&dyn JmsExtenderHook) -> HookResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let result = match self.invoke(point, call).await {
            Ok(result) => result,
            Err(failure) => Err(failure.into_hook_error(point)),
        };
        if let Err(err) = &result {
            info!(
                hook = %point,
                code = err.code().unwrap_or("-"),
                reason = %err,
                "Request rejected"
            );
        }
        result
    }

    // ── Lifecycle ──

    /// Initializes the hook. Any failure is fatal to the host.
    pub async fn init(&self, config_dir: &Path) -> HostResult<()> {
        let dir: PathBuf = config_dir.to_path_buf();
        let shown = dir.display().to_string();

        match self.invoke(HookPoint::Init, move |h| h.init(&dir)).await {
            Ok(Ok(())) => {
                info!(config_dir = %shown, "Hook initialized");
                Ok(())
            }
            Ok(Err(err)) => {
                error!(
                    config_dir = %shown,
                    code = err.code().unwrap_or("-"),
                    error = %err,
                    "Hook initialization failed"
                );
                Err(HostError::from(err))
            }
            Err(failure) => Err(HostError::initialization(
                failure.into_hook_error(HookPoint::Init).message(),
            )),
        }
    }

    // ── Connections ──

    /// Authenticates a user connection.
    pub async fn connection_request(&self, request: ConnectionRequest) -> GateDecision {
        self.gate(HookPoint::ConnectionRequest, move |h| {
            h.on_connection_request(&request)
        })
        .await
    }

    /// Reports a closed user connection.
    pub async fn connection_closed(&self, connection_id: String) {
        self.notify(HookPoint::ConnectionClose, move |h| {
            h.on_connection_close(&connection_id)
        })
        .await
    }

    /// Decorates the client ID of a dedicated broker connection, then gates
    /// the connection with the decorated ID.
    pub async fn dedicated_connection(
        &self,
        connection: DedicatedConnection,
    ) -> Admission<String> {
        let requested = connection.clone();
        let decorated = match self
            .invoke(HookPoint::DedicatedBrokerConnectionName, move |h| {
                h.dedicated_broker_connection_name(&requested)
            })
            .await
        {
            Ok(name) => name,
            Err(failure) => {
                return Admission {
                    decision: GateDecision::Rejected(
                        failure.into_hook_error(HookPoint::DedicatedBrokerConnectionName),
                    ),
                    value: connection.client_id,
                };
            }
        };

        debug!(
            connector = %connection.connector,
            requested = %connection.client_id,
            decorated = %decorated,
            "Client ID decorated"
        );

        let gated = connection.with_client_id(decorated.clone());
        let decision = self
            .gate(HookPoint::DedicatedBrokerConnectionRequest, move |h| {
                h.on_dedicated_broker_connection_request(&gated)
            })
            .await;

        Admission {
            decision,
            value: decorated,
        }
    }

    // ── Sessions ──

    /// Reports a new JMS session.
    pub async fn session_opened(&self, session: SessionInfo) {
        self.notify(HookPoint::SessionOpen, move |h| h.on_session_open(&session))
            .await
    }

    /// Reports a closed JMS session.
    pub async fn session_closed(&self, session: SessionInfo) {
        self.notify(HookPoint::SessionClose, move |h| h.on_session_close(&session))
            .await
    }

    // ── Consumers and producers ──

    /// Gates a message consumer.
    pub async fn consumer_request(&self, consumer: EndpointInfo) -> GateDecision {
        self.gate(HookPoint::MessageConsumerRequest, move |h| {
            h.on_message_consumer_request(&consumer)
        })
        .await
    }

    /// Reports a closed message consumer.
    pub async fn consumer_closed(&self, consumer: EndpointInfo) {
        self.notify(HookPoint::MessageConsumerClose, move |h| {
            h.on_message_consumer_close(&consumer)
        })
        .await
    }

    /// Gates a message producer.
    pub async fn producer_request(&self, producer: EndpointInfo) -> GateDecision {
        self.gate(HookPoint::MessageProducerRequest, move |h| {
            h.on_message_producer_request(&producer)
        })
        .await
    }

    /// Reports a closed message producer.
    pub async fn producer_closed(&self, producer: EndpointInfo) {
        self.notify(HookPoint::MessageProducerClose, move |h| {
            h.on_message_producer_close(&producer)
        })
        .await
    }

    // ── Subscriptions ──

    /// Decorates the subscription name, then gates the subscription with the
    /// decorated name.
    pub async fn subscription_request(
        &self,
        kind: SubscriptionKind,
        subscription: SubscriptionInfo,
    ) -> Admission<String> {
        let name_point = HookPoint::subscription_name(kind);
        let requested = subscription.clone();
        let decorated = match self
            .invoke(name_point, move |h| h.subscription_name(kind, &requested))
            .await
        {
            Ok(name) => name,
            Err(failure) => {
                return Admission {
                    decision: GateDecision::Rejected(failure.into_hook_error(name_point)),
                    value: subscription.subscription_name,
                };
            }
        };

        debug!(
            kind = %kind,
            connector = %subscription.connector,
            requested = %subscription.subscription_name,
            decorated = %decorated,
            "Subscription name decorated"
        );

        let gated = subscription.with_subscription_name(decorated.clone());
        let decision = self
            .gate(HookPoint::subscription_request(kind), move |h| {
                h.subscription_request(kind, &gated)
            })
            .await;

        Admission {
            decision,
            value: decorated,
        }
    }

    /// Reports a closed subscription consumer.
    pub async fn subscription_closed(&self, kind: SubscriptionKind, subscription: SubscriptionInfo) {
        self.notify(HookPoint::subscription_close(kind), move |h| {
            h.subscription_close(kind, &subscription)
        })
        .await
    }

    // ── Object messages ──

    /// Runs an object message through the class and payload hooks and
    /// returns the payload to send.
    pub async fn object_message(
        &self,
        producer: EndpointInfo,
        payload: ObjectPayload,
    ) -> HookResult<ObjectPayload> {
        let class_producer = producer.clone();
        let requested = payload.class_name.clone();
        let accepted_class = self
            .transform(HookPoint::ObjectMessagePayloadClassRequest, move |h| {
                h.on_object_message_payload_class_request(&class_producer, &requested)
            })
            .await?;

        if accepted_class != payload.class_name {
            debug!(
                requested = %payload.class_name,
                accepted = %accepted_class,
                "Payload class replaced"
            );
        }

        let filled = ObjectPayload {
            class_name: accepted_class,
            body: payload.body,
        };
        self.transform(HookPoint::ObjectMessagePayloadRequest, move |h| {
            h.on_object_message_payload_request(&producer, filled)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use extender_core::types::Destination;

    use super::*;
    use crate::hooks::contract::DefaultHook;

    fn dispatcher(hook: impl JmsExtenderHook + 'static) -> HookDispatcher {
        HookDispatcher::new(Arc::new(hook), DispatchSettings::default())
    }

    fn endpoint() -> EndpointInfo {
        EndpointInfo::new(
            &SessionInfo::new("c1", "conn1", "sess1"),
            Destination::topic("topicA"),
        )
    }

    #[tokio::test]
    async fn test_default_hook_allows_everything() {
        let d = dispatcher(DefaultHook);
        assert!(
            d.connection_request(ConnectionRequest::new("c1", "alice", "pw"))
                .await
                .is_allowed()
        );
        assert!(d.consumer_request(endpoint()).await.is_allowed());
        assert!(d.producer_request(endpoint()).await.is_allowed());

        let sub = SubscriptionInfo::new("c1", "conn1", "cid1", "sess1", "sub1", "topicA");
        let admission = d.subscription_request(SubscriptionKind::Durable, sub).await;
        assert_eq!(admission.allowed_value().as_deref(), Some("sub1"));
    }

    #[tokio::test]
    async fn test_init_default_ok() {
        let d = dispatcher(DefaultHook);
        assert!(d.init(Path::new("/tmp")).await.is_ok());
    }

    struct FailingInit;

    impl JmsExtenderHook for FailingInit {
        fn init(&self, config_dir: &Path) -> HookResult<()> {
            Err(HookError::with_code(
                format!("missing users file in {}", config_dir.display()),
                "INIT_USERS",
            ))
        }
    }

    #[tokio::test]
    async fn test_init_failure_is_fatal_host_error() {
        let d = dispatcher(FailingInit);
        let err = d.init(Path::new("/etc/jms")).await.expect_err("fatal");
        assert_eq!(err.kind, extender_core::error::ErrorKind::Initialization);
        assert!(err.message.contains("INIT_USERS"));
    }

    /// Records the subscription name the gate sees.
    #[derive(Default)]
    struct UserScoped {
        gated: Mutex<Vec<String>>,
    }

    impl JmsExtenderHook for UserScoped {
        fn durable_subscription_name(&self, subscription: &SubscriptionInfo) -> String {
            format!("{}::{}", subscription.client_id, subscription.subscription_name)
        }

        fn on_durable_subscription_request(
            &self,
            subscription: &SubscriptionInfo,
        ) -> HookResult<bool> {
            self.gated
                .lock()
                .expect("lock")
                .push(subscription.subscription_name.clone());
            Ok(true)
        }

        fn dedicated_broker_connection_name(&self, connection: &DedicatedConnection) -> String {
            format!("{}@{}", connection.client_id, connection.connector)
        }

        fn on_dedicated_broker_connection_request(
            &self,
            connection: &DedicatedConnection,
        ) -> HookResult<bool> {
            Ok(connection.client_id.ends_with("@conn1"))
        }
    }

    #[tokio::test]
    async fn test_subscription_decorated_before_gate() {
        let hook = Arc::new(UserScoped::default());
        let d = HookDispatcher::new(hook.clone(), DispatchSettings::default());
        let sub = SubscriptionInfo::new("c1", "conn1", "cid1", "sess1", "sub1", "topicA");

        let admission = d.subscription_request(SubscriptionKind::Durable, sub).await;
        assert_eq!(admission.allowed_value().as_deref(), Some("cid1::sub1"));
        assert_eq!(*hook.gated.lock().expect("lock"), vec!["cid1::sub1".to_string()]);
    }

    #[tokio::test]
    async fn test_dedicated_connection_decorated_before_gate() {
        let d = dispatcher(UserScoped::default());
        let admission = d
            .dedicated_connection(DedicatedConnection::new("c1", "conn1", "cid1"))
            .await;
        assert_eq!(admission.allowed_value().as_deref(), Some("cid1@conn1"));

        let other = d
            .dedicated_connection(DedicatedConnection::new("c1", "conn2", "cid1"))
            .await;
        assert!(matches!(other.decision, GateDecision::Denied));
    }

    struct Slow;

    impl JmsExtenderHook for Slow {
        fn on_message_consumer_request(&self, _consumer: &EndpointInfo) -> HookResult<bool> {
            std::thread::sleep(Duration::from_millis(300));
            Ok(true)
        }
    }

    #[tokio::test]
    async fn test_timeout_rejects_with_reserved_code() {
        let d = HookDispatcher::new(
            Arc::new(Slow),
            DispatchSettings::with_timeout(Duration::from_millis(20)),
        );
        let decision = d.consumer_request(endpoint()).await;
        assert_eq!(
            decision.error().and_then(|e| e.code()),
            Some(HOOK_TIMEOUT_CODE)
        );
    }

    struct Panics;

    impl JmsExtenderHook for Panics {
        fn on_message_producer_request(&self, _producer: &EndpointInfo) -> HookResult<bool> {
            panic!("hook bug");
        }

        fn on_session_open(&self, _session: &SessionInfo) {
            panic!("hook bug");
        }
    }

    #[tokio::test]
    async fn test_panicking_gate_rejects() {
        let d = dispatcher(Panics);
        let decision = d.producer_request(endpoint()).await;
        assert_eq!(decision.error().and_then(|e| e.code()), Some(HOOK_PANIC_CODE));
    }

    #[tokio::test]
    async fn test_panicking_notification_is_contained() {
        let d = dispatcher(Panics);
        d.session_opened(SessionInfo::new("c1", "conn1", "s1")).await;
    }

    struct Rewrites;

    impl JmsExtenderHook for Rewrites {
        fn on_object_message_payload_class_request(
            &self,
            _producer: &EndpointInfo,
            class_name: &str,
        ) -> HookResult<String> {
            match class_name {
                "com.acme.LegacyOrder" => Ok("com.acme.Order".to_string()),
                "java.lang.Runtime" => Err(HookError::with_code("class not allowed", "CLS_DENY")),
                other => Ok(other.to_string()),
            }
        }

        fn on_object_message_payload_request(
            &self,
            _producer: &EndpointInfo,
            mut payload: ObjectPayload,
        ) -> HookResult<ObjectPayload> {
            payload.body["checked"] = serde_json::json!(payload.class_name);
            Ok(payload)
        }
    }

    #[tokio::test]
    async fn test_object_message_class_then_payload() {
        let d = dispatcher(Rewrites);
        let sent = d
            .object_message(
                endpoint(),
                ObjectPayload::new("com.acme.LegacyOrder", serde_json::json!({"qty": 1})),
            )
            .await
            .expect("accepted");
        assert_eq!(sent.class_name, "com.acme.Order");
        assert_eq!(sent.body["checked"], "com.acme.Order");
        assert_eq!(sent.body["qty"], 1);
    }

    #[tokio::test]
    async fn test_object_message_class_rejection() {
        let d = dispatcher(Rewrites);
        let err = d
            .object_message(
                endpoint(),
                ObjectPayload::new("java.lang.Runtime", serde_json::json!({})),
            )
            .await
            .expect_err("rejected");
        assert_eq!(err.code(), Some("CLS_DENY"));
    }
}
