//! End-to-end scenarios: hooks composed, memoized, and driven through the
//! dispatcher the way the extender drives them.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use extender_hooks::prelude::*;
use extender_hooks::{DispatchSettings, EventOutcome, HookDispatcher, HostEvent, OutcomeKind};

/// Authenticates against a fixed user table and scopes durable names per user.
struct Directory;

impl JmsExtenderHook for Directory {
    fn on_connection_request(&self, request: &ConnectionRequest) -> HookResult<bool> {
        match (request.user.as_str(), request.password.as_str()) {
            ("alice", "secret") => Ok(true),
            ("alice", _) => Err(HookError::with_code("bad creds", "AUTH_001")),
            _ => Ok(false),
        }
    }

    fn durable_subscription_name(&self, subscription: &SubscriptionInfo) -> String {
        format!("{}.{}", subscription.client_id, subscription.subscription_name)
    }

    fn on_durable_subscription_request(&self, subscription: &SubscriptionInfo) -> HookResult<bool> {
        Ok(subscription.subscription_name.starts_with("cid1."))
    }
}

/// Counts payload requests and refuses queue producers.
#[derive(Default)]
struct Audit {
    payloads: AtomicUsize,
}

impl JmsExtenderHook for Audit {
    fn on_message_producer_request(&self, producer: &EndpointInfo) -> HookResult<bool> {
        Ok(producer.destination.is_topic())
    }

    fn on_object_message_payload_request(
        &self,
        _producer: &EndpointInfo,
        payload: ObjectPayload,
    ) -> HookResult<ObjectPayload> {
        self.payloads.fetch_add(1, Ordering::SeqCst);
        Ok(payload)
    }
}

fn sub(connection_id: &str, client_id: &str, name: &str) -> SubscriptionInfo {
    SubscriptionInfo::new(connection_id, "ActiveMQ", client_id, "s1", name, "stocks")
}

fn endpoint(destination: Destination) -> EndpointInfo {
    EndpointInfo::new(&SessionInfo::new("c1", "ActiveMQ", "s1"), destination)
}

fn outcome_of(outcomes: &[EventOutcome], index: usize) -> OutcomeKind {
    outcomes[index].outcome
}

#[test]
fn default_hook_passes_everything_through() {
    let hook = DefaultHook;
    let subscription = sub("c1", "cid1", "sub1");

    assert!(hook.on_connection_request(&ConnectionRequest::new("c1", "u", "p")).unwrap());
    assert_eq!(hook.durable_subscription_name(&subscription), "sub1");
    assert_eq!(hook.durable_subscription_name(&subscription), "sub1");
    assert_eq!(
        hook.on_object_message_payload_class_request(&endpoint(Destination::queue("q")), "com.acme.Order")
            .unwrap(),
        "com.acme.Order"
    );
}

#[tokio::test]
async fn composed_hooks_through_dispatcher() {
    let audit = Arc::new(Audit::default());
    let chain = HookChain::builder()
        .hook("directory", Directory, 10)
        .shared("audit", audit.clone(), 20)
        .build();
    assert_eq!(chain.names(), vec!["directory", "audit"]);

    let dispatcher = HookDispatcher::new(
        Arc::new(MemoizedNames::new(chain)),
        DispatchSettings::default(),
    );

    let ok = dispatcher
        .connection_request(ConnectionRequest::new("c1", "alice", "secret"))
        .await;
    assert!(ok.is_allowed());

    let rejected = dispatcher
        .connection_request(ConnectionRequest::new("c2", "alice", "wrong"))
        .await;
    let denial = rejected.client_denial().expect("rejected");
    assert_eq!(denial.message, "bad creds");
    assert_eq!(denial.code.as_deref(), Some("AUTH_001"));

    let denied = dispatcher
        .connection_request(ConnectionRequest::new("c3", "mallory", "x"))
        .await;
    assert_eq!(denied.label(), "denied");

    let admitted = dispatcher
        .subscription_request(SubscriptionKind::Durable, sub("c1", "cid1", "sub1"))
        .await;
    assert_eq!(admitted.allowed_value().as_deref(), Some("cid1.sub1"));

    let blocked = dispatcher
        .subscription_request(SubscriptionKind::Durable, sub("c1", "cid2", "sub1"))
        .await;
    assert!(blocked.allowed_value().is_none());

    let queue = dispatcher
        .producer_request(endpoint(Destination::queue("orders")))
        .await;
    assert!(!queue.is_allowed());

    let payload = ObjectPayload::new("com.acme.Order", serde_json::json!({"qty": 1}));
    let sent = dispatcher
        .object_message(endpoint(Destination::topic("orders")), payload.clone())
        .await
        .expect("accepted");
    assert_eq!(sent, payload);
    assert_eq!(audit.payloads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn replayed_scenario_records_outcomes() {
    let dispatcher = HookDispatcher::new(Arc::new(Directory), DispatchSettings::default());
    let events: Vec<HostEvent> = serde_json::from_value(serde_json::json!([
        {"event": "connection_request", "connection_id": "c1", "user": "alice", "password": "secret"},
        {"event": "connection_request", "connection_id": "c2", "user": "alice", "password": "nope"},
        {"event": "session_open", "connection_id": "c1", "connector": "ActiveMQ", "session_guid": "s1"},
        {"event": "subscription_request", "kind": "durable",
         "subscription": {"connection_id": "c1", "connector": "ActiveMQ", "client_id": "cid1",
                          "session_guid": "s1", "subscription_name": "sub1", "topic_name": "stocks"}},
        {"event": "connection_close", "connection_id": "c1"}
    ]))
    .expect("scenario");

    let outcomes = dispatcher.replay_all(events).await;
    assert_eq!(outcomes.len(), 5);
    assert_eq!(outcome_of(&outcomes, 0), OutcomeKind::Allowed);
    assert_eq!(outcome_of(&outcomes, 1), OutcomeKind::Rejected);
    assert_eq!(
        outcomes[1].denial.as_ref().and_then(|d| d.code.as_deref()),
        Some("AUTH_001")
    );
    assert_eq!(outcome_of(&outcomes, 2), OutcomeKind::Notified);
    assert_eq!(outcome_of(&outcomes, 3), OutcomeKind::Allowed);
    assert_eq!(outcomes[3].value, Some(serde_json::json!("cid1.sub1")));
    assert_eq!(outcome_of(&outcomes, 4), OutcomeKind::Notified);
}
