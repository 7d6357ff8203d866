//! Host events and their recorded outcomes.
//!
//! A [`HostEvent`] is one thing the extender asks of its hook. Events can
//! be scripted as JSON and replayed through a [`HookDispatcher`] to see how
//! a hook answers, e.g.
//!
//! ```json
//! {"event": "subscription_request", "kind": "durable",
//!  "subscription": {"connection_id": "c1", "connector": "ActiveMQ",
//!                   "client_id": "cid1", "session_guid": "s1",
//!                   "subscription_name": "sub1", "topic_name": "stocks"}}
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use extender_core::types::{
    ConnectionRequest, DedicatedConnection, EndpointInfo, ObjectPayload, SessionInfo,
    SubscriptionInfo, SubscriptionKind,
};

use super::decision::{Admission, ClientDenial, GateDecision};
use super::dispatcher::HookDispatcher;
use crate::hooks::definitions::HookPoint;

/// One request or notification from the extender.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    /// A user opens a connection.
    ConnectionRequest(ConnectionRequest),
    /// A user connection closed.
    ConnectionClose {
        /// The closed connection.
        connection_id: String,
    },
    /// A user asks for a dedicated broker connection.
    DedicatedConnection(DedicatedConnection),
    /// A session opened.
    SessionOpen(SessionInfo),
    /// A session closed.
    SessionClose(SessionInfo),
    /// A user creates a consumer.
    ConsumerRequest(EndpointInfo),
    /// A consumer closed.
    ConsumerClose(EndpointInfo),
    /// A user creates a producer.
    ProducerRequest(EndpointInfo),
    /// A producer closed.
    ProducerClose(EndpointInfo),
    /// A user asks for a durable and/or shared subscription.
    SubscriptionRequest {
        /// Subscription variant.
        kind: SubscriptionKind,
        /// The subscription as requested.
        subscription: SubscriptionInfo,
    },
    /// A subscription consumer closed.
    SubscriptionClose {
        /// Subscription variant.
        kind: SubscriptionKind,
        /// The subscription.
        subscription: SubscriptionInfo,
    },
    /// A user sends an object message.
    ObjectMessage {
        /// The producer sending it.
        producer: EndpointInfo,
        /// The requested payload.
        payload: ObjectPayload,
    },
}

impl HostEvent {
    /// The hook point whose answer decides this event.
    pub fn hook_point(&self) -> HookPoint {
        match self {
            Self::ConnectionRequest(_) => HookPoint::ConnectionRequest,
            Self::ConnectionClose { .. } => HookPoint::ConnectionClose,
            Self::DedicatedConnection(_) => HookPoint::DedicatedBrokerConnectionRequest,
            Self::SessionOpen(_) => HookPoint::SessionOpen,
            Self::SessionClose(_) => HookPoint::SessionClose,
            Self::ConsumerRequest(_) => HookPoint::MessageConsumerRequest,
            Self::ConsumerClose(_) => HookPoint::MessageConsumerClose,
            Self::ProducerRequest(_) => HookPoint::MessageProducerRequest,
            Self::ProducerClose(_) => HookPoint::MessageProducerClose,
            Self::SubscriptionRequest { kind, .. } => HookPoint::subscription_request(*kind),
            Self::SubscriptionClose { kind, .. } => HookPoint::subscription_close(*kind),
            Self::ObjectMessage { .. } => HookPoint::ObjectMessagePayloadRequest,
        }
    }
}

/// How the hook answered an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// A gate allowed the request.
    Allowed,
    /// A gate returned `false`.
    Denied,
    /// The hook returned an error.
    Rejected,
    /// A notification was delivered.
    Notified,
    /// An object message was accepted, possibly rewritten.
    Transformed,
}

/// Record of one replayed event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventOutcome {
    /// Hook point that decided the event.
    pub hook: HookPoint,
    /// How it answered.
    pub outcome: OutcomeKind,
    /// Decorated name or accepted payload, when the event produces one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    /// What the client would be told, when the request was refused.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub denial: Option<ClientDenial>,
    /// When the outcome was recorded.
    pub at: DateTime<Utc>,
}

impl EventOutcome {
    fn new(hook: HookPoint, outcome: OutcomeKind) -> Self {
        Self {
            hook,
            outcome,
            value: None,
            denial: None,
            at: Utc::now(),
        }
    }

    fn notified(hook: HookPoint) -> Self {
        Self::new(hook, OutcomeKind::Notified)
    }

    fn gated(hook: HookPoint, decision: &GateDecision) -> Self {
        let outcome = match decision {
            GateDecision::Allowed => OutcomeKind::Allowed,
            GateDecision::Denied => OutcomeKind::Denied,
            GateDecision::Rejected(_) => OutcomeKind::Rejected,
        };
        Self {
            denial: decision.client_denial(),
            ..Self::new(hook, outcome)
        }
    }

    fn admitted(hook: HookPoint, admission: Admission<String>) -> Self {
        let mut outcome = Self::gated(hook, &admission.decision);
        if let Some(name) = admission.allowed_value() {
            outcome.value = Some(serde_json::Value::String(name));
        }
        outcome
    }
}

impl HookDispatcher {
    /// Runs one host event through the hook.
    pub async fn replay(&self, event: HostEvent) -> EventOutcome {
        let hook = event.hook_point();

        match event {
            HostEvent::ConnectionRequest(request) => {
                EventOutcome::gated(hook, &self.connection_request(request).await)
            }
            HostEvent::ConnectionClose { connection_id } => {
                self.connection_closed(connection_id).await;
                EventOutcome::notified(hook)
            }
            HostEvent::DedicatedConnection(connection) => {
                EventOutcome::admitted(hook, self.dedicated_connection(connection).await)
            }
            HostEvent::SessionOpen(session) => {
                self.session_opened(session).await;
                EventOutcome::notified(hook)
            }
            HostEvent::SessionClose(session) => {
                self.session_closed(session).await;
                EventOutcome::notified(hook)
            }
            HostEvent::ConsumerRequest(consumer) => {
                EventOutcome::gated(hook, &self.consumer_request(consumer).await)
            }
            HostEvent::ConsumerClose(consumer) => {
                self.consumer_closed(consumer).await;
                EventOutcome::notified(hook)
            }
            HostEvent::ProducerRequest(producer) => {
                EventOutcome::gated(hook, &self.producer_request(producer).await)
            }
            HostEvent::ProducerClose(producer) => {
                self.producer_closed(producer).await;
                EventOutcome::notified(hook)
            }
            HostEvent::SubscriptionRequest { kind, subscription } => EventOutcome::admitted(
                hook,
                self.subscription_request(kind, subscription).await,
            ),
            HostEvent::SubscriptionClose { kind, subscription } => {
                self.subscription_closed(kind, subscription).await;
                EventOutcome::notified(hook)
            }
            HostEvent::ObjectMessage { producer, payload } => {
                match self.object_message(producer, payload).await {
                    Ok(accepted) => EventOutcome {
                        value: serde_json::to_value(&accepted).ok(),
                        ..EventOutcome::new(hook, OutcomeKind::Transformed)
                    },
                    Err(err) => EventOutcome {
                        denial: Some(ClientDenial::from(&err)),
                        ..EventOutcome::new(hook, OutcomeKind::Rejected)
                    },
                }
            }
        }
    }

    /// Runs events in order, one at a time.
    pub async fn replay_all(&self, events: Vec<HostEvent>) -> Vec<EventOutcome> {
        let mut outcomes = Vec::with_capacity(events.len());
        for event in events {
            outcomes.push(self.replay(event).await);
        }
        outcomes
    }
}
