//! Hook point definitions.

use serde::{Deserialize, Serialize};

use extender_core::types::SubscriptionKind;

/// What kind of answer a hook point gives the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookCategory {
    /// One-time setup; failure aborts host startup.
    Lifecycle,
    /// Accept/deny decision on a request.
    Gate,
    /// Observational event; cannot veto.
    Notification,
    /// Rewrites a client ID or subscription name.
    Decoration,
    /// Rewrites an object message class or payload.
    Payload,
}

/// Enumeration of every hook method the host invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookPoint {
    // ── Lifecycle ──
    /// Hook initialization with the connectors configuration directory.
    Init,

    // ── Connection ──
    /// User connection and authentication request.
    ConnectionRequest,
    /// User connection closed.
    ConnectionClose,
    /// Dedicated broker connection request.
    DedicatedBrokerConnectionRequest,
    /// Dedicated broker connection client ID decoration.
    DedicatedBrokerConnectionName,

    // ── Session ──
    /// JMS session opened.
    SessionOpen,
    /// JMS session closed.
    SessionClose,

    // ── Consumer / producer ──
    /// Message consumer creation request.
    MessageConsumerRequest,
    /// Message consumer closed.
    MessageConsumerClose,
    /// Message producer creation request.
    MessageProducerRequest,
    /// Message producer closed.
    MessageProducerClose,

    // ── Subscriptions ──
    /// Durable subscription request.
    DurableSubscriptionRequest,
    /// Shared subscription request.
    SharedSubscriptionRequest,
    /// Shared durable subscription request.
    SharedDurableSubscriptionRequest,
    /// Durable subscription consumer closed.
    DurableSubscriptionClose,
    /// Shared subscription consumer closed.
    SharedSubscriptionClose,
    /// Shared durable subscription consumer closed.
    SharedDurableSubscriptionClose,
    /// Durable subscription name decoration.
    DurableSubscriptionName,
    /// Shared subscription name decoration.
    SharedSubscriptionName,
    /// Shared durable subscription name decoration.
    SharedDurableSubscriptionName,

    // ── Object messages ──
    /// Object message payload class request.
    ObjectMessagePayloadClassRequest,
    /// Object message payload request.
    ObjectMessagePayloadRequest,
}

impl HookPoint {
    /// Returns the string name of this hook point.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::ConnectionRequest => "connection_request",
            Self::ConnectionClose => "connection_close",
            Self::DedicatedBrokerConnectionRequest => "dedicated_broker_connection_request",
            Self::DedicatedBrokerConnectionName => "dedicated_broker_connection_name",
            Self::SessionOpen => "session_open",
            Self::SessionClose => "session_close",
            Self::MessageConsumerRequest => "message_consumer_request",
            Self::MessageConsumerClose => "message_consumer_close",
            Self::MessageProducerRequest => "message_producer_request",
            Self::MessageProducerClose => "message_producer_close",
            Self::DurableSubscriptionRequest => "durable_subscription_request",
            Self::SharedSubscriptionRequest => "shared_subscription_request",
            Self::SharedDurableSubscriptionRequest => "shared_durable_subscription_request",
            Self::DurableSubscriptionClose => "durable_subscription_close",
            Self::SharedSubscriptionClose => "shared_subscription_close",
            Self::SharedDurableSubscriptionClose => "shared_durable_subscription_close",
            Self::DurableSubscriptionName => "durable_subscription_name",
            Self::SharedSubscriptionName => "shared_subscription_name",
            Self::SharedDurableSubscriptionName => "shared_durable_subscription_name",
            Self::ObjectMessagePayloadClassRequest => "object_message_payload_class_request",
            Self::ObjectMessagePayloadRequest => "object_message_payload_request",
        }
    }

    /// Returns the category of this hook point.
    pub fn category(&self) -> HookCategory {
        match self {
            Self::Init => HookCategory::Lifecycle,
            Self::ConnectionRequest
            | Self::DedicatedBrokerConnectionRequest
            | Self::MessageConsumerRequest
            | Self::MessageProducerRequest
            | Self::DurableSubscriptionRequest
            | Self::SharedSubscriptionRequest
            | Self::SharedDurableSubscriptionRequest => HookCategory::Gate,
            Self::ConnectionClose
            | Self::SessionOpen
            | Self::SessionClose
            | Self::MessageConsumerClose
            | Self::MessageProducerClose
            | Self::DurableSubscriptionClose
            | Self::SharedSubscriptionClose
            | Self::SharedDurableSubscriptionClose => HookCategory::Notification,
            Self::DedicatedBrokerConnectionName
            | Self::DurableSubscriptionName
            | Self::SharedSubscriptionName
            | Self::SharedDurableSubscriptionName => HookCategory::Decoration,
            Self::ObjectMessagePayloadClassRequest | Self::ObjectMessagePayloadRequest => {
                HookCategory::Payload
            }
        }
    }

    /// Returns whether this hook point can deny a request.
    pub fn is_gate(&self) -> bool {
        self.category() == HookCategory::Gate
    }

    /// The request gate for a subscription kind.
    pub fn subscription_request(kind: SubscriptionKind) -> Self {
        match kind {
            SubscriptionKind::Durable => Self::DurableSubscriptionRequest,
            SubscriptionKind::Shared => Self::SharedSubscriptionRequest,
            SubscriptionKind::SharedDurable => Self::SharedDurableSubscriptionRequest,
        }
    }

    /// The close notification for a subscription kind.
    pub fn subscription_close(kind: SubscriptionKind) -> Self {
        match kind {
            SubscriptionKind::Durable => Self::DurableSubscriptionClose,
            SubscriptionKind::Shared => Self::SharedSubscriptionClose,
            SubscriptionKind::SharedDurable => Self::SharedDurableSubscriptionClose,
        }
    }

    /// The name decoration for a subscription kind.
    pub fn subscription_name(kind: SubscriptionKind) -> Self {
        match kind {
            SubscriptionKind::Durable => Self::DurableSubscriptionName,
            SubscriptionKind::Shared => Self::SharedSubscriptionName,
            SubscriptionKind::SharedDurable => Self::SharedDurableSubscriptionName,
        }
    }
}

impl std::fmt::Display for HookPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_name_matches_as_str() {
        let json = serde_json::to_string(&HookPoint::SharedDurableSubscriptionName).expect("ser");
        assert_eq!(json, "\"shared_durable_subscription_name\"");
        assert_eq!(
            HookPoint::SharedDurableSubscriptionName.as_str(),
            "shared_durable_subscription_name"
        );
    }

    #[test]
    fn test_subscription_points_by_kind() {
        for kind in SubscriptionKind::ALL {
            assert_eq!(HookPoint::subscription_request(kind).category(), HookCategory::Gate);
            assert_eq!(
                HookPoint::subscription_close(kind).category(),
                HookCategory::Notification
            );
            assert_eq!(
                HookPoint::subscription_name(kind).category(),
                HookCategory::Decoration
            );
        }
    }

    #[test]
    fn test_gate_points() {
        assert!(HookPoint::ConnectionRequest.is_gate());
        assert!(HookPoint::MessageProducerRequest.is_gate());
        assert!(!HookPoint::ConnectionClose.is_gate());
        assert!(!HookPoint::ObjectMessagePayloadRequest.is_gate());
        assert_eq!(HookPoint::Init.category(), HookCategory::Lifecycle);
    }
}
