//! Durable and shared subscription records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Broker subscription variant. Each variant is gated and decorated by
/// its own hook methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionKind {
    /// Survives consumer disconnection; one consumer at a time.
    Durable,
    /// Load-balanced across consumers; removed with its last consumer.
    Shared,
    /// Load-balanced across consumers and survives disconnection.
    SharedDurable,
}

impl SubscriptionKind {
    /// All kinds, in declaration order.
    pub const ALL: [SubscriptionKind; 3] = [Self::Durable, Self::Shared, Self::SharedDurable];

    /// Returns the string name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Durable => "durable",
            Self::Shared => "shared",
            Self::SharedDurable => "shared_durable",
        }
    }
}

impl fmt::Display for SubscriptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A subscription request or an open subscription consumer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionInfo {
    /// Unique identifier of the user's connection.
    pub connection_id: String,
    /// JMS connector the subscription is opened on.
    pub connector: String,
    /// Client ID the user specified for the JMS connection.
    pub client_id: String,
    /// GUID of the user's JMS session.
    pub session_guid: String,
    /// Subscription name; requested or already decorated depending on the
    /// hook receiving it.
    pub subscription_name: String,
    /// Topic addressed by the subscription.
    pub topic_name: String,
}

impl SubscriptionInfo {
    /// Creates a subscription record.
    pub fn new(
        connection_id: impl Into<String>,
        connector: impl Into<String>,
        client_id: impl Into<String>,
        session_guid: impl Into<String>,
        subscription_name: impl Into<String>,
        topic_name: impl Into<String>,
    ) -> Self {
        Self {
            connection_id: connection_id.into(),
            connector: connector.into(),
            client_id: client_id.into(),
            session_guid: session_guid.into(),
            subscription_name: subscription_name.into(),
            topic_name: topic_name.into(),
        }
    }

    /// Returns a copy carrying a different subscription name.
    pub fn with_subscription_name(&self, subscription_name: impl Into<String>) -> Self {
        Self {
            subscription_name: subscription_name.into(),
            ..self.clone()
        }
    }
}
