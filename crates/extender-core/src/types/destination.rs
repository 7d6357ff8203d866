//! Destinations and the consumer/producer endpoints addressing them.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::session::SessionInfo;

/// Whether a destination is a topic or a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationKind {
    /// Publish/subscribe destination.
    Topic,
    /// Point-to-point destination.
    Queue,
}

impl DestinationKind {
    /// Maps the host's topic flag to a kind.
    pub fn from_is_topic(is_topic: bool) -> Self {
        if is_topic { Self::Topic } else { Self::Queue }
    }

    /// Returns the string name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Topic => "topic",
            Self::Queue => "queue",
        }
    }
}

impl fmt::Display for DestinationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named JMS destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Destination {
    /// Destination name.
    pub name: String,
    /// Topic or queue.
    pub kind: DestinationKind,
}

impl Destination {
    /// Creates a topic destination.
    pub fn topic(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: DestinationKind::Topic,
        }
    }

    /// Creates a queue destination.
    pub fn queue(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: DestinationKind::Queue,
        }
    }

    /// Returns whether this destination is a topic.
    pub fn is_topic(&self) -> bool {
        self.kind == DestinationKind::Topic
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.name)
    }
}

/// A message consumer or producer, as seen by consumer, producer, and
/// object-message hooks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EndpointInfo {
    /// Unique identifier of the user's connection.
    pub connection_id: String,
    /// JMS connector the endpoint is created on.
    pub connector: String,
    /// GUID of the user's JMS session.
    pub session_guid: String,
    /// Destination addressed by the endpoint.
    pub destination: Destination,
}

impl EndpointInfo {
    /// Creates an endpoint within a session.
    pub fn new(session: &SessionInfo, destination: Destination) -> Self {
        Self {
            connection_id: session.connection_id.clone(),
            connector: session.connector.clone(),
            session_guid: session.session_guid.clone(),
            destination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_flag_mapping() {
        assert_eq!(DestinationKind::from_is_topic(true), DestinationKind::Topic);
        assert_eq!(DestinationKind::from_is_topic(false), DestinationKind::Queue);
        assert!(Destination::topic("stocks").is_topic());
        assert!(!Destination::queue("orders").is_topic());
    }

    #[test]
    fn test_endpoint_inherits_session_ids() {
        let session = SessionInfo::new("c1", "ActiveMQ", "sess1");
        let endpoint = EndpointInfo::new(&session, Destination::queue("orders"));
        assert_eq!(endpoint.connection_id, "c1");
        assert_eq!(endpoint.connector, "ActiveMQ");
        assert_eq!(endpoint.session_guid, "sess1");
        assert_eq!(endpoint.destination.to_string(), "queue:orders");
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&Destination::topic("t")).expect("serialize");
        assert_eq!(json, r#"{"name":"t","kind":"topic"}"#);
    }
}
