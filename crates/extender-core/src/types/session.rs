//! Session records.

use serde::{Deserialize, Serialize};

/// A JMS session opened by a user on a connector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Unique identifier of the user's connection.
    pub connection_id: String,
    /// JMS connector the session belongs to.
    pub connector: String,
    /// GUID of the user's JMS session.
    pub session_guid: String,
}

impl SessionInfo {
    /// Creates a session record.
    pub fn new(
        connection_id: impl Into<String>,
        connector: impl Into<String>,
        session_guid: impl Into<String>,
    ) -> Self {
        Self {
            connection_id: connection_id.into(),
            connector: connector.into(),
            session_guid: session_guid.into(),
        }
    }
}
