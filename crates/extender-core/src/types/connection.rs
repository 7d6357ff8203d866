//! Connection-level records.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::context::ClientContext;

/// A user's request to open a connection to the JMS Extender.
///
/// This is the Lightstreamer connection between the client and the
/// extender, not a broker connection.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRequest {
    /// Unique identifier of the user's connection.
    pub connection_id: String,
    /// Name of the user trying to connect.
    pub user: String,
    /// Password of the user trying to connect.
    pub password: String,
    /// Properties of the originating request.
    #[serde(default)]
    pub client_context: ClientContext,
    /// Identification name from the client TLS certificate, when the client
    /// authenticated with one.
    #[serde(default)]
    pub client_principal: Option<String>,
}

impl ConnectionRequest {
    /// Creates a request with an empty client context and no principal.
    pub fn new(
        connection_id: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            connection_id: connection_id.into(),
            user: user.into(),
            password: password.into(),
            client_context: ClientContext::default(),
            client_principal: None,
        }
    }

    /// Sets the client context.
    pub fn with_context(mut self, client_context: ClientContext) -> Self {
        self.client_context = client_context;
        self
    }

    /// Sets the client certificate principal.
    pub fn with_principal(mut self, principal: impl Into<String>) -> Self {
        self.client_principal = Some(principal.into());
        self
    }
}

impl fmt::Debug for ConnectionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionRequest")
            .field("connection_id", &self.connection_id)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("client_context", &self.client_context)
            .field("client_principal", &self.client_principal)
            .finish()
    }
}

/// A request for a dedicated broker connection identified by a client ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DedicatedConnection {
    /// Unique identifier of the user's connection.
    pub connection_id: String,
    /// JMS connector the dedicated connection is requested on.
    pub connector: String,
    /// Client ID for the broker connection.
    pub client_id: String,
}

impl DedicatedConnection {
    /// Creates a dedicated connection record.
    pub fn new(
        connection_id: impl Into<String>,
        connector: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            connection_id: connection_id.into(),
            connector: connector.into(),
            client_id: client_id.into(),
        }
    }

    /// Returns a copy carrying a different client ID.
    pub fn with_client_id(&self, client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            ..self.clone()
        }
    }
}
