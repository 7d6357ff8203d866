//! Client context attached to a connection request.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Properties of the client request that opened a connection.
///
/// All fields are optional: the host fills in only what the transport
/// made available.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientContext {
    /// Remote IP of the connection; may be a proxy address.
    #[serde(default)]
    pub remote_ip: Option<String>,
    /// Remote port of the connection.
    #[serde(default)]
    pub remote_port: Option<u16>,
    /// User agent declared in the HTTP request.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Comma-separated addresses from `X-Forwarded-For`, minus forwards
    /// the server was configured to treat as local.
    #[serde(default)]
    pub forwarding_info: Option<String>,
    /// Name of the server socket that accepted the connection.
    #[serde(default)]
    pub local_server: Option<String>,
    /// Headers of the HTTP request that originated the call.
    #[serde(default)]
    pub http_headers: BTreeMap<String, String>,
}

impl ClientContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the remote address.
    pub fn with_remote(mut self, ip: impl Into<String>, port: u16) -> Self {
        self.remote_ip = Some(ip.into());
        self.remote_port = Some(port);
        self
    }

    /// Sets the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the forwarding chain.
    pub fn with_forwarding_info(mut self, forwarding_info: impl Into<String>) -> Self {
        self.forwarding_info = Some(forwarding_info.into());
        self
    }

    /// Sets the local server name.
    pub fn with_local_server(mut self, local_server: impl Into<String>) -> Self {
        self.local_server = Some(local_server.into());
        self
    }

    /// Adds an HTTP header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.http_headers.insert(name.into(), value.into());
        self
    }

    /// Looks up an HTTP header, ignoring ASCII case of the name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.http_headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the forwarded addresses, trimmed, in the order they appear.
    pub fn forwarded_addresses(&self) -> Vec<&str> {
        self.forwarding_info
            .as_deref()
            .map(|chain| {
                chain
                    .split(',')
                    .map(str::trim)
                    .filter(|addr| !addr.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let ctx = ClientContext::new().with_header("Authorization", "Bearer abc");
        assert_eq!(ctx.header("authorization"), Some("Bearer abc"));
        assert_eq!(ctx.header("AUTHORIZATION"), Some("Bearer abc"));
        assert_eq!(ctx.header("cookie"), None);
    }

    #[test]
    fn test_forwarded_addresses_trimmed() {
        let ctx = ClientContext::new().with_forwarding_info(" 10.0.0.1, 192.168.1.7 ,,");
        assert_eq!(ctx.forwarded_addresses(), vec!["10.0.0.1", "192.168.1.7"]);
    }

    #[test]
    fn test_forwarded_addresses_absent() {
        assert!(ClientContext::new().forwarded_addresses().is_empty());
    }

    #[test]
    fn test_deserialize_partial_context() {
        let ctx: ClientContext =
            serde_json::from_str(r#"{"remote_ip":"127.0.0.1","remote_port":8080}"#)
                .expect("parse");
        assert_eq!(ctx.remote_ip.as_deref(), Some("127.0.0.1"));
        assert_eq!(ctx.remote_port, Some(8080));
        assert!(ctx.http_headers.is_empty());
    }
}
