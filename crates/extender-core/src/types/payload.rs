//! Object message payloads.

use serde::{Deserialize, Serialize};

/// Payload of an object message: the class it is materialized as and the
/// user content it was filled with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectPayload {
    /// Fully qualified name of the payload class.
    pub class_name: String,
    /// User content.
    #[serde(default)]
    pub body: serde_json::Value,
}

impl ObjectPayload {
    /// Creates a payload.
    pub fn new(class_name: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            class_name: class_name.into(),
            body,
        }
    }
}
