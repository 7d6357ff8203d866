//! How hook answers become client-visible outcomes.
//!
//! A gate can answer in three ways, and the host keeps them apart:
//!
//! - `Ok(true)` → [`GateDecision::Allowed`]
//! - `Ok(false)` → [`GateDecision::Denied`]: the client learns only that
//!   the request was denied.
//! - `Err(e)` → [`GateDecision::Rejected`]: the client receives the hook's
//!   message and code. The cause stays on the host.

use serde::{Deserialize, Serialize};

use extender_core::error::HookError;
use extender_core::result::HookResult;

/// Message sent to clients on a silent denial.
pub const GENERIC_DENIAL_MESSAGE: &str = "Request denied";

/// Code reserved for hook invocations the host abandoned on timeout.
pub const HOOK_TIMEOUT_CODE: &str = "HOOK_TIMEOUT";

/// Code reserved for hook invocations that panicked.
pub const HOOK_PANIC_CODE: &str = "HOOK_PANIC";

/// Outcome of a gate hook.
#[derive(Debug, Clone)]
pub enum GateDecision {
    /// The request may proceed.
    Allowed,
    /// The hook returned `false`.
    Denied,
    /// The hook returned an error, or could not be run to completion.
    Rejected(HookError),
}

impl GateDecision {
    /// Returns whether the request may proceed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Returns the rejection error, if any.
    pub fn error(&self) -> Option<&HookError> {
        match self {
            Self::Rejected(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the denial to present to the client, if the request was refused.
    pub fn client_denial(&self) -> Option<ClientDenial> {
        match self {
            Self::Allowed => None,
            Self::Denied => Some(ClientDenial {
                message: GENERIC_DENIAL_MESSAGE.to_string(),
                code: None,
            }),
            Self::Rejected(err) => Some(ClientDenial::from(err)),
        }
    }

    /// Short label used in logs and outcome records.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Allowed => "allowed",
            Self::Denied => "denied",
            Self::Rejected(_) => "rejected",
        }
    }
}

impl From<HookResult<bool>> for GateDecision {
    fn from(result: HookResult<bool>) -> Self {
        match result {
            Ok(true) => Self::Allowed,
            Ok(false) => Self::Denied,
            Err(err) => Self::Rejected(err),
        }
    }
}

/// Denial details the host forwards to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDenial {
    /// Human-readable message.
    pub message: String,
    /// Machine-checkable code, when the hook supplied one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl From<&HookError> for ClientDenial {
    fn from(err: &HookError) -> Self {
        Self {
            message: err.message().to_string(),
            code: err.code().map(str::to_string),
        }
    }
}

/// A gate decision plus the value the host proceeds with when allowed,
/// e.g. the decorated subscription name.
#[derive(Debug, Clone)]
pub struct Admission<T> {
    /// Gate outcome.
    pub decision: GateDecision,
    /// Value computed before the gate ran.
    pub value: T,
}

impl<T> Admission<T> {
    /// Returns the value if the gate allowed the request.
    pub fn allowed_value(self) -> Option<T> {
        self.decision.is_allowed().then_some(self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_from_hook_result() {
        assert!(GateDecision::from(Ok(true)).is_allowed());
        assert!(matches!(GateDecision::from(Ok(false)), GateDecision::Denied));
        let rejected = GateDecision::from(Err(HookError::with_code("no", "X1")));
        assert_eq!(rejected.error().and_then(|e| e.code()), Some("X1"));
    }

    #[test]
    fn test_silent_denial_hides_detail() {
        let denial = GateDecision::Denied.client_denial().expect("denied");
        assert_eq!(denial.message, GENERIC_DENIAL_MESSAGE);
        assert!(denial.code.is_none());
    }

    #[test]
    fn test_rejection_forwards_message_and_code_only() {
        let err = HookError::with_code_and_source(
            "bad creds",
            "AUTH_001",
            std::io::Error::other("ldap: invalid DN cn=alice"),
        );
        let denial = GateDecision::Rejected(err).client_denial().expect("denied");
        assert_eq!(denial.message, "bad creds");
        assert_eq!(denial.code.as_deref(), Some("AUTH_001"));
        let json = serde_json::to_string(&denial).expect("serialize");
        assert!(!json.contains("ldap"));
    }

    #[test]
    fn test_allowed_has_no_denial() {
        assert!(GateDecision::Allowed.client_denial().is_none());
    }

    #[test]
    fn test_admission_value_only_when_allowed() {
        let allowed = Admission {
            decision: GateDecision::Allowed,
            value: "alice.sub1".to_string(),
        };
        assert_eq!(allowed.allowed_value().as_deref(), Some("alice.sub1"));
        let denied = Admission {
            decision: GateDecision::Denied,
            value: "alice.sub1".to_string(),
        };
        assert!(denied.allowed_value().is_none());
    }
}
