//! The uniform result of every public auth operation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What a login, registration, or verification attempt produced.
///
/// The shape is the same whether the attempt failed on the network, was
/// rejected by the service, or never left the client because the input was
/// invalid. Callers only need `success` and `message`; the other fields are
/// filled when the operation has something to say there.
///
/// Serializes with camelCase keys and omits empty fields, so
/// `AuthOutcome::failure("x")` becomes `{"success":false,"message":"x"}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthOutcome {
    pub success: bool,

    /// Human-readable summary, suitable for showing as-is.
    pub message: String,

    /// Opaque user object returned by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Value>,

    /// Session token issued by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Every individual problem, in order (validation or service-reported).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,

    /// Set by email verification: whether a session was opened as a side
    /// effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_login: Option<bool>,
}

impl AuthOutcome {
    /// A successful outcome with only a message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            ..Self::default()
        }
    }

    /// A failed outcome with only a message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_user(mut self, user: Option<Value>) -> Self {
        self.user = user;
        self
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }

    pub fn with_auto_login(mut self, auto_login: bool) -> Self {
        self.auto_login = Some(auto_login);
        self
    }
}
