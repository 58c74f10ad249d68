//! Request and response bodies of the remote auth endpoints.
//!
//! Requests are what we send; replies are what we accept back. Every reply
//! field is optional because the service is free to omit any of them, and
//! unknown fields are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Endpoint paths, relative to the configured base URL.
pub mod endpoints {
    pub const LOGIN: &str = "/auth/login";
    pub const REGISTER: &str = "/auth/register";
    pub const SEND_VERIFICATION: &str = "/auth/send-verification";
    pub const VERIFY_EMAIL: &str = "/auth/verify-email";
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/register`.
///
/// Deliberately has no confirmation field: the confirmation only exists to
/// be checked locally and is never transmitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub username: String,
    pub full_name: String,
}

/// Body of `POST /auth/send-verification`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendVerificationRequest {
    pub email: String,
}

/// Body of `POST /auth/verify-email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyEmailRequest {
    pub token: String,
}

// ---------------------------------------------------------------------------
// Replies
// ---------------------------------------------------------------------------

/// Successful login reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginReply {
    #[serde(default)]
    pub user: Option<Value>,
    #[serde(default)]
    pub token: Option<String>,
}

/// Reply of the register endpoint, success or failure.
///
/// `errors` is kept as raw JSON: services report field errors as plain
/// strings, as `{field, msg}` objects, or as a single string, and none of
/// those shapes may stop `message` from being read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisterReply {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<Value>,
    #[serde(default)]
    pub user: Option<Value>,
}

impl RegisterReply {
    /// The reported errors as display strings, in order.
    ///
    /// Strings pass through unchanged. Objects render as their `message`
    /// or `msg` (prefixed with `field: ` when a field is named). Anything
    /// else renders as its JSON text.
    pub fn error_messages(&self) -> Vec<String> {
        match &self.errors {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.iter().map(render_error).collect(),
            Some(other) => vec![render_error(other)],
        }
    }
}

fn render_error(error: &Value) -> String {
    match error {
        Value::String(text) => text.clone(),
        Value::Object(map) => {
            let text = ["message", "msg"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str));
            match (map.get("field").and_then(Value::as_str), text) {
                (Some(field), Some(text)) => format!("{field}: {text}"),
                (None, Some(text)) => text.to_string(),
                (_, None) => error.to_string(),
            }
        }
        other => other.to_string(),
    }
}

/// A reply that may only carry a human-readable message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageReply {
    #[serde(default)]
    pub message: Option<String>,
}

/// Reply of the verify-email endpoint. A `token` means the service opened
/// a session for the freshly verified account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyEmailReply {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_request_uses_camel_case_full_name() {
        let req = RegisterRequest {
            email: "a@b.com".into(),
            password: "Password123!".into(),
            username: "user_1".into(),
            full_name: "Jo Doe".into(),
        };

        let value = serde_json::to_value(&req).unwrap();

        assert_eq!(
            value,
            json!({
                "email": "a@b.com",
                "password": "Password123!",
                "username": "user_1",
                "fullName": "Jo Doe",
            })
        );
    }

    #[test]
    fn test_register_request_has_no_confirmation_field() {
        let req = RegisterRequest {
            email: "a@b.com".into(),
            password: "p".into(),
            username: "u".into(),
            full_name: "f".into(),
        };

        let value = serde_json::to_value(&req).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj.len(), 4);
        assert!(!obj.contains_key("confirmPassword"));
    }

    #[test]
    fn test_login_reply_missing_fields_default_to_none() {
        let reply: LoginReply = serde_json::from_value(json!({})).unwrap();
        assert_eq!(reply, LoginReply::default());
    }

    #[test]
    fn test_register_reply_reads_message_and_errors() {
        let reply: RegisterReply = serde_json::from_value(json!({
            "message": "email already exists",
            "errors": ["this email is already registered"],
        }))
        .unwrap();

        assert_eq!(reply.message.as_deref(), Some("email already exists"));
        assert_eq!(reply.error_messages(), vec!["this email is already registered"]);
        assert!(reply.user.is_none());
    }

    #[test]
    fn test_register_reply_object_errors_keep_message() {
        let reply: RegisterReply = serde_json::from_value(json!({
            "message": "Email already registered",
            "errors": [
                { "field": "email", "msg": "taken" },
                { "message": "try another" },
                { "code": 17 },
                "plain",
            ],
        }))
        .unwrap();

        assert_eq!(reply.message.as_deref(), Some("Email already registered"));
        assert_eq!(
            reply.error_messages(),
            vec!["email: taken", "try another", r#"{"code":17}"#, "plain"]
        );
    }

    #[test]
    fn test_register_reply_single_string_error() {
        let reply: RegisterReply =
            serde_json::from_value(json!({ "errors": "email taken" })).unwrap();
        assert_eq!(reply.error_messages(), vec!["email taken"]);
    }

    #[test]
    fn test_register_reply_null_errors_is_empty() {
        let reply: RegisterReply = serde_json::from_value(json!({ "errors": null })).unwrap();
        assert!(reply.error_messages().is_empty());
    }

    #[test]
    fn test_login_reply_rejects_non_string_token() {
        let result: Result<LoginReply, _> =
            serde_json::from_value(json!({ "token": 42 }));
        assert!(result.is_err());
    }
}
