//! End-to-end registration and verification through `AuthClient`, with a
//! scripted transport standing in for the service.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::json;
use tessera::prelude::*;
use tessera::{
    EMAIL_VERIFICATION_FAILED, EMAIL_VERIFICATION_RETRY, EMAIL_VERIFIED, REGISTRATION_FAILED,
    REGISTRATION_RETRY, REGISTRATION_SUCCEEDED, VERIFICATION_SEND_FAILED,
    VERIFICATION_SEND_RETRY, VERIFICATION_SENT,
};

// =========================================================================
// Test doubles
// =========================================================================

#[derive(Default)]
struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<(String, serde_json::Value)>>,
}

impl ScriptedTransport {
    fn replying(reply: Result<HttpResponse, TransportError>) -> Self {
        let transport = Self::default();
        transport.replies.lock().unwrap().push_back(reply);
        transport
    }

    fn requests(&self) -> Vec<(String, serde_json::Value)> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpTransport for ScriptedTransport {
    async fn post_json(&self, path: &str, body: Vec<u8>) -> Result<HttpResponse, TransportError> {
        let body = serde_json::from_slice(&body).expect("requests are json");
        self.requests.lock().unwrap().push((path.to_string(), body));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected extra request")
    }
}

// =========================================================================
// Helpers
// =========================================================================

type TestClient = AuthClient<Arc<MemoryStore>, NoopNavigator, ScriptedTransport>;

fn client(transport: ScriptedTransport) -> (TestClient, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let client =
        AuthClient::builder().build_with_transport(Arc::clone(&store), transport, NoopNavigator);
    (client, store)
}

fn reply(status: u16, reason: &str, body: serde_json::Value) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse::new(status, reason, body.to_string()))
}

fn valid_input() -> RegistrationInput {
    RegistrationInput {
        email: "test@example.com".into(),
        password: "Password123!".into(),
        confirm_password: "Password123!".into(),
        username: "testuser".into(),
        full_name: "Test User".into(),
    }
}

fn session_token() -> String {
    let claims = URL_SAFE_NO_PAD.encode(json!({ "sub": "1", "exp": 9_999_999_999u64 }).to_string());
    format!("eyJhbGciOiJIUzI1NiJ9.{claims}.sig")
}

// =========================================================================
// register()
// =========================================================================

#[tokio::test]
async fn test_register_success_returns_user() {
    let (client, _) = client(ScriptedTransport::replying(reply(
        201,
        "Created",
        json!({ "user": { "id": 1, "email": "test@example.com" } }),
    )));

    let outcome = client.registration().register(&valid_input()).await;

    assert!(outcome.success);
    assert_eq!(outcome.message, REGISTRATION_SUCCEEDED);
    assert_eq!(outcome.user, Some(json!({ "id": 1, "email": "test@example.com" })));
    assert!(outcome.errors.is_empty());
}

#[tokio::test]
async fn test_register_sends_form_without_confirmation() {
    let (client, _) = client(ScriptedTransport::replying(reply(200, "OK", json!({}))));

    client.registration().register(&valid_input()).await;

    let requests = client.session().transport().requests();
    assert_eq!(
        requests,
        vec![(
            "/auth/register".to_string(),
            json!({
                "email": "test@example.com",
                "password": "Password123!",
                "username": "testuser",
                "fullName": "Test User",
            })
        )]
    );
    assert!(requests[0].1.get("confirmPassword").is_none());
}

#[tokio::test]
async fn test_register_invalid_input_never_calls_service() {
    let (client, _) = client(ScriptedTransport::default());
    let input = RegistrationInput {
        email: "invalid-email".into(),
        ..valid_input()
    };

    let outcome = client.registration().register(&input).await;

    assert!(!outcome.success);
    assert_eq!(outcome.message, "please enter a valid email address");
    assert_eq!(outcome.errors, vec!["please enter a valid email address"]);
    assert!(client.session().transport().requests().is_empty());
}

#[tokio::test]
async fn test_register_empty_form_reports_every_field() {
    let (client, _) = client(ScriptedTransport::default());

    let outcome = client
        .registration()
        .register(&RegistrationInput::default())
        .await;

    assert!(!outcome.success);
    assert_eq!(outcome.message, "email is required");
    assert_eq!(
        outcome.errors,
        vec![
            "email is required",
            "password is required",
            "username is required",
            "full name is required",
        ]
    );
}

#[tokio::test]
async fn test_register_rejected_passes_service_errors_through() {
    let (client, _) = client(ScriptedTransport::replying(reply(
        409,
        "Conflict",
        json!({ "message": "Email already registered", "errors": ["email taken"] }),
    )));

    let outcome = client.registration().register(&valid_input()).await;

    assert!(!outcome.success);
    assert_eq!(outcome.message, "Email already registered");
    assert_eq!(outcome.errors, vec!["email taken"]);
}

#[tokio::test]
async fn test_register_rejected_with_object_errors_keeps_service_message() {
    let (client, _) = client(ScriptedTransport::replying(reply(
        422,
        "Unprocessable Entity",
        json!({
            "message": "Email already registered",
            "errors": [{ "field": "email", "msg": "taken" }],
        }),
    )));

    let outcome = client.registration().register(&valid_input()).await;

    assert!(!outcome.success);
    assert_eq!(outcome.message, "Email already registered");
    assert_eq!(outcome.errors, vec!["email: taken"]);
}

#[tokio::test]
async fn test_register_rejected_without_message_uses_default() {
    let (client, _) = client(ScriptedTransport::replying(reply(
        400,
        "Bad Request",
        json!({}),
    )));

    let outcome = client.registration().register(&valid_input()).await;

    assert!(!outcome.success);
    assert_eq!(outcome.message, REGISTRATION_FAILED);
    assert!(outcome.errors.is_empty());
}

#[tokio::test]
async fn test_register_network_error_asks_to_retry() {
    let (client, _) = client(ScriptedTransport::replying(Err(TransportError::Connect(
        "connection refused".into(),
    ))));

    let outcome = client.registration().register(&valid_input()).await;

    assert!(!outcome.success);
    assert_eq!(outcome.message, REGISTRATION_RETRY);
}

#[tokio::test]
async fn test_register_undecodable_body_asks_to_retry() {
    let (client, _) = client(ScriptedTransport::replying(Ok(HttpResponse::new(
        502,
        "Bad Gateway",
        "<html>upstream down</html>",
    ))));

    let outcome = client.registration().register(&valid_input()).await;

    assert!(!outcome.success);
    assert_eq!(outcome.message, REGISTRATION_RETRY);
}

// =========================================================================
// send_email_verification()
// =========================================================================

#[tokio::test]
async fn test_send_email_verification_success_default_message() {
    let (client, _) = client(ScriptedTransport::replying(reply(200, "OK", json!({}))));

    let outcome = client
        .registration()
        .send_email_verification("test@example.com")
        .await;

    assert!(outcome.success);
    assert_eq!(outcome.message, VERIFICATION_SENT);
    assert_eq!(
        client.session().transport().requests(),
        vec![(
            "/auth/send-verification".to_string(),
            json!({ "email": "test@example.com" })
        )]
    );
}

#[tokio::test]
async fn test_send_email_verification_uses_service_message() {
    let (client, _) = client(ScriptedTransport::replying(reply(
        429,
        "Too Many Requests",
        json!({ "message": "slow down" }),
    )));

    let outcome = client
        .registration()
        .send_email_verification("test@example.com")
        .await;

    assert!(!outcome.success);
    assert_eq!(outcome.message, "slow down");
}

#[tokio::test]
async fn test_send_email_verification_failure_default_message() {
    let (client, _) = client(ScriptedTransport::replying(reply(500, "Internal Server Error", json!({}))));

    let outcome = client
        .registration()
        .send_email_verification("test@example.com")
        .await;

    assert!(!outcome.success);
    assert_eq!(outcome.message, VERIFICATION_SEND_FAILED);
}

#[tokio::test]
async fn test_send_email_verification_network_error_asks_to_retry() {
    let (client, _) = client(ScriptedTransport::replying(Err(TransportError::Timeout(
        std::time::Duration::from_secs(5),
    ))));

    let outcome = client
        .registration()
        .send_email_verification("test@example.com")
        .await;

    assert!(!outcome.success);
    assert_eq!(outcome.message, VERIFICATION_SEND_RETRY);
}

// =========================================================================
// verify_email()
// =========================================================================

#[tokio::test]
async fn test_verify_email_with_token_signs_in() {
    let token = session_token();
    let (client, store) = client(ScriptedTransport::replying(reply(
        200,
        "OK",
        json!({ "token": token }),
    )));
    let mut changes = store.watch();

    let outcome = client.registration().verify_email("verify-abc").await;

    assert!(outcome.success);
    assert_eq!(outcome.message, EMAIL_VERIFIED);
    assert_eq!(outcome.auto_login, Some(true));
    assert_eq!(client.session().token(), Some(token));
    assert!(client.session().is_authenticated());
    assert_eq!(
        changes.try_recv().unwrap(),
        StoreChange::Set { key: "auth_token".into() }
    );
    assert_eq!(
        client.session().transport().requests(),
        vec![(
            "/auth/verify-email".to_string(),
            json!({ "token": "verify-abc" })
        )]
    );
}

#[tokio::test]
async fn test_verify_email_without_token_does_not_sign_in() {
    let (client, store) = client(ScriptedTransport::replying(reply(
        200,
        "OK",
        json!({ "message": "Email confirmed" }),
    )));

    let outcome = client.registration().verify_email("verify-abc").await;

    assert!(outcome.success);
    assert_eq!(outcome.message, "Email confirmed");
    assert_eq!(outcome.auto_login, Some(false));
    assert!(store.is_empty());
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn test_verify_email_rejected_ignores_token() {
    let (client, store) = client(ScriptedTransport::replying(reply(
        400,
        "Bad Request",
        json!({ "token": session_token() }),
    )));

    let outcome = client.registration().verify_email("expired-link").await;

    assert!(!outcome.success);
    assert_eq!(outcome.message, EMAIL_VERIFICATION_FAILED);
    assert_eq!(outcome.auto_login, Some(false));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_verify_email_network_error_asks_to_retry() {
    let (client, _) = client(ScriptedTransport::replying(Err(TransportError::Request(
        "reset by peer".into(),
    ))));

    let outcome = client.registration().verify_email("verify-abc").await;

    assert!(!outcome.success);
    assert_eq!(outcome.message, EMAIL_VERIFICATION_RETRY);
    assert_eq!(outcome.auto_login, Some(false));
}

// =========================================================================
// Full flow
// =========================================================================

#[tokio::test]
async fn test_register_verify_then_logout() {
    let transport = ScriptedTransport::default();
    {
        let mut replies = transport.replies.lock().unwrap();
        replies.push_back(reply(201, "Created", json!({ "user": { "id": 7 } })));
        replies.push_back(reply(200, "OK", json!({})));
        replies.push_back(reply(200, "OK", json!({ "token": session_token() })));
    }
    let (client, _) = client(transport);
    let input = valid_input();

    assert!(client.registration().register(&input).await.success);
    assert!(client.registration().send_email_verification(&input.email).await.success);
    assert!(client.registration().verify_email("verify-abc").await.success);
    assert!(client.session().is_authenticated());
    assert!(client.session().auth_headers()["Authorization"].starts_with("Bearer "));

    client.session().logout();

    assert!(!client.session().is_authenticated());
    let paths: Vec<String> = client
        .session()
        .transport()
        .requests()
        .into_iter()
        .map(|(path, _)| path)
        .collect();
    assert_eq!(
        paths,
        ["/auth/register", "/auth/send-verification", "/auth/verify-email"]
    );
}
