//! Account registration and email verification.
//!
//! `RegistrationService` drives the three calls that take a visitor from
//! "no account" to "signed in":
//!
//! ```text
//! register(input) ──→ send_email_verification(email) ──→ verify_email(token)
//!   │ validated locally first                              │ 2xx + token
//!   ▼                                                      ▼
//! POST /auth/register                          SessionManager::store_token
//! ```
//!
//! Like login, every public method returns an [`AuthOutcome`] and never an
//! error. The `try_*` helpers use `?` with [`TesseraError`]; the mapping to
//! an outcome happens once, in the public method.

use std::sync::Arc;

use tessera_protocol::{
    AuthOutcome, Codec, JsonCodec, MessageReply, RegisterReply, RegisterRequest,
    SendVerificationRequest, VerifyEmailReply, VerifyEmailRequest, endpoints,
};
use tessera_session::{Navigator, SessionManager, SessionStore};
use tessera_transport::HttpTransport;
use tessera_validation::{RegistrationInput, Validator};

use crate::TesseraError;

pub const REGISTRATION_SUCCEEDED: &str = "registration succeeded; check email for verification";
pub const REGISTRATION_FAILED: &str = "registration failed";
pub const REGISTRATION_RETRY: &str = "registration failed, please try again later";

pub const VERIFICATION_SENT: &str = "verification email sent";
pub const VERIFICATION_SEND_FAILED: &str = "failed to send verification email";
pub const VERIFICATION_SEND_RETRY: &str =
    "failed to send verification email, please try again later";

pub const EMAIL_VERIFIED: &str = "email verified";
pub const EMAIL_VERIFICATION_FAILED: &str = "email verification failed";
pub const EMAIL_VERIFICATION_RETRY: &str = "email verification failed, please try again later";

/// Registers accounts and verifies their email addresses.
///
/// Shares its [`SessionManager`] (and through it, the transport and store)
/// with the caller, so a successful `verify_email` is immediately visible
/// to `is_authenticated()`.
pub struct RegistrationService<S, T, N> {
    /// The session this service signs into after verification.
    ///
    /// Held in an `Arc` because the [`AuthClient`](crate::AuthClient)
    /// hands the same manager to the host. The transport is borrowed from
    /// it too, so there is exactly one HTTP client per `AuthClient`.
    session: Arc<SessionManager<S, T, N>>,

    /// Local rules every form must pass before it is sent.
    validator: Validator,

    /// Body encoding for the three registration endpoints.
    codec: JsonCodec,
}

impl<S, T, N> RegistrationService<S, T, N>
where
    S: SessionStore,
    T: HttpTransport,
    N: Navigator,
{
    /// Creates a service validating with the default rule table.
    pub fn new(session: Arc<SessionManager<S, T, N>>) -> Self {
        Self {
            session,
            validator: Validator::default(),
            codec: JsonCodec,
        }
    }

    /// Replaces the validator, e.g. one extended with
    /// [`Validator::with_rule`].
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn session(&self) -> &Arc<SessionManager<S, T, N>> {
        &self.session
    }

    // -----------------------------------------------------------------------
    // register
    // -----------------------------------------------------------------------

    /// Validates `input` and, if it passes, creates the account.
    ///
    /// Invalid input never reaches the network; the outcome carries every
    /// validation message in `errors` and the first one in `message`.
    /// `confirm_password` is checked locally and never sent.
    pub async fn register(&self, input: &RegistrationInput) -> AuthOutcome {
        match self.try_register(input).await {
            Ok(outcome) => {
                tracing::info!(success = outcome.success, "registration finished");
                outcome
            }
            Err(TesseraError::Validation(e)) => {
                tracing::info!(errors = e.errors.len(), "registration rejected locally");
                AuthOutcome::failure(e.to_string()).with_errors(e.errors)
            }
            Err(e) => {
                tracing::warn!(error = %e, "registration request failed");
                AuthOutcome::failure(REGISTRATION_RETRY)
            }
        }
    }

    async fn try_register(&self, input: &RegistrationInput) -> Result<AuthOutcome, TesseraError> {
        // Invalid input leaves here as `TesseraError::Validation`, before
        // anything is encoded or sent. `register` recognizes that variant
        // and reports the individual messages.
        self.validator.validate(input).into_result()?;

        // `RegisterRequest` has no confirmation field, so the confirmation
        // cannot be sent even by accident.

        let body = self.codec.encode(&RegisterRequest {
            email: input.email.clone(),
            password: input.password.clone(),
            username: input.username.clone(),
            full_name: input.full_name.clone(),
        })?;
        let resp = self
            .session
            .transport()
            .post_json(endpoints::REGISTER, body)
            .await?;
        let reply: RegisterReply = self.codec.decode(&resp.body)?;

        // A rejection carries the service's own wording when it has any.
        if !resp.is_success() {
            tracing::debug!(status = resp.status, "registration rejected by service");
            return Ok(
                AuthOutcome::failure(message_or(reply.message.clone(), REGISTRATION_FAILED))
                    .with_errors(reply.error_messages()),
            );
        }

        Ok(AuthOutcome::success(REGISTRATION_SUCCEEDED).with_user(reply.user))
    }

    // -----------------------------------------------------------------------
    // send_email_verification
    // -----------------------------------------------------------------------

    /// Asks the service to (re)send the verification email to `email`.
    pub async fn send_email_verification(&self, email: &str) -> AuthOutcome {
        match self.try_send_email_verification(email).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(error = %e, "verification email request failed");
                AuthOutcome::failure(VERIFICATION_SEND_RETRY)
            }
        }
    }

    async fn try_send_email_verification(&self, email: &str) -> Result<AuthOutcome, TesseraError> {
        let body = self.codec.encode(&SendVerificationRequest {
            email: email.to_string(),
        })?;
        let resp = self
            .session
            .transport()
            .post_json(endpoints::SEND_VERIFICATION, body)
            .await?;
        let reply: MessageReply = self.codec.decode(&resp.body)?;

        Ok(if resp.is_success() {
            AuthOutcome::success(message_or(reply.message, VERIFICATION_SENT))
        } else {
            AuthOutcome::failure(message_or(reply.message, VERIFICATION_SEND_FAILED))
        })
    }

    // -----------------------------------------------------------------------
    // verify_email
    // -----------------------------------------------------------------------

    /// Confirms an email address with the token from the verification
    /// email.
    ///
    /// When the service answers with a session token it is stored, the
    /// caller is signed in, and the outcome has `auto_login == Some(true)`.
    /// Every other outcome has `auto_login == Some(false)`.
    pub async fn verify_email(&self, token: &str) -> AuthOutcome {
        match self.try_verify_email(token).await {
            Ok(outcome) => {
                tracing::info!(
                    success = outcome.success,
                    auto_login = outcome.auto_login == Some(true),
                    "email verification finished"
                );
                outcome
            }
            Err(e) => {
                tracing::warn!(error = %e, "email verification failed");
                AuthOutcome::failure(EMAIL_VERIFICATION_RETRY).with_auto_login(false)
            }
        }
    }

    async fn try_verify_email(&self, token: &str) -> Result<AuthOutcome, TesseraError> {
        let body = self.codec.encode(&VerifyEmailRequest {
            token: token.to_string(),
        })?;
        let resp = self
            .session
            .transport()
            .post_json(endpoints::VERIFY_EMAIL, body)
            .await?;
        let reply: VerifyEmailReply = self.codec.decode(&resp.body)?;

        if !resp.is_success() {
            return Ok(
                AuthOutcome::failure(message_or(reply.message, EMAIL_VERIFICATION_FAILED))
                    .with_auto_login(false),
            );
        }

        // Auto-login: a 2xx reply with a non-empty token opens a session
        // through the same manager `login` uses, so `is_authenticated`
        // sees it immediately.
        let session_token = reply.token.filter(|t| !t.is_empty());
        if let Some(session_token) = &session_token {
            self.session.store_token(session_token)?;
        }

        Ok(AuthOutcome::success(message_or(reply.message, EMAIL_VERIFIED))
            .with_auto_login(session_token.is_some()))
    }
}

/// The service's message when it sent a non-empty one, else `default`.
fn message_or(message: Option<String>, default: &str) -> String {
    message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| default.to_string())
}
