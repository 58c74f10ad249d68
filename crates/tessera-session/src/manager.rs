//! The session manager: login, logout, and "am I signed in?".
//!
//! This is the central piece of the session layer. It's responsible for:
//! - Exchanging credentials for a token (`login`)
//! - Persisting that token in the injected [`SessionStore`]
//! - Answering "is there a usable session?" (`is_authenticated`)
//! - Building the `Authorization` header for the host's own requests
//! - Tearing the session down and telling the host (`logout`)
//!
//! `SessionManager` owns the meaning of the stored token. Nothing else in
//! Tessera decodes tokens or decides whether one is still usable; callers
//! only ever see booleans, headers, and [`AuthOutcome`]s.
//!
//! # Concurrency note
//!
//! Every method takes `&self`. The manager keeps no state of its own beyond
//! its injected collaborators: the token is re-read from the store on
//! every query, so two managers over one store always agree. Sharing one
//! manager across tasks is a matter of wrapping it in an `Arc`; the store
//! does its own locking.

use std::collections::HashMap;

use tessera_protocol::{AuthOutcome, Codec, JsonCodec, LoginReply, LoginRequest, endpoints};
use tessera_transport::HttpTransport;

use crate::token::{self, Claims};
use crate::{Navigator, SessionConfig, SessionError, SessionStore};

/// Message of a successful login.
pub const LOGIN_SUCCEEDED: &str = "login succeeded";

/// Message of a failed login whose error had nothing better to say.
pub const LOGIN_FAILED_FALLBACK: &str = "login failed, please try again later";

/// Manages the client's bearer-token session.
///
/// ## Lifecycle
///
/// ```text
/// login() ──→ token stored ──→ is_authenticated() == true
///                  │                    │
///                  │             (exp passes: detected lazily)
///                  ▼                    ▼
///              logout() ──→ token removed, navigator.on_logout()
/// ```
pub struct SessionManager<S, T, N> {
    /// Where the token and cached profile live.
    ///
    /// The manager never caches what it reads from here. A token written
    /// by another manager (another tab, another task) is visible on the
    /// very next query.
    store: S,

    /// How requests reach the remote service.
    transport: T,

    /// Told about every logout so the host can leave protected screens.
    navigator: N,

    /// Turns request structs into bytes and reply bytes into structs.
    codec: JsonCodec,

    /// Store keys (token, profile).
    config: SessionConfig,
}

impl<S, T, N> SessionManager<S, T, N>
where
    S: SessionStore,
    T: HttpTransport,
    N: Navigator,
{
    /// Creates a manager over the given collaborators.
    pub fn new(store: S, transport: T, navigator: N, config: SessionConfig) -> Self {
        Self {
            store,
            transport,
            navigator,
            codec: JsonCodec,
            config,
        }
    }

    /// Signs in with `email` and `password`.
    ///
    /// On success the returned token (if any) is persisted before this
    /// returns. Never fails: every problem becomes an unsuccessful outcome
    /// whose message describes it.
    pub async fn login(&self, email: &str, password: &str) -> AuthOutcome {
        match self.try_login(email, password).await {
            Ok(outcome) => {
                tracing::info!(success = outcome.success, "login finished");
                outcome
            }
            Err(e) => {
                tracing::warn!(error = %e, "login failed");
                let message = e.to_string();
                if message.is_empty() {
                    AuthOutcome::failure(LOGIN_FAILED_FALLBACK)
                } else {
                    AuthOutcome::failure(message)
                }
            }
        }
    }

    /// The fallible half of [`login`](Self::login).
    ///
    /// Every `?` here converts the layer's own error into a
    /// [`SessionError`] through its `#[from]` impl; `login` then turns
    /// whatever comes out into an outcome in one place.
    async fn try_login(&self, email: &str, password: &str) -> Result<AuthOutcome, SessionError> {
        let body = self.codec.encode(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;

        // A non-2xx status is a completed exchange, not a transport error:
        // only network-level failures come back as `Err` here.
        let resp = self.transport.post_json(endpoints::LOGIN, body).await?;
        if !resp.is_success() {
            tracing::debug!(status = resp.status, "login rejected");
            // Statuses without a reason phrase are reported by code.
            let reason = if resp.status_text.is_empty() {
                resp.status.to_string()
            } else {
                resp.status_text
            };
            return Ok(AuthOutcome::failure(format!("login failed: {reason}")));
        }

        let reply: LoginReply = self.codec.decode(&resp.body)?;

        // An absent or empty token is a successful login without a
        // session: nothing is written, and `is_authenticated` stays false.
        if let Some(token) = reply.token.as_deref().filter(|t| !t.is_empty()) {
            self.store_token(token)?;
        }

        Ok(AuthOutcome::success(LOGIN_SUCCEEDED)
            .with_user(reply.user)
            .with_token(reply.token))
    }

    /// Clears the session and signals the navigator.
    ///
    /// Both the token and the cached profile are removed even if neither
    /// was set, and the navigator is called exactly once per call.
    pub fn logout(&self) {
        // A failed removal is logged and skipped so the second key is still
        // cleared and the navigator still hears about the logout.
        for key in [&self.config.token_key, &self.config.profile_key] {
            if let Err(e) = self.store.remove(key) {
                tracing::warn!(key = %key, error = %e, "failed to clear session key");
            }
        }
        tracing::info!("logged out");
        self.navigator.on_logout();
    }

    /// Returns the stored token, expired or not.
    pub fn token(&self) -> Option<String> {
        self.store.get(&self.config.token_key)
    }

    /// Returns `true` if a token is stored and has not expired.
    ///
    /// Expiry is checked lazily, on every call. No timer runs in the
    /// background, so a token that expires while nobody asks simply reads
    /// as expired the next time someone does.
    pub fn is_authenticated(&self) -> bool {
        // `is_some_and` is `Option`'s "present and satisfies" test: `None`
        // is false without calling the closure.
        self.token()
            .is_some_and(|token| !self.is_token_expired(&token))
    }

    /// Returns `true` if `token`'s `exp` is in the past, or if `token`
    /// cannot be decoded.
    pub fn is_token_expired(&self, token: &str) -> bool {
        token::is_expired_at(token, token::now_epoch_secs())
    }

    /// Decoded claims of the stored token, if there is one and it decodes.
    pub fn claims(&self) -> Option<Claims> {
        self.token()
            .and_then(|token| token::decode_claims(&token).ok())
    }

    /// Headers that authorize a request as the current session.
    ///
    /// Does not check expiry: an expired token is still sent, and the
    /// server gets to say no.
    pub fn auth_headers(&self) -> HashMap<String, String> {
        self.token()
            .map(|token| {
                HashMap::from([("Authorization".to_string(), format!("Bearer {token}"))])
            })
            .unwrap_or_default()
    }

    /// Persists a token obtained outside [`login`](Self::login), such as
    /// the session opened by email verification.
    ///
    /// # Errors
    /// Returns [`SessionError::Storage`] if the store refuses the write.
    pub fn store_token(&self, token: &str) -> Result<(), SessionError> {
        self.store.set(&self.config.token_key, token)?;
        tracing::debug!("session token stored");
        Ok(())
    }

    /// The transport this manager talks to the service through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The store keys this manager reads and writes.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}
