//! `AuthClient` builder and wiring.
//!
//! This is the entry point for hosts. It ties the layers together:
//! transport → protocol → session → registration, all sharing one
//! [`SessionManager`].

use std::sync::Arc;
use std::time::Duration;

use tessera_session::{Navigator, SessionConfig, SessionManager, SessionStore};
use tessera_transport::{HttpTransport, ReqwestTransport};

use crate::{ClientConfig, RegistrationService, TesseraError};

/// Builder for configuring an [`AuthClient`].
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use tessera::prelude::*;
///
/// # fn run() -> Result<(), TesseraError> {
/// let client = AuthClient::builder()
///     .base_url("https://auth.example.com/api")
///     .timeout(Duration::from_secs(10))
///     .build(MemoryStore::new(), NoopNavigator)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct AuthClientBuilder {
    config: ClientConfig,
}

impl AuthClientBuilder {
    /// Creates a builder with [`ClientConfig::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing configuration, e.g. one from
    /// [`ClientConfig::from_env`].
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the root the auth endpoints hang off.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Sets a per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Sets the store keys the session is kept under.
    pub fn session_config(mut self, config: SessionConfig) -> Self {
        self.config.session = config;
        self
    }

    /// Builds a client that talks HTTP through [`ReqwestTransport`].
    ///
    /// # Errors
    /// Returns [`TesseraError::Transport`] if the HTTP client cannot be
    /// constructed.
    pub fn build<S, N>(
        self,
        store: S,
        navigator: N,
    ) -> Result<AuthClient<S, N>, TesseraError>
    where
        S: SessionStore,
        N: Navigator,
    {
        let transport = ReqwestTransport::new(&self.config.base_url, self.config.timeout)?;
        Ok(self.build_with_transport(store, transport, navigator))
    }

    /// Builds a client over a caller-supplied transport.
    ///
    /// `base_url` and `timeout` are the transport's business here and are
    /// ignored.
    pub fn build_with_transport<S, N, T>(
        self,
        store: S,
        transport: T,
        navigator: N,
    ) -> AuthClient<S, N, T>
    where
        S: SessionStore,
        N: Navigator,
        T: HttpTransport,
    {
        let session = Arc::new(SessionManager::new(
            store,
            transport,
            navigator,
            self.config.session,
        ));
        let registration = RegistrationService::new(Arc::clone(&session));
        tracing::info!(base_url = %self.config.base_url, "auth client ready");

        AuthClient {
            session,
            registration,
        }
    }
}

/// A configured authentication client.
///
/// Login, logout and session queries live on [`session()`](Self::session);
/// account creation and email verification on
/// [`registration()`](Self::registration). Both share the same store, so a
/// session opened by `verify_email` is the one `is_authenticated` sees.
pub struct AuthClient<S, N, T = ReqwestTransport> {
    session: Arc<SessionManager<S, T, N>>,
    registration: RegistrationService<S, T, N>,
}

impl AuthClient<(), ()> {
    /// Creates a new builder.
    pub fn builder() -> AuthClientBuilder {
        AuthClientBuilder::new()
    }
}

impl<S, N, T> AuthClient<S, N, T>
where
    S: SessionStore,
    N: Navigator,
    T: HttpTransport,
{
    /// The session manager: `login`, `logout`, `is_authenticated`,
    /// `auth_headers`.
    pub fn session(&self) -> &Arc<SessionManager<S, T, N>> {
        &self.session
    }

    /// The registration service: `register`, `send_email_verification`,
    /// `verify_email`.
    pub fn registration(&self) -> &RegistrationService<S, T, N> {
        &self.registration
    }
}
