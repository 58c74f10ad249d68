//! # Tessera
//!
//! Client-side authentication for web services: bearer-token sessions,
//! authorization headers, and validated account registration.
//!
//! Tessera never verifies tokens or hashes passwords; the remote service
//! does that. It keeps the client honest: it only calls itself signed in
//! while an unexpired token is stored, and it never sends a registration
//! form that breaks the local rules.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tessera::prelude::*;
//!
//! # async fn run() -> Result<(), TesseraError> {
//! let client = AuthClient::builder()
//!     .base_url("https://auth.example.com/api")
//!     .build(MemoryStore::new(), NoopNavigator)?;
//!
//! let outcome = client.session().login("t@e.com", "Password123!").await;
//! if outcome.success {
//!     let headers = client.session().auth_headers();
//!     // attach `headers` to your own API calls
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod registration;
pub mod telemetry;

pub use client::{AuthClient, AuthClientBuilder};
pub use config::{API_URL_ENV, ClientConfig, DEFAULT_BASE_URL};
pub use error::TesseraError;
pub use registration::{
    EMAIL_VERIFICATION_FAILED, EMAIL_VERIFICATION_RETRY, EMAIL_VERIFIED, REGISTRATION_FAILED,
    REGISTRATION_RETRY, REGISTRATION_SUCCEEDED, RegistrationService, VERIFICATION_SEND_FAILED,
    VERIFICATION_SEND_RETRY, VERIFICATION_SENT,
};

pub use tessera_protocol as protocol;
pub use tessera_session as session;
pub use tessera_transport as transport;
pub use tessera_validation as validation;

/// Everything a typical host needs in one import.
pub mod prelude {
    pub use crate::{AuthClient, AuthClientBuilder, ClientConfig, RegistrationService, TesseraError};
    pub use tessera_protocol::AuthOutcome;
    pub use tessera_session::{
        MemoryStore, Navigator, NoopNavigator, SessionConfig, SessionManager, SessionStore, StoreChange,
    };
    pub use tessera_transport::{HttpResponse, HttpTransport, ReqwestTransport, TransportError};
    pub use tessera_validation::{RegistrationInput, ValidationResult, Validator};
}
