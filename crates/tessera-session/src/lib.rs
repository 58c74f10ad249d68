//! Client-side session management for Tessera.
//!
//! A "session" here is not an object we keep around: it is the derived fact
//! "an unexpired token is currently persisted". This crate provides the
//! pieces that answer that question and change its answer:
//!
//! 1. **Storage**: where the token lives ([`SessionStore`] port,
//!    [`MemoryStore`] implementation)
//! 2. **Token decoding**: reading the expiry out of a token ([`token`])
//! 3. **Lifecycle**: login, logout, header construction
//!    ([`SessionManager`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Registration (above)  ← reuses the manager to persist auto-login tokens
//!     ↕
//! Session Layer (this crate)  ← owns the meaning of a token
//!     ↕
//! Protocol / Transport (below)  ← typed bodies over HTTP
//! ```

mod config;
mod error;
mod manager;
mod navigator;
mod store;
pub mod token;

pub use config::SessionConfig;
pub use error::SessionError;
pub use manager::{LOGIN_FAILED_FALLBACK, LOGIN_SUCCEEDED, SessionManager};
pub use navigator::{Navigator, NoopNavigator};
pub use store::{MemoryStore, SessionStore, StoreChange};
pub use token::{Claims, DecodeFailure};
