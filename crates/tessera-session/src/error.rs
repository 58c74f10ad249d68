//! Error types for the session layer.

use tessera_protocol::ProtocolError;
use tessera_transport::TransportError;

/// Errors that can occur while running a session operation.
///
/// Public [`SessionManager`](crate::SessionManager) operations never return
/// these directly; they are folded into an
/// [`AuthOutcome`](tessera_protocol::AuthOutcome) whose message is this
/// error's display text.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The session store refused a write or removal.
    #[error("storage failed: {0}")]
    Storage(String),

    /// The remote call could not complete.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A body could not be encoded or decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
