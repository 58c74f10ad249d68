//! Wire protocol for Tessera.
//!
//! This crate defines what the client and the remote authentication
//! service exchange:
//!
//! - **Types** ([`LoginRequest`], [`LoginReply`], ...): the JSON bodies
//!   of the four auth endpoints.
//! - **Outcome** ([`AuthOutcome`]): the uniform result every public
//!   operation hands back to the caller.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how bodies become bytes.
//! - **Errors** ([`ProtocolError`]): what can go wrong while encoding or
//!   decoding.
//!
//! # Architecture
//!
//! ```text
//! Transport (bytes) → Protocol (typed bodies) → Session / Registration
//! ```

mod codec;
mod error;
mod outcome;
mod types;

pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use outcome::AuthOutcome;
pub use types::{
    LoginReply, LoginRequest, MessageReply, RegisterReply, RegisterRequest,
    SendVerificationRequest, VerifyEmailReply, VerifyEmailRequest, endpoints,
};
