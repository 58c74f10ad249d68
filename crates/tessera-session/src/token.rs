//! Reading claims out of a bearer token.
//!
//! A token is three base64url segments joined by `.`: header, claims,
//! signature. Only the claims segment is read here, and the signature is
//! never checked; the server that issued the token is the one that
//! verifies it. Locally we only need `exp` to decide whether to bother
//! sending the token at all.
//!
//! [`decode_claims`] reports exactly why a token could not be read.
//! [`is_expired_at`] is the one place that turns "could not read" into
//! "expired".

use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine;
use base64::alphabet;
use base64::engine::DecodePaddingMode;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// base64url that accepts the claims segment with or without `=` padding.
const CLAIMS_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// The decoded claims segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Expiry, in seconds since the Unix epoch.
    pub exp: f64,

    /// Subject the token was issued to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Issue time, in seconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<f64>,

    /// Every other claim, untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// The `sub` claim.
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref()
    }

    /// Returns `true` if `exp` is strictly before `now` (seconds).
    pub fn is_expired_at(&self, now: f64) -> bool {
        self.exp < now
    }
}

/// Why a token could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum DecodeFailure {
    /// The token is not `header.claims.signature`.
    #[error("expected 3 dot-separated segments, found {0}")]
    Segments(usize),

    /// The claims segment is not base64url.
    #[error("claims segment is not base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The claims segment is not a JSON object with a numeric `exp`.
    #[error("invalid claims: {0}")]
    Claims(#[from] serde_json::Error),
}

/// Decodes the claims segment of `token` without verifying its signature.
///
/// # Errors
/// See [`DecodeFailure`].
pub fn decode_claims(token: &str) -> Result<Claims, DecodeFailure> {
    let segments: Vec<&str> = token.split('.').collect();

    // A slice pattern matches only when the length is exactly three, so
    // `a.b` and `a.b.c.d` both land in the `else` branch.
    let [_, claims, _] = segments.as_slice() else {
        return Err(DecodeFailure::Segments(segments.len()));
    };

    // Both `?`s convert through the `#[from]` impls on `DecodeFailure`.
    let bytes = CLAIMS_ENGINE.decode(claims)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Returns `true` if `token` expired before `now` (seconds since epoch).
///
/// Fail-closed: a token that cannot be decoded is expired. The reason is
/// logged, never returned; callers only need the yes/no answer, and
/// [`decode_claims`] is there for anyone who wants the reason.
pub fn is_expired_at(token: &str, now: f64) -> bool {
    match decode_claims(token) {
        Ok(claims) => claims.is_expired_at(now),
        Err(e) => {
            tracing::warn!(error = %e, "token could not be decoded; treating as expired");
            true
        }
    }
}

/// Current time in (fractional) seconds since the Unix epoch.
///
/// A clock set before the epoch reads as `f64::INFINITY`, so every token
/// compares as expired.
pub fn now_epoch_secs() -> f64 {
    epoch_secs(SystemTime::now())
}

fn epoch_secs(at: SystemTime) -> f64 {
    match at.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs_f64(),
        Err(e) => {
            tracing::warn!(error = %e, "system clock is before the Unix epoch; treating tokens as expired");
            f64::INFINITY
        }
    }
}
