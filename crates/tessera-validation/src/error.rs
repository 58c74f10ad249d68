//! Error type for rejected registration input.

/// Registration input failed one or more rules.
///
/// Displays as the primary (first) message; `errors` holds all of them in
/// evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", .errors.first().map(String::as_str).unwrap_or("validation failed"))]
pub struct ValidationError {
    pub errors: Vec<String>,
}
