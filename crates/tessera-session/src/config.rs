use serde::{Deserialize, Serialize};

/// Where the session manager keeps its state in the [`SessionStore`](crate::SessionStore).
///
/// The defaults match what browser clients of the same service already
/// use, so a shared store stays readable by both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Key holding the bearer token.
    pub token_key: String,

    /// Key holding the cached user profile. Only cleared on logout.
    pub profile_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_key: "auth_token".to_string(),
            profile_key: "user_profile".to_string(),
        }
    }
}
