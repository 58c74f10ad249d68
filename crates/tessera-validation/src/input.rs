use serde::{Deserialize, Serialize};

/// The fields of an account-registration form.
///
/// Deserializes from the camelCase names forms usually post
/// (`confirmPassword`, `fullName`); missing fields read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationInput {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub username: String,
    pub full_name: String,
}
