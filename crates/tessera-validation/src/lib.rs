//! Registration-input validation for Tessera.
//!
//! Validation is a pure function of its input: no network, no storage, no
//! clock. The same input always yields the same [`ValidationResult`], with
//! errors in the same order.
//!
//! # Key types
//!
//! - [`RegistrationInput`]: the form fields being checked
//! - [`Rule`] / [`RULES`]: the ordered rule table
//! - [`Validator`]: evaluates a rule table over an input
//! - [`ValidationResult`]: every triggered error plus a primary message

mod error;
mod input;
mod rules;
mod validator;

pub use error::ValidationError;
pub use input::RegistrationInput;
pub use rules::{
    Field, RULES, Rule, SPECIAL_CHARACTERS, is_strong_password, is_valid_email,
};
pub use validator::{VALIDATED_MESSAGE, ValidationResult, Validator, validate};
