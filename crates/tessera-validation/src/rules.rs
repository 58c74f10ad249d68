//! The registration rule table.
//!
//! Each [`Rule`] is a `(field, predicate, message)` triple. The table is
//! ordered: fields appear in the order errors should be reported, and
//! within a field the cheaper, more basic checks come first (present, then
//! long enough, then well-formed).

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::RegistrationInput;

/// Characters that count as "special" for password strength.
pub const SPECIAL_CHARACTERS: &[char] = &['@', '$', '!', '%', '*', '?', '&'];

const MIN_PASSWORD_LEN: usize = 8;
const MIN_USERNAME_LEN: usize = 3;
const MIN_FULL_NAME_LEN: usize = 2;

/// `local@domain.tld`: no whitespace, exactly one `@`, and a dot somewhere
/// inside the domain part.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// The form field a rule checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Email,
    Password,
    ConfirmPassword,
    Username,
    FullName,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email => write!(f, "email"),
            Self::Password => write!(f, "password"),
            Self::ConfirmPassword => write!(f, "confirmPassword"),
            Self::Username => write!(f, "username"),
            Self::FullName => write!(f, "fullName"),
        }
    }
}

// ---------------------------------------------------------------------------
// Rule
// ---------------------------------------------------------------------------

/// One validation rule.
///
/// `passes` returns `true` when the input satisfies the rule. A rule whose
/// field has already failed an earlier rule is not evaluated, so each field
/// reports at most one error.
#[derive(Clone, Copy)]
pub struct Rule {
    pub field: Field,
    pub passes: fn(&RegistrationInput) -> bool,
    pub message: &'static str,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("field", &self.field)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// The default registration rules, in reporting order.
pub const RULES: &[Rule] = &[
    Rule {
        field: Field::Email,
        passes: email_present,
        message: "email is required",
    },
    Rule {
        field: Field::Email,
        passes: email_well_formed,
        message: "please enter a valid email address",
    },
    Rule {
        field: Field::Password,
        passes: password_present,
        message: "password is required",
    },
    Rule {
        field: Field::Password,
        passes: password_long_enough,
        message: "password must be at least 8 characters",
    },
    Rule {
        field: Field::Password,
        passes: password_strong,
        message: "password must contain upper and lower case letters, a digit and a special character",
    },
    Rule {
        field: Field::ConfirmPassword,
        passes: passwords_match,
        message: "passwords do not match",
    },
    Rule {
        field: Field::Username,
        passes: username_present,
        message: "username is required",
    },
    Rule {
        field: Field::Username,
        passes: username_long_enough,
        message: "username must be at least 3 characters",
    },
    Rule {
        field: Field::Username,
        passes: username_charset,
        message: "username may only contain letters, digits and underscores",
    },
    Rule {
        field: Field::FullName,
        passes: full_name_present,
        message: "full name is required",
    },
    Rule {
        field: Field::FullName,
        passes: full_name_long_enough,
        message: "full name must be at least 2 characters",
    },
];

// ---------------------------------------------------------------------------
// Public predicates
// ---------------------------------------------------------------------------

/// Returns `true` if `email` looks like `local@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Returns `true` if `password` contains a lowercase letter, an uppercase
/// letter, a digit, and one of [`SPECIAL_CHARACTERS`].
///
/// Length is a separate rule and is not checked here.
pub fn is_strong_password(password: &str) -> bool {
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| SPECIAL_CHARACTERS.contains(&c));
    has_lower && has_upper && has_digit && has_special
}

// ---------------------------------------------------------------------------
// Rule predicates
// ---------------------------------------------------------------------------

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn email_present(input: &RegistrationInput) -> bool {
    !input.email.is_empty()
}

fn email_well_formed(input: &RegistrationInput) -> bool {
    is_valid_email(&input.email)
}

fn password_present(input: &RegistrationInput) -> bool {
    !input.password.is_empty()
}

fn password_long_enough(input: &RegistrationInput) -> bool {
    char_len(&input.password) >= MIN_PASSWORD_LEN
}

fn password_strong(input: &RegistrationInput) -> bool {
    is_strong_password(&input.password)
}

fn passwords_match(input: &RegistrationInput) -> bool {
    input.password == input.confirm_password
}

fn username_present(input: &RegistrationInput) -> bool {
    !input.username.is_empty()
}

fn username_long_enough(input: &RegistrationInput) -> bool {
    char_len(&input.username) >= MIN_USERNAME_LEN
}

fn username_charset(input: &RegistrationInput) -> bool {
    input
        .username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn full_name_present(input: &RegistrationInput) -> bool {
    !input.full_name.is_empty()
}

fn full_name_long_enough(input: &RegistrationInput) -> bool {
    char_len(&input.full_name) >= MIN_FULL_NAME_LEN
}
