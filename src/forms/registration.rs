//! Sign-up form: username, email, and a confirmed password.
//!
//! The base account-creation rules (username charset, password strength)
//! are plain field validators; the confirmation match, username similarity
//! and uniqueness checks run in `RegistrationHook` once every field is clean.

use std::fmt;

use super::validators::{self, charset, max_length, not_entirely_numeric, password_min_length};
use super::{CleanedData, FieldSpec, Form, FormData, FormErrors, FormHook, InputKind};
use crate::services::accounts::AccountLookup;

pub const USERNAME_MAX_LEN: usize = 150;
pub const DEFAULT_PASSWORD_MIN_LEN: usize = 8;

pub const PASSWORD_MISMATCH: &str = "The two password fields didn't match.";
pub const PASSWORD_TOO_SIMILAR: &str = "The password is too similar to the username.";
pub const USERNAME_CHARSET: &str =
    "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.";
pub const USERNAME_TAKEN: &str = "A user with that username already exists.";
pub const EMAIL_TAKEN: &str = "A user with that email already exists.";

/// Declared field set, in render order.
pub const FIELDS: [&str; 4] = ["username", "email", "password1", "password2"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self { min_length: DEFAULT_PASSWORD_MIN_LEN }
    }
}

/// Validated sign-up values, ready for account creation.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    /// Lower-cased.
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

pub struct RegistrationForm {
    form: Form,
}

impl RegistrationForm {
    #[must_use]
    pub fn new(policy: PasswordPolicy) -> Self {
        let form = Form::new(vec![
            FieldSpec::new("username", "Username", InputKind::Text)
                .validator(max_length(USERNAME_MAX_LEN))
                .validator(charset("@.+-_", USERNAME_CHARSET)),
            FieldSpec::new("email", "Email", InputKind::Email).validator(validators::email()),
            FieldSpec::new("password1", "Password", InputKind::Password)
                .validator(password_min_length(policy.min_length))
                .validator(not_entirely_numeric()),
            FieldSpec::new("password2", "Password confirmation", InputKind::Password),
        ]);
        Self { form }
    }

    #[must_use]
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Validate a sign-up submission against `accounts` for uniqueness.
    ///
    /// # Errors
    ///
    /// Returns field-scoped errors for malformed values, mismatched
    /// passwords, or a username/email that is already registered.
    pub fn validate(
        &self,
        data: &FormData,
        accounts: &dyn AccountLookup,
    ) -> Result<Registration, FormErrors> {
        let mut cleaned = self.form.validate(data, &RegistrationHook { accounts })?;
        let (Some(username), Some(email), Some(password)) =
            (cleaned.take("username"), cleaned.take("email"), cleaned.take("password1"))
        else {
            let mut errors = FormErrors::new();
            errors.add_non_field("Registration data incomplete.");
            return Err(errors);
        };
        Ok(Registration { username, email: email.to_ascii_lowercase(), password })
    }
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self::new(PasswordPolicy::default())
    }
}

/// Similarity threshold as a fraction, `7 / 10`.
const MAX_SIMILARITY: (usize, usize) = (7, 10);

/// Whether `password` reaches [`MAX_SIMILARITY`] against the username or
/// any of its `@.+-` separated parts.
///
/// Similarity is `2 * lcs / (len(password) + len(part))` over lower-cased
/// chars, where `lcs` is the longest common subsequence.
fn too_similar(password: &str, username: &str) -> bool {
    let (num, den) = MAX_SIMILARITY;
    let password = password.to_lowercase().chars().collect::<Vec<_>>();
    let username = username.to_lowercase();

    username
        .split(['@', '.', '+', '-'])
        .chain(std::iter::once(username.as_str()))
        .filter(|part| !part.is_empty())
        .any(|part| {
            let part = part.chars().collect::<Vec<_>>();
            let total = password.len() + part.len();
            // Ratio upper bound: lcs <= the shorter length.
            if 2 * password.len().min(part.len()) * den < num * total {
                return false;
            }
            2 * common_subsequence_len(&password, &part) * den >= num * total
        })
}

fn common_subsequence_len(a: &[char], b: &[char]) -> usize {
    let mut row = vec![0; b.len() + 1];
    for &x in a {
        let mut diagonal = 0;
        for (j, &y) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if x == y { diagonal + 1 } else { above.max(row[j]) };
            diagonal = above;
        }
    }
    row[b.len()]
}

struct RegistrationHook<'a> {
    accounts: &'a dyn AccountLookup,
}

impl FormHook for RegistrationHook<'_> {
    fn clean(&self, cleaned: &CleanedData, errors: &mut FormErrors) {
        let username = cleaned.get("username");

        if let (Some(first), Some(second)) = (cleaned.get("password1"), cleaned.get("password2")) {
            if first != second {
                errors.add("password2", PASSWORD_MISMATCH);
            }
        }

        if let (Some(name), Some(password)) = (username, cleaned.get("password1")) {
            if too_similar(password, name) {
                errors.add("password1", PASSWORD_TOO_SIMILAR);
            }
        }

        if let Some(name) = username {
            if self.accounts.username_taken(name) {
                errors.add("username", USERNAME_TAKEN);
            }
        }

        if let Some(email) = cleaned.get("email") {
            if self.accounts.email_taken(email) {
                errors.add("email", EMAIL_TAKEN);
            }
        }
    }
}

#[cfg(test)]
#[path = "registration_test.rs"]
mod tests;
