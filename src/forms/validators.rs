//! Named field validators shared by every form.

use std::fmt;

type Check = Box<dyn Fn(&str) -> Result<(), String> + Send + Sync>;

pub const EMAIL_MAX_LEN: usize = 254;

/// A named single-value check. The name shows up in debug logs.
pub struct Validator {
    name: &'static str,
    check: Check,
}

impl Validator {
    pub fn new(
        name: &'static str,
        check: impl Fn(&str) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        Self { name, check: Box::new(check) }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// # Errors
    ///
    /// Returns the user-facing message when `value` fails the check.
    pub fn check(&self, value: &str) -> Result<(), String> {
        (self.check)(value)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Validator").field(&self.name).finish()
    }
}

#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    if value.len() > EMAIL_MAX_LEN || value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels = domain.split('.').collect::<Vec<_>>();
    labels.len() >= 2
        && labels
            .iter()
            .all(|label| !label.is_empty() && !label.starts_with('-') && !label.ends_with('-'))
}

#[must_use]
pub fn email() -> Validator {
    Validator::new("email", |value| {
        if is_valid_email(value) { Ok(()) } else { Err("Enter a valid email address.".into()) }
    })
}

#[must_use]
pub fn max_length(limit: usize) -> Validator {
    Validator::new("max_length", move |value| {
        let len = value.chars().count();
        if len <= limit {
            Ok(())
        } else {
            Err(format!("Ensure this value has at most {limit} characters (it has {len})."))
        }
    })
}

#[must_use]
pub fn password_min_length(limit: usize) -> Validator {
    Validator::new("password_min_length", move |value| {
        if value.chars().count() >= limit {
            Ok(())
        } else {
            Err(format!("This password is too short. It must contain at least {limit} characters."))
        }
    })
}

/// Accepts letters, digits and the characters in `extra`.
#[must_use]
pub fn charset(extra: &'static str, message: &'static str) -> Validator {
    Validator::new("charset", move |value| {
        if value.chars().all(|c| c.is_alphanumeric() || extra.contains(c)) {
            Ok(())
        } else {
            Err(message.into())
        }
    })
}

/// Like [`charset`], but letters and digits must be ASCII.
#[must_use]
pub fn ascii_charset(extra: &'static str, message: &'static str) -> Validator {
    Validator::new("ascii_charset", move |value| {
        if value.chars().all(|c| c.is_ascii_alphanumeric() || extra.contains(c)) {
            Ok(())
        } else {
            Err(message.into())
        }
    })
}

#[must_use]
pub fn not_entirely_numeric() -> Validator {
    Validator::new("not_entirely_numeric", |value| {
        if value.chars().all(|c| c.is_ascii_digit()) {
            Err("This password is entirely numeric.".into())
        } else {
            Ok(())
        }
    })
}

#[must_use]
pub fn positive_integer(max: u64) -> Validator {
    Validator::new("positive_integer", move |value| match value.parse::<u64>() {
        Ok(n) if n > 0 && n <= max => Ok(()),
        Ok(_) => Err(format!("Enter a whole number between 1 and {max}.")),
        Err(_) => Err("Enter a whole number.".into()),
    })
}

#[must_use]
pub fn one_of(choices: &'static [(&'static str, &'static str)]) -> Validator {
    Validator::new("one_of", move |value| {
        if choices.iter().any(|(v, _)| *v == value) {
            Ok(())
        } else {
            Err(format!("Select a valid choice. {value} is not one of the available choices."))
        }
    })
}

#[cfg(test)]
#[path = "validators_test.rs"]
mod tests;
