//! Contact page form.

use super::validators::{self, max_length};
use super::{FieldSpec, Form, FormData, FormErrors, InputKind, NoHook};

pub const NAME_MAX_LEN: usize = 100;
pub const MESSAGE_MAX_LEN: usize = 2000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

pub struct ContactForm {
    form: Form,
}

impl ContactForm {
    #[must_use]
    pub fn new() -> Self {
        let form = Form::new(vec![
            FieldSpec::new("name", "Name", InputKind::Text).validator(max_length(NAME_MAX_LEN)),
            FieldSpec::new("email", "Email", InputKind::Email).validator(validators::email()),
            FieldSpec::new("message", "Message", InputKind::TextArea).validator(max_length(MESSAGE_MAX_LEN)),
        ]);
        Self { form }
    }

    #[must_use]
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// # Errors
    ///
    /// Returns field-scoped errors for missing or malformed values.
    pub fn validate(&self, data: &FormData) -> Result<ContactMessage, FormErrors> {
        let mut cleaned = self.form.validate(data, &NoHook)?;
        Ok(ContactMessage {
            name: cleaned.take("name").unwrap_or_default(),
            email: cleaned.take("email").unwrap_or_default().to_ascii_lowercase(),
            message: cleaned.take("message").unwrap_or_default(),
        })
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "contact_test.rs"]
mod tests;
