//! Declarative forms: field specs, validation pipeline, widget attributes.
//!
//! DESIGN
//! ======
//! A `Form` is an ordered list of `FieldSpec`s. Validation runs each field's
//! named validators over the submitted value, then hands the cleaned values
//! to a `FormHook` for cross-field checks. Every failure lands in
//! `FormErrors` keyed by field name; nothing here is fatal.
//!
//! Rendering attributes are derived on demand by `widget_attrs`, so a field
//! spec never carries mutable presentation state.

pub mod contact;
pub mod order;
pub mod registration;
pub mod validators;

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

pub use validators::Validator;

/// Shared input styling for every themed form control.
pub const THEME_INPUT_CLASS: &str = "w-full px-4 py-3 bg-cyber-dark border border-gray-700 rounded-lg \
     focus:outline-none focus:border-cyber-primary transition-colors text-white placeholder-gray-500";

pub const REQUIRED_MESSAGE: &str = "This field is required.";

// =============================================================================
// SUBMITTED DATA
// =============================================================================

/// Raw submitted values, as decoded from a urlencoded body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct FormData(HashMap<String, String>);

impl FormData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests and redisplay.
    #[must_use]
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.0.insert(name.to_owned(), value.to_owned());
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Field-scoped validation failures plus form-wide (non-field) messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<String, Vec<String>>,
    non_field: Vec<String>,
}

impl FormErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields.entry(field.to_owned()).or_default().push(message.into());
    }

    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.non_field.push(message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.non_field.is_empty()
    }

    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Messages attached to `field`, empty when the field is clean.
    #[must_use]
    pub fn for_field(&self, field: &str) -> &[String] {
        self.fields.get(field).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn non_field(&self) -> &[String] {
        &self.non_field
    }

    /// Field names carrying at least one error, in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

// =============================================================================
// CLEANED DATA
// =============================================================================

/// Values that passed their field validators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedData(BTreeMap<&'static str, String>);

impl CleanedData {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn take(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    fn insert(&mut self, name: &'static str, value: String) {
        self.0.insert(name, value);
    }
}

// =============================================================================
// FIELDS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Password,
    Number,
    TextArea,
    /// Fixed choice list of `(value, label)` pairs.
    Select(&'static [(&'static str, &'static str)]),
}

impl InputKind {
    #[must_use]
    pub fn input_type(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Number => "number",
            Self::TextArea => "textarea",
            Self::Select(_) => "select",
        }
    }
}

/// One declared form field and its validator chain.
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: InputKind,
    pub required: bool,
    /// Trim surrounding whitespace before validation. Off for passwords.
    pub strip: bool,
    pub validators: Vec<Validator>,
}

impl FieldSpec {
    #[must_use]
    pub fn new(name: &'static str, label: &'static str, kind: InputKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
            strip: !matches!(kind, InputKind::Password),
            validators: Vec::new(),
        }
    }

    #[must_use]
    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Whether a submitted value may be echoed back on redisplay.
    #[must_use]
    pub fn redisplay(&self) -> bool {
        !matches!(self.kind, InputKind::Password)
    }

    fn clean(&self, raw: Option<&str>, errors: &mut FormErrors) -> Option<String> {
        let raw = raw.unwrap_or_default();
        let value = if self.strip { raw.trim() } else { raw };

        if value.is_empty() {
            if self.required {
                errors.add(self.name, REQUIRED_MESSAGE);
                return None;
            }
            return Some(String::new());
        }

        let mut ok = true;
        for validator in &self.validators {
            if let Err(message) = validator.check(value) {
                tracing::debug!(field = self.name, validator = validator.name(), "field validation failed");
                errors.add(self.name, message);
                ok = false;
            }
        }
        ok.then(|| value.to_owned())
    }
}

/// Rendering attributes for one widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetAttrs {
    pub class: &'static str,
    pub placeholder: String,
    pub input_type: &'static str,
}

/// Presentation attributes for `field`: the theme class plus a
/// field-specific placeholder.
#[must_use]
pub fn widget_attrs(field: &FieldSpec) -> WidgetAttrs {
    WidgetAttrs {
        class: THEME_INPUT_CLASS,
        placeholder: format!("Enter your {}", field.name),
        input_type: field.kind.input_type(),
    }
}

// =============================================================================
// FORM
// =============================================================================

/// Cross-field check run after every field validator.
///
/// Sees only values that passed their own validators; fields that failed
/// are simply absent from `cleaned`.
pub trait FormHook {
    fn clean(&self, cleaned: &CleanedData, errors: &mut FormErrors);
}

/// Hook for forms with no cross-field rules.
pub struct NoHook;

impl FormHook for NoHook {
    fn clean(&self, _cleaned: &CleanedData, _errors: &mut FormErrors) {}
}

pub struct Form {
    fields: Vec<FieldSpec>,
}

impl Form {
    #[must_use]
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Run the full pipeline: field validators in declaration order, then `hook`.
    ///
    /// # Errors
    ///
    /// Returns every field-scoped and non-field failure collected along the way.
    pub fn validate(&self, data: &FormData, hook: &dyn FormHook) -> Result<CleanedData, FormErrors> {
        let mut errors = FormErrors::new();
        let mut cleaned = CleanedData::default();

        for field in &self.fields {
            if let Some(value) = field.clean(data.get(field.name), &mut errors) {
                cleaned.insert(field.name, value);
            }
        }

        hook.clean(&cleaned, &mut errors);

        if errors.is_empty() { Ok(cleaned) } else { Err(errors) }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
