//! Order initiation and position-closing forms.

use super::validators::{ascii_charset, max_length, one_of, positive_integer};
use super::{FieldSpec, Form, FormData, FormErrors, InputKind, NoHook};
use crate::services::desk::{OrderRequest, Side};

pub const SYMBOL_MAX_LEN: usize = 12;
pub const QUANTITY_MAX: u64 = 1_000_000_000;

pub const SIDES: &[(&str, &str)] = &[("buy", "Buy"), ("sell", "Sell")];

fn symbol_field() -> FieldSpec {
    FieldSpec::new("symbol", "Symbol", InputKind::Text)
        .validator(max_length(SYMBOL_MAX_LEN))
        .validator(ascii_charset(".-", "Symbols may contain only letters, numbers, '.' and '-'."))
}

pub struct OrderForm {
    form: Form,
}

impl OrderForm {
    #[must_use]
    pub fn new() -> Self {
        let form = Form::new(vec![
            symbol_field(),
            FieldSpec::new("side", "Side", InputKind::Select(SIDES)).validator(one_of(SIDES)),
            FieldSpec::new("quantity", "Quantity", InputKind::Number)
                .validator(positive_integer(QUANTITY_MAX)),
        ]);
        Self { form }
    }

    #[must_use]
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// # Errors
    ///
    /// Returns field-scoped errors for a malformed symbol, unknown side, or
    /// out-of-range quantity.
    pub fn validate(&self, data: &FormData) -> Result<OrderRequest, FormErrors> {
        let cleaned = self.form.validate(data, &NoHook)?;

        let side = match cleaned.get("side") {
            Some("sell") => Side::Sell,
            _ => Side::Buy,
        };
        let Some(quantity) = cleaned.get("quantity").and_then(|q| q.parse::<u64>().ok()) else {
            let mut errors = FormErrors::new();
            errors.add("quantity", "Enter a whole number.");
            return Err(errors);
        };

        let symbol = cleaned.get("symbol").unwrap_or_default().to_ascii_uppercase();
        Ok(OrderRequest { symbol, side, quantity })
    }
}

impl Default for OrderForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-field form posted from the portfolio page.
pub struct ClosePositionForm {
    form: Form,
}

impl ClosePositionForm {
    #[must_use]
    pub fn new() -> Self {
        Self { form: Form::new(vec![symbol_field()]) }
    }

    /// # Errors
    ///
    /// Returns a `symbol` error for a missing or malformed symbol.
    pub fn validate(&self, data: &FormData) -> Result<String, FormErrors> {
        let cleaned = self.form.validate(data, &NoHook)?;
        Ok(cleaned.get("symbol").unwrap_or_default().to_ascii_uppercase())
    }
}

impl Default for ClosePositionForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "order_test.rs"]
mod tests;
