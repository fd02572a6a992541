//! Public pages: landing and contact.

use std::fmt::Write;

use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use super::table::{Handler, RouteError, RouteTable, path};
use crate::error::AppError;
use crate::forms::{FormData, FormErrors};
use crate::render;
use crate::state::AppState;

/// `aboutus/`, `privacypolicy/`, `termsofservice/` and `refundpolicy/` stay
/// unregistered until their pages exist.
///
/// # Errors
///
/// Returns a [`RouteError`] if the table is malformed.
pub fn table() -> Result<RouteTable, RouteError> {
    RouteTable::new(vec![path("", Handler::Home, "home"), path("contact/", Handler::ContactUs, "contactus")])
}

const NAV: [(&str, &str); 4] = [
    ("contactus", "Contact us"),
    ("signup", "Create an account"),
    ("orders", "Orders"),
    ("portfolio", "Portfolio"),
];

/// `GET /`: landing page.
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let mut body = String::from("<p>Trade, track and manage your portfolio.</p>\n<nav><ul>");
    for (name, label) in NAV {
        let _ = write!(body, "<li>{}</li>", render::link(&state.url_for(name)?, label));
    }
    body.push_str("</ul></nav>");
    Ok(state.page("Home", &body))
}

fn contact_page(
    state: &AppState,
    data: Option<&FormData>,
    errors: Option<&FormErrors>,
) -> Result<Html<String>, AppError> {
    let action = state.url_for("contactus")?;
    let body = render::form(state.forms.contact.form(), &action, "Send", data, errors);
    Ok(state.page("Contact us", &body))
}

/// `GET /contact/`: contact form.
pub async fn contactus(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    contact_page(&state, None, None)
}

/// `POST /contact/`: validate and acknowledge a contact message.
pub async fn contactus_submit(
    State(state): State<AppState>,
    Form(data): Form<FormData>,
) -> Result<Response, AppError> {
    match state.forms.contact.validate(&data) {
        Ok(message) => {
            tracing::info!(
                name = %message.name,
                email = %message.email,
                length = message.message.len(),
                "contact message received"
            );
            let body = "<p>Thanks for reaching out. We will reply by email.</p>";
            Ok(state.page("Contact us", body).into_response())
        }
        Err(errors) => {
            tracing::debug!(fields = ?errors.fields().collect::<Vec<_>>(), "contact form rejected");
            let page = contact_page(&state, Some(&data), Some(&errors))?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
    }
}
