//! Sign-up route and the session-backed caller extractor.

use axum::Form;
use axum::extract::{FromRef, FromRequestParts, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use super::table::{Handler, RouteError, RouteTable, path};
use crate::error::AppError;
use crate::forms::registration::{EMAIL_TAKEN, USERNAME_TAKEN};
use crate::forms::{FormData, FormErrors};
use crate::render;
use crate::services::accounts::{Account, AccountError};
use crate::services::session::COOKIE_NAME;
use crate::state::AppState;

/// # Errors
///
/// Returns a [`RouteError`] if the table is malformed.
pub fn table() -> Result<RouteTable, RouteError> {
    RouteTable::new(vec![path("signup/", Handler::Signup, "signup")])
}

// =============================================================================
// CALLER EXTRACTOR
// =============================================================================

/// Account behind the request's session cookie.
/// Use as a handler parameter to require a signed-up caller.
pub struct Caller {
    pub account: Account,
}

impl<S> FromRequestParts<S> for Caller
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();

        let app_state = AppState::from_ref(state);
        let account_id = app_state.sessions.resolve(token).await.ok_or(AppError::Unauthorized)?;
        let account = app_state.accounts.get(account_id).ok_or(AppError::Unauthorized)?;
        Ok(Self { account })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

fn signup_page(
    state: &AppState,
    data: Option<&FormData>,
    errors: Option<&FormErrors>,
) -> Result<Html<String>, AppError> {
    let action = state.url_for("signup")?;
    let body = render::form(state.forms.registration.form(), &action, "Create account", data, errors);
    Ok(state.page("Create your account", &body))
}

fn rejected(state: &AppState, data: &FormData, errors: &FormErrors) -> Result<Response, AppError> {
    tracing::debug!(fields = ?errors.fields().collect::<Vec<_>>(), "sign-up rejected");
    Ok((StatusCode::UNPROCESSABLE_ENTITY, signup_page(state, Some(data), Some(errors))?).into_response())
}

/// `GET /accounts/signup/`: registration form.
pub async fn signup(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    signup_page(&state, None, None)
}

/// `POST /accounts/signup/`: validate, create the account, start a session.
pub async fn signup_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(data): Form<FormData>,
) -> Result<Response, AppError> {
    let registration = match state.forms.registration.validate(&data, state.accounts.as_ref()) {
        Ok(registration) => registration,
        Err(errors) => return rejected(&state, &data, &errors),
    };

    // Another sign-up may have claimed the name between validation and insert.
    let account = match state.accounts.create(registration) {
        Ok(account) => account,
        Err(err) => {
            let mut errors = FormErrors::new();
            match err {
                AccountError::UsernameTaken(_) => errors.add("username", USERNAME_TAKEN),
                AccountError::EmailTaken(_) => errors.add("email", EMAIL_TAKEN),
            }
            return rejected(&state, &data, &errors);
        }
    };

    let token = state.sessions.create(account.id).await;
    let cookie = Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.cookie_secure);

    Ok((jar.add(cookie), Redirect::to(&state.url_for("home")?)).into_response())
}
