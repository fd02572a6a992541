//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The site is three route tables mounted into one `UrlConf`: home pages at
//! `/`, account sign-up under `/accounts/`, and the asset views under
//! `/assets/`. `app` turns that `UrlConf` into an Axum router, one route per
//! entry, with a fallback that handles missing trailing slashes and renders
//! the not-found page for everything else.

pub mod accounts;
pub mod assets;
pub mod home;
pub mod table;

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{MethodRouter, get, post};
use axum::{Router, middleware};
use tower_http::trace::TraceLayer;

use crate::error::ErrorPage;
use crate::render;
use crate::state::AppState;
use table::{Handler, RouteError, UrlConf};

/// Mount every route table.
///
/// # Errors
///
/// Returns a [`RouteError`] if any table is malformed or two tables clash.
pub fn urlconf() -> Result<UrlConf, RouteError> {
    UrlConf::new(vec![
        ("/", home::table()?),
        ("/accounts/", accounts::table()?),
        ("/assets/", assets::table()?),
    ])
}

fn method_router(handler: Handler) -> MethodRouter<AppState> {
    match handler {
        Handler::Home => get(home::home),
        Handler::ContactUs => get(home::contactus).post(home::contactus_submit),
        Handler::Signup => get(accounts::signup).post(accounts::signup_submit),
        Handler::Orders => get(assets::orders_view),
        Handler::InitiateOrder => get(assets::initiate_order).post(assets::initiate_order_submit),
        Handler::Portfolio => get(assets::portfolio_view),
        Handler::ClosePosition => post(assets::close_position),
    }
}

/// Build the Axum router from the state's `UrlConf`.
pub fn app(state: AppState) -> Router {
    let mut router = Router::new();
    for (path, route) in state.urls.iter() {
        router = router.route(&path, method_router(route.handler));
    }

    let urls = Arc::clone(&state.urls);
    let trace = TraceLayer::new_for_http().make_span_with(move |request: &Request| {
        let route = urls.resolve(request.uri().path()).map_or("-", |r| r.name);
        tracing::info_span!(
            "request",
            method = %request.method(),
            path = %request.uri().path(),
            route
        )
    });

    router
        .fallback(not_found)
        .layer(middleware::map_response_with_state(state.clone(), render_error_page))
        .layer(trace)
        .with_state(state)
}

/// Fill in the body of an `AppError` response using the site chrome.
async fn render_error_page(State(state): State<AppState>, mut response: Response) -> Response {
    let Some(page) = response.extensions_mut().remove::<ErrorPage>() else {
        return response;
    };
    let body = format!("<p>{}</p>", render::escape(page.detail));
    (response.status(), state.page(page.title, &body)).into_response()
}

/// Redirect to the slash-terminated path when that path is registered,
/// otherwise render 404.
async fn not_found(State(state): State<AppState>, uri: Uri) -> Response {
    let path = uri.path();
    if !path.ends_with('/') {
        let slashed = format!("{path}/");
        if state.urls.resolve(&slashed).is_some() {
            let target = match uri.query() {
                Some(query) => format!("{slashed}?{query}"),
                None => slashed,
            };
            return Redirect::permanent(&target).into_response();
        }
    }

    tracing::debug!(%path, "no route matched");
    let page = state.page("Not found", "<p>The page you requested does not exist.</p>");
    (StatusCode::NOT_FOUND, page).into_response()
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
