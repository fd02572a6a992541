//! Asset views: orders, order initiation, portfolio, position closing.
//!
//! The table itself enforces nothing; every handler takes a `Caller`, so an
//! anonymous request is answered with 401 before any desk call. Listing
//! views answer JSON when the client asks for it via `Accept`.

use std::fmt::Write;

use axum::Form;
use axum::extract::State;
use axum::http::header::ACCEPT;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Json, Redirect, Response};

use super::accounts::Caller;
use super::table::{Handler, RouteError, RouteTable, path};
use crate::error::AppError;
use crate::forms::{FormData, FormErrors};
use crate::render;
use crate::services::desk::{Order, Position};
use crate::state::AppState;

/// # Errors
///
/// Returns a [`RouteError`] if the table is malformed.
pub fn table() -> Result<RouteTable, RouteError> {
    RouteTable::new(vec![
        path("orders/", Handler::Orders, "orders"),
        path("initiate-order/", Handler::InitiateOrder, "initiate_order"),
        path("portfolio/", Handler::Portfolio, "portfolio"),
        path("portfolio/close-position/", Handler::ClosePosition, "close_position"),
    ])
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"))
}

// =============================================================================
// ORDERS
// =============================================================================

fn orders_table(orders: &[Order]) -> String {
    if orders.is_empty() {
        return "<p>No orders yet.</p>".to_owned();
    }
    let mut out = String::from("<table>\n");
    out.push_str("<tr><th>Order</th><th>Symbol</th><th>Side</th><th>Quantity</th></tr>\n");
    for order in orders {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            order.id,
            render::escape(&order.symbol),
            order.side,
            order.quantity
        );
    }
    out.push_str("</table>");
    out
}

/// `GET /assets/orders/`: the caller's orders, oldest first.
pub async fn orders_view(
    State(state): State<AppState>,
    caller: Caller,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let orders = state.desk.orders(caller.account.id).await;
    if wants_json(&headers) {
        return Ok(Json(orders).into_response());
    }

    let mut body = orders_table(&orders);
    let _ = write!(body, "\n<p>{}</p>", render::link(&state.url_for("initiate_order")?, "New order"));
    Ok(state.page("Orders", &body).into_response())
}

fn order_page(
    state: &AppState,
    data: Option<&FormData>,
    errors: Option<&FormErrors>,
) -> Result<Html<String>, AppError> {
    let action = state.url_for("initiate_order")?;
    let body = render::form(state.forms.order.form(), &action, "Place order", data, errors);
    Ok(state.page("New order", &body))
}

/// `GET /assets/initiate-order/`: order form.
pub async fn initiate_order(
    State(state): State<AppState>,
    _caller: Caller,
) -> Result<Html<String>, AppError> {
    order_page(&state, None, None)
}

/// `POST /assets/initiate-order/`: record the order, then show the order list.
pub async fn initiate_order_submit(
    State(state): State<AppState>,
    caller: Caller,
    Form(data): Form<FormData>,
) -> Result<Response, AppError> {
    let request = match state.forms.order.validate(&data) {
        Ok(request) => request,
        Err(errors) => {
            tracing::debug!(fields = ?errors.fields().collect::<Vec<_>>(), "order form rejected");
            let page = order_page(&state, Some(&data), Some(&errors))?;
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    if let Err(err) = state.desk.record_order(caller.account.id, request).await {
        let mut errors = FormErrors::new();
        errors.add_non_field(err.to_string());
        let page = order_page(&state, Some(&data), Some(&errors))?;
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
    }

    Ok(Redirect::to(&state.url_for("orders")?).into_response())
}

// =============================================================================
// PORTFOLIO
// =============================================================================

fn portfolio_page(
    state: &AppState,
    positions: &[Position],
    errors: Option<&FormErrors>,
) -> Result<Html<String>, AppError> {
    let close_action = render::escape(&state.url_for("close_position")?);
    let mut body = String::new();

    if let Some(errors) = errors {
        body.push_str("<ul class=\"errorlist\">");
        for message in errors.non_field().iter().chain(errors.for_field("symbol")) {
            let _ = write!(body, "<li>{}</li>", render::escape(message));
        }
        body.push_str("</ul>\n");
    }

    if positions.is_empty() {
        body.push_str("<p>No open positions.</p>");
    } else {
        body.push_str("<table>\n<tr><th>Symbol</th><th>Quantity</th><th></th></tr>\n");
        for position in positions {
            let symbol = render::escape(&position.symbol);
            let _ = writeln!(
                body,
                "<tr><td>{symbol}</td><td>{}</td><td><form method=\"post\" action=\"{close_action}\">\
                 <input type=\"hidden\" name=\"symbol\" value=\"{symbol}\">\
                 <button type=\"submit\">Close</button></form></td></tr>",
                position.quantity
            );
        }
        body.push_str("</table>");
    }

    Ok(state.page("Portfolio", &body))
}

/// `GET /assets/portfolio/`: the caller's open positions.
pub async fn portfolio_view(
    State(state): State<AppState>,
    caller: Caller,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let positions = state.desk.portfolio(caller.account.id).await;
    if wants_json(&headers) {
        return Ok(Json(positions).into_response());
    }
    Ok(portfolio_page(&state, &positions, None)?.into_response())
}

/// `POST /assets/portfolio/close-position/`: flatten one position.
pub async fn close_position(
    State(state): State<AppState>,
    caller: Caller,
    Form(data): Form<FormData>,
) -> Result<Response, AppError> {
    let account_id = caller.account.id;
    let outcome = match state.forms.close_position.validate(&data) {
        Ok(symbol) => state.desk.close_position(account_id, &symbol).await.map_err(|err| {
            let mut errors = FormErrors::new();
            errors.add("symbol", err.to_string());
            errors
        }),
        Err(errors) => Err(errors),
    };

    match outcome {
        Ok(_) => Ok(Redirect::to(&state.url_for("portfolio")?).into_response()),
        Err(errors) => {
            tracing::debug!(%account_id, "close position rejected");
            let positions = state.desk.portfolio(account_id).await;
            let page = portfolio_page(&state, &positions, Some(&errors))?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
    }
}
