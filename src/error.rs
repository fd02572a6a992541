//! Handler-level errors and their HTTP mapping.
//!
//! `AppError` responses carry an [`ErrorPage`] extension instead of a body;
//! `routes::app` renders it inside the configured site chrome.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("authentication required")]
    Unauthorized,
    #[error("no route named {0}")]
    UnknownRoute(&'static str),
}

/// Title and message of an error page, pending rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorPage {
    pub title: &'static str,
    pub detail: &'static str,
}

impl AppError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::UnknownRoute(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub fn page(&self) -> ErrorPage {
        match self {
            Self::Unauthorized => ErrorPage {
                title: "Sign-up required",
                detail: "Create an account to view this page.",
            },
            Self::UnknownRoute(_) => ErrorPage {
                title: "Server error",
                detail: "Something went wrong on our side.",
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let mut response = status.into_response();
        response.extensions_mut().insert(self.page());
        response
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
