//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! Configuration, route tables and form definitions are built once at
//! startup and shared read-only. The account store, session store and
//! asset desk carry their own locks.

use std::sync::Arc;

use axum::response::Html;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::forms::contact::ContactForm;
use crate::forms::order::{ClosePositionForm, OrderForm};
use crate::forms::registration::RegistrationForm;
use crate::render;
use crate::routes::table::UrlConf;
use crate::services::accounts::AccountStore;
use crate::services::desk::AssetDesk;
use crate::services::session::SessionStore;

/// Every form the site renders, built once from config.
pub struct Forms {
    pub registration: RegistrationForm,
    pub contact: ContactForm,
    pub order: OrderForm,
    pub close_position: ClosePositionForm,
}

impl Forms {
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self {
            registration: RegistrationForm::new(config.password_policy),
            contact: ContactForm::new(),
            order: OrderForm::new(),
            close_position: ClosePositionForm::new(),
        }
    }
}

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; every field is Arc-wrapped or cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub urls: Arc<UrlConf>,
    pub forms: Arc<Forms>,
    pub accounts: Arc<AccountStore>,
    pub sessions: SessionStore,
    pub desk: Arc<dyn AssetDesk>,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig, urls: UrlConf, desk: Arc<dyn AssetDesk>) -> Self {
        let forms = Forms::new(&config);
        Self {
            config: Arc::new(config),
            urls: Arc::new(urls),
            forms: Arc::new(forms),
            accounts: Arc::new(AccountStore::new()),
            sessions: SessionStore::new(),
            desk,
        }
    }

    /// Absolute path for a route name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UnknownRoute`] if no mounted table declares `name`.
    pub fn url_for(&self, name: &'static str) -> Result<String, AppError> {
        self.urls.reverse(name).ok_or(AppError::UnknownRoute(name))
    }

    /// Wrap `body` in the site chrome.
    #[must_use]
    pub fn page(&self, title: &str, body: &str) -> Html<String> {
        Html(render::page(&self.config.site_name, title, body))
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
