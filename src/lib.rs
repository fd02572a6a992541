//! Themed trading-site web service: sign-up form, home pages and asset views
//! behind immutable route tables.

pub mod config;
pub mod error;
pub mod forms;
pub mod render;
pub mod routes;
pub mod services;
pub mod state;
