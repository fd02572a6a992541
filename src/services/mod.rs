//! Collaborators behind the route handlers.
//!
//! ARCHITECTURE
//! ============
//! Service modules own account records, session tokens and the asset desk
//! so handlers stay focused on form plumbing and rendering. Everything is
//! held in memory; swapping in a durable backend means implementing the
//! same types' contracts elsewhere.

pub mod accounts;
pub mod desk;
pub mod session;

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time in unix milliseconds.
pub(crate) fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}
