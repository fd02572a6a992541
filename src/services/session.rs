//! Session tokens issued at sign-up.
//!
//! Tokens are opaque random hex strings mapped to an account id. There is
//! no expiry or logout here; those belong to a real auth backend.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;

use rand::Rng;
use tokio::sync::RwLock;
use uuid::Uuid;

pub const COOKIE_NAME: &str = "session_token";

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

#[derive(Clone, Default)]
pub struct SessionStore {
    tokens: Arc<RwLock<HashMap<String, Uuid>>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session for `account_id`, returning the token.
    pub async fn create(&self, account_id: Uuid) -> String {
        let token = generate_token();
        self.tokens.write().await.insert(token.clone(), account_id);
        token
    }

    /// Account bound to `token`, if any.
    pub async fn resolve(&self, token: &str) -> Option<Uuid> {
        if token.is_empty() {
            return None;
        }
        self.tokens.read().await.get(token).copied()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
