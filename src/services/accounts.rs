//! Account records created through sign-up.
//!
//! DESIGN
//! ======
//! `AccountStore` keeps accounts plus username and email indexes behind a
//! single `std::sync::RwLock`. Lookups are synchronous so the registration
//! form's hook can consult them mid-validation. `create` re-checks both
//! indexes under the write lock, so a form that validated against a stale
//! view still cannot produce a duplicate.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use rand::Rng;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::now_ms;
use super::session::bytes_to_hex;
use crate::forms::registration::Registration;

const SALT_LEN: usize = 16;
const HASH_ITERATIONS: u32 = 50_000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("username already registered: {0}")]
    UsernameTaken(String),
    #[error("email already registered: {0}")]
    EmailTaken(String),
}

/// Uniqueness queries used during form validation.
pub trait AccountLookup {
    fn username_taken(&self, username: &str) -> bool;
    fn email_taken(&self, email: &str) -> bool;
}

#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: i64,
}

/// Iterated, salted SHA-256 in the form
/// `sha256$<iterations>$<salt hex>$<digest hex>`.
#[must_use]
pub fn hash_password(password: &str) -> String {
    let salt: [u8; SALT_LEN] = rand::rng().random();
    let salt_hex = bytes_to_hex(&salt);
    let hashed = digest(&salt_hex, password, HASH_ITERATIONS);
    format!("sha256${HASH_ITERATIONS}${salt_hex}${hashed}")
}

/// `d0 = H(salt || password)`, then `d(n) = H(d(n-1) || password)`.
fn digest(salt_hex: &str, password: &str, iterations: u32) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt_hex.as_bytes());
    hasher.update(password.as_bytes());
    let mut block = hasher.finalize();
    for _ in 1..iterations {
        let mut hasher = Sha256::new();
        hasher.update(block);
        hasher.update(password.as_bytes());
        block = hasher.finalize();
    }
    bytes_to_hex(&block)
}

#[derive(Default)]
struct AccountIndex {
    by_id: HashMap<Uuid, Account>,
    usernames: HashMap<String, Uuid>,
    emails: HashMap<String, Uuid>,
}

#[derive(Default)]
pub struct AccountStore {
    inner: RwLock<AccountIndex>,
}

impl AccountStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Persist a validated registration.
    ///
    /// # Errors
    ///
    /// Returns `UsernameTaken` / `EmailTaken` if another sign-up claimed the
    /// username or email since the form was validated.
    pub fn create(&self, registration: Registration) -> Result<Account, AccountError> {
        let Registration { username, email, password } = registration;
        let email = email.to_ascii_lowercase();

        let mut index = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if index.usernames.contains_key(&username) {
            return Err(AccountError::UsernameTaken(username));
        }
        if index.emails.contains_key(&email) {
            return Err(AccountError::EmailTaken(email));
        }

        let account = Account {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash: hash_password(&password),
            created_at: now_ms(),
        };
        index.usernames.insert(account.username.clone(), account.id);
        index.emails.insert(account.email.clone(), account.id);
        index.by_id.insert(account.id, account.clone());

        tracing::info!(account_id = %account.id, username = %account.username, "account created");
        Ok(account)
    }

    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<Account> {
        let index = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        index.by_id.get(&id).cloned()
    }

}

impl AccountLookup for AccountStore {
    fn username_taken(&self, username: &str) -> bool {
        let index = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        index.usernames.contains_key(username)
    }

    fn email_taken(&self, email: &str) -> bool {
        let index = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        index.emails.contains_key(&email.to_ascii_lowercase())
    }
}

#[cfg(test)]
#[path = "accounts_test.rs"]
mod tests;
