use super::*;

fn registration(username: &str, email: &str) -> Registration {
    Registration { username: username.into(), email: email.into(), password: "p@ss1234".into() }
}

fn verify_password(password: &str, encoded: &str) -> bool {
    let parts = encoded.split('$').collect::<Vec<_>>();
    match parts[..] {
        ["sha256", iterations, salt_hex, expected] => iterations
            .parse()
            .is_ok_and(|iterations| digest(salt_hex, password, iterations) == expected),
        _ => false,
    }
}

// =============================================================================
// Password hashing
// =============================================================================

#[test]
fn hash_password_is_salted() {
    let a = hash_password("p@ss1234");
    let b = hash_password("p@ss1234");
    assert_ne!(a, b);
    assert!(a.starts_with(&format!("sha256${HASH_ITERATIONS}$")));
    assert!(!a.contains("p@ss1234"));
}

#[test]
fn digest_depends_on_iteration_count() {
    assert_eq!(digest("00", "pw", 3), digest("00", "pw", 3));
    assert_ne!(digest("00", "pw", 1), digest("00", "pw", 2));
    assert_eq!(digest("00", "pw", 1).len(), 64);
}

#[test]
fn verify_password_round_trip() {
    let encoded = hash_password("p@ss1234");
    assert!(verify_password("p@ss1234", &encoded));
    assert!(!verify_password("p@ss12345", &encoded));
}

#[test]
fn verify_password_rejects_unknown_scheme() {
    assert!(!verify_password("x", "md5$1$abc$def"));
    assert!(!verify_password("x", "garbage"));
}

// =============================================================================
// AccountStore
// =============================================================================

#[test]
fn create_stores_account_with_hashed_password() {
    let store = AccountStore::new();
    let account = store.create(registration("bob", "bob@x.com")).unwrap();
    assert_eq!(account.username, "bob");
    assert!(verify_password("p@ss1234", &account.password_hash));
    assert_eq!(store.get(account.id).unwrap().email, "bob@x.com");
}

#[test]
fn create_rejects_duplicate_username() {
    let store = AccountStore::new();
    store.create(registration("bob", "bob@x.com")).unwrap();
    let err = store.create(registration("bob", "other@x.com")).unwrap_err();
    assert_eq!(err, AccountError::UsernameTaken("bob".into()));
    assert!(!store.email_taken("other@x.com"));
}

#[test]
fn create_rejects_duplicate_email_any_case() {
    let store = AccountStore::new();
    store.create(registration("bob", "bob@x.com")).unwrap();
    let err = store.create(registration("robert", "BOB@X.COM")).unwrap_err();
    assert_eq!(err, AccountError::EmailTaken("bob@x.com".into()));
}

#[test]
fn lookup_reports_taken_names() {
    let store = AccountStore::new();
    assert!(!store.username_taken("bob"));
    store.create(registration("bob", "bob@x.com")).unwrap();
    assert!(store.username_taken("bob"));
    assert!(!store.username_taken("Bob"));
    assert!(store.email_taken("Bob@X.com"));
    assert!(!store.email_taken("alice@x.com"));
}

#[test]
fn get_unknown_account_is_none() {
    assert!(AccountStore::new().get(Uuid::new_v4()).is_none());
}
