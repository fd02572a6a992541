use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect::<HashMap<_, _>>();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn defaults_when_unset() {
    let config = AppConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3000");
    assert_eq!(config.password_policy.min_length, 8);
}

#[test]
fn reads_every_variable() {
    let config = AppConfig::from_lookup(lookup(&[
        ("BIND_ADDR", "127.0.0.1"),
        ("PORT", "8080"),
        ("SITE_NAME", "Neon Desk"),
        ("PASSWORD_MIN_LENGTH", "12"),
        ("COOKIE_SECURE", "yes"),
    ]))
    .unwrap();
    assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
    assert_eq!(config.site_name, "Neon Desk");
    assert_eq!(config.password_policy.min_length, 12);
    assert!(config.cookie_secure);
}

#[test]
fn blank_site_name_falls_back() {
    let config = AppConfig::from_lookup(lookup(&[("SITE_NAME", "   ")])).unwrap();
    assert_eq!(config.site_name, DEFAULT_SITE_NAME);
}

#[test]
fn invalid_port_is_error() {
    let err = AppConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { var: "PORT", value: "http".into() });
}

#[test]
fn invalid_bind_addr_is_error() {
    let err = AppConfig::from_lookup(lookup(&[("BIND_ADDR", "localhost")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "BIND_ADDR", .. }));
}

#[test]
fn zero_password_length_is_error() {
    let err = AppConfig::from_lookup(lookup(&[("PASSWORD_MIN_LENGTH", "0")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "PASSWORD_MIN_LENGTH", .. }));
}

#[test]
fn invalid_cookie_secure_is_error() {
    let err = AppConfig::from_lookup(lookup(&[("COOKIE_SECURE", "maybe")])).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { var: "COOKIE_SECURE", value: "maybe".into() });
}

#[test]
fn parse_bool_variants() {
    for val in ["1", "true", "YES", " on "] {
        assert_eq!(parse_bool(val), Some(true), "expected true for {val:?}");
    }
    for val in ["0", "False", "no", "off"] {
        assert_eq!(parse_bool(val), Some(false), "expected false for {val:?}");
    }
    assert_eq!(parse_bool(""), None);
}
