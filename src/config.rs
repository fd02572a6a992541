//! Server configuration parsed from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::forms::registration::{DEFAULT_PASSWORD_MIN_LEN, PasswordPolicy};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SITE_NAME: &str = "CyberDesk";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub site_name: String,
    pub password_policy: PasswordPolicy,
    pub cookie_secure: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            site_name: DEFAULT_SITE_NAME.to_owned(),
            password_policy: PasswordPolicy::default(),
            cookie_secure: false,
        }
    }
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `BIND_ADDR`: default `0.0.0.0`
    /// - `PORT`: default 3000
    /// - `SITE_NAME`: default `CyberDesk`
    /// - `PASSWORD_MIN_LENGTH`: default 8
    /// - `COOKIE_SECURE`: `1/true/yes/on` or `0/false/no/off`, default off
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a variable is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] over an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a variable is set but malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let bind_addr = parse_var(&lookup, "BIND_ADDR", defaults.bind_addr)?;
        let port = parse_var(&lookup, "PORT", defaults.port)?;
        let site_name = lookup("SITE_NAME")
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.site_name);
        let min_length = parse_var(&lookup, "PASSWORD_MIN_LENGTH", DEFAULT_PASSWORD_MIN_LEN)?;
        if min_length == 0 {
            return Err(ConfigError::Invalid { var: "PASSWORD_MIN_LENGTH", value: "0".into() });
        }
        let cookie_secure = match lookup("COOKIE_SECURE") {
            None => defaults.cookie_secure,
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { var: "COOKIE_SECURE", value: raw })?,
        };

        Ok(Self { bind_addr, port, site_name, password_policy: PasswordPolicy { min_length }, cookie_secure })
    }

    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|_| ConfigError::Invalid { var, value: raw }),
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
