//! Immutable route tables with forward and reverse lookup.
//!
//! DESIGN
//! ======
//! A `RouteTable` is the path list for one section of the site, with
//! patterns relative to wherever it is mounted. A `UrlConf` mounts tables
//! under prefixes and is the single place paths are resolved and names are
//! reversed. Both are validated on construction and never mutated after;
//! the assembled `UrlConf` is shared through `AppState`.
//!
//! Patterns are literal. There are no captures, so resolution is an exact
//! string match and declaration order does not matter.

use std::collections::HashSet;

/// Handler a route dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    Home,
    ContactUs,
    Signup,
    Orders,
    InitiateOrder,
    Portfolio,
    ClosePosition,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("duplicate route name: {0}")]
    DuplicateName(&'static str),
    #[error("duplicate route path: {0}")]
    DuplicatePath(String),
    #[error("invalid pattern {0:?}: must be empty or end with '/', and must not start with '/'")]
    InvalidPattern(&'static str),
    #[error("invalid mount prefix {0:?}: must start and end with '/'")]
    InvalidPrefix(&'static str),
}

/// One `(pattern, handler, name)` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub pattern: &'static str,
    pub handler: Handler,
    pub name: &'static str,
}

/// Declare a route entry.
#[must_use]
pub const fn path(pattern: &'static str, handler: Handler, name: &'static str) -> Route {
    Route { pattern, handler, name }
}

fn valid_pattern(pattern: &str) -> bool {
    pattern.is_empty() || (pattern.ends_with('/') && !pattern.starts_with('/') && !pattern.contains("//"))
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// # Errors
    ///
    /// Returns a [`RouteError`] for a malformed pattern or a repeated
    /// pattern or name.
    pub fn new(routes: Vec<Route>) -> Result<Self, RouteError> {
        let mut names = HashSet::new();
        let mut patterns = HashSet::new();
        for route in &routes {
            if !valid_pattern(route.pattern) {
                return Err(RouteError::InvalidPattern(route.pattern));
            }
            if !names.insert(route.name) {
                return Err(RouteError::DuplicateName(route.name));
            }
            if !patterns.insert(route.pattern) {
                return Err(RouteError::DuplicatePath(route.pattern.to_owned()));
            }
        }
        Ok(Self { routes })
    }

    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Route whose pattern equals `relative` exactly.
    #[must_use]
    pub fn resolve(&self, relative: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.pattern == relative)
    }

    /// Relative pattern registered under `name`.
    #[must_use]
    pub fn reverse(&self, name: &str) -> Option<&'static str> {
        self.routes.iter().find(|r| r.name == name).map(|r| r.pattern)
    }
}

#[derive(Debug, Clone)]
struct Mount {
    prefix: &'static str,
    table: RouteTable,
}

/// Every mounted table, as resolved against incoming request paths.
#[derive(Debug, Clone)]
pub struct UrlConf {
    mounts: Vec<Mount>,
}

impl UrlConf {
    /// Mount each table under its prefix.
    ///
    /// # Errors
    ///
    /// Returns a [`RouteError`] for a malformed prefix, a name used by two
    /// tables, or two routes sharing a full path.
    pub fn new(mounts: Vec<(&'static str, RouteTable)>) -> Result<Self, RouteError> {
        let mut names = HashSet::new();
        let mut paths = HashSet::new();
        for (prefix, table) in &mounts {
            if !prefix.starts_with('/') || !prefix.ends_with('/') {
                return Err(RouteError::InvalidPrefix(prefix));
            }
            for route in table.routes() {
                if !names.insert(route.name) {
                    return Err(RouteError::DuplicateName(route.name));
                }
                let full = format!("{prefix}{}", route.pattern);
                if !paths.insert(full.clone()) {
                    return Err(RouteError::DuplicatePath(full));
                }
            }
        }

        Ok(Self { mounts: mounts.into_iter().map(|(prefix, table)| Mount { prefix, table }).collect() })
    }

    /// Resolve an absolute request path.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&Route> {
        self.mounts
            .iter()
            .find_map(|mount| mount.table.resolve(path.strip_prefix(mount.prefix)?))
    }

    /// Absolute path registered under `name`.
    #[must_use]
    pub fn reverse(&self, name: &str) -> Option<String> {
        self.mounts
            .iter()
            .find_map(|mount| mount.table.reverse(name).map(|pattern| format!("{}{pattern}", mount.prefix)))
    }

    /// Every route with its absolute path, in mount then declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (String, &Route)> {
        self.mounts.iter().flat_map(|mount| {
            mount
                .table
                .routes()
                .iter()
                .map(move |r| (format!("{}{}", mount.prefix, r.pattern), r))
        })
    }
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
