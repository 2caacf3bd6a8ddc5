//! Route lookup.
//!
//! # Responsibilities
//! - Store the ordered rule table
//! - Normalise the request path
//! - Return the owning service or an explicit routing failure
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) prefix scan (acceptable for typical route counts)
//! - Explicit failure rather than silent default

use serde::Serialize;

use crate::routing::matcher::PathPrefixMatcher;

/// Logical downstream service that owns a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetService {
    Users,
    Products,
}

impl TargetService {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetService::Users => "users",
            TargetService::Products => "products",
        }
    }
}

impl std::fmt::Display for TargetService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A path could not be attributed to any service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoutingFailure {
    /// Empty path or bare `/`.
    #[error("empty or root path not supported: {path}")]
    Unroutable { path: String },

    /// No rule prefix matched the normalised path.
    #[error("unknown service for path: {path}")]
    NoMatch { path: String },
}

impl RoutingFailure {
    /// The path that failed classification (normalised when it got that far).
    pub fn path(&self) -> &str {
        match self {
            RoutingFailure::Unroutable { path } | RoutingFailure::NoMatch { path } => path,
        }
    }
}

/// A single (prefix, service) rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub matcher: PathPrefixMatcher,
    pub service: TargetService,
}

impl Route {
    pub const fn new(prefix: &'static str, service: TargetService) -> Self {
        Self {
            matcher: PathPrefixMatcher::new(prefix),
            service,
        }
    }
}

/// Rule table used by the gateway. Order matters: first match wins.
pub const DEFAULT_ROUTES: &[Route] = &[
    Route::new("/users", TargetService::Users),
    Route::new("/products", TargetService::Products),
];

/// Classifies request paths against a static, ordered rule table.
#[derive(Debug, Clone, Copy)]
pub struct ServiceRouter {
    routes: &'static [Route],
}

impl ServiceRouter {
    /// Router bound to [`DEFAULT_ROUTES`].
    pub const fn new() -> Self {
        Self::with_routes(DEFAULT_ROUTES)
    }

    /// Router bound to a different compile-time table.
    pub const fn with_routes(routes: &'static [Route]) -> Self {
        Self { routes }
    }

    /// Determine which service owns `path`.
    pub fn classify(&self, path: &str) -> Result<TargetService, RoutingFailure> {
        if path.is_empty() || path == "/" {
            return Err(RoutingFailure::Unroutable {
                path: path.to_string(),
            });
        }

        // Only a single trailing slash is dropped.
        let path = path.strip_suffix('/').unwrap_or(path);

        self.routes
            .iter()
            .find(|route| route.matcher.matches(path))
            .map(|route| route.service)
            .ok_or_else(|| RoutingFailure::NoMatch {
                path: path.to_string(),
            })
    }
}

impl Default for ServiceRouter {
    fn default() -> Self {
        Self::new()
    }
}
