//! Route matching logic.
//!
//! # Responsibilities
//! - Match path prefix (case-sensitive)
//!
//! # Design Decisions
//! - Plain string prefix, not segment-aware: `/usersxyz` matches `/users`
//! - Matchers are `const`-constructible so rule tables can be `static`

/// Matches the request path prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathPrefixMatcher {
    prefix: &'static str,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub const fn new(prefix: &'static str) -> Self {
        Self { prefix }
    }

    /// Returns true if `path` starts with the configured prefix.
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(self.prefix)
    }
}
