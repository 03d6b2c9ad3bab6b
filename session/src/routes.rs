//! Route access rules: which paths need a session and which must not have one.

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;

/// Public entry point; authenticated users are bounced to the dashboard.
pub const LOGIN_PATH: &str = "/login";
/// Public registration form.
pub const REGISTER_PATH: &str = "/register";
/// Authenticated landing page.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Required authentication state for a path. Not parameterized by role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Protected: only rendered with an identity present.
    Authenticated,
    /// Public-only: only rendered without an identity.
    Unauthenticated,
}

/// Path-prefix table resolving every path to an [`Access`] rule.
#[derive(Clone, Debug)]
pub struct RouteTable {
    public_only: Vec<&'static str>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self { public_only: vec![LOGIN_PATH, REGISTER_PATH] }
    }
}

impl RouteTable {
    /// Resolve the rule for `path`. Unlisted paths are protected.
    #[must_use]
    pub fn access(&self, path: &str) -> Access {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_end_matches('/');
        let is_public = self.public_only.iter().any(|prefix| {
            path == *prefix || path.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('/'))
        });
        if is_public { Access::Unauthenticated } else { Access::Authenticated }
    }
}
