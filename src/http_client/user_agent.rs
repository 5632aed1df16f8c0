//! User agent sent with every request.

/// Browser-like default. Many sites serve an empty shell or a block page to
/// clients that identify as scripts.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

/// The configured user agent, or [`USER_AGENT`] when unset or blank.
pub fn resolve_user_agent(configured: Option<&str>) -> &str {
    configured
        .map(str::trim)
        .filter(|ua| !ua.is_empty())
        .unwrap_or(USER_AGENT)
}
