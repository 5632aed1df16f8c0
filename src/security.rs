//! Heuristics applied to fetched responses before their content is used.
//!
//! These are warnings about suspicious responses, not security guarantees.

use crate::http_client::HttpResponse;
use crate::models::SecurityVerdict;

/// Longest redirect chain still considered safe.
pub const MAX_SAFE_REDIRECTS: usize = 3;

/// Message reported for an overly long redirect chain.
pub const TOO_MANY_REDIRECTS: &str = "Too many redirects (possible honeypot)";

/// Flag a response whose redirect chain is longer than [`MAX_SAFE_REDIRECTS`].
pub fn check_redirects(response: &HttpResponse) -> SecurityVerdict {
    check_redirect_count(response.redirect_count(), MAX_SAFE_REDIRECTS)
}

/// Judge a redirect chain of `hops` redirects against `max_safe`.
pub fn check_redirect_count(hops: usize, max_safe: usize) -> SecurityVerdict {
    if hops > max_safe {
        SecurityVerdict::unsafe_because(TOO_MANY_REDIRECTS)
    } else {
        SecurityVerdict::safe()
    }
}

/// Whether a status code suggests the server is throttling or blocking us.
pub fn detect_rate_limit(status_code: u16) -> bool {
    matches!(status_code, 429 | 403)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_boundary() {
        for hops in 0..=3 {
            let verdict = check_redirect_count(hops, MAX_SAFE_REDIRECTS);
            assert!(verdict.safe, "{} hops should be safe", hops);
            assert_eq!(verdict.message, "Safe");
        }

        let verdict = check_redirect_count(4, MAX_SAFE_REDIRECTS);
        assert!(!verdict.safe);
        assert_eq!(verdict.message, "Too many redirects (possible honeypot)");
    }

    #[test]
    fn test_detect_rate_limit() {
        assert!(detect_rate_limit(429));
        assert!(detect_rate_limit(403));
        assert!(!detect_rate_limit(200));
        assert!(!detect_rate_limit(404));
        assert!(!detect_rate_limit(503));
    }
}
