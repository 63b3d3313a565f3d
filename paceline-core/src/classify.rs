//! Failure classification.
//!
//! Decides whether an upstream failure was caused by provider-side rate
//! limiting and is therefore worth retrying. The decision is a substring
//! heuristic over the failure's rendered message, kept in one place so it
//! stays testable and easy to revise.

/// Classification of a single upstream failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum FailureClass {
    /// The provider rejected the call because of rate limiting or quota
    /// exhaustion. Retrying after a wait is likely to succeed.
    RateLimited,
    /// Any other failure. Retrying will not help; propagate immediately.
    Other,
}

impl FailureClass {
    /// True if this failure was caused by provider-side rate limiting.
    #[must_use]
    pub fn is_rate_limited(self) -> bool {
        matches!(self, FailureClass::RateLimited)
    }
}

/// Message fragments that mark a failure as rate limiting.
///
/// `RESOURCE_EXHAUSTED` is the canonical google.rpc status; the other two
/// cover providers that only surface the HTTP 429 reason phrase or a plain
/// quota message.
const RATE_LIMIT_MARKERS: [&str; 3] = ["RESOURCE_EXHAUSTED", "Too Many Requests", "quota"];

/// Classify a failure by its rendered message.
///
/// The match is case-sensitive substring containment against the marker
/// fragments above. This is deliberately a heuristic over text,
/// not a structured status code: upstream failures reach us as opaque
/// messages. It can false-positive on an unrelated failure that happens to
/// mention `quota`; callers that need stricter classification should match
/// on their own error type before rendering.
///
/// # Example
///
/// ```
/// use paceline_core::{classify, FailureClass};
///
/// assert_eq!(classify("429 Too Many Requests"), FailureClass::RateLimited);
/// assert_eq!(classify("invalid API key"), FailureClass::Other);
/// ```
#[must_use]
pub fn classify(message: &str) -> FailureClass {
    if RATE_LIMIT_MARKERS.iter().any(|marker| message.contains(marker)) {
        FailureClass::RateLimited
    } else {
        FailureClass::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_status_matches() {
        assert_eq!(
            classify("error 429: RESOURCE_EXHAUSTED: rate limit hit"),
            FailureClass::RateLimited
        );
    }

    #[test]
    fn test_reason_phrase_matches() {
        assert_eq!(classify("HTTP 429 Too Many Requests"), FailureClass::RateLimited);
    }

    #[test]
    fn test_quota_matches() {
        assert_eq!(
            classify("You have exceeded your quota for this minute"),
            FailureClass::RateLimited
        );
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert_eq!(classify("resource_exhausted"), FailureClass::Other);
        assert_eq!(classify("too many requests"), FailureClass::Other);
        assert_eq!(classify("QUOTA"), FailureClass::Other);
    }

    #[test]
    fn test_unrelated_failure_is_other() {
        assert_eq!(classify("connection reset by peer"), FailureClass::Other);
        assert_eq!(classify("invalid argument: prompt is empty"), FailureClass::Other);
        assert_eq!(classify(""), FailureClass::Other);
    }

    #[test]
    fn test_marker_anywhere_in_message() {
        // Substring containment, not prefix or word match.
        assert_eq!(
            classify("{\"error\":{\"status\":\"RESOURCE_EXHAUSTED\"}}"),
            FailureClass::RateLimited
        );
    }

    #[test]
    fn test_is_rate_limited_predicate() {
        assert!(FailureClass::RateLimited.is_rate_limited());
        assert!(!FailureClass::Other.is_rate_limited());
    }
}
