//! Provider-supplied retry delay extraction.
//!
//! When a Google-style API rejects a call for rate limiting, the error body
//! may carry a `google.rpc.RetryInfo` detail telling the client how long to
//! wait before trying again:
//!
//! ```json
//! {
//!   "error": {
//!     "details": [
//!       { "@type": "type.googleapis.com/google.rpc.RetryInfo", "retryDelay": "14s" }
//!     ]
//!   }
//! }
//! ```
//!
//! Failures reach this crate as opaque rendered messages, so extraction
//! re-parses the message as JSON. Extraction is best-effort by contract:
//! every malformation maps to "no hint available", never to an error of its
//! own.

use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Type URL that marks a detail entry as `google.rpc.RetryInfo`.
const RETRY_INFO_TYPE: &str = "type.googleapis.com/google.rpc.RetryInfo";

/// Error envelope as serialized by Google-style APIs.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

/// Body of the error envelope. Details stay untyped: entries come in many
/// shapes and only the RetryInfo one concerns us.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    details: Vec<Value>,
}

/// Extract the provider-suggested retry delay from a failure message.
///
/// The whole message must parse as the error envelope above. Only the first
/// detail entry whose `@type` is `google.rpc.RetryInfo` is consulted; its
/// `retryDelay` must be a decimal number of seconds with an `s` suffix
/// (`"1.5s"`, `"14s"`). The value is returned at millisecond precision,
/// rounded up.
///
/// Returns `None` for a message that is not JSON, lacks the envelope shape,
/// has no RetryInfo detail, or carries an unparseable delay. Extraction
/// never fails: the original failure is always the one that matters.
///
/// # Example
///
/// ```
/// use paceline_core::retry_delay_hint;
/// use std::time::Duration;
///
/// let body = r#"{"error":{"details":[
///     {"@type":"type.googleapis.com/google.rpc.RetryInfo","retryDelay":"1.5s"}
/// ]}}"#;
/// assert_eq!(retry_delay_hint(body), Some(Duration::from_millis(1500)));
/// assert_eq!(retry_delay_hint("429 Too Many Requests"), None);
/// ```
#[must_use]
pub fn retry_delay_hint(message: &str) -> Option<Duration> {
    let envelope: ErrorEnvelope = serde_json::from_str(message).ok()?;
    let detail = envelope
        .error
        .details
        .iter()
        .find(|detail| detail.get("@type").and_then(Value::as_str) == Some(RETRY_INFO_TYPE))?;
    let delay = detail.get("retryDelay")?.as_str()?;
    parse_retry_delay(delay)
}

/// Parse a RetryInfo delay string (`"<seconds>s"`) into a duration, rounding
/// up to whole milliseconds.
fn parse_retry_delay(raw: &str) -> Option<Duration> {
    let seconds: f64 = raw.strip_suffix('s')?.parse().ok()?;
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    let millis = (seconds * 1000.0).ceil() as u64;
    Some(Duration::from_millis(millis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn envelope(detail: &str) -> String {
        format!(r#"{{"error":{{"details":[{detail}]}}}}"#)
    }

    fn retry_info(delay: &str) -> String {
        format!(
            r#"{{"@type":"type.googleapis.com/google.rpc.RetryInfo","retryDelay":"{delay}"}}"#
        )
    }

    #[test]
    fn test_whole_seconds() {
        let message = envelope(&retry_info("14s"));
        assert_eq!(retry_delay_hint(&message), Some(Duration::from_secs(14)));
    }

    #[test]
    fn test_fractional_seconds() {
        let message = envelope(&retry_info("1.5s"));
        assert_eq!(retry_delay_hint(&message), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn test_sub_millisecond_rounds_up() {
        let message = envelope(&retry_info("0.0015s"));
        assert_eq!(retry_delay_hint(&message), Some(Duration::from_millis(2)));
    }

    #[test]
    fn test_zero_delay() {
        let message = envelope(&retry_info("0s"));
        assert_eq!(retry_delay_hint(&message), Some(Duration::ZERO));
    }

    #[test]
    fn test_first_matching_detail_wins() {
        let message = format!(
            r#"{{"error":{{"details":[{},{}]}}}}"#,
            retry_info("3s"),
            retry_info("9s"),
        );
        assert_eq!(retry_delay_hint(&message), Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_non_retry_info_details_are_skipped() {
        let message = format!(
            r#"{{"error":{{"details":[
                {{"@type":"type.googleapis.com/google.rpc.ErrorInfo","reason":"RATE_LIMIT_EXCEEDED"}},
                {}
            ]}}}}"#,
            retry_info("5s"),
        );
        assert_eq!(retry_delay_hint(&message), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_first_match_is_final_even_if_malformed() {
        // A later well-formed RetryInfo does not rescue a broken first match.
        let message = format!(
            r#"{{"error":{{"details":[{},{}]}}}}"#,
            retry_info("soon"),
            retry_info("9s"),
        );
        assert_eq!(retry_delay_hint(&message), None);
    }

    #[test]
    fn test_not_json() {
        assert_eq!(retry_delay_hint("quota exceeded, slow down"), None);
    }

    #[rstest]
    #[case("{}")]
    #[case(r#"{"error":{}}"#)]
    #[case(r#"{"error":{"details":[]}}"#)]
    fn test_missing_envelope_fields(#[case] message: &str) {
        assert_eq!(retry_delay_hint(message), None);
    }

    #[test]
    fn test_detail_without_delay_field() {
        let message =
            envelope(r#"{"@type":"type.googleapis.com/google.rpc.RetryInfo"}"#);
        assert_eq!(retry_delay_hint(&message), None);
    }

    #[rstest]
    #[case("1.5")]
    #[case("1.5S")]
    #[case("1.5 sec")]
    fn test_delay_must_end_in_s(#[case] delay: &str) {
        assert_eq!(retry_delay_hint(&envelope(&retry_info(delay))), None);
    }

    #[rstest]
    #[case("s")]
    #[case("later")]
    #[case("NaNs")]
    #[case("-2s")]
    fn test_delay_must_be_a_number(#[case] delay: &str) {
        assert_eq!(retry_delay_hint(&envelope(&retry_info(delay))), None);
    }

    #[test]
    fn test_delay_as_json_number_is_rejected() {
        // The field is specified as a string; a bare number has no `s` suffix.
        let message = envelope(
            r#"{"@type":"type.googleapis.com/google.rpc.RetryInfo","retryDelay":14}"#,
        );
        assert_eq!(retry_delay_hint(&message), None);
    }
}
