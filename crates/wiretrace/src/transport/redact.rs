//! Credential redaction applied to request headers before they are written
//! to a trace or compared against one.

use crate::trace::Headers;
use crate::utils::config::CREDENTIAL_HEADERS;

/// Copy of `headers` with every credential header deleted (not masked).
/// Absent headers are simply skipped.
pub fn redact(headers: &Headers) -> Headers {
    let mut redacted = headers.clone();
    for name in CREDENTIAL_HEADERS {
        redacted.remove(name);
    }
    redacted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_removes_authorization_key() {
        let headers: Headers = [
            ("authorization", "Bearer X"),
            ("Accept", "application/json"),
            ("Proxy-Authorization", "Basic Zm9v"),
        ]
        .into_iter()
        .collect();

        let redacted = redact(&headers);
        assert_eq!(redacted.len(), 1);
        assert!(!redacted.contains("Authorization"));
        assert!(!redacted.canonical().contains("Bearer"));
        // the caller's map is untouched
        assert!(headers.contains("Authorization"));
    }

    #[test]
    fn test_redact_without_credentials() {
        let headers: Headers = [("Accept", "*/*")].into_iter().collect();
        assert_eq!(redact(&headers), headers);
    }
}
