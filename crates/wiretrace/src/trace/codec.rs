//! Line-level encoding of trace fields.
//!
//! Every decoder takes the 1-based line number it is reading so that
//! [`TraceError::Corrupt`] can point at the offending line.

use super::entry::RecordedRequest;
use super::headers::Headers;
use crate::utils::error::TraceError;

/// Escape a body so it fits on one line.
///
/// Only `\`, `\n` and `\r` are rewritten; everything else is kept verbatim,
/// so typical JSON bodies appear in the trace unchanged.
pub fn escape_body(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    for c in body.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// Reverse [`escape_body`]
pub fn unescape_body(raw: &str, line: usize) -> Result<String, TraceError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => {
                return Err(TraceError::corrupt(
                    line,
                    format!("unknown escape sequence \\{}", other),
                ))
            }
            None => return Err(TraceError::corrupt(line, "dangling escape at end of body")),
        }
    }

    Ok(out)
}

/// Build the request line for an exchange.
///
/// `headers` must already be redacted. The recorder writes this line and the
/// player compares against it byte for byte.
pub fn encode_request_line(method: &str, url: &str, headers: &Headers, body: &str) -> String {
    format!(
        "{} {} {} {}",
        method,
        url,
        headers.canonical(),
        escape_body(body)
    )
}

/// Parse a status line
pub fn parse_status(raw: &str, line: usize) -> Result<u16, TraceError> {
    raw.trim()
        .parse::<u16>()
        .map_err(|_| TraceError::corrupt(line, format!("status is not an integer: {:?}", raw)))
}

/// Parse a header line
pub fn parse_headers(raw: &str, line: usize) -> Result<Headers, TraceError> {
    Headers::from_canonical(raw)
        .map_err(|e| TraceError::corrupt(line, format!("invalid header list: {}", e)))
}

/// Split a request line back into method, URL, headers and body
pub fn parse_request_line(raw: &str, line: usize) -> Result<RecordedRequest, TraceError> {
    let (method, rest) = raw
        .split_once(' ')
        .ok_or_else(|| TraceError::corrupt(line, "request line has no URL"))?;
    let (url, rest) = rest
        .split_once(' ')
        .ok_or_else(|| TraceError::corrupt(line, "request line has no headers"))?;

    if method.is_empty() || url.is_empty() {
        return Err(TraceError::corrupt(line, "empty method or URL"));
    }

    // The header list is self-delimiting JSON; the body starts one space after it.
    let mut stream = serde_json::Deserializer::from_str(rest).into_iter::<Headers>();
    let headers = match stream.next() {
        Some(Ok(headers)) => headers,
        Some(Err(e)) => {
            return Err(TraceError::corrupt(
                line,
                format!("invalid request headers: {}", e),
            ))
        }
        None => return Err(TraceError::corrupt(line, "request line has no headers")),
    };
    let offset = stream.byte_offset();

    let body = rest[offset..]
        .strip_prefix(' ')
        .ok_or_else(|| TraceError::corrupt(line, "missing separator before request body"))?;

    Ok(RecordedRequest {
        method: method.to_string(),
        url: url.to_string(),
        headers,
        body: unescape_body(body, line)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_keeps_plain_json_verbatim() {
        assert_eq!(escape_body(r#"{"login":"alice"}"#), r#"{"login":"alice"}"#);
    }

    #[test]
    fn test_escape_multiline() {
        let body = "{\n  \"path\": \"C:\\\\tmp\"\r\n}";
        let escaped = escape_body(body);
        assert!(!escaped.contains('\n'));
        assert!(!escaped.contains('\r'));
        assert_eq!(unescape_body(&escaped, 1).unwrap(), body);
    }

    #[test]
    fn test_unescape_rejects_unknown_sequence() {
        let err = unescape_body("abc\\t", 7).unwrap_err();
        match err {
            TraceError::Corrupt { line, .. } => assert_eq!(line, 7),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(unescape_body("abc\\", 1).is_err());
    }

    #[test]
    fn test_request_line_layout() {
        let headers: Headers = [("Accept", "application/json")].into_iter().collect();
        let line = encode_request_line("GET", "/users/alice", &headers, "");
        assert_eq!(line, r#"GET /users/alice [["Accept","application/json"]] "#);
    }

    #[test]
    fn test_parse_request_line_with_spaces_in_values() {
        let headers: Headers = [("User-Agent", "wiretrace test] [x")].into_iter().collect();
        let line = encode_request_line("PATCH", "/user", &headers, r#"{"bio": "a b"}"#);

        let request = parse_request_line(&line, 1).unwrap();
        assert_eq!(request.method, "PATCH");
        assert_eq!(request.url, "/user");
        assert_eq!(request.headers, headers);
        assert_eq!(request.body, r#"{"bio": "a b"}"#);
    }

    #[test]
    fn test_parse_request_line_missing_body_separator() {
        assert!(parse_request_line(r#"GET /user [["A","b"]]"#, 1).is_err());
        assert!(parse_request_line("GET", 1).is_err());
        assert!(parse_request_line("GET /user not-json ", 1).is_err());
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status("204", 2).unwrap(), 204);
        assert!(parse_status("OK", 2).is_err());
        assert!(parse_status("70000", 2).is_err());
    }
}
