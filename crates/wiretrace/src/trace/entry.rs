//! Data types for recorded exchanges.

use super::codec::encode_request_line;
use super::headers::Headers;

/// The request half of an exchange, as stored in a trace (credentials removed)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub headers: Headers,
    pub body: String,
}

impl RecordedRequest {
    /// The exact line a recorder writes for this request
    pub fn to_line(&self) -> String {
        encode_request_line(&self.method, &self.url, &self.headers, &self.body)
    }
}

/// A fully-read HTTP response.
///
/// The body of a live response can only be read once; this snapshot is what
/// callers get instead, and it can be inspected any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSnapshot {
    pub status: u16,
    pub headers: Headers,
    pub body: String,
}

impl ResponseSnapshot {
    pub fn new(status: u16, headers: Headers, body: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }
}

/// One recorded HTTP exchange
///
/// Immutable once written; entries are only ever addressed by their position
/// in the trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    pub method: String,
    pub url: String,
    pub headers: Headers,
    pub request_body: String,
    pub status: u16,
    pub response_headers: Headers,
    pub response_body: String,
}

impl TraceEntry {
    pub fn new(request: RecordedRequest, response: ResponseSnapshot) -> Self {
        Self {
            method: request.method,
            url: request.url,
            headers: request.headers,
            request_body: request.body,
            status: response.status,
            response_headers: response.headers,
            response_body: response.body,
        }
    }

    pub fn request(&self) -> RecordedRequest {
        RecordedRequest {
            method: self.method.clone(),
            url: self.url.clone(),
            headers: self.headers.clone(),
            body: self.request_body.clone(),
        }
    }

    pub fn response(&self) -> ResponseSnapshot {
        ResponseSnapshot::new(
            self.status,
            self.response_headers.clone(),
            self.response_body.clone(),
        )
    }
}
