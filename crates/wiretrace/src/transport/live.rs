//! Transport backed by a real HTTP client.

use super::Transport;
use crate::trace::{Headers, ResponseSnapshot};
use crate::utils::config::DEFAULT_HTTP_TIMEOUT;
use crate::utils::error::TransportError;
use log::{debug, warn};
use reqwest::blocking::{Client, Response};
use reqwest::Method;
use std::time::Duration;

/// Sends requests to `base_url` over the network
pub struct LiveTransport {
    client: Client,
    base_url: String,
    pending: Option<Response>,
    response: Option<ResponseSnapshot>,
}

impl LiveTransport {
    /// Create a new live transport
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base_url, DEFAULT_HTTP_TIMEOUT)
    }

    /// Create a live transport with a custom timeout
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            pending: None,
            response: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for LiveTransport {
    fn request(
        &mut self,
        method: &str,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<(), TransportError> {
        let method = Method::from_bytes(method.as_bytes())
            .map_err(|_| TransportError::InvalidMethod(method.to_string()))?;
        let target = format!("{}{}", self.base_url, url);

        debug!("{} {}", method, target);

        let mut builder = self.client.request(method, target);
        for (name, value) in headers.iter() {
            builder = builder.header(name, value);
        }
        if !body.is_empty() {
            builder = builder.body(body.to_string());
        }

        self.response = None;
        self.pending = Some(builder.send()?);
        Ok(())
    }

    fn get_response(&mut self) -> Result<ResponseSnapshot, TransportError> {
        if let Some(snapshot) = &self.response {
            return Ok(snapshot.clone());
        }

        let response = self
            .pending
            .take()
            .ok_or(TransportError::OutOfSequence("get_response called before request"))?;

        let status = response.status().as_u16();
        // Repeated names (Set-Cookie, Vary, ...) are kept as separate entries.
        let mut headers = Headers::new();
        for (name, value) in response.headers() {
            headers.append(
                name.as_str(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            );
        }

        // The body can only be read once; the snapshot is the copy everyone else sees.
        let body = body_text(response.bytes()?.to_vec());

        debug!("HTTP {} ({} bytes)", status, body.len());

        let snapshot = ResponseSnapshot::new(status, headers, body);
        self.response = Some(snapshot.clone());
        Ok(snapshot)
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.pending = None;
        self.response = None;
        Ok(())
    }
}

/// Traces are UTF-8 text, so a binary body is stored with U+FFFD in place of
/// invalid bytes. Caller and trace see the same lossy text.
fn body_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!("Response body is not valid UTF-8; invalid bytes will be replaced");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}
