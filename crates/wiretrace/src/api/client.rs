//! HTTP client for the GitHub REST API, written against [`Transport`] so the
//! same code runs live, recording or replaying.

use crate::session::Credentials;
use crate::trace::{Headers, ResponseSnapshot};
use crate::transport::Transport;
use crate::utils::config::{ACCEPT_MEDIA_TYPE, USER_AGENT};
use crate::utils::error::ApiError;
use log::debug;
use serde_json::Value;

pub struct ApiClient<T: Transport> {
    transport: T,
    credentials: Credentials,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, credentials: Credentials) -> Self {
        Self {
            transport,
            credentials,
        }
    }

    /// Perform one exchange and return the response whatever its status
    pub fn send(
        &mut self,
        method: &str,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ResponseSnapshot, ApiError> {
        let payload = body.map(Value::to_string).unwrap_or_default();
        let headers = self.headers(body.is_some());

        debug!("{} {}", method, path);

        self.transport.request(method, path, &payload, &headers)?;
        let response = self.transport.get_response()?;
        self.transport.close()?;

        Ok(response)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    fn headers(&self, has_body: bool) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Accept", ACCEPT_MEDIA_TYPE);
        headers.insert("Authorization", self.credentials.authorization());
        headers.insert("User-Agent", USER_AGENT);
        if has_body {
            headers.insert("Content-Type", "application/json");
        }
        headers
    }
}

/// Turn a non-2xx response into `ApiError::Status`
pub fn expect_success(
    method: &str,
    path: &str,
    response: ResponseSnapshot,
) -> Result<ResponseSnapshot, ApiError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            method: method.to_string(),
            path: path.to_string(),
            status: response.status,
            body: response.body,
        })
    }
}
