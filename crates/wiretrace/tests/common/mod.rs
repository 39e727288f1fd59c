#![allow(dead_code)]

use std::collections::VecDeque;
use wiretrace::trace::{Headers, ResponseSnapshot};
use wiretrace::transport::Transport;
use wiretrace::utils::error::TransportError;

/// Stand-in for the network: answers requests with queued responses and
/// remembers what it was asked.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: VecDeque<ResponseSnapshot>,
    current: Option<ResponseSnapshot>,
    pub requests: Vec<(String, String, String, Headers)>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<ResponseSnapshot>) -> Self {
        Self {
            responses: responses.into(),
            ..Default::default()
        }
    }
}

impl Transport for ScriptedTransport {
    fn request(
        &mut self,
        method: &str,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<(), TransportError> {
        self.requests
            .push((method.into(), url.into(), body.into(), headers.clone()));
        self.current = self.responses.pop_front();
        Ok(())
    }

    fn get_response(&mut self) -> Result<ResponseSnapshot, TransportError> {
        self.current
            .take()
            .ok_or(TransportError::OutOfSequence("no scripted response left"))
    }

    fn close(&mut self) -> Result<(), TransportError> {
        Ok(())
    }
}

pub fn headers(pairs: &[(&str, &str)]) -> Headers {
    pairs.iter().map(|(n, v)| (*n, *v)).collect()
}

pub fn json_response(status: u16, body: &str) -> ResponseSnapshot {
    ResponseSnapshot::new(status, headers(&[("Content-Type", "application/json")]), body)
}
